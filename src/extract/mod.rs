pub mod docx;
pub mod pdf;
pub mod text;

use std::{fmt, path::Path, str::FromStr, sync::Arc};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SimilarityError;

pub use docx::WordDocumentDecoder;
pub use pdf::PdfDecoder;
pub use text::{PlainTextDecoder, Utf8Policy};

/// Declared encoding of a raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    /// UTF-8 plain text (`.txt`)
    Text,
    /// Office Open XML word-processor document (`.docx`)
    WordDocument,
    /// Portable Document Format (`.pdf`)
    Pdf,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [
        DocumentFormat::Text,
        DocumentFormat::WordDocument,
        DocumentFormat::Pdf,
    ];

    /// Tag name used in configuration and diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "text",
            DocumentFormat::WordDocument => "word-document",
            DocumentFormat::Pdf => "pdf",
        }
    }

    /// Filename extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "txt",
            DocumentFormat::WordDocument => "docx",
            DocumentFormat::Pdf => "pdf",
        }
    }

    /// Resolve a filename extension (with or without the dot, any case).
    pub fn from_extension(ext: &str) -> Result<Self, SimilarityError> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == ext)
            .ok_or(SimilarityError::UnsupportedFormat(ext))
    }

    /// Resolve the format from a filename or path.
    pub fn from_filename(name: impl AsRef<Path>) -> Result<Self, SimilarityError> {
        let path = name.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => Err(SimilarityError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DocumentFormat {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.tag() == s)
            .ok_or_else(|| SimilarityError::UnsupportedFormat(s.to_string()))
    }
}

/// Raw byte content plus its declared format.
/// Discarded once the text has been extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Vec<u8>>, format: DocumentFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    /// Build from an uploaded/loaded file, resolving the format from its name.
    pub fn from_filename(
        name: impl AsRef<Path>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, SimilarityError> {
        let format = DocumentFormat::from_filename(name)?;
        Ok(Self::new(bytes, format))
    }
}

/// Format-specific decoder: given bytes, return the document text or fail.
/// Implementations must be pure.
pub trait TextDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<String, SimilarityError>;
}

/// Text Extractor
/// Holds one decoder per `DocumentFormat` and converts raw bytes
/// into normalized text.
/// Decoders can be replaced with `with_decoder`.
#[derive(Clone)]
pub struct TextExtractor {
    decoders: IndexMap<DocumentFormat, Arc<dyn TextDecoder>>,
}

impl TextExtractor {
    /// Extractor with the built-in decoders and strict UTF-8.
    pub fn new() -> Self {
        Self::with_utf8_policy(Utf8Policy::Strict)
    }

    pub fn with_utf8_policy(policy: Utf8Policy) -> Self {
        Self::empty()
            .with_decoder(DocumentFormat::Text, PlainTextDecoder::new(policy))
            .with_decoder(DocumentFormat::WordDocument, WordDocumentDecoder)
            .with_decoder(DocumentFormat::Pdf, PdfDecoder)
    }

    /// Extractor without any decoder registered.
    pub fn empty() -> Self {
        Self {
            decoders: IndexMap::new(),
        }
    }

    /// Register (or replace) the decoder for `format`.
    pub fn with_decoder<D>(mut self, format: DocumentFormat, decoder: D) -> Self
    where
        D: TextDecoder + 'static,
    {
        self.decoders.insert(format, Arc::new(decoder));
        self
    }

    pub fn supports(&self, format: DocumentFormat) -> bool {
        self.decoders.contains_key(&format)
    }

    /// Convert raw bytes into normalized text.
    ///
    /// # Arguments
    /// * `bytes` - document content
    /// * `format` - declared format
    ///
    /// # Returns
    /// * `String` - text with at least one non-whitespace character
    pub fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, SimilarityError> {
        let decoder = self
            .decoders
            .get(&format)
            .ok_or_else(|| SimilarityError::UnsupportedFormat(format.tag().to_string()))?;
        if bytes.is_empty() {
            return Err(SimilarityError::EmptyDocument);
        }
        let text = decoder.decode(bytes)?;
        if text.trim().is_empty() {
            return Err(SimilarityError::EmptyDocument);
        }
        tracing::debug!(%format, bytes = bytes.len(), chars = text.chars().count(), "extracted text");
        Ok(text)
    }

    pub fn extract_document(&self, doc: &RawDocument) -> Result<String, SimilarityError> {
        self.extract(&doc.bytes, doc.format)
    }

    /// Resolve the format from `filename` and extract.
    pub fn extract_file(&self, filename: impl AsRef<Path>, bytes: &[u8]) -> Result<String, SimilarityError> {
        let format = DocumentFormat::from_filename(filename)?;
        self.extract(bytes, format)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextExtractor")
            .field("formats", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;
    impl TextDecoder for Upper {
        fn decode(&self, bytes: &[u8]) -> Result<String, SimilarityError> {
            Ok(String::from_utf8_lossy(bytes).to_uppercase())
        }
    }

    #[test]
    fn format_resolves_from_filename_case_insensitively() {
        assert_eq!(DocumentFormat::from_filename("notes.txt"), Ok(DocumentFormat::Text));
        assert_eq!(DocumentFormat::from_filename("Report.DOCX"), Ok(DocumentFormat::WordDocument));
        assert_eq!(DocumentFormat::from_filename("/tmp/paper.pdf"), Ok(DocumentFormat::Pdf));
        assert_eq!(
            DocumentFormat::from_filename("letter.rtf"),
            Err(SimilarityError::UnsupportedFormat("rtf".into()))
        );
        assert!(matches!(
            DocumentFormat::from_filename("README"),
            Err(SimilarityError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn format_parses_its_tag() {
        for format in DocumentFormat::ALL {
            assert_eq!(format.tag().parse::<DocumentFormat>(), Ok(format));
        }
        assert!("markdown".parse::<DocumentFormat>().is_err());
    }

    #[test]
    fn unsupported_extension_yields_no_text() {
        let extractor = TextExtractor::new();
        let res = extractor.extract_file("memo.rtf", b"{\\rtf1 hello}");
        assert_eq!(res, Err(SimilarityError::UnsupportedFormat("rtf".into())));
    }

    #[test]
    fn empty_or_blank_text_is_an_extraction_failure() {
        let extractor = TextExtractor::new();
        assert_eq!(extractor.extract(b"", DocumentFormat::Text), Err(SimilarityError::EmptyDocument));
        assert_eq!(
            extractor.extract(b" \n\t ", DocumentFormat::Text),
            Err(SimilarityError::EmptyDocument)
        );
    }

    #[test]
    fn decoders_are_pluggable() {
        let extractor = TextExtractor::empty();
        assert!(!extractor.supports(DocumentFormat::Text));
        assert!(matches!(
            extractor.extract(b"abc", DocumentFormat::Text),
            Err(SimilarityError::UnsupportedFormat(_))
        ));

        let extractor = extractor.with_decoder(DocumentFormat::Text, Upper);
        assert_eq!(extractor.extract(b"abc", DocumentFormat::Text), Ok("ABC".to_string()));
    }

    #[test]
    fn extraction_is_deterministic() {
        let extractor = TextExtractor::new();
        let bytes = [0x66, 0x6f, 0xff, 0x6f];
        let first = extractor.extract(&bytes, DocumentFormat::Text);
        let second = extractor.extract(&bytes, DocumentFormat::Text);
        assert!(matches!(first, Err(SimilarityError::Decode(_))));
        assert_eq!(first, second);
    }
}
