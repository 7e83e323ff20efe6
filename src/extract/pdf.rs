use std::panic;

use crate::{
    error::SimilarityError,
    extract::{DocumentFormat, TextDecoder},
};

/// Decoder for `DocumentFormat::Pdf`.
///
/// Text is extracted page by page, each page followed by a newline.
/// A page without extractable text (scanned image) contributes an empty
/// line; only a container that cannot be opened fails.
///
/// A panic inside `pdf-extract` is caught and returned as a parse error, but
/// the process panic hook still runs first, so the default hook prints the
/// panic message to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDecoder;

impl TextDecoder for PdfDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, SimilarityError> {
        // pdf-extract panics on some malformed content streams
        let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
            .map_err(|_| {
                tracing::warn!("pdf backend panicked while reading document");
                parse_error("pdf backend aborted while reading the document".to_string())
            })?
            .map_err(|e| parse_error(e.to_string()))?;

        Ok(join_pages(&pages))
    }
}

fn parse_error(message: String) -> SimilarityError {
    SimilarityError::Parse {
        format: DocumentFormat::Pdf,
        message,
    }
}

fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    let mut blank = 0usize;
    for page in pages {
        let page = page.as_ref();
        if page.trim().is_empty() {
            blank += 1;
        }
        text.push_str(page);
        text.push('\n');
    }
    tracing::debug!(pages = pages.len(), blank_pages = blank, "parsed pdf document");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compare_documents, extract::RawDocument, vectorizer::token::Tokenizer};

    #[test]
    fn pages_end_with_newline_and_blank_pages_are_kept() {
        let text = join_pages(&["page one", "", "page three"]);
        assert_eq!(text, "page one\n\npage three\n");
    }

    /// Minimal PDF: one object per entry of `objects`, numbered from 1,
    /// with a byte-exact cross-reference table.
    fn build_pdf(objects: &[String]) -> Vec<u8> {
        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }
        let xref = out.len();
        out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            out.push_str(&format!("{:010} 00000 n \n", offset));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        ));
        out.into_bytes()
    }

    fn stream(content: &str) -> String {
        format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content)
    }

    /// Two pages: the first shows `text`, the second has no text at all.
    fn two_page_pdf(text: &str) -> Vec<u8> {
        let page = |contents: usize| {
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 7 0 R >> >> /Contents {} 0 R >>",
                contents
            )
        };
        build_pdf(&[
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R 5 0 R] /Count 2 >>".to_string(),
            page(4),
            stream(&format!("BT /F1 24 Tf 72 700 Td ({}) Tj ET", text)),
            page(6),
            stream(""),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ])
    }

    #[test]
    fn blank_second_page_adds_an_empty_line() {
        let text = PdfDecoder.decode(&two_page_pdf("Hello world")).unwrap();
        let first_page = text
            .strip_suffix("\n\n")
            .expect("blank page keeps its line");
        assert_eq!(first_page.split_whitespace().collect::<Vec<_>>(), vec!["Hello", "world"]);
        assert_eq!(Tokenizer::default().tokenize(&text), vec!["hello", "world"]);
    }

    #[test]
    fn pdf_compares_equal_to_the_same_plain_text() {
        let pdf = RawDocument::from_filename("paper.pdf", two_page_pdf("the cat sat on the mat"))
            .unwrap();
        let txt = RawDocument::from_filename("paper.txt", "the cat sat on the mat").unwrap();
        let result = compare_documents(&pdf, &txt).unwrap();
        assert!((result.percentage - 100.0).abs() <= 0.01);
        assert_eq!(result.sorted_shared_terms(), vec!["cat", "mat", "on", "sat", "the"]);
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let res = PdfDecoder.decode(b"definitely not a pdf");
        assert!(matches!(
            res,
            Err(SimilarityError::Parse { format: DocumentFormat::Pdf, .. })
        ));
    }
}
