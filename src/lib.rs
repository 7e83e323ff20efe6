/// This crate computes the similarity of two documents with a TF-IDF Vectorizer.
pub mod comparer;
pub mod config;
pub mod error;
pub mod extract;
pub mod utils;
pub mod vectorizer;

/// Document Comparer
/// The top-level struct of this crate.
/// It extracts text from plain text, word-processor and PDF documents and
/// compares two of them, reporting a similarity percentage and the terms
/// both documents share.
///
/// `DocumentComparer<N, E>` has the following generic parameters:
/// - `N`: weight type (f32, f64)
/// - `E`: TF-IDF calculation engine (e.g. `DefaultTFIDFEngine`)
///
/// # Thread Safety
/// The comparer holds no mutable state and can be shared between threads.
/// `compare_batch` runs independent pairs in parallel.
pub use comparer::DocumentComparer;

/// Tokenizer and weighting policy
/// Serializable; every field has a default so partial configs load.
pub use config::VectorizerConfig;

/// Error taxonomy
/// - `UnsupportedFormat`: unknown format tag / filename extension
/// - `Decode` / `Parse`: malformed bytes for the declared format
/// - `EmptyDocument`: a document has no terms to compare
pub use error::SimilarityError;

/// Text extraction
/// `TextExtractor` maps a `DocumentFormat` to a pluggable `TextDecoder`.
pub use extract::{DocumentFormat, RawDocument, TextDecoder, TextExtractor, Utf8Policy};

/// TF-IDF Vectorizer
/// Model fitted on exactly two documents: shared vocabulary,
/// per-document term counts, IDF vector and unit-length weight vectors.
pub use vectorizer::TFIDFVectorizer;

/// TF IDF Calculation Engine Trait
/// A trait that defines the behavior of a TF-IDF calculation engine.
///
/// `DefaultTFIDFEngine` uses the configured term frequency and smoothed IDF
/// `ln((1 + N) / (1 + df)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine, TfScheme};

/// Term Frequency and Tokenizer
/// `Tokenizer` splits text into terms; `TermFrequency` counts them per document.
pub use vectorizer::token::{TermFrequency, Tokenizer};

/// Vocabulary
/// Ordered, deduplicated terms of both documents with their document frequency.
pub use vectorizer::vocabulary::Vocabulary;

/// Similarity Result
/// Percentage in `[0, 100]` plus the set of shared terms.
pub use vectorizer::similarity::SimilarityResult;

/// Sparse vector used for the weight vectors.
pub use utils::math::vector::SparseVec;

/// Extract normalized text from `bytes` of the declared `format`,
/// with the built-in decoders and strict UTF-8.
///
/// Fails when the bytes are malformed for the format or hold only whitespace.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, SimilarityError> {
    TextExtractor::new().extract(bytes, format)
}

/// Compare two texts with the default `VectorizerConfig`.
///
/// # Examples
/// ```
/// let result = doc_similarity::compute_similarity(
///     "the cat sat on the mat",
///     "the cat sat on the hat",
/// ).unwrap();
/// assert!(result.shared_terms.contains("cat"));
/// assert!(result.percentage > 0.0 && result.percentage < 100.0);
/// ```
pub fn compute_similarity(text_a: &str, text_b: &str) -> Result<SimilarityResult, SimilarityError> {
    DocumentComparer::<f64>::default().compute_similarity(text_a, text_b)
}

/// Extract both raw documents and compare them with the default config.
pub fn compare_documents(doc_a: &RawDocument, doc_b: &RawDocument) -> Result<SimilarityResult, SimilarityError> {
    DocumentComparer::<f64>::default().compare_documents(doc_a, doc_b)
}
