use std::marker::PhantomData;

use num::Float;
use rayon::prelude::*;

use crate::{
    config::VectorizerConfig,
    error::SimilarityError,
    extract::{DocumentFormat, RawDocument, TextExtractor},
    vectorizer::{
        similarity::SimilarityResult,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine, TfScheme},
        token::Tokenizer,
        TFIDFVectorizer,
    },
};

/// Document Comparer
/// Extracts text from raw documents and computes their TF-IDF cosine
/// similarity under one `VectorizerConfig`.
///
/// Holds no mutable state; a single instance can serve many threads.
#[derive(Debug, Clone)]
pub struct DocumentComparer<N = f64, E = DefaultTFIDFEngine>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    config: VectorizerConfig,
    tokenizer: Tokenizer,
    extractor: TextExtractor,
    _marker: PhantomData<(N, E)>,
}

impl<N, E> DocumentComparer<N, E>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(&config),
            extractor: TextExtractor::with_utf8_policy(config.utf8),
            config,
            _marker: PhantomData,
        }
    }

    /// Swap the extractor, e.g. to plug in a custom decoder.
    pub fn with_extractor(mut self, extractor: TextExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    #[inline]
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    #[inline]
    pub fn tf_scheme(&self) -> TfScheme {
        self.config.tf_scheme
    }

    #[inline]
    pub fn extractor(&self) -> &TextExtractor {
        &self.extractor
    }

    /// Convert raw bytes of the declared format into text.
    pub fn extract_text(&self, bytes: &[u8], format: DocumentFormat) -> Result<String, SimilarityError> {
        self.extractor.extract(bytes, format)
    }

    /// Fit the TF-IDF model on the pair without reducing it to a score.
    pub fn vectorize(&self, text_a: &str, text_b: &str) -> Result<TFIDFVectorizer<N, E>, SimilarityError> {
        TFIDFVectorizer::fit(&self.tokenizer, text_a, text_b, self.config.tf_scheme)
    }

    /// Similarity percentage and shared terms of two texts.
    pub fn compute_similarity(&self, text_a: &str, text_b: &str) -> Result<SimilarityResult, SimilarityError> {
        let model = self.vectorize(text_a, text_b)?;
        Ok(model.similarity())
    }

    /// Extract both documents, then compare them.
    pub fn compare_documents(&self, doc_a: &RawDocument, doc_b: &RawDocument) -> Result<SimilarityResult, SimilarityError> {
        let text_a = self.extractor.extract_document(doc_a)?;
        let text_b = self.extractor.extract_document(doc_b)?;
        self.compute_similarity(&text_a, &text_b)
    }

    /// Compare many independent pairs in parallel.
    /// Results keep the order of `pairs`.
    pub fn compare_batch<S>(&self, pairs: &[(S, S)]) -> Vec<Result<SimilarityResult, SimilarityError>>
    where
        S: AsRef<str> + Sync,
    {
        pairs
            .par_iter()
            .map(|(a, b)| self.compute_similarity(a.as_ref(), b.as_ref()))
            .collect()
    }
}

impl<N, E> Default for DocumentComparer<N, E>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_matches_sequential_results() {
        let comparer: DocumentComparer = DocumentComparer::default();
        let pairs = vec![
            ("the cat sat on the mat", "the cat sat on the hat"),
            ("apple banana", "car truck"),
            ("", "not empty"),
        ];
        let batch = comparer.compare_batch(&pairs);
        assert_eq!(batch.len(), 3);
        for ((a, b), res) in pairs.iter().zip(batch) {
            assert_eq!(res, comparer.compute_similarity(a, b));
        }
    }

    #[test]
    fn stop_words_from_config_shrink_shared_terms() {
        let plain: DocumentComparer = DocumentComparer::default();
        let filtered: DocumentComparer =
            DocumentComparer::new(VectorizerConfig::default().with_stop_words(["the", "on"]));

        let a = "the cat sat on the mat";
        let b = "the cat sat on the hat";
        let with_all = plain.compute_similarity(a, b).unwrap();
        let without = filtered.compute_similarity(a, b).unwrap();
        assert!(with_all.shared_terms.contains("the"));
        assert!(!without.shared_terms.contains("the"));
        assert_eq!(without.sorted_shared_terms(), vec!["cat", "sat"]);
    }

    #[test]
    fn compare_documents_extracts_first() {
        let comparer: DocumentComparer<f32> = DocumentComparer::default();
        let a = RawDocument::from_filename("a.txt", "shared words here").unwrap();
        let b = RawDocument::new("shared words there", DocumentFormat::Text);
        let result = comparer.compare_documents(&a, &b).unwrap();
        assert_eq!(result.sorted_shared_terms(), vec!["shared", "words"]);

        let broken = RawDocument::new(vec![0xffu8, 0xfe], DocumentFormat::Text);
        assert!(matches!(
            comparer.compare_documents(&a, &broken),
            Err(SimilarityError::Decode(_))
        ));
    }
}
