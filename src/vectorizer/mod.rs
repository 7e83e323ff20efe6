pub mod similarity;
pub mod tfidf;
pub mod token;
pub mod vocabulary;

use std::marker::PhantomData;

use num::Float;
use serde::Serialize;

use crate::{
    error::SimilarityError,
    utils::math::vector::SparseVec,
    vectorizer::{
        similarity::SimilarityResult,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine, TfScheme},
        token::{TermFrequency, Tokenizer},
        vocabulary::{build_vocabulary, Vocabulary},
    },
};

/// TF-IDF model fitted on exactly two documents.
///
/// `TFIDFVectorizer<N, E>` has the following generic parameters:
/// - `N`: weight type (f32, f64)
/// - `E`: TF-IDF calculation engine (e.g. `DefaultTFIDFEngine`)
///
/// Each instance owns its vocabulary and vectors; nothing is shared
/// between instances.
#[derive(Debug, Clone, Serialize)]
pub struct TFIDFVectorizer<N = f64, E = DefaultTFIDFEngine>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    /// shared indexing of both vectors
    pub vocabulary: Vocabulary,
    /// term counts of document A and B
    pub frequencies: [TermFrequency; 2],
    /// IDF Vector, dense
    pub idf_vec: Vec<N>,
    /// unit-length TF-IDF vectors of document A and B
    pub weights: [SparseVec<N>; 2],
    #[serde(skip)]
    _marker: PhantomData<E>,
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    /// Tokenize both texts and fit the model.
    pub fn fit(
        tokenizer: &Tokenizer,
        text_a: &str,
        text_b: &str,
        scheme: TfScheme,
    ) -> Result<Self, SimilarityError> {
        let (vocabulary, freq_a, freq_b) = build_vocabulary(tokenizer, text_a, text_b);
        Self::fit_frequencies(vocabulary, freq_a, freq_b, scheme)
    }

    /// Fit from already counted documents.
    /// `vocabulary` must contain every term of both frequencies.
    pub fn fit_frequencies(
        vocabulary: Vocabulary,
        freq_a: TermFrequency,
        freq_b: TermFrequency,
        scheme: TfScheme,
    ) -> Result<Self, SimilarityError> {
        let idf_vec = E::idf_vec(&vocabulary);
        let (vec_a, vec_b) =
            tfidf::weight_with_idf::<N, E>(&vocabulary, &freq_a, &freq_b, &idf_vec, scheme)?;
        Ok(Self {
            vocabulary,
            frequencies: [freq_a, freq_b],
            idf_vec,
            weights: [vec_a, vec_b],
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// (A, B)
    #[inline]
    pub fn weights(&self) -> (&SparseVec<N>, &SparseVec<N>) {
        (&self.weights[0], &self.weights[1])
    }

    /// Weight of `term` in document `doc` (0 = A, 1 = B).
    pub fn term_weight(&self, doc: usize, term: &str) -> Option<N> {
        let vec = self.weights.get(doc)?;
        self.vocabulary.index_of(term).map(|idx| vec.get(idx))
    }
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float + Into<f64>,
    E: TFIDFEngine<N>,
{
    /// Cosine similarity and shared terms of the two fitted documents.
    pub fn similarity(&self) -> SimilarityResult {
        similarity::similarity(&self.vocabulary, &self.weights[0], &self.weights[1])
    }
}
