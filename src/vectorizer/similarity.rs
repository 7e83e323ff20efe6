use std::{collections::HashSet, fmt};

use num::Float;
use serde::{Deserialize, Serialize};

use crate::{utils::math::vector::SparseVec, vectorizer::vocabulary::Vocabulary};

/// Result of comparing two documents.
/// Computed fresh for every pair; never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// cosine similarity * 100, within `[0, 100]`
    pub percentage: f64,
    /// vocabulary terms with non-zero weight in both documents
    pub shared_terms: HashSet<String>,
}

impl SimilarityResult {
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// cosine similarity in `[0, 1]`
    #[inline]
    pub fn score(&self) -> f64 {
        self.percentage / 100.0
    }

    #[inline]
    pub fn shared_terms(&self) -> &HashSet<String> {
        &self.shared_terms
    }

    /// Shared terms in dictionary order, for display.
    pub fn sorted_shared_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.shared_terms.iter().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }
}

impl fmt::Display for SimilarityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The documents are {:.2}% similar.", self.percentage)
    }
}

/// Compare two weight vectors built over `vocabulary`.
///
/// # Arguments
/// * `vocabulary` - shared indexing of both vectors
/// * `vec_a` / `vec_b` - TF-IDF vectors
///
/// # Returns
/// * `SimilarityResult` - cosine percentage and the intersection of both supports
pub fn similarity<N>(vocabulary: &Vocabulary, vec_a: &SparseVec<N>, vec_b: &SparseVec<N>) -> SimilarityResult
where
    N: Float + Into<f64>,
{
    let shared_terms: HashSet<String> = vec_a
        .support_intersection(vec_b)
        .into_iter()
        .filter_map(|idx| vocabulary.term(idx).map(str::to_string))
        .collect();

    // 単位ベクトル同士なので実質ドット積
    let cosine = vec_a.cosine_similarity(vec_b);
    let percentage = if shared_terms.is_empty() {
        0.0
    } else {
        (cosine * 100.0).clamp(0.0, 100.0)
    };
    tracing::debug!(percentage, shared = shared_terms.len(), "computed similarity");

    SimilarityResult {
        percentage,
        shared_terms,
    }
}
