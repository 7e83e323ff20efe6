use num::{Float, NumCast};
use serde::{Deserialize, Serialize};

use crate::{
    error::SimilarityError,
    utils::math::vector::SparseVec,
    vectorizer::{token::TermFrequency, vocabulary::Vocabulary},
};

/// Term frequency scheme, applied identically to both documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TfScheme {
    /// raw count of the term in the document
    #[default]
    Raw,
    /// 1 + ln(count)
    Sublinear,
}

impl TfScheme {
    #[inline]
    pub fn tf_calc(&self, count: u32) -> f64 {
        if count == 0 {
            return 0.0;
        }
        match self {
            TfScheme::Raw => count as f64,
            TfScheme::Sublinear => 1.0 + (count as f64).ln(),
        }
    }
}

pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// TFベクトルを生成するメソッド
    /// # Arguments
    /// * `freq` - 文書のターム頻度
    /// * `vocabulary` - 次元の並び
    /// * `scheme` - TFの計算方式
    /// # Returns
    /// * `SparseVec<N>` - 長さ `vocabulary.len()` のTFベクトル
    fn tf_vec(freq: &TermFrequency, vocabulary: &Vocabulary, scheme: TfScheme) -> SparseVec<N>;

    /// IDFベクトルを生成するメソッド
    /// dense, one entry per vocabulary term
    fn idf_vec(vocabulary: &Vocabulary) -> Vec<N>;

    /// tf * idf, scaled to unit L2 length
    fn tfidf_vec(tf: &SparseVec<N>, idf: &[N]) -> SparseVec<N> {
        tf.map_nonzero(|idx, val| val * idf.get(idx).copied().unwrap_or_else(N::zero))
            .l2_normalized()
    }
}

/// デフォルトのTF-IDFエンジン
/// - tf: `TfScheme`
/// - idf: smoothed, `ln((1 + N) / (1 + df)) + 1`
///
/// A term present in only one of two documents gets `ln(3/2) + 1`,
/// a term present in both gets exactly `1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

#[inline]
fn from_f64<N: Float>(value: f64) -> N {
    <N as NumCast>::from(value).unwrap_or_else(N::zero)
}

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    fn tf_vec(freq: &TermFrequency, vocabulary: &Vocabulary, scheme: TfScheme) -> SparseVec<N> {
        let mut tf_vec = SparseVec::with_capacity(freq.term_num());
        for term in vocabulary.terms() {
            let count = freq.term_count(term);
            tf_vec.push(from_f64(scheme.tf_calc(count)));
        }
        tf_vec.shrink_to_fit();
        tf_vec
    }

    fn idf_vec(vocabulary: &Vocabulary) -> Vec<N> {
        let doc_num = vocabulary.doc_num();
        vocabulary
            .iter()
            .map(|(_, doc_freq)| from_f64(Self::idf_calc(doc_num, doc_freq)))
            .collect()
    }
}

/// Weight both documents over the shared vocabulary.
///
/// # Returns
/// * `(SparseVec<N>, SparseVec<N>)` - unit-length TF-IDF vectors of A and B
///
/// Fails with `SimilarityError::EmptyDocument` when either document has no terms.
pub fn weight<N, E>(
    vocabulary: &Vocabulary,
    freq_a: &TermFrequency,
    freq_b: &TermFrequency,
    scheme: TfScheme,
) -> Result<(SparseVec<N>, SparseVec<N>), SimilarityError>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    let idf = E::idf_vec(vocabulary);
    weight_with_idf::<N, E>(vocabulary, freq_a, freq_b, &idf, scheme)
}

/// `weight` with an IDF vector already computed from `vocabulary`.
pub(crate) fn weight_with_idf<N, E>(
    vocabulary: &Vocabulary,
    freq_a: &TermFrequency,
    freq_b: &TermFrequency,
    idf: &[N],
    scheme: TfScheme,
) -> Result<(SparseVec<N>, SparseVec<N>), SimilarityError>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    if freq_a.is_empty() || freq_b.is_empty() {
        return Err(SimilarityError::EmptyDocument);
    }
    let vec_a = E::tfidf_vec(&E::tf_vec(freq_a, vocabulary, scheme), idf);
    let vec_b = E::tfidf_vec(&E::tf_vec(freq_b, vocabulary, scheme), idf);
    Ok((vec_a, vec_b))
}
