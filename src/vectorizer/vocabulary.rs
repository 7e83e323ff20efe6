use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::{TermFrequency, Tokenizer};

/// Vocabulary
/// The ordered, deduplicated set of terms seen across the compared documents.
///
/// A term's index is its order of first encounter: document A is scanned
/// fully, then document B. Both weight vectors use this indexing.
/// For every term it also keeps the number of documents containing it,
/// which is the base data of the IDF calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// term -> document frequency
    #[serde(with = "indexmap::map::serde_seq")]
    term_doc_counts: IndexMap<Box<str>, u64>,
    /// number of documents added
    doc_num: u64,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self {
            term_doc_counts: IndexMap::new(),
            doc_num: 0,
        }
    }

    /// Add a document's distinct terms.
    /// New terms are appended in the document's first occurrence order.
    pub fn add_document(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for term in freq.term_set_ref_str() {
            if let Some(count) = self.term_doc_counts.get_mut(term) {
                *count += 1;
            } else {
                self.term_doc_counts.insert(term.into(), 1);
            }
        }
    }

    /// Number of documents added.
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`.
    #[inline]
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.term_doc_counts.get(term).copied().unwrap_or(0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.term_doc_counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_doc_counts.is_empty()
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.term_doc_counts.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.term_doc_counts.get_index(index).map(|(term, _)| &**term)
    }

    /// Terms in index order.
    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.term_doc_counts.keys().map(|term| &**term)
    }

    /// `(term, document frequency)` in index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.term_doc_counts.iter().map(|(term, &df)| (&**term, df))
    }
}

/// Tokenize both documents and build their shared vocabulary.
///
/// # Returns
/// * `(Vocabulary, TermFrequency, TermFrequency)` - vocabulary, counts of A, counts of B
pub fn build_vocabulary(
    tokenizer: &Tokenizer,
    text_a: &str,
    text_b: &str,
) -> (Vocabulary, TermFrequency, TermFrequency) {
    let freq_a = tokenizer.term_frequency(text_a);
    let freq_b = tokenizer.term_frequency(text_b);
    let mut vocabulary = Vocabulary::new();
    vocabulary.add_document(&freq_a);
    vocabulary.add_document(&freq_b);
    tracing::debug!(
        terms = vocabulary.len(),
        terms_a = freq_a.term_num(),
        terms_b = freq_b.term_num(),
        tokens_a = freq_a.term_sum(),
        tokens_b = freq_b.term_sum(),
        "built vocabulary"
    );
    (vocabulary, freq_a, freq_b)
}
