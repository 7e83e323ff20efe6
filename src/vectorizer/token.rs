use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::VectorizerConfig;

/// Tokenizer
/// Splits normalized text into terms.
///
/// Boundary rule:
/// - the text is lower-cased first (when `lowercase` is set)
/// - a term is a maximal run of word characters, where a word character is
///   `char::is_alphanumeric` or `_`; every other character is a separator
/// - runs shorter than `min_term_len` characters are dropped
/// - terms in `stop_words` are dropped (empty by default)
#[derive(Debug, Clone)]
pub struct Tokenizer {
    lowercase: bool,
    min_term_len: usize,
    stop_words: HashSet<String>,
}

impl Tokenizer {
    pub fn new(config: &VectorizerConfig) -> Self {
        let stop_words = config
            .stop_words
            .iter()
            .map(|w| if config.lowercase { w.to_lowercase() } else { w.clone() })
            .collect();
        Self {
            lowercase: config.lowercase,
            min_term_len: config.min_term_len.max(1),
            stop_words,
        }
    }

    #[inline]
    fn is_term_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    /// Split `text` into terms, in order of occurrence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let folded;
        let text = if self.lowercase {
            folded = text.to_lowercase();
            folded.as_str()
        } else {
            text
        };
        text.split(|c: char| !Self::is_term_char(c))
            .filter(|term| term.chars().count() >= self.min_term_len)
            .filter(|term| !self.stop_words.contains(*term))
            .map(str::to_string)
            .collect()
    }

    /// Tokenize `text` and count its terms.
    pub fn term_frequency(&self, text: &str) -> TermFrequency {
        let mut freq = TermFrequency::new();
        freq.add_terms(&self.tokenize(text));
        freq
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&VectorizerConfig::default())
    }
}

/// TermFrequency 構造体
/// termの出現頻度と総term数を管理するための構造体です
/// Iteration order is the order of first occurrence.
///
/// # Examples
/// ```
/// use doc_similarity::TermFrequency;
/// let mut freq = TermFrequency::new();
/// freq.add_term("rust");
/// freq.add_term("fast");
/// freq.add_term("rust");
/// assert_eq!(freq.term_count("rust"), 2);
/// assert_eq!(freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

/// Termの追加の実装
impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// termを追加する
    ///
    /// # Arguments
    /// * `term` - 追加するターム
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// 複数のtermを追加する
    ///
    /// # Arguments
    /// * `terms` - 追加するタームのスライス
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }
}

/// TermFrequencyの情報を取得するための実装
impl TermFrequency {
    /// あるtermの出現回数を取得します
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// 全termのカウントの合計
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// distinct terms, first occurrence order
    #[inline]
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(|s| s.as_str()).collect()
    }

    /// `(term, count)` pairs, first occurrence order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }
}
