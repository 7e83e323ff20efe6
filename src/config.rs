use serde::{Deserialize, Serialize};

use crate::{extract::Utf8Policy, vectorizer::tfidf::TfScheme};

/// Tokenization and weighting policy.
///
/// The defaults mirror the reference vectorizer: lower-casing, terms of
/// two or more word characters, no stop words, raw term counts and
/// strict UTF-8 decoding.
///
/// Every field may be omitted from a serialized config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// fold terms to lower case before counting
    pub lowercase: bool,
    /// shortest term kept, in characters
    pub min_term_len: usize,
    /// terms removed after tokenization
    pub stop_words: Vec<String>,
    pub tf_scheme: TfScheme,
    pub utf8: Utf8Policy,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_term_len: 2,
            stop_words: Vec::new(),
            tf_scheme: TfScheme::Raw,
            utf8: Utf8Policy::Strict,
        }
    }
}

impl VectorizerConfig {
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn with_min_term_len(mut self, min_term_len: usize) -> Self {
        self.min_term_len = min_term_len;
        self
    }

    pub fn with_stop_words<I, S>(mut self, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = stop_words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tf_scheme(mut self, tf_scheme: TfScheme) -> Self {
        self.tf_scheme = tf_scheme;
        self
    }

    pub fn with_utf8_policy(mut self, utf8: Utf8Policy) -> Self {
        self.utf8 = utf8;
        self
    }
}
