use serde::{Deserialize, Serialize};

use crate::{error::SimilarityError, extract::TextDecoder};

/// How invalid UTF-8 in plain text is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Utf8Policy {
    /// reject the document with `SimilarityError::Decode`
    #[default]
    Strict,
    /// replace invalid sequences with U+FFFD
    Lossy,
}

/// Decoder for `DocumentFormat::Text`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextDecoder {
    policy: Utf8Policy,
}

impl PlainTextDecoder {
    pub fn new(policy: Utf8Policy) -> Self {
        Self { policy }
    }
}

impl TextDecoder for PlainTextDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, SimilarityError> {
        match self.policy {
            Utf8Policy::Strict => Ok(std::str::from_utf8(bytes)?.to_owned()),
            Utf8Policy::Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_rejects_invalid_sequences() {
        let decoder = PlainTextDecoder::new(Utf8Policy::Strict);
        assert_eq!(decoder.decode("héllo".as_bytes()), Ok("héllo".to_string()));
        assert!(matches!(
            decoder.decode(&[b'a', 0xc3, 0x28]),
            Err(SimilarityError::Decode(_))
        ));
    }

    #[test]
    fn lossy_replaces_invalid_sequences() {
        let decoder = PlainTextDecoder::new(Utf8Policy::Lossy);
        assert_eq!(decoder.decode(&[b'a', 0xff, b'b']), Ok("a\u{FFFD}b".to_string()));
    }
}
