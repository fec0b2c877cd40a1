//! Reversible encoding of trainer instance names.
//!
//! Training ids embed the owning trainer's name so that the name can be
//! recovered from the id alone. The encoding is a plain base transform:
//! deterministic, stateless, and invertible from any number of concurrent
//! callers. It is not a cryptographic hash and does not resist forgery; the
//! only requirements are that it round-trips and that tokens stay free of
//! the id delimiter and path separators.

use crate::error::{TrainingError, TrainingResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encodes a trainer instance name into an opaque token.
///
/// The token uses the URL-safe base64 alphabet, so it never contains the
/// `:` id delimiter or a path separator.
#[must_use]
pub fn encode_trainer_name(name: &str) -> String {
    URL_SAFE_NO_PAD.encode(name.as_bytes())
}

/// Decodes a token produced by [`encode_trainer_name`].
///
/// # Errors
/// Returns `InvalidToken` for any token this codec could not have produced.
pub fn decode_trainer_name(token: &str) -> TrainingResult<String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.as_bytes())
        .map_err(|_| TrainingError::InvalidToken(token.to_string()))?;
    String::from_utf8(bytes).map_err(|_| TrainingError::InvalidToken(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ID_DELIMITER;

    #[test]
    fn test_round_trip() {
        for name in ["local", "cluster-a", "trainer with spaces", "ünïcode-träiner", ""] {
            let token = encode_trainer_name(name);
            assert_eq!(decode_trainer_name(&token).unwrap(), name);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(encode_trainer_name("default"), encode_trainer_name("default"));
    }

    #[test]
    fn test_token_avoids_delimiter_and_separators() {
        let token = encode_trainer_name("a:trainer/with\\everything");
        assert!(!token.contains(ID_DELIMITER));
        assert!(!token.contains('/'));
        assert!(!token.contains('\\'));
    }

    #[test]
    fn test_decode_rejects_foreign_token() {
        // '!' is outside the alphabet
        assert!(matches!(
            decode_trainer_name("not!a!token"),
            Err(TrainingError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_utf8_payload() {
        // Valid base64 for the byte 0xFF, which is not valid UTF-8
        let token = URL_SAFE_NO_PAD.encode([0xFF]);
        assert!(matches!(
            decode_trainer_name(&token),
            Err(TrainingError::InvalidToken(_))
        ));
    }
}
