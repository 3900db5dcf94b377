//! Non-secret identifier for the active session key.
//!
//! The server logs the fingerprint at startup so operators can tell which
//! key file a running instance loaded without exposing the key.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Hex-encoded prefix of the SHA-256 digest of the key's signing half.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn derived_keys_fingerprint_deterministically() {
        let key = Key::derive_from(&[b'a'; 64]);
        assert_eq!(key_fingerprint(&key), key_fingerprint(&key.clone()));
    }

    #[rstest]
    fn distinct_keys_have_distinct_fingerprints() {
        let left = key_fingerprint(&Key::derive_from(&[b'a'; 64]));
        let right = key_fingerprint(&Key::derive_from(&[b'b'; 64]));
        assert_ne!(left, right);
    }

    #[rstest]
    fn fingerprint_is_lowercase_hex_of_fixed_length() {
        let fp = key_fingerprint(&Key::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert_eq!(fp, fp.to_lowercase());
    }
}
