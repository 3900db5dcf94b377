//! Opaque, URL-safe continuation tokens.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Reasons a token could not be turned back into a cursor.
#[derive(Debug, Error)]
pub enum CursorError {
    /// The token is not valid unpadded base64url.
    #[error("cursor is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    /// The decoded bytes are not the expected JSON key.
    #[error("cursor payload is malformed: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A key of type `K` carried as an opaque string.
///
/// Clients echo the token back verbatim; only the server interprets it.
///
/// # Examples
/// ```
/// use pagination::Cursor;
///
/// let token = Cursor::new(7_u32).encode().expect("encode cursor");
/// let decoded: Cursor<u32> = Cursor::decode(&token).expect("decode cursor");
/// assert_eq!(decoded.into_key(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<K> {
    key: K,
}

impl<K> Cursor<K> {
    /// Wrap a key.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// Borrow the wrapped key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Unwrap the key.
    #[must_use]
    pub fn into_key(self) -> K {
        self.key
    }
}

impl<K: Serialize> Cursor<K> {
    /// Render the cursor as an unpadded base64url token.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Payload`] when `K` fails to serialise.
    pub fn encode(&self) -> Result<String, CursorError> {
        let bytes = serde_json::to_vec(&self.key)?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

impl<K: DeserializeOwned> Cursor<K> {
    /// Parse a token produced by [`Cursor::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`CursorError`] when the token is not base64url or does not
    /// hold a JSON `K`.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD.decode(token.trim())?;
        let key = serde_json::from_slice(&bytes)?;
        Ok(Self { key })
    }
}
