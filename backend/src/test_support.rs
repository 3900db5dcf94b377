//! Test utilities shared by the integration tests in `tests/`.
//!
//! Only compiled with the `test-support` feature.

use std::io::{self, Write};

use tempfile::NamedTempFile;

/// Minimum key material accepted by the session configuration.
pub const SESSION_KEY_LEN: usize = 64;

/// Password accepted for every fixture account.
pub const FIXTURE_PASSWORD: &str = "password";

/// Write a session key of `len` bytes to a temporary file.
///
/// The file is removed when the returned handle drops.
///
/// # Examples
///
/// ```rust
/// use backend::test_support::{SESSION_KEY_LEN, session_key_file};
///
/// let file = session_key_file(SESSION_KEY_LEN)?;
/// assert_eq!(std::fs::read(file.path())?.len(), SESSION_KEY_LEN);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn session_key_file(len: usize) -> io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(&vec![b'k'; len])?;
    file.flush()?;
    Ok(file)
}

/// JSON body for `POST /api/login` as a fixture account.
pub fn login_body(username: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "password": FIXTURE_PASSWORD })
}
