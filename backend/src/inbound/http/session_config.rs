//! Cookie-session settings read from the environment.
//!
//! | Variable | Release | Debug default |
//! |---|---|---|
//! | `SESSION_KEY_FILE` | key of at least 64 bytes | generated key when unreadable |
//! | `SESSION_COOKIE_SECURE` | required | `true` |
//! | `SESSION_SAMESITE` | required, `None` needs a secure cookie | `Lax` |
//! | `SESSION_ALLOW_EPHEMERAL` | required, must be false | `false` |
//!
//! Debug builds log a warning and fall back; release builds refuse to start.

pub mod fingerprint;
mod env_reader;

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

use self::env_reader::EnvReader;
use self::fingerprint::key_fingerprint;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";

/// How strictly session variables are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or malformed variables fall back to development defaults.
    Debug,
    /// Every variable must be present and valid.
    Release,
}

impl BuildMode {
    /// Mode matching the current compilation profile.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) {
    ///     BuildMode::Debug
    /// } else {
    ///     BuildMode::Release
    /// };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie-session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for session cookies.
    pub key: Key,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Short, non-secret identifier of the active key for startup logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        key_fingerprint(&self.key)
    }
}

/// Reasons the session settings are unusable.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required variable is unset.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable holds an unrecognised value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file holds too little material.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` was requested without a secure cookie.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Ephemeral keys were enabled in a release build.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate session settings.
///
/// # Examples
///
/// ```rust
/// use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("recipes_session_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
/// let key_path = key_path.to_string_lossy().into_owned();
///
/// let mut env = MockEnv::new();
/// let path = key_path.clone();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.fingerprint().len(), 16);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let reader = EnvReader::new(env, mode);
    let cookie_secure = reader.flag(COOKIE_SECURE_ENV, true)?;
    let same_site = reader.same_site(SAMESITE_ENV, cookie_secure)?;
    let allow_ephemeral = reader.flag(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key_path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    let key = load_key(key_path, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Derive the cookie key from the key file.
///
/// Debug builds fall back to a random key when the file is unreadable or too
/// short; release builds only do so for an unreadable file with ephemeral
/// keys allowed. Sessions signed with a random key end on restart.
fn load_key(
    path: PathBuf,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let material = match std::fs::read(&path) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "session key unreadable; signed-in users will be logged out on restart"
            );
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };
    if material.len() >= SESSION_KEY_MIN_LEN {
        return Ok(Key::derive_from(&material));
    }
    let error = SessionConfigError::KeyTooShort {
        length: material.len(),
        path,
        min_len: SESSION_KEY_MIN_LEN,
    };
    if mode.is_debug() {
        warn!(%error, "using a random session key");
        Ok(Key::generate())
    } else {
        Err(error)
    }
}
