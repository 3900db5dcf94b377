//! Typed reads of session variables with build-mode fallbacks.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SessionConfigError};

const FLAG_VALUES: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_VALUES: &str = "Strict|Lax|None";

/// Reads variables from `env`, falling back in debug builds.
pub(super) struct EnvReader<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<'a, E: Env> EnvReader<'a, E> {
    pub(super) fn new(env: &'a E, mode: BuildMode) -> Self {
        Self { env, mode }
    }

    /// Read a boolean flag; debug builds use `dev_default` when it is unusable.
    pub(super) fn flag(
        &self,
        name: &'static str,
        dev_default: bool,
    ) -> Result<bool, SessionConfigError> {
        let Some(raw) = self.env.string(name) else {
            return self.fallback(dev_default, SessionConfigError::MissingEnv { name });
        };
        match parse_flag(&raw) {
            Some(value) => Ok(value),
            None => self.fallback(
                dev_default,
                SessionConfigError::InvalidEnv {
                    name,
                    value: raw,
                    expected: FLAG_VALUES,
                },
            ),
        }
    }

    /// Read the `SameSite` policy; `None` is only honoured for secure cookies.
    pub(super) fn same_site(
        &self,
        name: &'static str,
        cookie_secure: bool,
    ) -> Result<SameSite, SessionConfigError> {
        let Some(raw) = self.env.string(name) else {
            return self.fallback(SameSite::Lax, SessionConfigError::MissingEnv { name });
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" if cookie_secure => Ok(SameSite::None),
            "none" => self.fallback(SameSite::None, SessionConfigError::InsecureSameSiteNone),
            _ => self.fallback(
                SameSite::Lax,
                SessionConfigError::InvalidEnv {
                    name,
                    value: raw,
                    expected: SAMESITE_VALUES,
                },
            ),
        }
    }

    fn fallback<T>(&self, value: T, error: SessionConfigError) -> Result<T, SessionConfigError> {
        if self.mode.is_debug() {
            warn!(error = %error, "using development session default");
            Ok(value)
        } else {
            Err(error)
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;

    fn env_with(value: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .returning(move |_| value.map(str::to_owned));
        env
    }

    #[rstest]
    #[case(" YES ", Some(true))]
    #[case("y", Some(true))]
    #[case("1", Some(true))]
    #[case("False", Some(false))]
    #[case("n", Some(false))]
    #[case("enabled", None)]
    fn flags_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_flag(raw), expected);
    }

    #[rstest]
    #[case::missing(None)]
    #[case::unrecognised(Some("maybe"))]
    fn debug_flags_fall_back_to_the_dev_default(#[case] raw: Option<&'static str>) {
        let env = env_with(raw);
        let reader = EnvReader::new(&env, BuildMode::Debug);
        assert!(reader.flag("SESSION_COOKIE_SECURE", true).expect("fallback"));
    }

    #[rstest]
    fn release_flags_report_the_bad_value() {
        let env = env_with(Some("maybe"));
        let reader = EnvReader::new(&env, BuildMode::Release);
        let err = reader
            .flag("SESSION_COOKIE_SECURE", true)
            .expect_err("release rejects");
        assert!(matches!(
            err,
            SessionConfigError::InvalidEnv { ref value, .. } if value == "maybe"
        ));
    }

    #[rstest]
    #[case::strict(Some("strict"), true, SameSite::Strict)]
    #[case::secure_none(Some("None"), true, SameSite::None)]
    #[case::insecure_none(Some("none"), false, SameSite::None)]
    #[case::garbage(Some("sideways"), true, SameSite::Lax)]
    #[case::missing(None, true, SameSite::Lax)]
    fn debug_same_site_resolves(
        #[case] raw: Option<&'static str>,
        #[case] secure: bool,
        #[case] expected: SameSite,
    ) {
        let env = env_with(raw);
        let reader = EnvReader::new(&env, BuildMode::Debug);
        assert_eq!(
            reader.same_site("SESSION_SAMESITE", secure).expect("debug"),
            expected
        );
    }

    #[rstest]
    fn release_refuses_insecure_same_site_none() {
        let env = env_with(Some("None"));
        let reader = EnvReader::new(&env, BuildMode::Release);
        assert!(matches!(
            reader.same_site("SESSION_SAMESITE", false),
            Err(SessionConfigError::InsecureSameSiteNone)
        ));
    }
}
