//! Application settings loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `RECIPES_*` environment variables, and an
//! optional configuration file. Session cookie settings are read separately
//! by [`backend::inbound::http::session_config`].

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use backend::outbound::openai::ChatGeneratorConfig;
use backend::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Settings that cannot be turned into a running configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The generator base URL does not parse.
    #[error("invalid generator base URL '{value}': {source}")]
    BaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Server, database, and generator settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; recipes stay in memory when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_pool_max_size: Option<u32>,
    /// Bearer key for the chat-completions API; the fixture generator is
    /// used when unset.
    pub openai_api_key: Option<String>,
    /// Chat-completions API root.
    pub openai_base_url: Option<String>,
    /// Model requested for generation.
    pub openai_model: Option<String>,
    /// Whole-request timeout for generation calls, in seconds.
    #[ortho_config(default = 60)]
    pub openai_timeout_secs: u64,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().map(str::trim)?;
        if url.is_empty() {
            return None;
        }
        let config = PoolConfig::new(url);
        Some(match self.db_pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        })
    }

    /// Generator settings when an API key is configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::BaseUrl`] when the base URL does not parse.
    pub fn generator_config(&self) -> Result<Option<ChatGeneratorConfig>, SettingsError> {
        let Some(api_key) = self
            .openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        else {
            return Ok(None);
        };
        let base = self
            .openai_base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_BASE_URL);
        let base_url = Url::parse(base).map_err(|source| SettingsError::BaseUrl {
            value: base.to_owned(),
            source,
        })?;
        Ok(Some(ChatGeneratorConfig {
            base_url,
            api_key: Zeroizing::new(api_key.to_owned()),
            model: self
                .openai_model
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_owned()),
            timeout: Duration::from_secs(self.openai_timeout_secs),
        }))
    }
}
