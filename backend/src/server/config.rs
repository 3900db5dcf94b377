//! Everything the server needs that is decided before it starts.

use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use backend::inbound::http::session_config::SessionSettings;
use backend::outbound::openai::ChatGeneratorConfig;
use backend::outbound::persistence::DbPool;

/// Where recipes, users, and notifications are kept.
pub enum Storage {
    /// Process memory; contents are lost on restart.
    Memory,
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
}

/// Server configuration assembled by `main`.
///
/// Defaults to in-memory storage and the offline fixture generator.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) generator: Option<ChatGeneratorConfig>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            storage: Storage::Memory,
            generator: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Keep data in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(self, pool: DbPool) -> Self {
        Self {
            storage: Storage::Postgres(pool),
            ..self
        }
    }

    /// Generate recipes through a chat-completions API when configured.
    #[must_use]
    pub fn with_generator(self, generator: Option<ChatGeneratorConfig>) -> Self {
        Self { generator, ..self }
    }

    /// Record request metrics with `prometheus`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(self, prometheus: Option<PrometheusMetrics>) -> Self {
        Self { prometheus, ..self }
    }
}
