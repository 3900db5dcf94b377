//! Backend entry-point: loads settings, prepares storage, and runs the server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::persistence::{DbPool, run_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(fingerprint = %session.fingerprint(), "session key loaded");

    let bind_addr = settings.bind_addr()?;
    let mut config =
        ServerConfig::new(session, bind_addr).with_generator(settings.generator_config()?);

    if let Some(pool_config) = settings.pool_config() {
        let applied = run_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to apply database migrations")?;
        info!(applied, "database schema is current");
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(server::build_prometheus()?));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            health_state.mark_draining();
            info!("draining connections");
            handle.stop(true).await;
        }
    });
    server.await.wrap_err("server terminated abnormally")
}
