//! Backend entry-point: loads settings, prepares storage and serves the API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use jobboard::inbound::http::health::HealthState;
use jobboard::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use jobboard::server::{
    AppSettings, DrivenAdapters, ServerConfig, bootstrap_admin, cookie_secure_from_env,
    create_server,
};

fn startup_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(startup_error)?;
    let key = settings.session_key().map_err(startup_error)?;
    let cookie_secure = cookie_secure_from_env().map_err(startup_error)?;
    let bind_addr = settings.bind_addr().map_err(startup_error)?;
    let policy = settings.access_policy().map_err(startup_error)?;

    let pool = match settings.database_url.as_deref() {
        Some(url) => {
            run_migrations(url).await.map_err(startup_error)?;
            Some(DbPool::new(PoolConfig::new(url)).await.map_err(startup_error)?)
        }
        None => None,
    };
    let adapters = DrivenAdapters::from_settings(&settings, pool.as_ref()).map_err(startup_error)?;
    if let Some(form) = settings.bootstrap_admin().map_err(startup_error)? {
        if let Some(admin) = bootstrap_admin(&adapters, form).await.map_err(startup_error)? {
            info!(user_id = %admin.id, username = %admin.username, "bootstrap admin created");
        }
    }

    let config = ServerConfig::new(key, cookie_secure, bind_addr, adapters).with_policy(policy);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, ?policy, "job board listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
