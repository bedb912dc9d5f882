//! Blog server entry point: configuration, migrations, seeding and the
//! HTTP listener.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog::domain::{SAMPLE_USER_EMAIL, SAMPLE_USER_PASSWORD, SeedOutcome, ensure_user};
use blog::inbound::http::health::HealthState;
use blog::inbound::http::session_config::fingerprint::key_fingerprint;
use blog::inbound::http::session_config::{BuildMode, session_settings_from_env};
use blog::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, run_migrations};
use blog::settings::BlogSettings;
use server::{ServerConfig, create_server};

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

    let settings = BlogSettings::load().wrap_err("failed to load configuration")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );

    let database_url = settings.database_url()?;
    let applied = run_migrations(&database_url)
        .await
        .wrap_err("database migrations failed")?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to build database pool")?;

    if settings.seed_user() {
        let users = DieselUserRepository::new(pool.clone());
        let outcome = ensure_user(&users, SAMPLE_USER_EMAIL, SAMPLE_USER_PASSWORD)
            .await
            .wrap_err("failed to seed sample user")?;
        if outcome == SeedOutcome::AlreadyPresent {
            info!(email = SAMPLE_USER_EMAIL, "sample user already present");
        }
    }

    let bind_addr = settings.bind_addr()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(session, bind_addr, pool),
    )?;
    info!(%bind_addr, "listening");

    server.await.wrap_err("server terminated abnormally")
}
