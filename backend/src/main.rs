//! Backend entry-point: loads settings and the reveal key, then serves the
//! draw form, reveal pages, JSON API, and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::reveal_token::{
    BuildMode, KeySource, key_fingerprint, reveal_key_from_env,
};
use backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

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

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = server_config(&settings)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

fn server_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let public_base_url = settings.public_base_url().map_err(std::io::Error::other)?;
    let budget = settings.attempt_budget().map_err(std::io::Error::other)?;
    let slot_limit = settings.slot_limit().map_err(std::io::Error::other)?;

    let reveal_key = reveal_key_from_env(&mockable::DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let fingerprint = key_fingerprint(&reveal_key.key);
    match reveal_key.source {
        KeySource::Ephemeral => warn!(
            fingerprint = %fingerprint,
            path = %reveal_key.path.display(),
            "reveal key is ephemeral; links stop working after a restart"
        ),
        source => info!(
            fingerprint = %fingerprint,
            path = %reveal_key.path.display(),
            source = ?source,
            "reveal key ready"
        ),
    }

    info!(
        bind_addr = %bind_addr,
        public_base_url = public_base_url.as_ref().map(url::Url::as_str),
        max_attempts = budget.get(),
        max_slots = slot_limit.get(),
        "server configured"
    );
    Ok(ServerConfig::new(&reveal_key.key, bind_addr)
        .with_attempt_budget(budget)
        .with_slot_limit(slot_limit)
        .with_public_base_url(public_base_url))
}
