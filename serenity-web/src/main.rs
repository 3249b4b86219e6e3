use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use serenity_catalog::CapacityRules;
use serenity_core::SessionStore;
use serenity_store::{ApiClient, Config, FileSessionPersistence};
use serenity_web::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "serenity_web=debug,serenity_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Serenity booking front end on port {}", config.server.port);

    let backend = ApiClient::from_config(&config.backend).context("Failed to build backend client")?;
    tracing::info!("Booking backend at {}", config.backend.base_url);

    // Pick up the guest who was signed in before the restart
    let session = SessionStore::new(Box::new(FileSessionPersistence::new(&config.session.path)));
    session.restore().context("Failed to restore session")?;

    let mut app_state = AppState::new(Arc::new(backend), Arc::new(session));
    app_state.capacity = CapacityRules::new(config.capacity.extra_child_capacities.clone());
    app_state.catalog_source = config.catalog.source;
    app_state.max_party_members = config.booking.max_party_members;

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
