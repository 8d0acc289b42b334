mod config;
mod controller;
mod data;
mod error;
mod model;
mod notifier;
mod router;
mod scheduler;
mod service;
mod sheets;
mod startup;
mod state;
mod util;

#[cfg(test)]
mod test_support;

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::AppError, notifier::EventBroadcaster, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let mirror = startup::setup_mirror(&config);
    let events = EventBroadcaster::new();

    tracing::info!("Starting server");

    // Start the sheets reconciliation scheduler when the mirror is configured
    match mirror.clone() {
        Some(scheduler_mirror) => {
            let scheduler_db = db.clone();
            tokio::spawn(async move {
                if let Err(e) =
                    scheduler::sheets_sync::start_scheduler(scheduler_db, scheduler_mirror).await
                {
                    tracing::error!("Sheets reconciliation scheduler error: {}", e);
                }
            });
        }
        None => {
            tracing::info!("Remote mirror disabled, running in local-only mode");
        }
    }

    let app = router::router().with_state(AppState::new(db, mirror, events));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Servidor iniciado em http://localhost:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
