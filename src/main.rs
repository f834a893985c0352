mod catalog;
mod config;
mod model;
mod presenter;
mod row;
mod web;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::load()?;

    let predictor = match model::load_model(&config.model_path) {
        Ok(predictor) => predictor,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };
    info!("Price model '{}' ready", predictor.name());

    web::serve(config.addr, web::AppState { predictor }).await?;

    info!("Shutdown complete");
    Ok(())
}
