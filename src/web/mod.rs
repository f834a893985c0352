mod render;

use crate::model::{ModelError, Predictor};
use crate::presenter::Estimate;
use crate::row::{FeatureRow, FlightQuery, QueryError};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
}

/// Result of handling one search form submission.
#[derive(Debug)]
pub enum Outcome {
    Idle,
    Rejected(QueryError),
    Failed(ModelError),
    Estimated(Estimate),
}

impl Outcome {
    fn status(&self) -> StatusCode {
        match self {
            Outcome::Idle | Outcome::Estimated(_) => StatusCode::OK,
            Outcome::Rejected(QueryError::InvalidSelection(_)) => StatusCode::OK,
            Outcome::Rejected(QueryError::OutOfRange { .. }) => StatusCode::BAD_REQUEST,
            Outcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Validates the query, builds the feature row and asks the model for a
/// price. The predictor is not consulted for a rejected query.
pub fn estimate(predictor: &dyn Predictor, query: &FlightQuery) -> Outcome {
    if let Err(err) = query.validate() {
        warn!("Rejected search: {}", err);
        return Outcome::Rejected(err);
    }

    let row = FeatureRow::from_query(query);
    match predictor.predict(&row) {
        Ok(price) => {
            let estimate = Estimate::new(query, row, price);
            info!(
                "Estimated {} → {} at {} (raw {:.2})",
                query.source_city, query.destination_city, estimate.formatted, price
            );
            Outcome::Estimated(estimate)
        }
        Err(err) => {
            error!("Prediction failed with model '{}': {}", predictor.name(), err);
            Outcome::Failed(err)
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(search))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render::page(&FlightQuery::default(), &Outcome::Idle))
}

async fn search(
    State(state): State<AppState>,
    Form(query): Form<FlightQuery>,
) -> (StatusCode, Html<String>) {
    let outcome = estimate(state.predictor.as_ref(), &query);
    (outcome.status(), Html(render::page(&query, &outcome)))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Flight Price Finder listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
