//! Axum router assembly.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use accounts_app::ports::AccountRepository;

use crate::state::AppState;

const SERVICE_NAME: &str = "Account REST API Service";
const SERVICE_VERSION: &str = "1.0";

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Serialize)]
struct Index {
    name: &'static str,
    version: &'static str,
}

/// Build the top-level axum [`Router`].
///
/// Serves `/health` and `/` alongside the account routes.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<AR>(state: AppState<AR>) -> Router
where
    AR: AccountRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(index))
        .merge(crate::api::routes::<AR>())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Health> {
    Json(Health { status: "OK" })
}

async fn index() -> Json<Index> {
    Json(Index {
        name: SERVICE_NAME,
        version: SERVICE_VERSION,
    })
}
