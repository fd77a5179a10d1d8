//! # REST API for the Currency Table
//!
//! Exposes the static rate table the currency context renders from.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use tracing::info;

use crate::domain::currency;
use crate::AppState;

/// Create a router for currency related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_currencies))
}

/// Every supported currency with its symbol, separators, and rate
pub async fn list_currencies() -> impl IntoResponse {
    info!("GET /api/currencies");

    (StatusCode::OK, Json(currency::all_currencies()))
}
