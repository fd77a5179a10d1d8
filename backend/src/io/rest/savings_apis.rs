//! # REST API for the Savings Overview

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::io::rest::{error_status, CurrentUser};
use crate::AppState;
use shared::{SavingsResponse, UpdateSavingsRequest};

/// Create a router for savings related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_savings).put(upsert_savings))
}

/// Savings overview for the current user
pub async fn get_savings(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/savings - user: {}", user_id);

    match state.savings_service.get_savings(&user_id).await {
        Ok(overview) => (StatusCode::OK, Json(SavingsResponse { overview })).into_response(),
        Err(e) => {
            error!("Failed to get savings overview: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error retrieving savings overview",
            )
                .into_response()
        }
    }
}

/// Create-if-absent, else overwrite the savings overview
pub async fn upsert_savings(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<UpdateSavingsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/savings - request: {:?}", request);

    match state.savings_service.upsert_savings(&user_id, request).await {
        Ok(overview) => (StatusCode::OK, Json(SavingsResponse { overview })).into_response(),
        Err(e) => {
            error!("Failed to upsert savings overview: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
