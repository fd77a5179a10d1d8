//! # Account Deletion Endpoint
//!
//! Standalone function-style endpoint: `POST /delete-user {email}`. Looks up
//! the user by email and issues the fixed cross-table delete sequence. There
//! is no transaction; a failure partway leaves a partially-deleted user and
//! surfaces as a 500.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use tracing::{error, info};

use crate::domain::DeleteUserOutcome;
use crate::AppState;
use shared::{DeleteUserRequest, DeleteUserResponse};

/// Create a router for the delete-user endpoint
pub fn router() -> Router<AppState> {
    Router::new().route("/delete-user", post(delete_user))
}

/// Delete a user and every row they own
pub async fn delete_user(
    State(state): State<AppState>,
    Json(request): Json<DeleteUserRequest>,
) -> impl IntoResponse {
    info!("POST /delete-user - email: {}", request.email);

    if request.email.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Email is required" })),
        )
            .into_response();
    }

    match state
        .account_service
        .delete_user_by_email(request.email.trim())
        .await
    {
        Ok(DeleteUserOutcome::Deleted { user_id }) => {
            info!("Deleted user {}", user_id);
            let response = DeleteUserResponse {
                success: true,
                message: "User and all associated data deleted".to_string(),
            };
            (StatusCode::OK, Json(serde_json::json!(response))).into_response()
        }
        Ok(DeleteUserOutcome::NotFound) => {
            let response = DeleteUserResponse {
                success: false,
                message: "User not found".to_string(),
            };
            (StatusCode::NOT_FOUND, Json(serde_json::json!(response))).into_response()
        }
        Err(e) => {
            error!("Failed to delete user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
