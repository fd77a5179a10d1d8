//! # REST API for Notifications
//!
//! Notification operations are best-effort: failures surface as
//! `success: false` or empty lists, never as error statuses, so they can't
//! block whatever action triggered them.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::info;

use crate::io::rest::CurrentUser;
use crate::AppState;
use shared::{NotificationActionResponse, NotificationListResponse};

/// Create a router for notification related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/read-all", post(mark_all_read))
        .route("/:id/read", post(mark_read))
        .route("/:id", axum::routing::delete(delete_notification))
}

/// Query parameters for the notification list endpoint
#[derive(Deserialize, Debug)]
pub struct NotificationListQuery {
    pub limit: Option<u32>,
}

/// Notifications for the current user, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<NotificationListQuery>,
) -> impl IntoResponse {
    info!("GET /api/notifications - user: {}", user_id);

    let notifications = state
        .notification_service
        .get_notifications(&user_id, query.limit)
        .await;

    (
        StatusCode::OK,
        Json(NotificationListResponse { notifications }),
    )
}

/// Mark one notification as read
pub async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(notification_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/notifications/{}/read", notification_id);

    let success = state
        .notification_service
        .mark_read(&user_id, &notification_id)
        .await;

    (StatusCode::OK, Json(NotificationActionResponse { success }))
}

/// Mark every notification for the current user as read
pub async fn mark_all_read(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("POST /api/notifications/read-all - user: {}", user_id);

    let success = state.notification_service.mark_all_read(&user_id).await;

    (StatusCode::OK, Json(NotificationActionResponse { success }))
}

/// Delete a notification
pub async fn delete_notification(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(notification_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/notifications/{}", notification_id);

    let success = state
        .notification_service
        .delete_notification(&user_id, &notification_id)
        .await;

    (StatusCode::OK, Json(NotificationActionResponse { success }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_app_state;
    use shared::NotificationKind;

    #[tokio::test]
    async fn test_list_and_mark_read_api() {
        let state = setup_test_app_state().await;
        state
            .notification_service
            .create_notification("user::1", "Hello", "world", NotificationKind::Info)
            .await;

        let response = list_notifications(
            State(state.clone()),
            CurrentUser("user::1".to_string()),
            Query(NotificationListQuery { limit: None }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = mark_all_read(State(state), CurrentUser("user::1".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_notification_is_not_an_error() {
        let state = setup_test_app_state().await;

        let response = mark_read(
            State(state),
            CurrentUser("user::1".to_string()),
            Path("notification::42".to_string()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
