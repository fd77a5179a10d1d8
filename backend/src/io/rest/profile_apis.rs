//! # REST API for Profile Management

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
use shared::{ProfileResponse, UpdateProfileRequest};

/// Create a router for profile related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

/// Profile for the current user
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/profile - user: {}", user_id);

    match state.profile_service.get_profile(&user_id).await {
        Ok(profile) => {
            let response = ProfileResponse {
                profile,
                success_message: String::new(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to get profile: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Overwrite only the profile fields present in the request
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profile - request: {:?}", request);

    match state.profile_service.update_profile(&user_id, request).await {
        Ok(profile) => {
            let response = ProfileResponse {
                profile,
                success_message: "Profile updated successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update profile: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::UserRepository;
    use crate::storage::UserStorage;
    use crate::test_support::setup_test_app_state;
    use shared::User;

    #[tokio::test]
    async fn test_get_missing_profile_api() {
        let state = setup_test_app_state().await;

        let response = get_profile(State(state), CurrentUser("user::1".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_profile_api() {
        let state = setup_test_app_state().await;
        // Profiles carry a foreign key to users; seed the row this test uses.
        UserRepository::new(state.db.clone())
            .store_user(&User {
                id: "user::1".to_string(),
                email: "user1@example.com".to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            })
            .await
            .unwrap();
        state
            .profile_service
            .ensure_profile("user::1", "Ana")
            .await
            .unwrap();

        let response = update_profile(
            State(state),
            CurrentUser("user::1".to_string()),
            Json(UpdateProfileRequest {
                name: None,
                phone: Some("+55 11 99999-0000".to_string()),
                occupation: None,
                avatar_url: None,
                theme: None,
                currency: None,
                date_format: None,
                month_start_day: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
