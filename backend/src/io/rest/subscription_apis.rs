//! # REST API for Subscription Management
//!
//! Plan status drives feature gating in the UI. Checkout completion also
//! emits the subscribe analytics event as a fire-and-forget side effect.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::{error, info};

use crate::domain::AnalyticsEvent;
use crate::io::rest::CurrentUser;
use crate::AppState;
use shared::{CheckoutCompleteRequest, CheckoutCompleteResponse};

/// Create a router for subscription related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_subscription_status))
        .route("/checkout-complete", post(checkout_complete))
}

/// Current plan and gating flag for the session user
pub async fn get_subscription_status(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/subscription - user: {}", user_id);

    match state.subscription_service.check_subscription(&user_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => {
            error!("Failed to check subscription: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error checking subscription",
            )
                .into_response()
        }
    }
}

/// Finish a checkout: upgrade the plan, drop the welcome notification, emit
/// the subscribe event
pub async fn checkout_complete(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<CheckoutCompleteRequest>,
) -> impl IntoResponse {
    info!("POST /api/subscription/checkout-complete - request: {:?}", request);

    match state
        .subscription_service
        .process_payment_completion(&user_id, request.plan_type)
        .await
    {
        Ok(subscription) => {
            state.analytics.track(
                AnalyticsEvent::Subscribe,
                request.amount,
                request.currency.as_deref(),
                None,
            );

            let response = CheckoutCompleteResponse {
                subscription,
                success_message: "Subscription activated".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to process payment completion: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error processing payment completion",
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{setup_test_app_state_with_analytics, RecordingSink};
    use shared::PlanType;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_checkout_complete_emits_subscribe_event() {
        let sink = Arc::new(RecordingSink::default());
        let state = setup_test_app_state_with_analytics(sink.clone()).await;

        let response = checkout_complete(
            State(state),
            CurrentUser("user::1".to_string()),
            Json(CheckoutCompleteRequest {
                plan_type: PlanType::Pro,
                amount: Some(29.9),
                currency: Some("BRL".to_string()),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, AnalyticsEvent::Subscribe);
        assert_eq!(events[0].1, Some(29.9));
    }

    #[tokio::test]
    async fn test_subscription_status_defaults_to_free() {
        let state = crate::test_support::setup_test_app_state().await;

        let response = get_subscription_status(State(state), CurrentUser("user::1".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
