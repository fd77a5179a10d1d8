//! # REST API for Analytics Events
//!
//! Accepts the fire-and-forget marketing events the frontend emits on
//! specific user actions. Tracking never fails the caller; unknown event
//! names are the only rejection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use tracing::info;

use crate::domain::AnalyticsEvent;
use crate::AppState;
use shared::TrackEventRequest;

/// Create a router for analytics related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/:event", post(track_event))
}

/// Parse a wire event name into the analytics event it stands for
pub fn parse_event(name: &str) -> Option<AnalyticsEvent> {
    match name {
        "trial-start" => Some(AnalyticsEvent::TrialStart),
        "lead" => Some(AnalyticsEvent::Lead),
        "checkout-initiate" => Some(AnalyticsEvent::InitiateCheckout),
        "payment-info-add" => Some(AnalyticsEvent::AddPaymentInfo),
        "subscribe" => Some(AnalyticsEvent::Subscribe),
        _ => None,
    }
}

/// Record one marketing event
pub async fn track_event(
    State(state): State<AppState>,
    Path(event_name): Path<String>,
    Json(request): Json<TrackEventRequest>,
) -> impl IntoResponse {
    info!("POST /api/analytics/{}", event_name);

    let Some(event) = parse_event(&event_name) else {
        return (StatusCode::BAD_REQUEST, "Unknown analytics event").into_response();
    };

    state.analytics.track(
        event,
        request.value,
        request.currency.as_deref(),
        request.email.as_deref(),
    );

    StatusCode::ACCEPTED.into_response()
}
