//! # Family Invitation Endpoint
//!
//! Standalone function-style endpoint: `POST /invite-family-member`. Builds
//! an opaque invite token, renders the HTML invitation, and sends it through
//! the transactional email service. The token is not signed; its opacity is
//! the whole scheme.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{error, info};

use crate::domain::{email_service, next_epoch_millis};
use crate::AppState;
use shared::{InviteFamilyMemberRequest, InviteFamilyMemberResponse};

/// Create a router for the invite endpoint
pub fn router() -> Router<AppState> {
    Router::new().route("/invite-family-member", post(invite_family_member))
}

/// Opaque token carried in the invite URL
pub fn build_invite_token(family_plan_id: &str, epoch_millis: u64) -> String {
    STANDARD.encode(format!("invite:{}:{}", family_plan_id, epoch_millis))
}

fn failure(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(InviteFamilyMemberResponse {
            success: false,
            message: None,
            error: Some(message.to_string()),
        }),
    )
        .into_response()
}

/// Send a family plan invitation email
pub async fn invite_family_member(
    State(state): State<AppState>,
    Json(request): Json<InviteFamilyMemberRequest>,
) -> impl IntoResponse {
    info!(
        "POST /invite-family-member - email: {}, plan: {}",
        request.email, request.family_plan_id
    );

    if request.email.trim().is_empty() || !request.email.contains('@') {
        return failure(StatusCode::BAD_REQUEST, "A valid email is required");
    }
    if request.family_plan_id.trim().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Family plan id is required");
    }

    let token = build_invite_token(request.family_plan_id.trim(), next_epoch_millis());
    let invite_url = format!(
        "{}/invite?token={}",
        state.invite_base_url.trim_end_matches('/'),
        token
    );

    let inviter = request.inviter_name.as_deref();
    let subject = match inviter {
        Some(name) => format!("{} invited you to Finance Tracker", name),
        None => "You've been invited to Finance Tracker".to_string(),
    };
    let html = email_service::invitation_html(inviter, &invite_url);

    match state.email_service.send(request.email.trim(), &subject, html) {
        Ok(()) => {
            info!("Invitation sent to {}", request.email);
            (
                StatusCode::OK,
                Json(InviteFamilyMemberResponse {
                    success: true,
                    message: Some(format!("Invitation sent to {}", request.email.trim())),
                    error: None,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to send invitation: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}
