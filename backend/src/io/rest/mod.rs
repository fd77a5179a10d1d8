//! # REST API Interface Layer
//!
//! HTTP endpoints for the finance tracker. This layer handles:
//! - Request/response serialization and deserialization
//! - Resolving the current user from the session header
//! - Error translation from domain errors to HTTP status codes
//! - CORS configuration for the web frontend
//! - Request logging
//!
//! Session validation itself lives in the external auth backend; the API
//! trusts the `X-User-Id` header it forwards and treats a missing header as
//! the not-authenticated branch.

pub mod account_apis;
pub mod analytics_apis;
pub mod budget_apis;
pub mod currency_apis;
pub mod expense_apis;
pub mod goal_apis;
pub mod income_apis;
pub mod invite_apis;
pub mod notification_apis;
pub mod profile_apis;
pub mod savings_apis;
pub mod subscription_apis;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};

/// Extractor for the session user forwarded by the auth layer
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| CurrentUser(value.to_string()))
            .ok_or((StatusCode::UNAUTHORIZED, "Not authenticated"))
    }
}

/// Map a domain error to the HTTP status its message implies
pub(crate) fn error_status(error: &anyhow::Error) -> StatusCode {
    let message = error.to_string();
    if message.contains("not found") {
        StatusCode::NOT_FOUND
    } else if message.contains("cannot be empty")
        || message.contains("cannot exceed")
        || message.contains("cannot be negative")
        || message.contains("must be positive")
        || message.contains("must be between")
        || message.contains("Invalid")
    {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&anyhow::anyhow!("Expense not found")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&anyhow::anyhow!("Expense amount must be positive")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&anyhow::anyhow!("Budget month must be between 1 and 12")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&anyhow::anyhow!("connection reset")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
