//! # REST API for Income Management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::io::rest::{error_status, CurrentUser};
use crate::AppState;
use shared::{
    CreateIncomeRequest, DeleteRecordResponse, IncomeListResponse, IncomeResponse,
    UpdateIncomeRequest,
};

/// Create a router for income related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_incomes).post(create_income))
        .route("/:id", axum::routing::put(update_income).delete(delete_income))
}

/// List all incomes for the current user, most recent first
pub async fn list_incomes(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/incomes - user: {}", user_id);

    match state.income_service.get_incomes(&user_id).await {
        Ok(incomes) => (StatusCode::OK, Json(IncomeListResponse { incomes })).into_response(),
        Err(e) => {
            error!("Failed to list incomes: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing incomes").into_response()
        }
    }
}

/// Create a new income
pub async fn create_income(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<CreateIncomeRequest>,
) -> impl IntoResponse {
    info!("POST /api/incomes - request: {:?}", request);

    match state.income_service.add_income(&user_id, request).await {
        Ok(income) => {
            let response = IncomeResponse {
                income,
                success_message: "Income created successfully".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create income: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Update named fields of an income
pub async fn update_income(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(income_id): Path<String>,
    Json(request): Json<UpdateIncomeRequest>,
) -> impl IntoResponse {
    info!("PUT /api/incomes/{} - request: {:?}", income_id, request);

    match state
        .income_service
        .update_income(&user_id, &income_id, request)
        .await
    {
        Ok(income) => {
            let response = IncomeResponse {
                income,
                success_message: "Income updated successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update income: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Delete an income
pub async fn delete_income(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(income_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/incomes/{}", income_id);

    match state.income_service.delete_income(&user_id, &income_id).await {
        Ok(success) => (StatusCode::OK, Json(DeleteRecordResponse { success })).into_response(),
        Err(e) => {
            error!("Failed to delete income: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting income").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_app_state;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_create_income_api() {
        let state = setup_test_app_state().await;

        let response = create_income(
            State(state),
            CurrentUser("user::1".to_string()),
            Json(CreateIncomeRequest {
                description: "Salary".to_string(),
                amount: 4000.0,
                source: "Employer".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
                recurring: true,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_delete_missing_income_api() {
        let state = setup_test_app_state().await;

        let response = delete_income(
            State(state),
            CurrentUser("user::1".to_string()),
            Path("income::42".to_string()),
        )
        .await
        .into_response();

        // Best-effort boolean result rather than an error status
        assert_eq!(response.status(), StatusCode::OK);
    }
}
