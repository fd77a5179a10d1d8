//! # REST API for Expense Management
//!
//! Endpoints for expense CRUD and the category distribution chart.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::domain::ExpenseService;
use crate::io::rest::{error_status, CurrentUser};
use crate::AppState;
use shared::{
    CreateExpenseRequest, DeleteRecordResponse, ExpenseDistributionResponse, ExpenseListResponse,
    ExpenseResponse, UpdateExpenseRequest,
};

/// Create a router for expense related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/:id", axum::routing::put(update_expense).delete(delete_expense))
        .route("/distribution", get(get_distribution))
        .route("/distribution/demo", get(get_demo_distribution))
}

/// List all expenses for the current user, most recent first
pub async fn list_expenses(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/expenses - user: {}", user_id);

    match state.expense_service.get_expenses(&user_id).await {
        Ok(expenses) => (StatusCode::OK, Json(ExpenseListResponse { expenses })).into_response(),
        Err(e) => {
            error!("Failed to list expenses: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing expenses").into_response()
        }
    }
}

/// Create a new expense
pub async fn create_expense(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - request: {:?}", request);

    match state.expense_service.add_expense(&user_id, request).await {
        Ok(expense) => {
            let response = ExpenseResponse {
                expense,
                success_message: "Expense created successfully".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create expense: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Update named fields of an expense
pub async fn update_expense(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(expense_id): Path<String>,
    Json(request): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/expenses/{} - request: {:?}", expense_id, request);

    match state
        .expense_service
        .update_expense(&user_id, &expense_id, request)
        .await
    {
        Ok(expense) => {
            let response = ExpenseResponse {
                expense,
                success_message: "Expense updated successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update expense: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Delete an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", expense_id);

    match state
        .expense_service
        .delete_expense(&user_id, &expense_id)
        .await
    {
        Ok(success) => (StatusCode::OK, Json(DeleteRecordResponse { success })).into_response(),
        Err(e) => {
            error!("Failed to delete expense: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting expense").into_response()
        }
    }
}

/// Category distribution of the current user's expenses
pub async fn get_distribution(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/expenses/distribution - user: {}", user_id);

    match state.expense_service.category_distribution(&user_id).await {
        Ok(slices) => (
            StatusCode::OK,
            Json(ExpenseDistributionResponse { slices }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to compute distribution: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error computing distribution",
            )
                .into_response()
        }
    }
}

/// Fixed demo distribution for the marketing page, no session required
pub async fn get_demo_distribution() -> impl IntoResponse {
    info!("GET /api/expenses/distribution/demo");

    let slices = ExpenseService::demo_distribution();
    (StatusCode::OK, Json(ExpenseDistributionResponse { slices }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_app_state;
    use chrono::NaiveDate;

    fn create_request(description: &str, amount: f64, category: &str) -> CreateExpenseRequest {
        CreateExpenseRequest {
            description: description.to_string(),
            amount,
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            notes: None,
            recurring: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_expense_api() {
        let state = setup_test_app_state().await;
        let user = CurrentUser("user::1".to_string());

        let response = create_expense(
            State(state.clone()),
            user,
            Json(create_request("Groceries", 120.0, "Food")),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = list_expenses(State(state), CurrentUser("user::1".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_expense_validation_api() {
        let state = setup_test_app_state().await;

        let response = create_expense(
            State(state),
            CurrentUser("user::1".to_string()),
            Json(create_request("", 120.0, "Food")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_missing_expense_api() {
        let state = setup_test_app_state().await;

        let response = update_expense(
            State(state),
            CurrentUser("user::1".to_string()),
            Path("expense::42".to_string()),
            Json(UpdateExpenseRequest {
                description: None,
                amount: Some(10.0),
                category: None,
                date: None,
                notes: None,
                recurring: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_demo_distribution_api() {
        let response = get_demo_distribution().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
