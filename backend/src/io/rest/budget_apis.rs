//! # REST API for Budget Management
//!
//! Budget CRUD plus the monthly over/under report.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::io::rest::{error_status, CurrentUser};
use crate::AppState;
use shared::{
    BudgetListResponse, BudgetReportResponse, BudgetResponse, CreateBudgetRequest,
    DeleteRecordResponse, UpdateBudgetRequest,
};

/// Create a router for budget related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_budgets).post(create_budget))
        .route("/:id", axum::routing::put(update_budget).delete(delete_budget))
        .route("/report", get(get_budget_report))
}

/// Query parameters for the budget report endpoint
#[derive(Deserialize, Debug)]
pub struct BudgetReportQuery {
    pub month: u32,
    pub year: i32,
}

/// List all budgets for the current user, ordered by category
pub async fn list_budgets(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/budgets - user: {}", user_id);

    match state.budget_service.get_budgets(&user_id).await {
        Ok(budgets) => (StatusCode::OK, Json(BudgetListResponse { budgets })).into_response(),
        Err(e) => {
            error!("Failed to list budgets: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing budgets").into_response()
        }
    }
}

/// Create a new budget
pub async fn create_budget(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<CreateBudgetRequest>,
) -> impl IntoResponse {
    info!("POST /api/budgets - request: {:?}", request);

    match state.budget_service.add_budget(&user_id, request).await {
        Ok(budget) => {
            let response = BudgetResponse {
                budget,
                success_message: "Budget created successfully".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create budget: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Update named fields of a budget
pub async fn update_budget(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(budget_id): Path<String>,
    Json(request): Json<UpdateBudgetRequest>,
) -> impl IntoResponse {
    info!("PUT /api/budgets/{} - request: {:?}", budget_id, request);

    match state
        .budget_service
        .update_budget(&user_id, &budget_id, request)
        .await
    {
        Ok(budget) => {
            let response = BudgetResponse {
                budget,
                success_message: "Budget updated successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update budget: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Delete a budget
pub async fn delete_budget(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(budget_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/budgets/{}", budget_id);

    match state.budget_service.delete_budget(&user_id, &budget_id).await {
        Ok(success) => (StatusCode::OK, Json(DeleteRecordResponse { success })).into_response(),
        Err(e) => {
            error!("Failed to delete budget: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting budget").into_response()
        }
    }
}

/// Compare each budget for a month against its summed expenses
pub async fn get_budget_report(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<BudgetReportQuery>,
) -> impl IntoResponse {
    info!("GET /api/budgets/report - query: {:?}", query);

    match state
        .budget_service
        .budget_report(&user_id, query.month, query.year)
        .await
    {
        Ok(rows) => (
            StatusCode::OK,
            Json(BudgetReportResponse {
                month: query.month,
                year: query.year,
                rows,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to build budget report: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
