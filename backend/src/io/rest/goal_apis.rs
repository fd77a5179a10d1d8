//! # REST API for Goal Management

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
    CreateGoalRequest, DeleteRecordResponse, GoalListResponse, GoalResponse, UpdateGoalRequest,
};

/// Create a router for goal related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_goals).post(create_goal))
        .route("/:id", axum::routing::put(update_goal).delete(delete_goal))
}

/// List all goals for the current user with derived progress
pub async fn list_goals(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> impl IntoResponse {
    info!("GET /api/goals - user: {}", user_id);

    match state.goal_service.get_goals(&user_id).await {
        Ok(goals) => (StatusCode::OK, Json(GoalListResponse { goals })).into_response(),
        Err(e) => {
            error!("Failed to list goals: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing goals").into_response()
        }
    }
}

/// Create a new goal
pub async fn create_goal(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<CreateGoalRequest>,
) -> impl IntoResponse {
    info!("POST /api/goals - request: {:?}", request);

    match state.goal_service.add_goal(&user_id, request).await {
        Ok(goal) => {
            let response = GoalResponse {
                goal,
                success_message: "Goal created successfully".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create goal: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Update named fields of a goal
pub async fn update_goal(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(goal_id): Path<String>,
    Json(request): Json<UpdateGoalRequest>,
) -> impl IntoResponse {
    info!("PUT /api/goals/{} - request: {:?}", goal_id, request);

    match state
        .goal_service
        .update_goal(&user_id, &goal_id, request)
        .await
    {
        Ok(goal) => {
            let response = GoalResponse {
                goal,
                success_message: "Goal updated successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update goal: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Delete a goal
pub async fn delete_goal(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(goal_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/goals/{}", goal_id);

    match state.goal_service.delete_goal(&user_id, &goal_id).await {
        Ok(success) => (StatusCode::OK, Json(DeleteRecordResponse { success })).into_response(),
        Err(e) => {
            error!("Failed to delete goal: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting goal").into_response()
        }
    }
}
