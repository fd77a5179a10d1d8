//! Goal domain logic.
//!
//! Goals track saving toward a target amount by a target date. Progress is a
//! derived attribute computed at read time and never stored.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::next_epoch_millis;
use crate::storage::GoalStorage;
use shared::{CreateGoalRequest, Goal, GoalSummary, UpdateGoalRequest};

fn summarize(goal: Goal) -> GoalSummary {
    // Capped at 100 for display; the raw ratio can exceed it
    let percentage = goal.percentage_complete().min(100.0);
    GoalSummary { goal, percentage }
}

/// Service for managing goals
#[derive(Clone)]
pub struct GoalService {
    goal_repository: Arc<dyn GoalStorage>,
}

impl GoalService {
    pub fn new(goal_repository: Arc<dyn GoalStorage>) -> Self {
        Self { goal_repository }
    }

    /// Create a new goal for a user
    pub async fn add_goal(&self, user_id: &str, request: CreateGoalRequest) -> Result<GoalSummary> {
        info!("Creating goal for user {}: {:?}", user_id, request);

        if request.title.trim().is_empty() {
            return Err(anyhow::anyhow!("Goal title cannot be empty"));
        }
        if request.target_amount <= 0.0 {
            return Err(anyhow::anyhow!("Goal target amount must be positive"));
        }
        if request.current_amount < 0.0 {
            return Err(anyhow::anyhow!("Goal current amount cannot be negative"));
        }

        let goal = Goal {
            id: Goal::generate_id(next_epoch_millis()),
            user_id: user_id.to_string(),
            title: request.title.trim().to_string(),
            target_amount: request.target_amount,
            current_amount: request.current_amount,
            target_date: request.target_date,
            description: request.description,
            created_at: Utc::now().to_rfc3339(),
        };

        self.goal_repository.store_goal(&goal).await?;

        info!("Successfully created goal: {}", goal.id);
        Ok(summarize(goal))
    }

    /// Update named fields of an existing goal
    pub async fn update_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        request: UpdateGoalRequest,
    ) -> Result<GoalSummary> {
        info!("Updating goal {} for user {}", goal_id, user_id);

        let mut goal = self
            .goal_repository
            .get_goal(user_id, goal_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Goal not found"))?;

        if let Some(title) = request.title {
            if title.trim().is_empty() {
                return Err(anyhow::anyhow!("Goal title cannot be empty"));
            }
            goal.title = title.trim().to_string();
        }
        if let Some(target_amount) = request.target_amount {
            if target_amount <= 0.0 {
                return Err(anyhow::anyhow!("Goal target amount must be positive"));
            }
            goal.target_amount = target_amount;
        }
        if let Some(current_amount) = request.current_amount {
            if current_amount < 0.0 {
                return Err(anyhow::anyhow!("Goal current amount cannot be negative"));
            }
            goal.current_amount = current_amount;
        }
        if let Some(target_date) = request.target_date {
            goal.target_date = target_date;
        }
        if let Some(description) = request.description {
            goal.description = Some(description);
        }

        self.goal_repository.update_goal(&goal).await?;

        Ok(summarize(goal))
    }

    /// Delete a goal, returning whether it existed
    pub async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<bool> {
        info!("Deleting goal {} for user {}", goal_id, user_id);
        self.goal_repository.delete_goal(user_id, goal_id).await
    }

    /// All goals for a user with derived progress, nearest target date first
    pub async fn get_goals(&self, user_id: &str) -> Result<Vec<GoalSummary>> {
        let goals = self.goal_repository.list_goals(user_id).await?;
        Ok(goals.into_iter().map(summarize).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::{GoalRepository, SqliteConnection};
    use chrono::NaiveDate;

    async fn create_test_service() -> GoalService {
        let db = SqliteConnection::init_test()
            .await
            .expect("Failed to init test DB");
        GoalService::new(Arc::new(GoalRepository::new(db)))
    }

    fn goal_request(title: &str, target: f64, current: f64, year: i32) -> CreateGoalRequest {
        CreateGoalRequest {
            title: title.to_string(),
            target_amount: target,
            current_amount: current,
            target_date: NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_goal_percentage_is_derived() {
        let service = create_test_service().await;

        let summary = service
            .add_goal("user::1", goal_request("New laptop", 200.0, 50.0, 2026))
            .await
            .expect("Failed to create goal");

        assert_eq!(summary.percentage, 25.0);
        assert_eq!(summary.goal.current_amount, 50.0);
    }

    #[tokio::test]
    async fn test_goal_percentage_caps_at_100() {
        let service = create_test_service().await;

        let summary = service
            .add_goal("user::1", goal_request("Overfunded", 100.0, 150.0, 2026))
            .await
            .unwrap();

        assert_eq!(summary.percentage, 100.0);
    }

    #[tokio::test]
    async fn test_goals_ordered_by_target_date() {
        let service = create_test_service().await;

        service
            .add_goal("user::1", goal_request("Later", 100.0, 0.0, 2028))
            .await
            .unwrap();
        service
            .add_goal("user::1", goal_request("Sooner", 100.0, 0.0, 2026))
            .await
            .unwrap();

        let goals = service.get_goals("user::1").await.unwrap();
        let titles: Vec<&str> = goals.iter().map(|g| g.goal.title.as_str()).collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);
    }

    #[tokio::test]
    async fn test_update_goal_progress() {
        let service = create_test_service().await;

        let summary = service
            .add_goal("user::1", goal_request("Trip", 1000.0, 100.0, 2027))
            .await
            .unwrap();

        let updated = service
            .update_goal(
                "user::1",
                &summary.goal.id,
                UpdateGoalRequest {
                    title: None,
                    target_amount: None,
                    current_amount: Some(500.0),
                    target_date: None,
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.percentage, 50.0);
    }

    #[tokio::test]
    async fn test_goal_validation() {
        let service = create_test_service().await;

        let result = service
            .add_goal("user::1", goal_request(" ", 100.0, 0.0, 2026))
            .await;
        assert!(result.is_err());

        let result = service
            .add_goal("user::1", goal_request("Bad target", 0.0, 0.0, 2026))
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must be positive"));
    }
}
