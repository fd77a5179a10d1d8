use anyhow::Result;
use async_trait::async_trait;
use shared::Goal;
use sqlx::{sqlite::SqliteRow, Row};

use crate::storage::sqlite::db::SqliteConnection;
use crate::storage::traits::GoalStorage;

/// Repository for goal operations
#[derive(Clone)]
pub struct GoalRepository {
    db: SqliteConnection,
}

impl GoalRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

fn row_to_goal(row: &SqliteRow) -> Goal {
    Goal {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        target_amount: row.get("target_amount"),
        current_amount: row.get("current_amount"),
        target_date: row.get("target_date"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl GoalStorage for GoalRepository {
    async fn store_goal(&self, goal: &Goal) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO goals (id, user_id, title, target_amount, current_amount, target_date, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&goal.id)
        .bind(&goal.user_id)
        .bind(&goal.title)
        .bind(goal.target_amount)
        .bind(goal.current_amount)
        .bind(goal.target_date)
        .bind(&goal.description)
        .bind(&goal.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, target_amount, current_amount, target_date, description, created_at
            FROM goals
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(goal_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| row_to_goal(&r)))
    }

    async fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, target_amount, current_amount, target_date, description, created_at
            FROM goals
            WHERE user_id = ?
            ORDER BY target_date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_goal).collect())
    }

    async fn update_goal(&self, goal: &Goal) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE goals
            SET title = ?, target_amount = ?, current_amount = ?, target_date = ?, description = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&goal.title)
        .bind(goal.target_amount)
        .bind(goal.current_amount)
        .bind(goal.target_date)
        .bind(&goal.description)
        .bind(&goal.user_id)
        .bind(&goal.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM goals
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(goal_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_goals_for_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM goals
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
