use anyhow::Result;
use async_trait::async_trait;
use shared::Budget;
use sqlx::{sqlite::SqliteRow, Row};

use crate::storage::sqlite::db::SqliteConnection;
use crate::storage::traits::BudgetStorage;

/// Repository for budget operations
#[derive(Clone)]
pub struct BudgetRepository {
    db: SqliteConnection,
}

impl BudgetRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

fn row_to_budget(row: &SqliteRow) -> Budget {
    Budget {
        id: row.get("id"),
        user_id: row.get("user_id"),
        category: row.get("category"),
        amount: row.get("amount"),
        month: row.get::<i64, _>("month") as u32,
        year: row.get::<i64, _>("year") as i32,
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl BudgetStorage for BudgetRepository {
    async fn store_budget(&self, budget: &Budget) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO budgets (id, user_id, category, amount, month, year, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&budget.id)
        .bind(&budget.user_id)
        .bind(&budget.category)
        .bind(budget.amount)
        .bind(budget.month as i64)
        .bind(budget.year as i64)
        .bind(&budget.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Option<Budget>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, category, amount, month, year, created_at
            FROM budgets
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(budget_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| row_to_budget(&r)))
    }

    async fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category, amount, month, year, created_at
            FROM budgets
            WHERE user_id = ?
            ORDER BY category ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_budget).collect())
    }

    async fn list_budgets_for_month(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category, amount, month, year, created_at
            FROM budgets
            WHERE user_id = ? AND month = ? AND year = ?
            ORDER BY category ASC
            "#,
        )
        .bind(user_id)
        .bind(month as i64)
        .bind(year as i64)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_budget).collect())
    }

    async fn update_budget(&self, budget: &Budget) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE budgets
            SET category = ?, amount = ?, month = ?, year = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&budget.category)
        .bind(budget.amount)
        .bind(budget.month as i64)
        .bind(budget.year as i64)
        .bind(&budget.user_id)
        .bind(&budget.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM budgets
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(budget_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_budgets_for_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM budgets
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
