use anyhow::Result;
use async_trait::async_trait;
use shared::Income;
use sqlx::{sqlite::SqliteRow, Row};

use crate::storage::sqlite::db::SqliteConnection;
use crate::storage::traits::IncomeStorage;

/// Repository for income operations
#[derive(Clone)]
pub struct IncomeRepository {
    db: SqliteConnection,
}

impl IncomeRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

fn row_to_income(row: &SqliteRow) -> Income {
    Income {
        id: row.get("id"),
        user_id: row.get("user_id"),
        description: row.get("description"),
        amount: row.get("amount"),
        source: row.get("source"),
        date: row.get("date"),
        recurring: row.get("recurring"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl IncomeStorage for IncomeRepository {
    async fn store_income(&self, income: &Income) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO incomes (id, user_id, description, amount, source, date, recurring, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&income.id)
        .bind(&income.user_id)
        .bind(&income.description)
        .bind(income.amount)
        .bind(&income.source)
        .bind(income.date)
        .bind(income.recurring)
        .bind(&income.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_income(&self, user_id: &str, income_id: &str) -> Result<Option<Income>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, description, amount, source, date, recurring, created_at
            FROM incomes
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(income_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| row_to_income(&r)))
    }

    async fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, description, amount, source, date, recurring, created_at
            FROM incomes
            WHERE user_id = ?
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_income).collect())
    }

    async fn update_income(&self, income: &Income) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE incomes
            SET description = ?, amount = ?, source = ?, date = ?, recurring = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&income.description)
        .bind(income.amount)
        .bind(&income.source)
        .bind(income.date)
        .bind(income.recurring)
        .bind(&income.user_id)
        .bind(&income.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM incomes
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(income_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_incomes_for_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM incomes
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
