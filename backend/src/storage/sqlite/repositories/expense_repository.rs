use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::Expense;
use sqlx::{sqlite::SqliteRow, Row};

use crate::storage::sqlite::db::SqliteConnection;
use crate::storage::traits::ExpenseStorage;

/// Repository for expense operations
#[derive(Clone)]
pub struct ExpenseRepository {
    db: SqliteConnection,
}

impl ExpenseRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

fn row_to_expense(row: &SqliteRow) -> Expense {
    Expense {
        id: row.get("id"),
        user_id: row.get("user_id"),
        description: row.get("description"),
        amount: row.get("amount"),
        category: row.get("category"),
        date: row.get("date"),
        notes: row.get("notes"),
        recurring: row.get("recurring"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, description, amount, category, date, notes, recurring, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.user_id)
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(expense.date)
        .bind(&expense.notes)
        .bind(expense.recurring)
        .bind(&expense.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, description, amount, category, date, notes, recurring, created_at
            FROM expenses
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(expense_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| row_to_expense(&r)))
    }

    async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, description, amount, category, date, notes, recurring, created_at
            FROM expenses
            WHERE user_id = ?
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_expense).collect())
    }

    async fn list_expenses_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, description, amount, category, date, notes, recurring, created_at
            FROM expenses
            WHERE user_id = ? AND date >= ? AND date <= ?
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_expense).collect())
    }

    async fn update_expense(&self, expense: &Expense) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE expenses
            SET description = ?, amount = ?, category = ?, date = ?, notes = ?, recurring = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(expense.date)
        .bind(&expense.notes)
        .bind(expense.recurring)
        .bind(&expense.user_id)
        .bind(&expense.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(expense_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expenses_for_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM expenses
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
