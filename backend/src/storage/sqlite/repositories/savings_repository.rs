use anyhow::Result;
use async_trait::async_trait;
use shared::SavingsOverview;
use sqlx::Row;

use crate::storage::sqlite::db::SqliteConnection;
use crate::storage::traits::SavingsStorage;

/// Repository for the per-user savings overview row
#[derive(Clone)]
pub struct SavingsRepository {
    db: SqliteConnection,
}

impl SavingsRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SavingsStorage for SavingsRepository {
    async fn get_savings(&self, user_id: &str) -> Result<Option<SavingsOverview>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, balance, monthly_saved, monthly_returns, savings_rate, updated_at
            FROM savings
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| SavingsOverview {
            user_id: r.get("user_id"),
            balance: r.get("balance"),
            monthly_saved: r.get("monthly_saved"),
            monthly_returns: r.get("monthly_returns"),
            savings_rate: r.get("savings_rate"),
            updated_at: r.get("updated_at"),
        }))
    }

    async fn insert_savings(&self, overview: &SavingsOverview) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO savings (user_id, balance, monthly_saved, monthly_returns, savings_rate, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&overview.user_id)
        .bind(overview.balance)
        .bind(overview.monthly_saved)
        .bind(overview.monthly_returns)
        .bind(overview.savings_rate)
        .bind(&overview.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn update_savings(&self, overview: &SavingsOverview) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE savings
            SET balance = ?, monthly_saved = ?, monthly_returns = ?, savings_rate = ?, updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(overview.balance)
        .bind(overview.monthly_saved)
        .bind(overview.monthly_returns)
        .bind(overview.savings_rate)
        .bind(&overview.updated_at)
        .bind(&overview.user_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_savings_for_user(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM savings
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
