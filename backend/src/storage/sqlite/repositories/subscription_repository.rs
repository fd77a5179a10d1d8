use anyhow::Result;
use async_trait::async_trait;
use shared::{PlanType, Subscription};
use sqlx::Row;

use crate::storage::sqlite::db::SqliteConnection;
use crate::storage::traits::SubscriptionStorage;

/// Repository for the per-user subscription row
#[derive(Clone)]
pub struct SubscriptionRepository {
    db: SqliteConnection,
}

impl SubscriptionRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionStorage for SubscriptionRepository {
    async fn get_subscription(&self, user_id: &str) -> Result<Option<Subscription>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, plan_type, is_active, end_date, updated_at
            FROM subscriptions
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| Subscription {
            user_id: r.get("user_id"),
            plan_type: PlanType::from_str_or_free(r.get("plan_type")),
            is_active: r.get("is_active"),
            end_date: r.get("end_date"),
            updated_at: r.get("updated_at"),
        }))
    }

    async fn insert_subscription(&self, subscription: &Subscription) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (user_id, plan_type, is_active, end_date, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&subscription.user_id)
        .bind(subscription.plan_type.as_str())
        .bind(subscription.is_active)
        .bind(subscription.end_date)
        .bind(&subscription.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn update_subscription(&self, subscription: &Subscription) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE subscriptions
            SET plan_type = ?, is_active = ?, end_date = ?, updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(subscription.plan_type.as_str())
        .bind(subscription.is_active)
        .bind(subscription.end_date)
        .bind(&subscription.updated_at)
        .bind(&subscription.user_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_subscriptions_for_user(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM subscriptions
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
