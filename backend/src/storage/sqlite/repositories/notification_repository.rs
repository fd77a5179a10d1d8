use anyhow::Result;
use async_trait::async_trait;
use shared::{Notification, NotificationKind};
use sqlx::{sqlite::SqliteRow, Row};

use crate::storage::sqlite::db::SqliteConnection;
use crate::storage::traits::NotificationStorage;

/// Repository for notification operations
#[derive(Clone)]
pub struct NotificationRepository {
    db: SqliteConnection,
}

impl NotificationRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

fn row_to_notification(row: &SqliteRow) -> Notification {
    Notification {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        message: row.get("message"),
        kind: NotificationKind::from_str_or_info(row.get("kind")),
        read: row.get("read"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl NotificationStorage for NotificationRepository {
    async fn store_notification(&self, notification: &Notification) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, title, message, kind, read, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&notification.id)
        .bind(&notification.user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.kind.as_str())
        .bind(notification.read)
        .bind(&notification.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_notifications(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Notification>> {
        let limit = limit.unwrap_or(u32::MAX);
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, message, kind, read, created_at
            FROM notifications
            WHERE user_id = ?
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_notification).collect())
    }

    async fn mark_notification_read(&self, user_id: &str, notification_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(notification_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_notifications_read(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE user_id = ? AND read = FALSE
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM notifications
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(notification_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_notifications_for_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM notifications
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
