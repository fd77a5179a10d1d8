//! Notification domain logic.
//!
//! Notifications are created by other services, never by end users directly.
//! Every operation here is best-effort: storage failures are logged and
//! converted to `false`/empty results so a failed notification never blocks
//! the primary action that triggered it.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::next_epoch_millis;
use crate::storage::NotificationStorage;
use shared::{Notification, NotificationKind};

/// Service for managing notifications
#[derive(Clone)]
pub struct NotificationService {
    notification_repository: Arc<dyn NotificationStorage>,
}

impl NotificationService {
    pub fn new(notification_repository: Arc<dyn NotificationStorage>) -> Self {
        Self {
            notification_repository,
        }
    }

    /// Create a notification for a user. Returns false if storing failed.
    pub async fn create_notification(
        &self,
        user_id: &str,
        title: &str,
        message: &str,
        kind: NotificationKind,
    ) -> bool {
        let notification = Notification {
            id: Notification::generate_id(next_epoch_millis()),
            user_id: user_id.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            read: false,
            created_at: Utc::now().to_rfc3339(),
        };

        match self
            .notification_repository
            .store_notification(&notification)
            .await
        {
            Ok(()) => {
                info!("Created notification {} for user {}", notification.id, user_id);
                true
            }
            Err(e) => {
                warn!("Failed to create notification for user {}: {}", user_id, e);
                false
            }
        }
    }

    /// Notifications for a user, newest first; empty when the query fails
    pub async fn get_notifications(&self, user_id: &str, limit: Option<u32>) -> Vec<Notification> {
        match self
            .notification_repository
            .list_notifications(user_id, limit)
            .await
        {
            Ok(notifications) => notifications,
            Err(e) => {
                warn!("Failed to list notifications for user {}: {}", user_id, e);
                Vec::new()
            }
        }
    }

    /// Mark one notification as read
    pub async fn mark_read(&self, user_id: &str, notification_id: &str) -> bool {
        match self
            .notification_repository
            .mark_notification_read(user_id, notification_id)
            .await
        {
            Ok(found) => found,
            Err(e) => {
                warn!(
                    "Failed to mark notification {} read for user {}: {}",
                    notification_id, user_id, e
                );
                false
            }
        }
    }

    /// Mark every notification for a user as read
    pub async fn mark_all_read(&self, user_id: &str) -> bool {
        match self
            .notification_repository
            .mark_all_notifications_read(user_id)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!("Failed to mark notifications read for user {}: {}", user_id, e);
                false
            }
        }
    }

    /// Delete a notification
    pub async fn delete_notification(&self, user_id: &str, notification_id: &str) -> bool {
        match self
            .notification_repository
            .delete_notification(user_id, notification_id)
            .await
        {
            Ok(found) => found,
            Err(e) => {
                warn!(
                    "Failed to delete notification {} for user {}: {}",
                    notification_id, user_id, e
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::{NotificationRepository, SqliteConnection};
    use anyhow::Result;
    use async_trait::async_trait;

    async fn create_test_service() -> NotificationService {
        let db = SqliteConnection::init_test()
            .await
            .expect("Failed to init test DB");
        NotificationService::new(Arc::new(NotificationRepository::new(db)))
    }

    /// Storage stub whose every operation fails
    struct BrokenStorage;

    #[async_trait]
    impl NotificationStorage for BrokenStorage {
        async fn store_notification(&self, _notification: &Notification) -> Result<()> {
            Err(anyhow::anyhow!("storage offline"))
        }

        async fn list_notifications(
            &self,
            _user_id: &str,
            _limit: Option<u32>,
        ) -> Result<Vec<Notification>> {
            Err(anyhow::anyhow!("storage offline"))
        }

        async fn mark_notification_read(&self, _user_id: &str, _id: &str) -> Result<bool> {
            Err(anyhow::anyhow!("storage offline"))
        }

        async fn mark_all_notifications_read(&self, _user_id: &str) -> Result<u64> {
            Err(anyhow::anyhow!("storage offline"))
        }

        async fn delete_notification(&self, _user_id: &str, _id: &str) -> Result<bool> {
            Err(anyhow::anyhow!("storage offline"))
        }

        async fn delete_notifications_for_user(&self, _user_id: &str) -> Result<u64> {
            Err(anyhow::anyhow!("storage offline"))
        }
    }

    #[tokio::test]
    async fn test_create_and_list_notifications() {
        let service = create_test_service().await;

        assert!(
            service
                .create_notification("user::1", "Welcome", "Hello there", NotificationKind::Info)
                .await
        );
        assert!(
            service
                .create_notification(
                    "user::1",
                    "Budget exceeded",
                    "Food is over budget",
                    NotificationKind::Warning,
                )
                .await
        );

        let notifications = service.get_notifications("user::1", None).await;
        assert_eq!(notifications.len(), 2);
        assert!(notifications.iter().all(|n| !n.read));
    }

    #[tokio::test]
    async fn test_mark_read_and_mark_all_read() {
        let service = create_test_service().await;

        service
            .create_notification("user::1", "One", "first", NotificationKind::Info)
            .await;
        service
            .create_notification("user::1", "Two", "second", NotificationKind::Success)
            .await;

        let notifications = service.get_notifications("user::1", None).await;
        assert!(service.mark_read("user::1", &notifications[0].id).await);
        assert!(service.mark_all_read("user::1").await);

        let notifications = service.get_notifications("user::1", None).await;
        assert!(notifications.iter().all(|n| n.read));
    }

    #[tokio::test]
    async fn test_mark_read_unknown_id_returns_false() {
        let service = create_test_service().await;
        assert!(!service.mark_read("user::1", "notification::42").await);
    }

    #[tokio::test]
    async fn test_operations_never_error_on_broken_storage() {
        let service = NotificationService::new(Arc::new(BrokenStorage));

        assert!(
            !service
                .create_notification("user::1", "Lost", "gone", NotificationKind::Info)
                .await
        );
        assert!(service.get_notifications("user::1", None).await.is_empty());
        assert!(!service.mark_read("user::1", "notification::1").await);
        assert!(!service.mark_all_read("user::1").await);
        assert!(!service.delete_notification("user::1", "notification::1").await);
    }
}
