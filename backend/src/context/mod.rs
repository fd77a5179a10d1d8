//! # Session Contexts
//!
//! Application-state objects scoped to one authenticated session. Each is
//! seeded by a single fetch when the session starts and rebuilt when the
//! user changes. Setters write through to the store first and update the
//! cached value only after the write succeeds.

use anyhow::Result;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::{currency, ProfileService, SubscriptionService};
use shared::{PlanType, SubscriptionStatusResponse, UpdateProfileRequest};

/// Raised when a user-scoped operation runs without a session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,
}

/// Tracks the signed-in user for the lifetime of the application
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    user_id: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, user_id: &str) {
        self.user_id = Some(user_id.to_string());
    }

    pub fn sign_out(&mut self) {
        self.user_id = None;
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// The signed-in user id, or the explicit not-authenticated error
    pub fn require_user(&self) -> Result<&str, AuthError> {
        self.user_id.as_deref().ok_or(AuthError::NotAuthenticated)
    }
}

/// Holds the session's active display currency, backed by the profile row
pub struct CurrencyContext {
    profile_service: ProfileService,
    user_id: String,
    active: RwLock<String>,
}

impl CurrencyContext {
    /// Seed the context from the user's stored preference; users without a
    /// profile start on the base currency
    pub async fn load(profile_service: ProfileService, user_id: &str) -> Self {
        let code = match profile_service.get_profile(user_id).await {
            Ok(profile) => profile.currency,
            Err(_) => currency::BASE_CURRENCY.to_string(),
        };

        Self {
            profile_service,
            user_id: user_id.to_string(),
            active: RwLock::new(code),
        }
    }

    pub async fn active_code(&self) -> String {
        self.active.read().await.clone()
    }

    /// Persist a new display currency, then update the cached code. The
    /// cache keeps its old value when the write fails.
    pub async fn set_currency(&self, code: &str) -> Result<()> {
        let profile = self
            .profile_service
            .update_profile(
                &self.user_id,
                UpdateProfileRequest {
                    name: None,
                    phone: None,
                    occupation: None,
                    avatar_url: None,
                    theme: None,
                    currency: Some(code.to_string()),
                    date_format: None,
                    month_start_day: None,
                },
            )
            .await?;

        *self.active.write().await = profile.currency;
        Ok(())
    }
}

/// Holds the session's subscription state, backed by the subscription row
pub struct SubscriptionContext {
    subscription_service: SubscriptionService,
    user_id: String,
    status: RwLock<SubscriptionStatusResponse>,
}

impl SubscriptionContext {
    /// Seed the context with one subscription check
    pub async fn load(subscription_service: SubscriptionService, user_id: &str) -> Result<Self> {
        let status = subscription_service.check_subscription(user_id).await?;

        Ok(Self {
            subscription_service,
            user_id: user_id.to_string(),
            status: RwLock::new(status),
        })
    }

    pub async fn is_pro(&self) -> bool {
        self.status.read().await.is_pro
    }

    pub async fn status(&self) -> SubscriptionStatusResponse {
        self.status.read().await.clone()
    }

    /// Re-derive the cached status from the store
    pub async fn refresh(&self) -> Result<()> {
        let status = self
            .subscription_service
            .check_subscription(&self.user_id)
            .await?;
        *self.status.write().await = status;
        Ok(())
    }

    /// Persist a plan change, then update the cached status
    pub async fn set_status(&self, plan_type: PlanType) -> Result<()> {
        self.subscription_service
            .set_subscription_status(&self.user_id, plan_type)
            .await?;
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationService;
    use crate::storage::sqlite::{
        NotificationRepository, ProfileRepository, SqliteConnection, SubscriptionRepository,
        UserRepository,
    };
    use crate::storage::UserStorage;
    use chrono::Utc;
    use shared::User;
    use std::sync::Arc;

    async fn create_services() -> (ProfileService, SubscriptionService) {
        let db = SqliteConnection::init_test()
            .await
            .expect("Failed to init test DB");
        // Profiles carry a foreign key to users; seed the row these tests use.
        UserRepository::new(db.clone())
            .store_user(&User {
                id: "user::1".to_string(),
                email: "user1@example.com".to_string(),
                created_at: Utc::now().to_rfc3339(),
            })
            .await
            .expect("Failed to seed user");
        let profile_service = ProfileService::new(Arc::new(ProfileRepository::new(db.clone())));
        let notification_service =
            NotificationService::new(Arc::new(NotificationRepository::new(db.clone())));
        let subscription_service = SubscriptionService::new(
            Arc::new(SubscriptionRepository::new(db)),
            notification_service,
        );
        (profile_service, subscription_service)
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = SessionContext::anonymous();
        assert!(!session.is_authenticated());
        assert_eq!(session.require_user(), Err(AuthError::NotAuthenticated));

        session.sign_in("user::1");
        assert_eq!(session.require_user().unwrap(), "user::1");

        // User change resets the session state
        session.sign_in("user::2");
        assert_eq!(session.user_id(), Some("user::2"));

        session.sign_out();
        assert!(session.require_user().is_err());
    }

    #[tokio::test]
    async fn test_currency_context_seeds_from_profile() {
        let (profiles, _) = create_services().await;
        profiles.ensure_profile("user::1", "Ana").await.unwrap();

        let context = CurrencyContext::load(profiles, "user::1").await;
        assert_eq!(context.active_code().await, "BRL");
    }

    #[tokio::test]
    async fn test_currency_context_writes_through() {
        let (profiles, _) = create_services().await;
        profiles.ensure_profile("user::1", "Ana").await.unwrap();

        let context = CurrencyContext::load(profiles.clone(), "user::1").await;
        context.set_currency("USD").await.unwrap();

        assert_eq!(context.active_code().await, "USD");
        // The preference reached the store, not just the cache
        let profile = profiles.get_profile("user::1").await.unwrap();
        assert_eq!(profile.currency, "USD");
    }

    #[tokio::test]
    async fn test_currency_cache_unchanged_when_write_fails() {
        let (profiles, _) = create_services().await;
        // No profile row exists, so the write-through must fail
        let context = CurrencyContext::load(profiles, "user::1").await;

        assert!(context.set_currency("USD").await.is_err());
        assert_eq!(context.active_code().await, "BRL");
    }

    #[tokio::test]
    async fn test_subscription_context_refresh_and_write_through() {
        let (_, subscriptions) = create_services().await;

        let context = SubscriptionContext::load(subscriptions.clone(), "user::1")
            .await
            .unwrap();
        assert!(!context.is_pro().await);

        context.set_status(PlanType::Pro).await.unwrap();
        assert!(context.is_pro().await);

        // A fresh context for the same user sees the stored state
        let rebuilt = SubscriptionContext::load(subscriptions, "user::1")
            .await
            .unwrap();
        assert!(rebuilt.is_pro().await);
    }
}
