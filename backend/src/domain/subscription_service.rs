//! Subscription domain logic.
//!
//! One subscription row per user drives feature gating in the UI layer.
//! Writes use an upsert-by-presence: read the existing row, update when
//! found, insert otherwise. Payment completion composes the upsert with a
//! best-effort welcome notification and is not transactional: when the
//! notification insert fails after the subscription write succeeded, the
//! user stays "pro" without a welcome notification.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::NotificationService;
use crate::storage::SubscriptionStorage;
use shared::{NotificationKind, PlanType, Subscription, SubscriptionStatusResponse};

/// Service for managing subscriptions
#[derive(Clone)]
pub struct SubscriptionService {
    subscription_repository: Arc<dyn SubscriptionStorage>,
    notification_service: NotificationService,
}

impl SubscriptionService {
    pub fn new(
        subscription_repository: Arc<dyn SubscriptionStorage>,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            subscription_repository,
            notification_service,
        }
    }

    /// Current plan for a user; users without a row are on the free plan
    pub async fn check_subscription(&self, user_id: &str) -> Result<SubscriptionStatusResponse> {
        let subscription = self.subscription_repository.get_subscription(user_id).await?;

        Ok(match subscription {
            Some(sub) => SubscriptionStatusResponse {
                is_pro: sub.plan_type == PlanType::Pro && sub.is_active,
                plan_type: sub.plan_type,
                is_active: sub.is_active,
                end_date: sub.end_date,
            },
            None => SubscriptionStatusResponse {
                plan_type: PlanType::Free,
                is_active: false,
                is_pro: false,
                end_date: None,
            },
        })
    }

    /// Set the user's plan, activating it. Calling this twice with the same
    /// plan leaves a single active row.
    pub async fn set_subscription_status(
        &self,
        user_id: &str,
        plan_type: PlanType,
    ) -> Result<Subscription> {
        info!("Setting subscription for user {} to {}", user_id, plan_type);

        let existing = self.subscription_repository.get_subscription(user_id).await?;
        let now = Utc::now().to_rfc3339();

        let subscription = match existing {
            Some(mut sub) => {
                sub.plan_type = plan_type;
                sub.is_active = true;
                sub.updated_at = now;
                self.subscription_repository.update_subscription(&sub).await?;
                sub
            }
            None => {
                let sub = Subscription {
                    user_id: user_id.to_string(),
                    plan_type,
                    is_active: true,
                    end_date: None,
                    updated_at: now,
                };
                self.subscription_repository.insert_subscription(&sub).await?;
                sub
            }
        };

        Ok(subscription)
    }

    /// Finish a checkout: persist the new plan, then drop a welcome
    /// notification. The notification is best-effort and never fails the
    /// subscription change.
    pub async fn process_payment_completion(
        &self,
        user_id: &str,
        plan_type: PlanType,
    ) -> Result<Subscription> {
        let subscription = self.set_subscription_status(user_id, plan_type).await?;

        self.notification_service
            .create_notification(
                user_id,
                "Welcome to Pro!",
                "Your subscription is active. Enjoy unlimited budgets, goals and reports.",
                NotificationKind::Success,
            )
            .await;

        Ok(subscription)
    }
}
