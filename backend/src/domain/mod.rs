//! # Domain Module
//!
//! Contains all business logic for the finance tracker.
//!
//! This module encapsulates the core rules and services that define how
//! expenses, incomes, budgets, goals, savings, subscriptions, notifications,
//! and profiles are modeled and managed. It operates independently of any
//! specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **expense_service / income_service**: Transaction CRUD and the category
//!   distribution used by the dashboard charts
//! - **budget_service**: Budget CRUD and the monthly over/under report
//! - **goal_service**: Goal CRUD with derived progress
//! - **savings_service**: The per-user savings overview (upserted singleton)
//! - **subscription_service**: Plan checks, upserts, and payment completion
//! - **notification_service**: Best-effort notification handling
//! - **profile_service**: Profile reads and partial updates
//! - **currency**: Static conversion rates and display formatting
//! - **email_service**: SMTP delivery for family invitations
//! - **analytics**: Fire-and-forget marketing event sink
//! - **account_service**: Cross-table account deletion
//!
//! ## Key Responsibilities
//!
//! - Stamping the owning user id on every record before it is stored
//! - Validating input data before it reaches the storage layer
//! - Shaping rows into view-ready results (derived percentages, ordering)
//! - Keeping best-effort side effects away from primary operation results

pub mod account_service;
pub mod analytics;
pub mod budget_service;
pub mod currency;
pub mod email_service;
pub mod expense_service;
pub mod goal_service;
pub mod income_service;
pub mod notification_service;
pub mod profile_service;
pub mod savings_service;
pub mod subscription_service;

pub use account_service::{AccountService, DeleteUserOutcome};
pub use analytics::{AnalyticsEvent, AnalyticsSink, LogAnalyticsSink};
pub use budget_service::BudgetService;
pub use email_service::{EmailConfig, EmailService};
pub use expense_service::ExpenseService;
pub use goal_service::GoalService;
pub use income_service::IncomeService;
pub use notification_service::NotificationService;
pub use profile_service::ProfileService;
pub use savings_service::SavingsService;
pub use subscription_service::SubscriptionService;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Epoch milliseconds for stamping new record ids.
///
/// Strictly increasing across calls so ids minted within the same
/// millisecond stay unique.
pub(crate) fn next_epoch_millis() -> u64 {
    static LAST: AtomicU64 = AtomicU64::new(0);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST.compare_exchange(prev, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(current) => prev = current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_epoch_millis_is_strictly_increasing() {
        let mut last = 0;
        for _ in 0..1000 {
            let next = next_epoch_millis();
            assert!(next > last);
            last = next;
        }
    }
}
