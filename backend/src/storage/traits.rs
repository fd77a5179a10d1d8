//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer. Every
//! operation is scoped to the owning user id; the application always filters
//! by it, while row-level isolation itself is the store's concern.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    Budget, Expense, Goal, Income, Notification, Profile, SavingsOverview, Subscription, User,
};

/// Trait defining the interface for expense storage operations
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense
    async fn store_expense(&self, expense: &Expense) -> Result<()>;

    /// Retrieve a specific expense by ID
    async fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Option<Expense>>;

    /// List all expenses for a user ordered by date descending
    async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>>;

    /// List expenses for a user with dates inside the given inclusive range
    async fn list_expenses_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>>;

    /// Update an existing expense
    async fn update_expense(&self, expense: &Expense) -> Result<()>;

    /// Delete a single expense
    /// Returns true if the expense was found and deleted, false otherwise
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool>;

    /// Delete every expense belonging to a user, returning the number removed
    async fn delete_expenses_for_user(&self, user_id: &str) -> Result<u64>;
}

/// Trait defining the interface for income storage operations
#[async_trait]
pub trait IncomeStorage: Send + Sync {
    /// Store a new income
    async fn store_income(&self, income: &Income) -> Result<()>;

    /// Retrieve a specific income by ID
    async fn get_income(&self, user_id: &str, income_id: &str) -> Result<Option<Income>>;

    /// List all incomes for a user ordered by date descending
    async fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>>;

    /// Update an existing income
    async fn update_income(&self, income: &Income) -> Result<()>;

    /// Delete a single income
    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<bool>;

    /// Delete every income belonging to a user, returning the number removed
    async fn delete_incomes_for_user(&self, user_id: &str) -> Result<u64>;
}

/// Trait defining the interface for budget storage operations
#[async_trait]
pub trait BudgetStorage: Send + Sync {
    /// Store a new budget
    async fn store_budget(&self, budget: &Budget) -> Result<()>;

    /// Retrieve a specific budget by ID
    async fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Option<Budget>>;

    /// List all budgets for a user ordered by category ascending
    async fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;

    /// List budgets for a specific month and year, ordered by category ascending
    async fn list_budgets_for_month(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Budget>>;

    /// Update an existing budget
    async fn update_budget(&self, budget: &Budget) -> Result<()>;

    /// Delete a single budget
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<bool>;

    /// Delete every budget belonging to a user, returning the number removed
    async fn delete_budgets_for_user(&self, user_id: &str) -> Result<u64>;
}

/// Trait defining the interface for goal storage operations
#[async_trait]
pub trait GoalStorage: Send + Sync {
    /// Store a new goal
    async fn store_goal(&self, goal: &Goal) -> Result<()>;

    /// Retrieve a specific goal by ID
    async fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>>;

    /// List all goals for a user ordered by target date ascending
    async fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>>;

    /// Update an existing goal
    async fn update_goal(&self, goal: &Goal) -> Result<()>;

    /// Delete a single goal
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<bool>;

    /// Delete every goal belonging to a user, returning the number removed
    async fn delete_goals_for_user(&self, user_id: &str) -> Result<u64>;
}

/// Trait defining the interface for the per-user savings overview row
#[async_trait]
pub trait SavingsStorage: Send + Sync {
    /// Retrieve the savings overview for a user, if one exists
    async fn get_savings(&self, user_id: &str) -> Result<Option<SavingsOverview>>;

    /// Insert a new savings overview row
    async fn insert_savings(&self, overview: &SavingsOverview) -> Result<()>;

    /// Overwrite the existing savings overview row
    async fn update_savings(&self, overview: &SavingsOverview) -> Result<()>;

    /// Delete the savings overview for a user
    async fn delete_savings_for_user(&self, user_id: &str) -> Result<bool>;
}

/// Trait defining the interface for the per-user subscription row
#[async_trait]
pub trait SubscriptionStorage: Send + Sync {
    /// Retrieve the subscription for a user, if one exists
    async fn get_subscription(&self, user_id: &str) -> Result<Option<Subscription>>;

    /// Insert a new subscription row
    async fn insert_subscription(&self, subscription: &Subscription) -> Result<()>;

    /// Overwrite the existing subscription row
    async fn update_subscription(&self, subscription: &Subscription) -> Result<()>;

    /// Delete the subscription for a user
    async fn delete_subscriptions_for_user(&self, user_id: &str) -> Result<bool>;
}

/// Trait defining the interface for notification storage operations
#[async_trait]
pub trait NotificationStorage: Send + Sync {
    /// Store a new notification
    async fn store_notification(&self, notification: &Notification) -> Result<()>;

    /// List notifications for a user, newest first, with an optional limit
    async fn list_notifications(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Notification>>;

    /// Mark a single notification as read
    /// Returns true if the notification was found
    async fn mark_notification_read(&self, user_id: &str, notification_id: &str) -> Result<bool>;

    /// Mark every notification for a user as read, returning the number changed
    async fn mark_all_notifications_read(&self, user_id: &str) -> Result<u64>;

    /// Delete a single notification
    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> Result<bool>;

    /// Delete every notification belonging to a user, returning the number removed
    async fn delete_notifications_for_user(&self, user_id: &str) -> Result<u64>;
}

/// Trait defining the interface for profile storage operations
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Retrieve the profile for a user, if one exists
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Insert a new profile row
    async fn insert_profile(&self, profile: &Profile) -> Result<()>;

    /// Overwrite the existing profile row
    async fn update_profile(&self, profile: &Profile) -> Result<()>;

    /// Delete the profile for a user
    async fn delete_profile_for_user(&self, user_id: &str) -> Result<bool>;
}

/// Trait defining the interface for user account rows
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a new user
    async fn store_user(&self, user: &User) -> Result<()>;

    /// Retrieve a user by ID
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Look up a user by email address
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Delete a user row
    async fn delete_user(&self, user_id: &str) -> Result<bool>;
}
