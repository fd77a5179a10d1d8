//! Account deletion.
//!
//! Deleting a user cascades across every table that carries the owner
//! reference. The sequence is fixed and runs without a transaction: a
//! failure partway leaves a partially-deleted user.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::storage::{
    BudgetStorage, ExpenseStorage, GoalStorage, IncomeStorage, NotificationStorage,
    ProfileStorage, SavingsStorage, SubscriptionStorage, UserStorage,
};

/// Result of an account deletion request
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteUserOutcome {
    /// No user row matched the email; nothing was mutated
    NotFound,
    /// The user and all owned rows were removed
    Deleted { user_id: String },
}

/// Service for deleting a user account and everything it owns
#[derive(Clone)]
pub struct AccountService {
    user_repository: Arc<dyn UserStorage>,
    notification_repository: Arc<dyn NotificationStorage>,
    subscription_repository: Arc<dyn SubscriptionStorage>,
    expense_repository: Arc<dyn ExpenseStorage>,
    income_repository: Arc<dyn IncomeStorage>,
    budget_repository: Arc<dyn BudgetStorage>,
    goal_repository: Arc<dyn GoalStorage>,
    savings_repository: Arc<dyn SavingsStorage>,
    profile_repository: Arc<dyn ProfileStorage>,
}

impl AccountService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repository: Arc<dyn UserStorage>,
        notification_repository: Arc<dyn NotificationStorage>,
        subscription_repository: Arc<dyn SubscriptionStorage>,
        expense_repository: Arc<dyn ExpenseStorage>,
        income_repository: Arc<dyn IncomeStorage>,
        budget_repository: Arc<dyn BudgetStorage>,
        goal_repository: Arc<dyn GoalStorage>,
        savings_repository: Arc<dyn SavingsStorage>,
        profile_repository: Arc<dyn ProfileStorage>,
    ) -> Self {
        Self {
            user_repository,
            notification_repository,
            subscription_repository,
            expense_repository,
            income_repository,
            budget_repository,
            goal_repository,
            savings_repository,
            profile_repository,
        }
    }

    /// Delete the user matching an email and every row they own
    pub async fn delete_user_by_email(&self, email: &str) -> Result<DeleteUserOutcome> {
        info!("Account deletion requested for email {}", email);

        let user = match self.user_repository.find_user_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!("No user found for email {}", email);
                return Ok(DeleteUserOutcome::NotFound);
            }
        };

        // Fixed sequence, no rollback
        self.notification_repository
            .delete_notifications_for_user(&user.id)
            .await?;
        self.subscription_repository
            .delete_subscriptions_for_user(&user.id)
            .await?;
        self.expense_repository
            .delete_expenses_for_user(&user.id)
            .await?;
        self.income_repository
            .delete_incomes_for_user(&user.id)
            .await?;
        self.budget_repository
            .delete_budgets_for_user(&user.id)
            .await?;
        self.goal_repository.delete_goals_for_user(&user.id).await?;
        self.savings_repository
            .delete_savings_for_user(&user.id)
            .await?;
        self.profile_repository
            .delete_profile_for_user(&user.id)
            .await?;
        self.user_repository.delete_user(&user.id).await?;

        info!("Deleted user {} and all owned rows", user.id);
        Ok(DeleteUserOutcome::Deleted { user_id: user.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BudgetService, ExpenseService, GoalService, IncomeService, NotificationService,
        SavingsService, SubscriptionService,
    };
    use crate::storage::sqlite::{
        BudgetRepository, ExpenseRepository, GoalRepository, IncomeRepository,
        NotificationRepository, ProfileRepository, SavingsRepository, SqliteConnection,
        SubscriptionRepository, UserRepository,
    };
    use chrono::{NaiveDate, Utc};
    use shared::{
        CreateBudgetRequest, CreateExpenseRequest, CreateGoalRequest, CreateIncomeRequest,
        NotificationKind, PlanType, UpdateSavingsRequest, User,
    };

    struct TestHarness {
        account_service: AccountService,
        user_repository: Arc<UserRepository>,
        expense_service: ExpenseService,
        income_service: IncomeService,
        budget_service: BudgetService,
        goal_service: GoalService,
        savings_service: SavingsService,
        subscription_service: SubscriptionService,
        notification_service: NotificationService,
    }

    async fn create_test_harness() -> TestHarness {
        let db = SqliteConnection::init_test()
            .await
            .expect("Failed to init test DB");

        let user_repository = Arc::new(UserRepository::new(db.clone()));
        let notification_repository = Arc::new(NotificationRepository::new(db.clone()));
        let subscription_repository = Arc::new(SubscriptionRepository::new(db.clone()));
        let expense_repository = Arc::new(ExpenseRepository::new(db.clone()));
        let income_repository = Arc::new(IncomeRepository::new(db.clone()));
        let budget_repository = Arc::new(BudgetRepository::new(db.clone()));
        let goal_repository = Arc::new(GoalRepository::new(db.clone()));
        let savings_repository = Arc::new(SavingsRepository::new(db.clone()));
        let profile_repository = Arc::new(ProfileRepository::new(db));

        let notification_service = NotificationService::new(notification_repository.clone());

        TestHarness {
            account_service: AccountService::new(
                user_repository.clone(),
                notification_repository,
                subscription_repository.clone(),
                expense_repository.clone(),
                income_repository.clone(),
                budget_repository.clone(),
                goal_repository.clone(),
                savings_repository.clone(),
                profile_repository,
            ),
            user_repository,
            expense_service: ExpenseService::new(expense_repository.clone()),
            income_service: IncomeService::new(income_repository),
            budget_service: BudgetService::new(budget_repository, expense_repository),
            goal_service: GoalService::new(goal_repository),
            savings_service: SavingsService::new(savings_repository),
            subscription_service: SubscriptionService::new(
                subscription_repository,
                notification_service.clone(),
            ),
            notification_service,
        }
    }

    async fn seed_user(harness: &TestHarness, user_id: &str, email: &str) {
        harness
            .user_repository
            .store_user(&User {
                id: user_id.to_string(),
                email: email.to_string(),
                created_at: Utc::now().to_rfc3339(),
            })
            .await
            .expect("Failed to store user");

        harness
            .expense_service
            .add_expense(
                user_id,
                CreateExpenseRequest {
                    description: "Groceries".to_string(),
                    amount: 120.0,
                    category: "Food".to_string(),
                    date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
                    notes: None,
                    recurring: false,
                },
            )
            .await
            .unwrap();
        harness
            .income_service
            .add_income(
                user_id,
                CreateIncomeRequest {
                    description: "Salary".to_string(),
                    amount: 4000.0,
                    source: "Employer".to_string(),
                    date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
                    recurring: true,
                },
            )
            .await
            .unwrap();
        harness
            .budget_service
            .add_budget(
                user_id,
                CreateBudgetRequest {
                    category: "Food".to_string(),
                    amount: 500.0,
                    month: 3,
                    year: 2026,
                },
            )
            .await
            .unwrap();
        harness
            .goal_service
            .add_goal(
                user_id,
                CreateGoalRequest {
                    title: "Vacation".to_string(),
                    target_amount: 2000.0,
                    current_amount: 100.0,
                    target_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
                    description: None,
                },
            )
            .await
            .unwrap();
        harness
            .savings_service
            .upsert_savings(
                user_id,
                UpdateSavingsRequest {
                    balance: 1000.0,
                    monthly_saved: 200.0,
                    monthly_returns: 5.0,
                    savings_rate: 10.0,
                },
            )
            .await
            .unwrap();
        harness
            .subscription_service
            .set_subscription_status(user_id, PlanType::Pro)
            .await
            .unwrap();
        harness
            .notification_service
            .create_notification(user_id, "Hello", "world", NotificationKind::Info)
            .await;
    }

    #[tokio::test]
    async fn test_delete_unknown_email_mutates_nothing() {
        let harness = create_test_harness().await;
        seed_user(&harness, "user::1", "ana@example.com").await;

        let outcome = harness
            .account_service
            .delete_user_by_email("nobody@example.com")
            .await
            .unwrap();

        assert_eq!(outcome, DeleteUserOutcome::NotFound);

        // Everything seeded is still there
        assert_eq!(harness.expense_service.get_expenses("user::1").await.unwrap().len(), 1);
        assert_eq!(harness.income_service.get_incomes("user::1").await.unwrap().len(), 1);
        assert!(harness
            .user_repository
            .find_user_by_email("ana@example.com")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_delete_user_cascades_across_all_tables() {
        let harness = create_test_harness().await;
        seed_user(&harness, "user::1", "ana@example.com").await;
        seed_user(&harness, "user::2", "bob@example.com").await;

        let outcome = harness
            .account_service
            .delete_user_by_email("ana@example.com")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DeleteUserOutcome::Deleted {
                user_id: "user::1".to_string()
            }
        );

        assert!(harness.expense_service.get_expenses("user::1").await.unwrap().is_empty());
        assert!(harness.income_service.get_incomes("user::1").await.unwrap().is_empty());
        assert!(harness.budget_service.get_budgets("user::1").await.unwrap().is_empty());
        assert!(harness.goal_service.get_goals("user::1").await.unwrap().is_empty());
        assert!(harness
            .notification_service
            .get_notifications("user::1", None)
            .await
            .is_empty());
        assert!(!harness
            .subscription_service
            .check_subscription("user::1")
            .await
            .unwrap()
            .is_pro);
        assert!(harness
            .user_repository
            .find_user_by_email("ana@example.com")
            .await
            .unwrap()
            .is_none());

        // Other users are untouched
        assert_eq!(harness.expense_service.get_expenses("user::2").await.unwrap().len(), 1);
        assert!(harness
            .user_repository
            .find_user_by_email("bob@example.com")
            .await
            .unwrap()
            .is_some());
    }
}
