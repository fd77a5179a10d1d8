//! Budget domain logic.
//!
//! Budgets are monthly caps per category. The report compares each budget
//! against the summed expenses for the same category and month, flagging the
//! ones that went over.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::expense_service::month_bounds;
use crate::domain::next_epoch_millis;
use crate::storage::{BudgetStorage, ExpenseStorage};
use shared::{Budget, BudgetReportRow, CreateBudgetRequest, UpdateBudgetRequest};

fn validate_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(anyhow::anyhow!("Budget month must be between 1 and 12"));
    }
    Ok(())
}

/// Service for managing budgets
#[derive(Clone)]
pub struct BudgetService {
    budget_repository: Arc<dyn BudgetStorage>,
    expense_repository: Arc<dyn ExpenseStorage>,
}

impl BudgetService {
    pub fn new(
        budget_repository: Arc<dyn BudgetStorage>,
        expense_repository: Arc<dyn ExpenseStorage>,
    ) -> Self {
        Self {
            budget_repository,
            expense_repository,
        }
    }

    /// Create a new budget for a user
    pub async fn add_budget(&self, user_id: &str, request: CreateBudgetRequest) -> Result<Budget> {
        info!("Creating budget for user {}: {:?}", user_id, request);

        if request.category.trim().is_empty() {
            return Err(anyhow::anyhow!("Budget category cannot be empty"));
        }
        if request.amount <= 0.0 {
            return Err(anyhow::anyhow!("Budget amount must be positive"));
        }
        validate_month(request.month)?;

        let budget = Budget {
            id: Budget::generate_id(next_epoch_millis()),
            user_id: user_id.to_string(),
            category: request.category.trim().to_string(),
            amount: request.amount,
            month: request.month,
            year: request.year,
            created_at: Utc::now().to_rfc3339(),
        };

        self.budget_repository.store_budget(&budget).await?;

        info!("Successfully created budget: {}", budget.id);
        Ok(budget)
    }

    /// Update named fields of an existing budget
    pub async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        request: UpdateBudgetRequest,
    ) -> Result<Budget> {
        info!("Updating budget {} for user {}", budget_id, user_id);

        let mut budget = self
            .budget_repository
            .get_budget(user_id, budget_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Budget not found"))?;

        if let Some(category) = request.category {
            if category.trim().is_empty() {
                return Err(anyhow::anyhow!("Budget category cannot be empty"));
            }
            budget.category = category.trim().to_string();
        }
        if let Some(amount) = request.amount {
            if amount <= 0.0 {
                return Err(anyhow::anyhow!("Budget amount must be positive"));
            }
            budget.amount = amount;
        }
        if let Some(month) = request.month {
            validate_month(month)?;
            budget.month = month;
        }
        if let Some(year) = request.year {
            budget.year = year;
        }

        self.budget_repository.update_budget(&budget).await?;

        Ok(budget)
    }

    /// Delete a budget, returning whether it existed
    pub async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<bool> {
        info!("Deleting budget {} for user {}", budget_id, user_id);
        self.budget_repository.delete_budget(user_id, budget_id).await
    }

    /// All budgets for a user, ordered by category
    pub async fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        self.budget_repository.list_budgets(user_id).await
    }

    /// Compare each budget for a month against the summed expenses in the
    /// same category
    pub async fn budget_report(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<BudgetReportRow>> {
        validate_month(month)?;

        let budgets = self
            .budget_repository
            .list_budgets_for_month(user_id, month, year)
            .await?;

        let (start, end) = month_bounds(month, year)?;
        let expenses = self
            .expense_repository
            .list_expenses_in_range(user_id, start, end)
            .await?;

        let rows = budgets
            .into_iter()
            .map(|budget| {
                let spent: f64 = expenses
                    .iter()
                    .filter(|e| e.category == budget.category)
                    .map(|e| e.amount)
                    .sum();
                let remaining = budget.amount - spent;

                BudgetReportRow {
                    over_budget: spent > budget.amount,
                    spent,
                    remaining,
                    budget,
                }
            })
            .collect();

        Ok(rows)
    }
}
