//! Income domain logic.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::next_epoch_millis;
use crate::storage::IncomeStorage;
use shared::{CreateIncomeRequest, Income, UpdateIncomeRequest};

/// Service for managing incomes
#[derive(Clone)]
pub struct IncomeService {
    income_repository: Arc<dyn IncomeStorage>,
}

impl IncomeService {
    pub fn new(income_repository: Arc<dyn IncomeStorage>) -> Self {
        Self { income_repository }
    }

    /// Create a new income for a user
    pub async fn add_income(&self, user_id: &str, request: CreateIncomeRequest) -> Result<Income> {
        info!("Creating income for user {}: {:?}", user_id, request);

        if request.description.trim().is_empty() {
            return Err(anyhow::anyhow!("Income description cannot be empty"));
        }
        if request.description.len() > 256 {
            return Err(anyhow::anyhow!(
                "Income description cannot exceed 256 characters"
            ));
        }
        if request.amount <= 0.0 {
            return Err(anyhow::anyhow!("Income amount must be positive"));
        }

        let income = Income {
            id: Income::generate_id(next_epoch_millis()),
            user_id: user_id.to_string(),
            description: request.description.trim().to_string(),
            amount: request.amount,
            source: request.source.trim().to_string(),
            date: request.date,
            recurring: request.recurring,
            created_at: Utc::now().to_rfc3339(),
        };

        self.income_repository.store_income(&income).await?;

        info!("Successfully created income: {}", income.id);
        Ok(income)
    }

    /// Update named fields of an existing income
    pub async fn update_income(
        &self,
        user_id: &str,
        income_id: &str,
        request: UpdateIncomeRequest,
    ) -> Result<Income> {
        info!("Updating income {} for user {}", income_id, user_id);

        let mut income = self
            .income_repository
            .get_income(user_id, income_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Income not found"))?;

        if let Some(description) = request.description {
            if description.trim().is_empty() {
                return Err(anyhow::anyhow!("Income description cannot be empty"));
            }
            if description.len() > 256 {
                return Err(anyhow::anyhow!(
                    "Income description cannot exceed 256 characters"
                ));
            }
            income.description = description.trim().to_string();
        }
        if let Some(amount) = request.amount {
            if amount <= 0.0 {
                return Err(anyhow::anyhow!("Income amount must be positive"));
            }
            income.amount = amount;
        }
        if let Some(source) = request.source {
            income.source = source.trim().to_string();
        }
        if let Some(date) = request.date {
            income.date = date;
        }
        if let Some(recurring) = request.recurring {
            income.recurring = recurring;
        }

        self.income_repository.update_income(&income).await?;

        Ok(income)
    }

    /// Delete an income, returning whether it existed
    pub async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<bool> {
        info!("Deleting income {} for user {}", income_id, user_id);
        self.income_repository.delete_income(user_id, income_id).await
    }

    /// All incomes for a user, most recent first
    pub async fn get_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        self.income_repository.list_incomes(user_id).await
    }
}
