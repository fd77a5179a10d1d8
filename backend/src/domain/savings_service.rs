//! Savings overview domain logic.
//!
//! Each user has at most one savings row. Writes go through an
//! upsert-by-presence: read the existing row, update it when found,
//! insert otherwise.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::storage::SavingsStorage;
use shared::{SavingsOverview, UpdateSavingsRequest};

/// Service for the per-user savings overview
#[derive(Clone)]
pub struct SavingsService {
    savings_repository: Arc<dyn SavingsStorage>,
}

impl SavingsService {
    pub fn new(savings_repository: Arc<dyn SavingsStorage>) -> Self {
        Self { savings_repository }
    }

    /// Savings overview for a user; a zeroed view when nothing is stored yet
    pub async fn get_savings(&self, user_id: &str) -> Result<SavingsOverview> {
        match self.savings_repository.get_savings(user_id).await? {
            Some(overview) => Ok(overview),
            None => Ok(SavingsOverview {
                user_id: user_id.to_string(),
                balance: 0.0,
                monthly_saved: 0.0,
                monthly_returns: 0.0,
                savings_rate: 0.0,
                updated_at: Utc::now().to_rfc3339(),
            }),
        }
    }

    /// Create-if-absent, else overwrite the stored overview
    pub async fn upsert_savings(
        &self,
        user_id: &str,
        request: UpdateSavingsRequest,
    ) -> Result<SavingsOverview> {
        info!("Upserting savings overview for user {}", user_id);

        if request.savings_rate < 0.0 || request.savings_rate > 100.0 {
            return Err(anyhow::anyhow!(
                "Savings rate must be between 0 and 100"
            ));
        }

        let overview = SavingsOverview {
            user_id: user_id.to_string(),
            balance: request.balance,
            monthly_saved: request.monthly_saved,
            monthly_returns: request.monthly_returns,
            savings_rate: request.savings_rate,
            updated_at: Utc::now().to_rfc3339(),
        };

        match self.savings_repository.get_savings(user_id).await? {
            Some(_) => self.savings_repository.update_savings(&overview).await?,
            None => self.savings_repository.insert_savings(&overview).await?,
        }

        Ok(overview)
    }
}
