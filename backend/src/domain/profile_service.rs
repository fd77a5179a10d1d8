//! Profile domain logic.
//!
//! Profiles carry display preferences alongside contact details. Updates are
//! partial: only fields present in the request overwrite stored values.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::currency;
use crate::storage::ProfileStorage;
use shared::{Profile, UpdateProfileRequest};

/// Service for managing user profiles
#[derive(Clone)]
pub struct ProfileService {
    profile_repository: Arc<dyn ProfileStorage>,
}

impl ProfileService {
    pub fn new(profile_repository: Arc<dyn ProfileStorage>) -> Self {
        Self { profile_repository }
    }

    /// Profile for a user
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        self.profile_repository
            .get_profile(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Profile not found"))
    }

    /// Insert a default profile for a new session user when none exists yet
    pub async fn ensure_profile(&self, user_id: &str, name: &str) -> Result<Profile> {
        if let Some(profile) = self.profile_repository.get_profile(user_id).await? {
            return Ok(profile);
        }

        let profile = Profile {
            user_id: user_id.to_string(),
            name: name.to_string(),
            phone: None,
            occupation: None,
            avatar_url: None,
            theme: "light".to_string(),
            currency: currency::BASE_CURRENCY.to_string(),
            date_format: "DD/MM/YYYY".to_string(),
            month_start_day: 1,
            updated_at: Utc::now().to_rfc3339(),
        };

        self.profile_repository.insert_profile(&profile).await?;
        info!("Created default profile for user {}", user_id);
        Ok(profile)
    }

    /// Overwrite only the fields present in the request
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<Profile> {
        info!("Updating profile for user {}", user_id);

        let mut profile = self
            .profile_repository
            .get_profile(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Profile not found"))?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Profile name cannot be empty"));
            }
            profile.name = name.trim().to_string();
        }
        if let Some(phone) = request.phone {
            profile.phone = Some(phone);
        }
        if let Some(occupation) = request.occupation {
            profile.occupation = Some(occupation);
        }
        if let Some(avatar_url) = request.avatar_url {
            profile.avatar_url = Some(avatar_url);
        }
        if let Some(theme) = request.theme {
            profile.theme = theme;
        }
        if let Some(code) = request.currency {
            // Unknown codes silently fall back to the base currency
            profile.currency = currency::active_currency(Some(&code)).code.to_string();
        }
        if let Some(date_format) = request.date_format {
            profile.date_format = date_format;
        }
        if let Some(month_start_day) = request.month_start_day {
            if !(1..=28).contains(&month_start_day) {
                return Err(anyhow::anyhow!(
                    "Month start day must be between 1 and 28"
                ));
            }
            profile.month_start_day = month_start_day;
        }

        profile.updated_at = Utc::now().to_rfc3339();
        self.profile_repository.update_profile(&profile).await?;

        Ok(profile)
    }
}
