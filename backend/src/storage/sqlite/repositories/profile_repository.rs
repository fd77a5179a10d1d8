use anyhow::Result;
use async_trait::async_trait;
use shared::Profile;
use sqlx::Row;

use crate::storage::sqlite::db::SqliteConnection;
use crate::storage::traits::ProfileStorage;

/// Repository for profile operations
#[derive(Clone)]
pub struct ProfileRepository {
    db: SqliteConnection,
}

impl ProfileRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStorage for ProfileRepository {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, name, phone, occupation, avatar_url, theme, currency, date_format, month_start_day, updated_at
            FROM profiles
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| Profile {
            user_id: r.get("user_id"),
            name: r.get("name"),
            phone: r.get("phone"),
            occupation: r.get("occupation"),
            avatar_url: r.get("avatar_url"),
            theme: r.get("theme"),
            currency: r.get("currency"),
            date_format: r.get("date_format"),
            month_start_day: r.get::<i64, _>("month_start_day") as u32,
            updated_at: r.get("updated_at"),
        }))
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, name, phone, occupation, avatar_url, theme, currency, date_format, month_start_day, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.user_id)
        .bind(&profile.name)
        .bind(&profile.phone)
        .bind(&profile.occupation)
        .bind(&profile.avatar_url)
        .bind(&profile.theme)
        .bind(&profile.currency)
        .bind(&profile.date_format)
        .bind(profile.month_start_day as i64)
        .bind(&profile.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn update_profile(&self, profile: &Profile) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET name = ?, phone = ?, occupation = ?, avatar_url = ?, theme = ?, currency = ?, date_format = ?, month_start_day = ?, updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.phone)
        .bind(&profile.occupation)
        .bind(&profile.avatar_url)
        .bind(&profile.theme)
        .bind(&profile.currency)
        .bind(&profile.date_format)
        .bind(profile.month_start_day as i64)
        .bind(&profile.updated_at)
        .bind(&profile.user_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_profile_for_user(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM profiles
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
