use anyhow::Result;
use async_trait::async_trait;
use shared::User;
use sqlx::Row;

use crate::storage::sqlite::db::SqliteConnection;
use crate::storage::traits::UserStorage;

/// Repository for user account rows
#[derive(Clone)]
pub struct UserRepository {
    db: SqliteConnection,
}

impl UserRepository {
    pub fn new(db: SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            email: r.get("email"),
            created_at: r.get("created_at"),
        }))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            email: r.get("email"),
            created_at: r.get("created_at"),
        }))
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
