// src/db/user_repository.rs
// DOCUMENTATION: User account storage

use crate::errors::AppError;
use crate::models::User;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with AlreadyExists when the username or email is taken
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::AlreadyExists(
                "A user with the given username or email is already registered".to_string(),
            ),
            e => {
                log::error!("Failed to create user {}: {}", username, e);
                AppError::DatabaseError(format!("Create user failed: {}", e))
            }
        })?;

        log::info!("Registered user {}", user.username);
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user {}: {}", username, e);
                AppError::DatabaseError(format!("Fetch user failed: {}", e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_username_already_exists(pool: PgPool) {
        let repo = PgUserRepository::new(pool);
        let colt = repo
            .create("colt", "colt@example.com", "hash")
            .await
            .unwrap();

        let err = repo
            .create("colt", "other@example.com", "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));

        let found = repo.find_by_username("colt").await.unwrap().unwrap();
        assert_eq!(found.id, colt.id);
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }
}
