// src/services/auth_service.rs
// DOCUMENTATION: Account registration and login
// PURPOSE: Password hashing and credential checks on top of UserRepository

use crate::db::UserRepository;
use crate::errors::AppError;
use crate::session::CurrentUser;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub struct AuthService;

impl AuthService {
    /// Create an account and return the session identity for it
    pub async fn register(
        users: &dyn UserRepository,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<CurrentUser, AppError> {
        let hash = hash_password(password)?;
        let user = users.create(username, email, &hash).await?;
        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }

    /// Check credentials; None on unknown user or wrong password
    pub async fn authenticate(
        users: &dyn UserRepository,
        username: &str,
        password: &str,
    ) -> Result<Option<CurrentUser>, AppError> {
        let Some(user) = users.find_by_username(username).await? else {
            return Ok(None);
        };

        if !verify_password(password, &user.password_hash)? {
            log::info!("Failed login for {}", username);
            return Ok(None);
        }

        Ok(Some(CurrentUser {
            id: user.id,
            username: user.username,
        }))
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

/// Verify a password against its stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::InternalError(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
