// src/models/user.rs

use crate::validation::FormPayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Registered account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,

    /// Argon2 PHC string
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

/// POST /register body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub username: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "is required"),
        email(message = "must be a valid email")
    )]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub password: Option<String>,
}

impl FormPayload for RegisterForm {
    const KEY: &'static str = "user";
}

/// POST /login body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(required(message = "is required"))]
    pub username: Option<String>,

    #[serde(default)]
    #[validate(required(message = "is required"))]
    pub password: Option<String>,
}

impl FormPayload for LoginForm {
    const KEY: &'static str = "user";
}
