// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export route configuration for main.rs

pub mod campgrounds;
pub mod health;
pub mod home;
pub mod render;
pub mod reviews;
pub mod users;

pub use campgrounds::config as campgrounds_config;
pub use health::config as health_config;
pub use home::config as home_config;
pub use users::config as users_config;

use crate::errors::AppError;
use actix_web::HttpResponse;

/// Fallback for every unmatched route
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("Page Not Found".to_string()))
}
