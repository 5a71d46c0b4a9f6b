// src/state.rs
// DOCUMENTATION: Shared application state
// PURPOSE: Repository handles injected into every handler

use crate::db::{
    CampgroundRepository, PgCampgroundRepository, PgReviewRepository, PgUserRepository,
    ReviewRepository, UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub campgrounds: Arc<dyn CampgroundRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        campgrounds: Arc<dyn CampgroundRepository>,
        reviews: Arc<dyn ReviewRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            campgrounds,
            reviews,
            users,
        }
    }

    /// Postgres-backed state used by the server
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgCampgroundRepository::new(pool.clone())),
            Arc::new(PgReviewRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
        )
    }
}
