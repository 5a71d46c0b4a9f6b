// src/db/campground_repository.rs
// DOCUMENTATION: Database access layer for campgrounds
// PURPOSE: Abstract campground queries from handlers

use crate::errors::AppError;
use crate::models::{Campground, NewCampground};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Campground persistence operations
/// DOCUMENTATION: Handlers only see this trait; tests substitute a mock
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampgroundRepository: Send + Sync {
    /// All campgrounds, newest first
    async fn find_all(&self) -> Result<Vec<Campground>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Campground>, AppError>;

    async fn create(
        &self,
        input: &NewCampground,
        author_id: Option<Uuid>,
    ) -> Result<Campground, AppError>;

    /// Overwrite the editable fields; None when no such campground
    async fn update(&self, id: Uuid, input: &NewCampground)
        -> Result<Option<Campground>, AppError>;

    /// Delete the campground and every review it references, atomically
    async fn delete(&self, id: Uuid) -> Result<Option<Campground>, AppError>;
}

pub struct PgCampgroundRepository {
    pool: PgPool,
}

impl PgCampgroundRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampgroundRepository for PgCampgroundRepository {
    async fn find_all(&self) -> Result<Vec<Campground>, AppError> {
        sqlx::query_as::<_, Campground>(
            r#"
            SELECT c.*, u.username AS author_name
            FROM campgrounds c
            LEFT JOIN users u ON u.id = c.author_id
            ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list campgrounds: {}", e);
            AppError::DatabaseError(format!("List campgrounds failed: {}", e))
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Campground>, AppError> {
        sqlx::query_as::<_, Campground>(
            r#"
            SELECT c.*, u.username AS author_name
            FROM campgrounds c
            LEFT JOIN users u ON u.id = c.author_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch campground {}: {}", id, e);
            AppError::DatabaseError(format!("Fetch campground failed: {}", e))
        })
    }

    async fn create(
        &self,
        input: &NewCampground,
        author_id: Option<Uuid>,
    ) -> Result<Campground, AppError> {
        let campground = sqlx::query_as::<_, Campground>(
            r#"
            INSERT INTO campgrounds (
                id, title, location, price, description, image, author_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.location)
        .bind(input.price)
        .bind(&input.description)
        .bind(&input.image)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create campground: {}", e);
            AppError::DatabaseError(format!("Create campground failed: {}", e))
        })?;

        log::info!("Created campground with id: {}", campground.id);
        Ok(campground)
    }

    async fn update(
        &self,
        id: Uuid,
        input: &NewCampground,
    ) -> Result<Option<Campground>, AppError> {
        sqlx::query_as::<_, Campground>(
            r#"
            UPDATE campgrounds
            SET
                title = $2,
                location = $3,
                price = $4,
                description = $5,
                image = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.location)
        .bind(input.price)
        .bind(&input.description)
        .bind(&input.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update campground {}: {}", id, e);
            AppError::DatabaseError(format!("Update campground failed: {}", e))
        })
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Campground>, AppError> {
        let db_err = |e: sqlx::Error| {
            log::error!("Failed to delete campground {}: {}", id, e);
            AppError::DatabaseError(format!("Delete campground failed: {}", e))
        };

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let deleted = sqlx::query_as::<_, Campground>(
            "DELETE FROM campgrounds WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        let Some(campground) = deleted else {
            tx.rollback().await.map_err(db_err)?;
            return Ok(None);
        };

        let removed = sqlx::query("DELETE FROM reviews WHERE id = ANY($1)")
            .bind(&campground.review_ids)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        tx.commit().await.map_err(db_err)?;

        log::info!(
            "Deleted campground {} and {} of its reviews",
            campground.id,
            removed
        );
        Ok(Some(campground))
    }
}
