// src/db/review_repository.rs
// DOCUMENTATION: Review database operations
// PURPOSE: Keep reviews and their parent's reference list in step

use crate::errors::AppError;
use crate::models::{NewReview, Review};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews with the given ids, in no particular order
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Review>, AppError>;

    /// Insert a review and append its id to the campground, in one transaction
    /// Returns None when the campground does not exist (nothing is written)
    async fn create_for_campground(
        &self,
        campground_id: Uuid,
        input: &NewReview,
        author_id: Option<Uuid>,
    ) -> Result<Option<Review>, AppError>;

    /// Pull the id from the campground and delete the review, in one transaction
    /// Returns false, writing nothing, unless the campground lists the review
    async fn delete_from_campground(
        &self,
        campground_id: Uuid,
        review_id: Uuid,
    ) -> Result<bool, AppError>;
}

pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Review>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Review>(
            r#"
            SELECT r.*, u.username AS author_name
            FROM reviews r
            LEFT JOIN users u ON u.id = r.author_id
            WHERE r.id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch {} reviews: {}", ids.len(), e);
            AppError::DatabaseError(format!("Fetch reviews failed: {}", e))
        })
    }

    async fn create_for_campground(
        &self,
        campground_id: Uuid,
        input: &NewReview,
        author_id: Option<Uuid>,
    ) -> Result<Option<Review>, AppError> {
        let db_err = |e: sqlx::Error| {
            log::error!("Failed to create review for campground {}: {}", campground_id, e);
            AppError::DatabaseError(format!("Create review failed: {}", e))
        };

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, rating, body, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.rating)
        .bind(&input.body)
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        let attached = sqlx::query(
            r#"
            UPDATE campgrounds
            SET review_ids = array_append(review_ids, $1), updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(review.id)
        .bind(campground_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?
        .rows_affected();

        if attached == 0 {
            tx.rollback().await.map_err(db_err)?;
            log::warn!("Review rejected: campground {} does not exist", campground_id);
            return Ok(None);
        }

        tx.commit().await.map_err(db_err)?;

        log::info!("Created review {} on campground {}", review.id, campground_id);
        Ok(Some(review))
    }

    async fn delete_from_campground(
        &self,
        campground_id: Uuid,
        review_id: Uuid,
    ) -> Result<bool, AppError> {
        let db_err = |e: sqlx::Error| {
            log::error!("Failed to delete review {}: {}", review_id, e);
            AppError::DatabaseError(format!("Delete review failed: {}", e))
        };

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let detached = sqlx::query(
            r#"
            UPDATE campgrounds
            SET review_ids = array_remove(review_ids, $1), updated_at = NOW()
            WHERE id = $2 AND $1 = ANY(review_ids)
            "#,
        )
        .bind(review_id)
        .bind(campground_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?
        .rows_affected();

        // A review is only deleted through the campground that lists it
        if detached == 0 {
            tx.rollback().await.map_err(db_err)?;
            log::warn!(
                "Review {} is not attached to campground {}",
                review_id,
                campground_id
            );
            return Ok(false);
        }

        let deleted = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        tx.commit().await.map_err(db_err)?;

        Ok(deleted > 0)
    }
}
