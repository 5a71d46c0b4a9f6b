// src/services/campground_service.rs
// DOCUMENTATION: Business logic for campgrounds
// PURPOSE: Intermediary between handlers and repositories

use crate::db::{CampgroundRepository, ReviewRepository};
use crate::errors::AppError;
use crate::models::{CampgroundDetail, Review};
use std::collections::HashMap;
use uuid::Uuid;

pub struct CampgroundService;

impl CampgroundService {
    /// Load a campground with its reviews resolved
    /// DOCUMENTATION: Reviews come back in the campground's reference order;
    /// ids whose review row is gone are skipped
    pub async fn get_detail(
        campgrounds: &dyn CampgroundRepository,
        reviews: &dyn ReviewRepository,
        id: Uuid,
    ) -> Result<Option<CampgroundDetail>, AppError> {
        let Some(campground) = campgrounds.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut found: HashMap<Uuid, Review> = reviews
            .find_by_ids(&campground.review_ids)
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        if found.len() < campground.review_ids.len() {
            log::warn!(
                "Campground {} references {} missing reviews",
                campground.id,
                campground.review_ids.len() - found.len()
            );
        }

        let reviews = campground
            .review_ids
            .iter()
            .filter_map(|id| found.remove(id))
            .collect();

        Ok(Some(CampgroundDetail {
            campground,
            reviews,
        }))
    }
}
