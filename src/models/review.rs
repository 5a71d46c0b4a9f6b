// src/models/review.rs

use crate::validation::{number_field, FormPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Campground review
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub rating: i32,
    pub body: String,
    pub author_id: Option<Uuid>,
    #[sqlx(default)]
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Form body posted to POST /campgrounds/{id}/reviews
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReviewForm {
    #[serde(rename = "review[rating]", default, deserialize_with = "rating_field")]
    #[validate(
        required(message = "is required"),
        range(min = 1, max = 5, message = "must be between 1 and 5")
    )]
    pub rating: Option<i32>,

    #[serde(rename = "review[body]", default)]
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub body: Option<String>,
}

impl FormPayload for ReviewForm {
    const KEY: &'static str = "review";
}

fn rating_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    number_field(deserializer, "review.rating")
}

/// Validated review fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub rating: i32,
    pub body: String,
}

impl From<ReviewForm> for NewReview {
    fn from(form: ReviewForm) -> Self {
        NewReview {
            rating: form.rating.unwrap_or_default(),
            body: form.body.unwrap_or_default(),
        }
    }
}

impl Review {
    pub fn new(id: Uuid, input: &NewReview, author_id: Option<Uuid>) -> Self {
        Review {
            id,
            rating: input.rating,
            body: input.body.clone(),
            author_id,
            author_name: None,
            created_at: Utc::now(),
        }
    }

    /// Star string for display, e.g. "★★★☆☆"
    pub fn stars(&self) -> String {
        let filled = self.rating.clamp(0, 5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validation_message;

    #[test]
    fn test_rating_out_of_range() {
        let form = ReviewForm {
            rating: Some(6),
            body: Some("Great!".to_string()),
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(
            validation_message(ReviewForm::KEY, &errors),
            "\"review.rating\" must be between 1 and 5"
        );
    }

    #[test]
    fn test_empty_review_reports_both_fields() {
        let errors = ReviewForm::default().validate().unwrap_err();

        assert_eq!(
            validation_message(ReviewForm::KEY, &errors),
            "\"review.body\" is required,\"review.rating\" is required"
        );
    }

    #[test]
    fn test_stars() {
        let review = Review::new(
            Uuid::new_v4(),
            &NewReview {
                rating: 3,
                body: "ok".to_string(),
            },
            None,
        );
        assert_eq!(review.stars(), "★★★☆☆");
    }
}
