// src/models/campground.rs
// DOCUMENTATION: Campground records and the campground form payload
// PURPOSE: Database row mapping plus validated input for create/update

use crate::validation::{number_field, FormPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::Review;

/// A campground listing as stored in the campgrounds table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Campground {
    pub id: Uuid,
    pub title: String,
    pub location: String,

    /// Nightly price, never negative
    pub price: f64,

    pub description: String,

    /// Image URL
    pub image: String,

    /// Owning user, if any
    pub author_id: Option<Uuid>,

    /// Owning user's name, resolved by a join on reads
    #[sqlx(default)]
    pub author_name: Option<String>,

    /// Reviews attached to this campground, oldest first
    pub review_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form body posted to POST /campgrounds and PUT /campgrounds/{id}
/// DOCUMENTATION: Fields arrive as `campground[title]`, `campground[price]`, ...
/// Every field is optional at decode time so `required` can report it
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CampgroundForm {
    #[serde(rename = "campground[title]", default)]
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub title: Option<String>,

    #[serde(rename = "campground[location]", default)]
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub location: Option<String>,

    #[serde(
        rename = "campground[price]",
        default,
        deserialize_with = "price_field"
    )]
    #[validate(
        required(message = "is required"),
        range(min = 0.0, message = "must be greater than or equal to 0")
    )]
    pub price: Option<f64>,

    #[serde(rename = "campground[description]", default)]
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub description: Option<String>,

    #[serde(rename = "campground[image]", default)]
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is not allowed to be empty")
    )]
    pub image: Option<String>,
}

impl FormPayload for CampgroundForm {
    const KEY: &'static str = "campground";
}

fn price_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    number_field(deserializer, "campground.price")
}

/// Validated campground fields ready to be written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCampground {
    pub title: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub image: String,
}

impl From<CampgroundForm> for NewCampground {
    /// Only called on forms that passed validation
    fn from(form: CampgroundForm) -> Self {
        NewCampground {
            title: form.title.unwrap_or_default(),
            location: form.location.unwrap_or_default(),
            price: form.price.unwrap_or_default(),
            description: form.description.unwrap_or_default(),
            image: form.image.unwrap_or_default(),
        }
    }
}

/// Campground with its reviews resolved, for the detail page
#[derive(Debug, Clone)]
pub struct CampgroundDetail {
    pub campground: Campground,
    pub reviews: Vec<Review>,
}

impl Campground {
    /// In-memory record as the database would return it after an insert
    pub fn new(id: Uuid, input: &NewCampground, author_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Campground {
            id,
            title: input.title.clone(),
            location: input.location.clone(),
            price: input.price,
            description: input.description.clone(),
            image: input.image.clone(),
            author_id,
            author_name: None,
            review_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validation_message;

    fn valid_form() -> CampgroundForm {
        CampgroundForm {
            title: Some("Misty Bluffs".to_string()),
            location: Some("Bend, Oregon".to_string()),
            price: Some(18.5),
            description: Some("Quiet sites by the river".to_string()),
            image: Some("https://example.com/bluffs.jpg".to_string()),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_missing_title_reported() {
        let form = CampgroundForm {
            title: None,
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(
            validation_message(CampgroundForm::KEY, &errors),
            "\"campground.title\" is required"
        );
    }

    #[test]
    fn test_negative_price_and_empty_image_reported_together() {
        let form = CampgroundForm {
            price: Some(-1.0),
            image: Some(String::new()),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(
            validation_message(CampgroundForm::KEY, &errors),
            "\"campground.image\" is not allowed to be empty,\
             \"campground.price\" must be greater than or equal to 0"
        );
    }

    #[test]
    fn test_form_decodes_bracketed_keys() {
        let body = "campground%5Btitle%5D=Pine+Hollow&campground%5Bprice%5D=12\
                    &campground%5Blocation%5D=Tahoe&campground%5Bdescription%5D=Trees\
                    &campground%5Bimage%5D=pine.jpg";
        let form: CampgroundForm = serde_urlencoded_decode(body);

        assert_eq!(form.title.as_deref(), Some("Pine Hollow"));
        assert_eq!(form.price, Some(12.0));
        assert_eq!(NewCampground::from(form).location, "Tahoe");
    }

    #[test]
    fn test_blank_price_is_missing() {
        let form: CampgroundForm = serde_urlencoded_decode("campground%5Bprice%5D=");
        assert_eq!(form.price, None);
    }

    #[test]
    fn test_non_finite_price_rejected() {
        for raw in ["NaN", "inf"] {
            let query = format!("campground%5Bprice%5D={}", raw);
            assert!(actix_web::web::Query::<CampgroundForm>::from_query(&query).is_err());
        }
    }

    fn serde_urlencoded_decode(body: &str) -> CampgroundForm {
        actix_web::web::Query::<CampgroundForm>::from_query(body)
            .unwrap()
            .into_inner()
    }
}
