// src/handlers/reviews.rs
// DOCUMENTATION: HTTP handlers for reviews nested under a campground

use crate::errors::AppError;
use crate::handlers::campgrounds::missing_campground;
use crate::handlers::render::redirect_with;
use crate::models::{NewReview, ReviewForm};
use crate::session::{Flash, Session};
use crate::state::AppState;
use crate::validation::ValidatedForm;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

/// POST /campgrounds/{id}/reviews
/// Records the logged-in user as author when there is one
pub async fn create(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
    form: ValidatedForm<ReviewForm>,
) -> Result<HttpResponse, AppError> {
    let campground_id = path.into_inner();
    let input = NewReview::from(form.into_inner());
    let author_id = session.user.as_ref().map(|user| user.id);

    let created = state
        .reviews
        .create_for_campground(campground_id, &input, author_id)
        .await?;

    if created.is_none() {
        return Ok(missing_campground());
    }

    Ok(redirect_with(
        &format!("/campgrounds/{}", campground_id),
        Flash::success("Created new review!"),
    ))
}

/// DELETE /campgrounds/{id}/reviews/{review_id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (campground_id, review_id) = path.into_inner();
    let location = format!("/campgrounds/{}", campground_id);

    let flash = if state
        .reviews
        .delete_from_campground(campground_id, review_id)
        .await?
    {
        Flash::success("Successfully deleted review")
    } else {
        Flash::error("Cannot find that review!")
    };

    Ok(redirect_with(&location, flash))
}

/// Review routes, mounted inside the /campgrounds scope
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/{id}/reviews", web::post().to(create))
        .route("/{id}/reviews/{review_id}", web::delete().to(delete));
}
