// src/handlers/campgrounds.rs
// DOCUMENTATION: HTTP handlers for campground operations
// PURPOSE: Parse requests, call repositories, render pages or redirect

use crate::errors::AppError;
use crate::handlers::render::{redirect_with, render};
use crate::handlers::reviews;
use crate::models::{Campground, CampgroundForm, NewCampground, Review};
use crate::services::CampgroundService;
use crate::session::{Flash, PageContext, RequireLogin, Session};
use crate::state::AppState;
use crate::validation::ValidatedForm;
use actix_web::{web, HttpResponse};
use askama::Template;
use uuid::Uuid;

pub const MISSING_CAMPGROUND: &str = "Cannot find that campground!";

#[derive(Template)]
#[template(path = "campgrounds/index.html")]
pub struct IndexTemplate {
    pub page: PageContext,
    pub campgrounds: Vec<Campground>,
}

#[derive(Template)]
#[template(path = "campgrounds/new.html")]
pub struct NewTemplate {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "campgrounds/show.html")]
pub struct ShowTemplate {
    pub page: PageContext,
    pub campground: Campground,
    pub reviews: Vec<Review>,
}

#[derive(Template)]
#[template(path = "campgrounds/edit.html")]
pub struct EditTemplate {
    pub page: PageContext,
    pub campground: Campground,
}

/// Redirect used whenever a campground id resolves to nothing
pub fn missing_campground() -> HttpResponse {
    redirect_with("/campgrounds", Flash::error(MISSING_CAMPGROUND))
}

/// GET /campgrounds
pub async fn index(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let campgrounds = state.campgrounds.find_all().await?;
    render(
        &session,
        &IndexTemplate {
            page: session.page(),
            campgrounds,
        },
    )
}

/// GET /campgrounds/new
pub async fn new_form(_user: RequireLogin, session: Session) -> Result<HttpResponse, AppError> {
    render(
        &session,
        &NewTemplate {
            page: session.page(),
        },
    )
}

/// POST /campgrounds
pub async fn create(
    RequireLogin(user): RequireLogin,
    state: web::Data<AppState>,
    form: ValidatedForm<CampgroundForm>,
) -> Result<HttpResponse, AppError> {
    let input = NewCampground::from(form.into_inner());
    let campground = state.campgrounds.create(&input, Some(user.id)).await?;

    Ok(redirect_with(
        &format!("/campgrounds/{}", campground.id),
        Flash::success("Successfully made a new campground!"),
    ))
}

/// GET /campgrounds/{id}
/// A missing campground redirects to the list and stops there
pub async fn show(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let detail =
        CampgroundService::get_detail(state.campgrounds.as_ref(), state.reviews.as_ref(), id)
            .await?;

    let Some(detail) = detail else {
        return Ok(missing_campground());
    };

    render(
        &session,
        &ShowTemplate {
            page: session.page(),
            campground: detail.campground,
            reviews: detail.reviews,
        },
    )
}

/// GET /campgrounds/{id}/edit
pub async fn edit_form(
    _user: RequireLogin,
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let Some(campground) = state.campgrounds.find_by_id(path.into_inner()).await? else {
        return Ok(missing_campground());
    };

    render(
        &session,
        &EditTemplate {
            page: session.page(),
            campground,
        },
    )
}

/// PUT /campgrounds/{id}
pub async fn update(
    _user: RequireLogin,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: ValidatedForm<CampgroundForm>,
) -> Result<HttpResponse, AppError> {
    let input = NewCampground::from(form.into_inner());
    let Some(campground) = state.campgrounds.update(path.into_inner(), &input).await? else {
        return Ok(missing_campground());
    };

    Ok(redirect_with(
        &format!("/campgrounds/{}", campground.id),
        Flash::success("Successfully updated campground!"),
    ))
}

/// DELETE /campgrounds/{id}
/// Also removes every review the campground referenced
pub async fn delete(
    _user: RequireLogin,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if state.campgrounds.delete(path.into_inner()).await?.is_none() {
        return Ok(missing_campground());
    }

    Ok(redirect_with(
        "/campgrounds",
        Flash::success("Successfully deleted campground"),
    ))
}

/// Configuration for campground and nested review routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/campgrounds")
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                log::debug!("Rejected path: {}", err);
                AppError::NotFound("Page Not Found".to_string()).into()
            }))
            .route("", web::get().to(index))
            .route("", web::post().to(create))
            .route("/new", web::get().to(new_form))
            .route("/{id}", web::get().to(show))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete))
            .route("/{id}/edit", web::get().to(edit_form))
            .configure(reviews::config),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MockCampgroundRepository, MockReviewRepository};
    use crate::handlers::test_support::{location, logged_in, read_text, state, test_key};
    use crate::session::{SessionKey, FLASH_ERROR_COOKIE, FLASH_SUCCESS_COOKIE};
    use actix_web::{http::StatusCode, test, App};

    fn form() -> CampgroundForm {
        CampgroundForm {
            title: Some("Sunset Ridge".to_string()),
            location: Some("Flagstaff, Arizona".to_string()),
            price: Some(24.0),
            description: Some("Pines and stars".to_string()),
            image: Some("https://example.com/ridge.jpg".to_string()),
        }
    }

    fn stored(author: Option<Uuid>) -> Campground {
        Campground::new(Uuid::new_v4(), &NewCampground::from(form()), author)
    }

    macro_rules! app {
        ($campgrounds:expr, $reviews:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state($campgrounds, $reviews)))
                    .app_data(web::Data::new(SessionKey(test_key())))
                    .configure(config),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_index_lists_campgrounds() {
        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![stored(None)]));

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::get().uri("/campgrounds").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(read_text(resp).await.contains("Sunset Ridge"));
    }

    #[actix_web::test]
    async fn test_create_persists_payload_and_redirects_to_detail() {
        let (cookie, user) = logged_in();
        let created = stored(Some(user.id));
        let created_id = created.id;

        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds
            .expect_create()
            .withf(move |input, author| {
                *input == NewCampground::from(form()) && *author == Some(user.id)
            })
            .times(1)
            .returning(move |_, _| Ok(created.clone()));

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::post()
            .uri("/campgrounds")
            .cookie(cookie)
            .set_form(form())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/campgrounds/{}", created_id));
        assert!(resp
            .response()
            .cookies()
            .any(|c| c.name() == FLASH_SUCCESS_COOKIE));
    }

    #[actix_web::test]
    async fn test_create_without_title_is_400_and_persists_nothing() {
        let (cookie, _) = logged_in();

        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds.expect_create().never();

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::post()
            .uri("/campgrounds")
            .cookie(cookie)
            .set_form(CampgroundForm {
                title: None,
                ..form()
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(read_text(resp).await.contains("campground.title"));
    }

    #[actix_web::test]
    async fn test_create_with_text_price_is_400() {
        let (cookie, _) = logged_in();

        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds.expect_create().never();

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::post()
            .uri("/campgrounds")
            .cookie(cookie)
            .set_form([
                ("campground[title]", "Sunset Ridge"),
                ("campground[location]", "Flagstaff"),
                ("campground[price]", "cheap"),
                ("campground[description]", "Pines"),
                ("campground[image]", "ridge.jpg"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(read_text(resp).await.contains("must be a number"));
    }

    #[actix_web::test]
    async fn test_anonymous_mutations_never_reach_repository() {
        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds.expect_create().never();
        campgrounds.expect_find_by_id().never();
        campgrounds.expect_update().never();
        campgrounds.expect_delete().never();

        let app = app!(campgrounds, MockReviewRepository::new());
        let id = Uuid::new_v4();

        let requests = vec![
            test::TestRequest::get().uri("/campgrounds/new").to_request(),
            test::TestRequest::post()
                .uri("/campgrounds")
                .set_form(form())
                .to_request(),
            test::TestRequest::get()
                .uri(&format!("/campgrounds/{}/edit", id))
                .to_request(),
            test::TestRequest::put()
                .uri(&format!("/campgrounds/{}", id))
                .set_form(form())
                .to_request(),
            test::TestRequest::delete()
                .uri(&format!("/campgrounds/{}", id))
                .to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FOUND);
            assert_eq!(location(&resp), "/login");
        }
    }

    #[actix_web::test]
    async fn test_show_unknown_id_redirects_to_list() {
        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds.expect_find_by_id().returning(|_| Ok(None));

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::get()
            .uri(&format!("/campgrounds/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/campgrounds");
        let flash = resp
            .response()
            .cookies()
            .find(|c| c.name() == FLASH_ERROR_COOKIE)
            .unwrap();
        assert_eq!(flash.value(), MISSING_CAMPGROUND);
    }

    #[actix_web::test]
    async fn test_show_malformed_id_is_404() {
        let app = app!(MockCampgroundRepository::new(), MockReviewRepository::new());
        let req = test::TestRequest::get()
            .uri("/campgrounds/not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_show_renders_reviews() {
        let review_id = Uuid::new_v4();
        let mut campground = stored(None);
        campground.review_ids = vec![review_id];
        let id = campground.id;

        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds
            .expect_find_by_id()
            .returning(move |_| Ok(Some(campground.clone())));

        let mut reviews = MockReviewRepository::new();
        reviews.expect_find_by_ids().returning(move |_| {
            Ok(vec![Review::new(
                review_id,
                &crate::models::NewReview {
                    rating: 4,
                    body: "Loved the creek".to_string(),
                },
                None,
            )])
        });

        let app = app!(campgrounds, reviews);
        let req = test::TestRequest::get()
            .uri(&format!("/campgrounds/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_text(resp).await;
        assert!(body.contains("Sunset Ridge"));
        assert!(body.contains("Loved the creek"));
    }

    #[actix_web::test]
    async fn test_update_redirects_to_detail() {
        let (cookie, _) = logged_in();
        let existing = stored(None);
        let id = existing.id;

        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds
            .expect_update()
            .withf(move |target, input| *target == id && input.title == "Sunset Ridge")
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::put()
            .uri(&format!("/campgrounds/{}", id))
            .cookie(cookie)
            .set_form(form())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), format!("/campgrounds/{}", id));
    }

    #[actix_web::test]
    async fn test_update_with_negative_price_is_400() {
        let (cookie, _) = logged_in();

        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds.expect_update().never();

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::put()
            .uri(&format!("/campgrounds/{}", Uuid::new_v4()))
            .cookie(cookie)
            .set_form(CampgroundForm {
                price: Some(-5.0),
                ..form()
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete_redirects_to_list() {
        let (cookie, _) = logged_in();
        let existing = stored(None);
        let id = existing.id;

        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds
            .expect_delete()
            .withf(move |target| *target == id)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::delete()
            .uri(&format!("/campgrounds/{}", id))
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/campgrounds");
    }

    #[actix_web::test]
    async fn test_rendered_page_clears_flash() {
        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds.expect_find_all().returning(|| Ok(Vec::new()));

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::get()
            .uri("/campgrounds")
            .cookie(Flash::success("Successfully deleted campground").cookie())
            .to_request();
        let resp = test::call_service(&app, req).await;

        let cleared = resp
            .response()
            .cookies()
            .find(|c| c.name() == FLASH_SUCCESS_COOKIE)
            .unwrap();
        assert_eq!(cleared.value(), "");
        assert!(read_text(resp)
            .await
            .contains("Successfully deleted campground"));
    }

    #[actix_web::test]
    async fn test_repository_failure_renders_500() {
        let mut campgrounds = MockCampgroundRepository::new();
        campgrounds
            .expect_find_all()
            .returning(|| Err(AppError::DatabaseError("pool timed out".to_string())));

        let app = app!(campgrounds, MockReviewRepository::new());
        let req = test::TestRequest::get().uri("/campgrounds").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(read_text(resp).await.contains("Something Went Wrong"));
    }
}
