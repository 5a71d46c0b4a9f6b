// src/handlers/home.rs

use crate::errors::AppError;
use crate::handlers::render::render;
use crate::session::{PageContext, Session};
use actix_web::{web, HttpResponse};
use askama::Template;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
}

/// GET /
pub async fn home(session: Session) -> Result<HttpResponse, AppError> {
    render(
        &session,
        &HomeTemplate {
            page: session.page(),
        },
    )
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home));
}
