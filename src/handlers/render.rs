// src/handlers/render.rs
// DOCUMENTATION: Response helpers shared by the HTML handlers

use crate::errors::AppError;
use crate::session::{Flash, Session};
use actix_web::{http::header, HttpResponse};
use askama::Template;

/// Render a page, consuming any flash notices the session carried
pub fn render<T: Template>(session: &Session, template: &T) -> Result<HttpResponse, AppError> {
    let body = template.render()?;

    let mut response = HttpResponse::Ok();
    for flash in &session.flashes {
        response.cookie(Flash::removal_cookie(flash.kind));
    }

    Ok(response
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// 302 to `location`, showing `flash` on the next page
pub fn redirect_with(location: &str, flash: Flash) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .cookie(flash.cookie())
        .finish()
}
