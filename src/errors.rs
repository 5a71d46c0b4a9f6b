// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use crate::session::{Flash, PageContext};
use actix_web::{
    error::ResponseError,
    http::{header, StatusCode},
    HttpResponse,
};
use askama::Template;
use thiserror::Error;

/// Message shown on every 5xx page
pub const GENERIC_FAILURE: &str = "Oh No, Something Went Wrong!";

/// Notice set when a protected route is hit without a session
pub const LOGIN_REQUIRED_NOTICE: &str = "You must be logged in first!";

/// Application-specific error types
/// DOCUMENTATION: Closed set of failures a handler can produce
/// Each variant maps to a fixed HTTP status code and page message
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Login required")]
    LoginRequired,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Message rendered on the error page
    /// Server-side failures never leak their details to the client
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::AlreadyExists(msg) => {
                msg.clone()
            }
            AppError::LoginRequired => LOGIN_REQUIRED_NOTICE.to_string(),
            AppError::DatabaseError(_) | AppError::Template(_) | AppError::InternalError(_) => {
                GENERIC_FAILURE.to_string()
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Template(err.to_string())
    }
}

/// Generic error page
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub page: PageContext,
    pub status: u16,
    pub message: String,
}

/// Convert AppError to HTTP response
/// DOCUMENTATION: Terminal handler for every failed request
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let AppError::LoginRequired = self {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, "/login"))
                .cookie(Flash::error(LOGIN_REQUIRED_NOTICE).cookie())
                .finish();
        }

        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status, self);
        }

        let page = ErrorTemplate {
            page: PageContext::default(),
            status: status.as_u16(),
            message: self.public_message(),
        };

        match page.render() {
            Ok(body) => HttpResponse::build(status)
                .content_type("text/html; charset=utf-8")
                .body(body),
            Err(e) => {
                log::error!("Failed to render error page: {}", e);
                HttpResponse::build(status)
                    .content_type("text/plain; charset=utf-8")
                    .body(page.message)
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::LoginRequired => StatusCode::FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
