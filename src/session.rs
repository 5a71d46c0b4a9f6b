// src/session.rs
// DOCUMENTATION: Cookie-backed session and flash notices
// PURPOSE: Who is logged in, and which one-shot notices the next page shows

use crate::errors::AppError;
use actix_web::{
    cookie::{time::Duration, Cookie, CookieJar, Key, SameSite},
    dev::Payload,
    web, FromRequest, HttpRequest,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::{ready, Ready};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "yelpcamp_session";
pub const FLASH_SUCCESS_COOKIE: &str = "flash_success";
pub const FLASH_ERROR_COOKIE: &str = "flash_error";

/// Session lifetime (one week)
const SESSION_MAX_AGE_DAYS: i64 = 7;

/// Key sealing the session cookie, registered as app data
#[derive(Clone)]
pub struct SessionKey(pub Key);

/// The logged-in user as stored in the session cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn cookie_name(self) -> &'static str {
        match self {
            FlashKind::Success => FLASH_SUCCESS_COOKIE,
            FlashKind::Error => FLASH_ERROR_COOKIE,
        }
    }

    /// Bootstrap alert class
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "danger",
        }
    }
}

/// One-shot notice shown on the next rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn cookie(&self) -> Cookie<'static> {
        Cookie::build(self.kind.cookie_name(), self.message.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }

    /// Cookie that deletes the stored notice of the given kind
    pub fn removal_cookie(kind: FlashKind) -> Cookie<'static> {
        let mut cookie = Cookie::build(kind.cookie_name(), "").path("/").finish();
        cookie.make_removal();
        cookie
    }
}

impl fmt::Display for Flash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Data every page layout needs
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
}

/// Per-request session state
/// DOCUMENTATION: Extracted from cookies; never fails
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
}

impl Session {
    pub fn from_http_request(req: &HttpRequest) -> Self {
        let user = req
            .app_data::<web::Data<SessionKey>>()
            .and_then(|key| read_session_cookie(req, &key.0));

        let flashes = [FlashKind::Success, FlashKind::Error]
            .into_iter()
            .filter_map(|kind| {
                req.cookie(kind.cookie_name())
                    .filter(|c| !c.value().is_empty())
                    .map(|c| Flash {
                        kind,
                        message: c.value().to_string(),
                    })
            })
            .collect();

        Session { user, flashes }
    }

    pub fn page(&self) -> PageContext {
        PageContext {
            user: self.user.clone(),
            flashes: self.flashes.clone(),
        }
    }
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Session::from_http_request(req)))
    }
}

/// Authentication gate
/// DOCUMENTATION: Extracting this argument fails with AppError::LoginRequired
/// when nobody is logged in, so the handler body never runs
#[derive(Debug, Clone)]
pub struct RequireLogin(pub CurrentUser);

impl FromRequest for RequireLogin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match Session::from_http_request(req).user {
            Some(user) => Ok(RequireLogin(user)),
            None => {
                log::debug!("Blocked anonymous {} {}", req.method(), req.path());
                Err(AppError::LoginRequired.into())
            }
        };
        ready(result)
    }
}

fn read_session_cookie(req: &HttpRequest, key: &Key) -> Option<CurrentUser> {
    let sealed = req.cookie(SESSION_COOKIE)?;
    let mut jar = CookieJar::new();
    jar.add_original(sealed);
    let opened = jar.private(key).get(SESSION_COOKIE)?;
    serde_json::from_str(opened.value()).ok()
}

/// Encrypted cookie logging `user` in
pub fn session_cookie(key: &Key, user: &CurrentUser) -> Result<Cookie<'static>, AppError> {
    let value = serde_json::to_string(user)
        .map_err(|e| AppError::InternalError(format!("Encode session failed: {}", e)))?;

    let mut jar = CookieJar::new();
    jar.private_mut(key).add(
        Cookie::build(SESSION_COOKIE, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
            .finish(),
    );

    jar.get(SESSION_COOKIE)
        .cloned()
        .ok_or_else(|| AppError::InternalError("Session cookie was not sealed".to_string()))
}

/// Cookie that ends the session
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
