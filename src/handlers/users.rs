// src/handlers/users.rs
// DOCUMENTATION: Account handlers (register, login, logout)
// PURPOSE: Establish and end the session the authentication gate checks

use crate::errors::AppError;
use crate::handlers::render::{redirect_with, render};
use crate::models::{LoginForm, RegisterForm};
use crate::services::AuthService;
use crate::session::{
    clear_session_cookie, session_cookie, CurrentUser, Flash, PageContext, Session, SessionKey,
};
use crate::state::AppState;
use crate::validation::ValidatedForm;
use actix_web::{http::header, web, HttpResponse};
use askama::Template;

#[derive(Template)]
#[template(path = "users/register.html")]
pub struct RegisterTemplate {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "users/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
}

/// Redirect to the campground list with a fresh session cookie
fn logged_in_redirect(
    key: &SessionKey,
    user: &CurrentUser,
    flash: Flash,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/campgrounds"))
        .cookie(session_cookie(&key.0, user)?)
        .cookie(flash.cookie())
        .finish())
}

/// GET /register
pub async fn register_form(session: Session) -> Result<HttpResponse, AppError> {
    render(
        &session,
        &RegisterTemplate {
            page: session.page(),
        },
    )
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    key: web::Data<SessionKey>,
    form: ValidatedForm<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let username = form.username.unwrap_or_default();
    let email = form.email.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match AuthService::register(state.users.as_ref(), &username, &email, &password).await {
        Ok(user) => logged_in_redirect(&key, &user, Flash::success("Welcome to Yelp Camp!")),
        Err(AppError::AlreadyExists(msg)) => Ok(redirect_with("/register", Flash::error(msg))),
        Err(e) => Err(e),
    }
}

/// GET /login
pub async fn login_form(session: Session) -> Result<HttpResponse, AppError> {
    render(
        &session,
        &LoginTemplate {
            page: session.page(),
        },
    )
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    key: web::Data<SessionKey>,
    form: ValidatedForm<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    match AuthService::authenticate(state.users.as_ref(), &username, &password).await? {
        Some(user) => logged_in_redirect(&key, &user, Flash::success("Welcome back!")),
        None => Ok(redirect_with(
            "/login",
            Flash::error("Password or username is incorrect"),
        )),
    }
}

/// GET /logout
pub async fn logout() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/campgrounds"))
        .cookie(clear_session_cookie())
        .cookie(Flash::success("Goodbye!").cookie())
        .finish()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::get().to(register_form))
        .route("/register", web::post().to(register))
        .route("/login", web::get().to(login_form))
        .route("/login", web::post().to(login))
        .route("/logout", web::get().to(logout));
}
