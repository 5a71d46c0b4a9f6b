// src/middleware/method_override.rs
// DOCUMENTATION: HTML form method override
// PURPOSE: Let a POST form reach PUT/PATCH/DELETE routes via `?_method=`

use actix_web::{dev::ServiceRequest, http::Method, web};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Method named by `_method`, if it is one a form may ask for
pub fn requested_method(query: &str) -> Option<Method> {
    let query = web::Query::<OverrideQuery>::from_query(query).ok()?;
    match query.method.as_deref()?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Rewrite a POST's method before routing
/// Wired in main.rs through `App::wrap_fn`
pub fn override_method(req: &mut ServiceRequest) {
    if *req.method() != Method::POST {
        return;
    }

    if let Some(method) = requested_method(req.query_string()) {
        log::debug!("Method override: POST {} -> {}", req.path(), method);
        req.head_mut().method = method;
    }
}
