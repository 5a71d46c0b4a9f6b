// src/validation.rs
// DOCUMENTATION: Request payload validation
// PURPOSE: Reject malformed form submissions with a 400 before any handler runs

use crate::errors::AppError;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use validator::{Validate, ValidationErrors};

/// A form body submitted under a named key (`campground[...]`, `review[...]`)
pub trait FormPayload {
    const KEY: &'static str;
}

/// Flatten validator output into one comma-delimited message list
/// DOCUMENTATION: Each entry reads `"<key>.<field>" <reason>`, ordered by field name
pub fn validation_message(key: &str, errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field_name(key, field), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let reason = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed {} check", err.code));
                format!("\"{}.{}\" {}", key, field, reason)
            })
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Field name without its form wrapper: `campground[title]` -> `title`
fn field_name<'a>(key: &str, field: &'a str) -> &'a str {
    field
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('['))
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(field)
}

/// Form extractor that also runs schema validation
/// DOCUMENTATION: Both decode and rule failures become AppError::Validation (400)
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

impl<T> ValidatedForm<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for ValidatedForm<T>
where
    T: DeserializeOwned + Validate + FormPayload + 'static,
{
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let form = web::Form::<T>::from_request(req, payload);

        Box::pin(async move {
            let web::Form(inner) = form
                .await
                .map_err(|e| AppError::Validation(decode_message(&e.to_string())))?;

            inner
                .validate()
                .map_err(|e| AppError::Validation(validation_message(T::KEY, &e)))?;

            Ok(ValidatedForm(inner))
        })
    }
}

/// Strip the extractor's prefix so only the field message reaches the page
fn decode_message(raw: &str) -> String {
    raw.trim_start_matches("URL encoded error: ")
        .trim_start_matches("Parse error: ")
        .to_string()
}

/// Deserialize an optional number from a form field
/// DOCUMENTATION: Missing or blank input is None so `required` reports it;
/// anything unparsable or non-finite is a decode error naming the field
pub fn number_field<'de, D, N>(deserializer: D, label: &str) -> Result<Option<N>, D::Error>
where
    D: Deserializer<'de>,
    N: FromStr + Into<f64> + Copy,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let value = match raw.as_deref().map(str::trim) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    match value.parse::<N>() {
        Ok(number) if Into::<f64>::into(number).is_finite() => Ok(Some(number)),
        _ => Err(de::Error::custom(format!("\"{}\" must be a number", label))),
    }
}
