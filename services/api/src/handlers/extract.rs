//! JSON body extractor that reports decode failures as `VALIDATION` errors.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::FoodgramError;

/// Top-level request body fields a decode error can be attributed to.
const BODY_FIELDS: &[&str] = &[
    "ingredients",
    "image",
    "name",
    "text",
    "cooking_time",
    "email",
    "username",
    "first_name",
    "last_name",
    "avatar",
];

/// Drop-in replacement for [`Json`] on request bodies.
///
/// Missing, mistyped or unparsable bodies become a 400 with
/// `{"kind":"VALIDATION","field":...}` instead of axum's plain-text 422.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = FoodgramError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for FoodgramError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        let detail = match text.split_once("target type: ") {
            Some((_, rest)) => rest,
            None => text.as_str(),
        };
        let field = rejected_field(detail);
        tracing::debug!(field, error = %detail, "rejected request body");
        FoodgramError::validation(field, detail)
    }
}

/// Pick the top-level field named by a serde error such as
/// `cooking_time: invalid type: ...` or ``missing field `image` at line 1``.
fn rejected_field(detail: &str) -> &'static str {
    let from_path = detail
        .split_once(": ")
        .map(|(path, _)| path.split(['.', '[']).next().unwrap_or(path));
    if let Some(field) = from_path.and_then(known_field) {
        return field;
    }
    detail
        .split_once("missing field `")
        .and_then(|(_, rest)| rest.split_once('`'))
        .and_then(|(name, _)| known_field(name))
        .unwrap_or("body")
}

fn known_field(name: &str) -> Option<&'static str> {
    BODY_FIELDS.iter().copied().find(|field| *field == name)
}
