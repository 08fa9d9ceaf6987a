//! Request validation for the create endpoint.
//!
//! Runs before any store access: the body must be a JSON object whose
//! `expression` and `result` are non-empty strings. The rejection names the
//! first failing field, `expression` checked before `result`.

use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::ReckonError;
use crate::db::models::NewCalculation;

/// Validated body for `POST /api/calculations`.
pub struct ValidCalculation(pub NewCalculation);

impl<S> FromRequest<S> for ValidCalculation
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = match Json::<Value>::from_request(req, &()).await {
            Ok(v) => v,
            Err(_) => {
                return Err(ReckonError::validation(
                    "body",
                    "request body must be a JSON object",
                )
                .into_response());
            }
        };

        let expression =
            require_string(&body, "expression").map_err(IntoResponse::into_response)?;
        let result = require_string(&body, "result").map_err(IntoResponse::into_response)?;

        Ok(Self(NewCalculation { expression, result }))
    }
}

fn require_string(body: &Value, field: &'static str) -> Result<String, ReckonError> {
    let value = body
        .get(field)
        .ok_or_else(|| ReckonError::validation(field, format!("{field} is required")))?;
    let s = value
        .as_str()
        .ok_or_else(|| ReckonError::validation(field, format!("{field} must be a string")))?;
    if s.is_empty() {
        return Err(ReckonError::validation(
            field,
            format!("{field} must not be empty"),
        ));
    }
    Ok(s.to_string())
}
