use axum::extract::FromRequest;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// `axum::Json` whose rejections (bad syntax, missing fields, unknown enum
/// labels) come back as 400 with the usual error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// JSON body where the whole body is optional: an empty or whitespace-only
/// body yields `T::default()`.
pub fn json_or_default<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Failed to parse the request body as JSON: {e}")))
}

/// Parses a path identifier, answering 400 instead of axum's plain-text
/// rejection.
pub fn parse_id(raw: &str, what: &str) -> Result<uuid::Uuid, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {what} id")))
}

/// Trimmed value of a mandatory text field; 400 when blank.
pub fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    Ok(value)
}
