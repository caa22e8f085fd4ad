use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub product_id: String,
    pub note: String,
    #[serde(default)]
    pub rating: Option<i16>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub note: String,
    #[serde(default)]
    pub rating: Option<i16>,
}

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

pub fn validate_rating(rating: Option<i16>) -> Result<Option<i16>, ApiError> {
    match rating {
        Some(r) if !(MIN_RATING..=MAX_RATING).contains(&r) => Err(ApiError::bad_request(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        ))),
        other => Ok(other),
    }
}
