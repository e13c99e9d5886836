use validator::ValidationErrors;

use crate::api::errors::ApiError;

/// Path ids are taken as raw strings so that malformed values get the
/// endpoint's own message instead of the extractor's rejection.
pub(crate) fn parse_positive_id(raw: &str, message: &str) -> Result<i64, ApiError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(message)),
    }
}

pub(crate) fn require_non_blank<'a>(value: &'a str, message: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::bad_request(message))
    } else {
        Ok(trimmed)
    }
}

/// First message of the first failing field, checked in `field_order`.
pub(crate) fn first_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let fields = errors.field_errors();
    field_order
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .unwrap_or_else(|| "Invalid request".to_string())
}
