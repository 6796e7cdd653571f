use url::Url;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::AppError;

/// True for absolute `http`/`https` URLs, the only kind rendered as links.
pub fn is_web_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub fn validate_web_url(value: &str) -> Result<(), ValidationError> {
    if !is_web_url(value) {
        return Err(ValidationError::new("web_url"));
    }
    Ok(())
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(map_validation_error)
}

/// Collapse field errors into one user-facing sentence, naming the fields in
/// a stable order. Missing fields are reported before malformed ones.
fn map_validation_error(err: ValidationErrors) -> AppError {
    let mut missing = Vec::new();
    let mut malformed = Vec::new();
    for (field, errors) in err.field_errors() {
        if errors.iter().any(|error| error.code == "length") {
            missing.push(field);
        } else {
            malformed.push(field);
        }
    }
    missing.sort_unstable();
    malformed.sort_unstable();

    if !missing.is_empty() {
        AppError::Validation(format!("Please fill in all required fields: {}.", missing.join(", ")))
    } else {
        AppError::Validation(format!("Please enter a valid http(s) address for: {}.", malformed.join(", ")))
    }
}
