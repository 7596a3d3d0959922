//! Field validation rules
//!
//! Rules run in a fixed order and the first failing rule wins:
//! required, email shape, phone shape, name characters, message length.

use super::field::{FieldKind, FormField};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[1-9][0-9\s\-()]{7,15}$").expect("valid phone pattern"));

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("valid name pattern"));

/// Minimum number of characters in a message
pub const MESSAGE_MIN_LEN: usize = 10;

/// Why a field failed validation. The display text is the inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("Name should only contain letters, spaces, hyphens, and apostrophes")]
    InvalidCharacters,
    #[error("Message must be at least {MESSAGE_MIN_LEN} characters")]
    TooShort,
}

/// Apply the rules to a raw value without touching any field state
pub fn check_value(
    name: &str,
    kind: FieldKind,
    required: bool,
    raw: &str,
) -> Result<(), ValidationError> {
    let value = raw.trim();

    if value.is_empty() {
        return if required {
            Err(ValidationError::Required)
        } else {
            Ok(())
        };
    }

    if kind == FieldKind::Email && !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidEmail);
    }

    if kind == FieldKind::Tel && !PHONE_RE.is_match(value) {
        return Err(ValidationError::InvalidPhone);
    }

    if name == "name" && !NAME_RE.is_match(value) {
        return Err(ValidationError::InvalidCharacters);
    }

    if name == "message" && value.chars().count() < MESSAGE_MIN_LEN {
        return Err(ValidationError::TooShort);
    }

    Ok(())
}

/// Validate a field and update its inline annotation.
///
/// Any stale annotation is cleared before the rules run, so repeated calls
/// never stack errors. Returns true when the field is valid.
pub fn validate_field(field: &mut FormField) -> bool {
    field.clear_error();
    match check_value(&field.name, field.kind, field.required, &field.value) {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(field = %field.name, %error, "field failed validation");
            field.show_error(error);
            false
        }
    }
}
