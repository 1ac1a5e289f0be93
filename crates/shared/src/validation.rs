//! Common validation and input-parsing utilities.

use chrono::NaiveDate;
use validator::{ValidateEmail, ValidationError};

/// Minimum accepted password length for email/password accounts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Wire format for calendar dates (`YYYY-MM-DD`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Returns the error reported when a required field is absent or empty.
pub fn required_field(field: &str) -> ValidationError {
    field_error("required", format!("The field '{}' is required.", field))
}

/// Returns true when an optional filter value should be treated as "not provided".
///
/// Query strings from browsers frequently carry `""` or the literal `"null"`.
pub fn is_blank_or_null(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => true,
        Some(v) => v.is_empty() || v.eq_ignore_ascii_case("null"),
    }
}

/// Parses a required `YYYY-MM-DD` date.
pub fn parse_iso_date(value: Option<&str>, field: &str) -> Result<NaiveDate, ValidationError> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty());
    let raw = raw.ok_or_else(|| required_field(field))?;

    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT).map_err(|_| {
        field_error(
            "date_format",
            format!("The field '{}' must use the YYYY-MM-DD format.", field),
        )
    })
}

/// Parses a required integer field given as text.
pub fn parse_integer(value: Option<&str>, field: &str) -> Result<i64, ValidationError> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty());
    let raw = raw.ok_or_else(|| required_field(field))?;

    raw.parse::<i64>().map_err(|_| {
        field_error(
            "numeric",
            format!("The field '{}' must be numeric.", field),
        )
    })
}

/// Trims and lower-cases an email address so it can be used as a login name.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates that an (already normalized) email is present and well formed.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(field_error("required", "Email is required.".to_string()));
    }
    if !email.validate_email() {
        return Err(field_error(
            "email_format",
            "Invalid email format.".to_string(),
        ));
    }
    Ok(())
}

/// Validates the minimum password length.
pub fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(field_error(
            "password_length",
            format!(
                "Password must be at least {} characters long.",
                MIN_PASSWORD_LENGTH
            ),
        ));
    }
    Ok(())
}

/// Extracts the human-readable message of a validation error.
pub fn error_message(err: &ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}
