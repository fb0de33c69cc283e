//! Validation Utilities

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use super::error::{AppError, FieldErrors, NON_FIELD_ERRORS};

/// Message used when a required field is absent or null.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    AppError::Validation(field_errors(&errors))
}

/// Flatten `validator` output into per-field messages.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();

    for (field, errs) in errors.field_errors() {
        let key = if field == "__all__" {
            NON_FIELD_ERRORS.to_string()
        } else {
            field.to_string()
        };

        let messages = fields.entry(key).or_default();
        messages.extend(errs.iter().map(message_for));
    }

    fields
}

fn message_for(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "required" => REQUIRED_MESSAGE.to_string(),
        "range" => "Ensure this value is within the allowed range.".to_string(),
        "length" => "Ensure this field has a valid length.".to_string(),
        code => format!("Invalid value ({code})."),
    }
}

/// Unwrap a field already checked by `#[validate(required)]`.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::field(field, REQUIRED_MESSAGE))
}

/// Build a `ValidationError` with a human-readable message.
pub fn error_with_message(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}
