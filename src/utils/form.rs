// src/utils/form.rs

use std::borrow::Cow;
use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors};

/// Key for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Field name -> messages, rendered next to each form input.
pub type FormErrors = BTreeMap<String, Vec<String>>;

/// Flattens `validator` output into displayable messages.
pub fn collect_errors(errors: &ValidationErrors) -> FormErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

pub fn push_error(errors: &mut FormErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

/// Rejects empty and whitespace-only input.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(required());
    }
    Ok(())
}

pub fn required() -> ValidationError {
    ValidationError::new("required").with_message(Cow::Borrowed("This field is required."))
}
