//! Request validation helpers built on the `validator` crate.
//!
//! DTOs derive [`Validate`]; handlers call [`validate_request`] before any
//! store access so every failure surfaces as [`CoreError::Validation`].

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Custom validator rejecting empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Run the derived validations on `input`, flattening failures into a
/// single human-readable [`CoreError::Validation`].
pub fn validate_request<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Render field errors as `field: message` pairs joined by `; `, sorted by
/// field name so the output is stable.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", err.code),
            })
        })
        .collect();
    parts.sort();
    parts.dedup();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Named {
        #[validate(
            required(message = "name is required"),
            custom(function = "not_blank", message = "name cannot be blank")
        )]
        name: Option<String>,
    }

    #[test]
    fn not_blank_accepts_text() {
        assert!(not_blank("Berserk").is_ok());
        assert!(not_blank("  x ").is_ok());
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t\n").is_err());
    }

    #[test]
    fn missing_field_reports_required_message() {
        let result = validate_request(&Named { name: None });
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg == "name: name is required");
    }

    #[test]
    fn blank_field_reports_custom_message() {
        let result = validate_request(&Named {
            name: Some("   ".into()),
        });
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg == "name: name cannot be blank");
    }

    #[test]
    fn valid_input_passes() {
        assert!(validate_request(&Named {
            name: Some("Hellsing".into())
        })
        .is_ok());
    }
}
