//! Local form validation.
//!
//! Failures here block submission and never reach the network.

use std::fmt;

use crate::document::format::normalize_month;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A single field failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Form field name, as the backend spells it.
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} is required", label))
    }

    pub fn password_too_short(field: &str) -> Self {
        Self::new(
            field,
            format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
        )
    }

    pub fn passwords_mismatch(field: &str) -> Self {
        Self::new(field, "Passwords do not match")
    }

    pub fn invalid_month(field: &str, value: &str) -> Self {
        Self::new(field, format!("'{}' is not a month", value))
            .with_suggestion("Use an English month name, e.g. March")
    }

    pub fn invalid_number(field: &str, label: &str, value: &str) -> Self {
        Self::new(field, format!("{} '{}' is not a number", label, value))
    }

    pub fn invalid_date(field: &str, value: &str) -> Self {
        Self::new(field, format!("'{}' is not a valid date", value))
            .with_suggestion("Use the format YYYY-MM-DD, e.g. 2025-01-05")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// All failures of one form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Short text for a notification: the first failure, plus a count.
    pub fn summary(&self) -> String {
        match self.errors.as_slice() {
            [] => String::new(),
            [only] => only.message.clone(),
            [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Validation functions
// ============================================================================

pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

pub fn validate_password(value: &str, field: &str, errors: &mut ValidationErrors) {
    if value.is_empty() {
        errors.add(ValidationError::empty_field(field, "Password"));
    } else if value.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add(ValidationError::password_too_short(field));
    }
}

pub fn validate_confirmation(
    password: &str,
    confirmation: &str,
    field: &str,
    errors: &mut ValidationErrors,
) {
    if password != confirmation {
        errors.add(ValidationError::passwords_mismatch(field));
    }
}

pub fn validate_month(value: &str, field: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, "Month"));
    } else if normalize_month(value).is_none() {
        errors.add(ValidationError::invalid_month(field, value.trim()));
    }
}

pub fn validate_year(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "Year"));
    } else if trimmed.parse::<i32>().is_err() {
        errors.add(ValidationError::invalid_number(field, "Year", trimmed));
    }
}

/// Required date in `YYYY-MM-DD` (or ISO timestamp) form.
pub fn validate_date(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    } else if crate::document::format::parse_date(trimmed).is_none() {
        errors.add(ValidationError::invalid_date(field, trimmed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_whitespace() {
        let mut errors = ValidationErrors::new();
        validate_required("   ", "name", "Name", &mut errors);
        validate_required("Jane", "email", "Email", &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("name"));
    }

    #[test]
    fn test_password_rules() {
        let mut errors = ValidationErrors::new();
        validate_password("12345", "password", &mut errors);
        assert_eq!(
            errors.summary(),
            "Password must be at least 6 characters long"
        );

        let mut errors = ValidationErrors::new();
        validate_confirmation("secret1", "secret2", "confirmPassword", &mut errors);
        assert_eq!(errors.summary(), "Passwords do not match");
    }

    #[test]
    fn test_month_and_year() {
        let mut errors = ValidationErrors::new();
        validate_month("Marchish", "month", &mut errors);
        validate_year("20x5", "year", &mut errors);
        validate_month("april", "month2", &mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors.summary().ends_with("(and 1 more)"));
    }

    #[test]
    fn test_display_numbers_each_error() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::empty_field("a", "A"));
        errors.add(ValidationError::invalid_date("b", "tomorrow"));
        let text = errors.to_string();
        assert!(text.starts_with("1. [a] A is required"));
        assert!(text.contains("2. [b] 'tomorrow' is not a valid date. Use the format"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::empty_field("x", "X"));
        assert!(errors.into_result().is_err());
    }
}
