use crate::error::{InputElementType, ValidationError};
use serde::{Deserialize, Serialize};

/// Outcome of a single validation call.
///
/// A valid result carries no code and no message; an invalid one always
/// carries both through its [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Simplified failure for rules with no localization requirement
    pub fn invalid(code: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationResult::Invalid(ValidationError::from_code(code, message))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(error) => Some(error),
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error().map(|e| e.code.as_str())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error().map(|e| e.message.as_str())
    }

    /// Convert into a `FieldError` for the given field, `None` when valid
    pub fn into_field_error(self, field_type: InputElementType) -> Option<FieldError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(error) => Some(FieldError {
                field_type,
                message: error.message,
                error_code: error.code,
            }),
        }
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(error: ValidationError) -> Self {
        ValidationResult::Invalid(error)
    }
}

/// A field-level failure produced by batch validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field_type: InputElementType,
    pub message: String,
    pub error_code: String,
}
