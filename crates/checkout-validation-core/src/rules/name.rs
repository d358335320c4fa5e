use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;

const MIN_LENGTH: usize = 2;

/// Person-name check shared by cardholder, first and last name fields.
///
/// Accepts letters from any script, whitespace, hyphens and apostrophes.
#[derive(Debug, Clone, Copy)]
pub struct NameRule {
    field: InputElementType,
}

impl NameRule {
    pub fn new(field: InputElementType) -> Self {
        Self { field }
    }

    pub fn cardholder() -> Self {
        Self::new(InputElementType::CardholderName)
    }

    pub fn first_name() -> Self {
        Self::new(InputElementType::FirstName)
    }

    pub fn last_name() -> Self {
        Self::new(InputElementType::LastName)
    }
}

impl ValidationRule for NameRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        match self.field {
            InputElementType::FirstName => "first_name",
            InputElementType::LastName => "last_name",
            _ => "cardholder_name",
        }
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let name = input.trim();

        if name.is_empty() {
            return ValidationError::required(self.field).into();
        }

        if name.chars().count() < MIN_LENGTH {
            return ValidationError::invalid(
                self.field,
                ErrorKind::InvalidLength,
                format!(
                    "{} must be at least {} characters",
                    self.field.display_name(),
                    MIN_LENGTH
                ),
            )
            .into();
        }

        let allowed = |c: char| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '\'';
        if !name.chars().all(allowed) {
            return ValidationError::invalid(
                self.field,
                ErrorKind::InvalidCharacters,
                format!("{} contains invalid characters", self.field.display_name()),
            )
            .into();
        }

        ValidationResult::Valid
    }
}
