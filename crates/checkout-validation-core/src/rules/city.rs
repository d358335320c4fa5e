use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;

#[derive(Debug, Clone, Copy, Default)]
pub struct CityRule;

impl ValidationRule for CityRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "city"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let field = InputElementType::City;
        let city = input.trim();

        if city.is_empty() {
            return ValidationError::required(field).into();
        }

        if city.chars().count() < 2 {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidLength,
                "City must be at least 2 characters",
            )
            .into();
        }

        let allowed = |c: char| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '.';
        if !city.chars().all(allowed) {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidCharacters,
                "City contains invalid characters",
            )
            .into();
        }

        ValidationResult::Valid
    }
}
