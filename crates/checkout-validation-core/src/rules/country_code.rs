use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;

/// ISO 3166-1 alpha-2 shape check: exactly two ASCII letters
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryCodeRule;

impl ValidationRule for CountryCodeRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "country_code"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let field = InputElementType::CountryCode;
        let code = input.trim();

        if code.is_empty() {
            return ValidationError::required(field).into();
        }

        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidFormat,
                "Country must be a two-letter code",
            )
            .into();
        }

        ValidationResult::Valid
    }
}
