use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmailRule;

impl ValidationRule for EmailRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "email"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let field = InputElementType::Email;
        let email = input.trim();

        if email.is_empty() {
            return ValidationError::required(field).into();
        }

        if !email.contains('@') || !EMAIL_REGEX.is_match(email) {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidFormat,
                "Enter a valid email address",
            )
            .into();
        }

        ValidationResult::Valid
    }
}
