use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

/// Phone number check after stripping common formatting characters
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneNumberRule;

impl ValidationRule for PhoneNumberRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "phone_number"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let field = InputElementType::PhoneNumber;
        let digits: String = input
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
            .collect();

        if digits.trim().is_empty() {
            return ValidationError::required(field).into();
        }

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidCharacters,
                "Phone number must contain only digits",
            )
            .into();
        }

        if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidLength,
                format!(
                    "Phone number must be between {} and {} digits",
                    MIN_DIGITS, MAX_DIGITS
                ),
            )
            .into();
        }

        ValidationResult::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number() {
        assert!(PhoneNumberRule.validate("+1 (555) 123-4567").is_valid());
        assert_eq!(PhoneNumberRule.validate(" () ").error_code(), Some("required-phone-number"));
        assert_eq!(
            PhoneNumberRule.validate("555-CALL-NOW").error_code(),
            Some("invalid-phone-number-characters")
        );
        assert_eq!(
            PhoneNumberRule.validate("12345").error_code(),
            Some("invalid-phone-number-length")
        );
        assert_eq!(
            PhoneNumberRule.validate("1234567890123456").error_code(),
            Some("invalid-phone-number-length")
        );
    }
}
