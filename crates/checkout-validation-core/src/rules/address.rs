use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;

const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 100;

/// Street address line. Line 2 is optional and accepts an empty value.
#[derive(Debug, Clone, Copy)]
pub struct AddressLineRule {
    field: InputElementType,
    required: bool,
}

impl AddressLineRule {
    pub fn new(field: InputElementType, required: bool) -> Self {
        Self { field, required }
    }

    pub fn line1() -> Self {
        Self::new(InputElementType::AddressLine1, true)
    }

    pub fn line2() -> Self {
        Self::new(InputElementType::AddressLine2, false)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl ValidationRule for AddressLineRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        if self.field == InputElementType::AddressLine2 {
            "address_line_2"
        } else {
            "address_line_1"
        }
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let address = input.trim();

        if address.is_empty() {
            return if self.required {
                ValidationError::required(self.field).into()
            } else {
                ValidationResult::Valid
            };
        }

        let length = address.chars().count();
        if length < MIN_LENGTH || length > MAX_LENGTH {
            return ValidationError::invalid(
                self.field,
                ErrorKind::InvalidLength,
                format!(
                    "Address must be between {} and {} characters",
                    MIN_LENGTH, MAX_LENGTH
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
    fn test_line1_required() {
        let rule = AddressLineRule::line1();
        assert_eq!(rule.validate("  ").error_code(), Some("required-address-line-1"));
        assert!(rule.validate("1 Main St").is_valid());
    }

    #[test]
    fn test_line2_optional() {
        let rule = AddressLineRule::line2();
        assert!(rule.validate("").is_valid());
        assert_eq!(rule.validate("Ap").error_code(), Some("invalid-address-line-2-length"));
    }

    #[test]
    fn test_length_bounds() {
        let rule = AddressLineRule::line1();
        assert!(rule.validate("abc").is_valid());
        assert!(rule.validate(&"a".repeat(100)).is_valid());
        assert_eq!(
            rule.validate(&"a".repeat(101)).error_code(),
            Some("invalid-address-line-1-length")
        );
    }
}
