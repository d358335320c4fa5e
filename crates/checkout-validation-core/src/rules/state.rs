use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;

#[derive(Debug, Clone, Copy, Default)]
pub struct StateRule;

impl ValidationRule for StateRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "state"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let field = InputElementType::State;
        let state = input.trim();

        if state.is_empty() {
            return ValidationError::required(field).into();
        }

        if state.chars().count() < 2 {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidLength,
                "State must be at least 2 characters",
            )
            .into();
        }

        ValidationResult::Valid
    }
}
