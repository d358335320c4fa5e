use crate::error::{InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;

/// Selection of a retail outlet for cash payments; only presence is checked
#[derive(Debug, Clone, Copy, Default)]
pub struct RetailOutletRule;

impl ValidationRule for RetailOutletRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "retail_outlet"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        if input.trim().is_empty() {
            return ValidationError::required(InputElementType::RetailOutlet).into();
        }
        ValidationResult::Valid
    }
}
