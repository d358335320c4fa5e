use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::network::CardNetwork;
use crate::result::ValidationResult;
use crate::rules::{all_digits, ValidationRule};

const DEFAULT_CVV_LENGTH: usize = 3;

/// Security code check, length taken from the card network
#[derive(Debug, Clone, Copy, Default)]
pub struct CvvRule {
    network: Option<CardNetwork>,
}

impl CvvRule {
    pub fn new(network: Option<CardNetwork>) -> Self {
        Self { network }
    }

    pub fn network(&self) -> Option<CardNetwork> {
        self.network
    }

    pub fn expected_length(&self) -> usize {
        self.network
            .map(|n| n.cvv_length())
            .unwrap_or(DEFAULT_CVV_LENGTH)
    }
}

impl ValidationRule for CvvRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "cvv"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let field = InputElementType::Cvv;
        let cvv = input.trim();

        if cvv.is_empty() {
            return ValidationError::required(field).into();
        }

        if !all_digits(cvv) {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidFormat,
                "CVV must contain only digits",
            )
            .into();
        }

        let expected = self.expected_length();
        if cvv.len() != expected {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidLength,
                format!("CVV must be {} digits", expected),
            )
            .into();
        }

        ValidationResult::Valid
    }
}
