use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::network::CardNetwork;
use crate::result::ValidationResult;
use crate::rules::{all_digits, ValidationRule};

const MIN_LENGTH: usize = 13;
const MAX_LENGTH: usize = 19;

/// Card number check: digits only, 13 to 19 long, Luhn-valid.
///
/// When an allowed-network list is set the detected network must also be in
/// it. Checks short-circuit in that order.
#[derive(Debug, Clone, Default)]
pub struct CardNumberRule {
    allowed_networks: Option<Vec<CardNetwork>>,
}

impl CardNumberRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allowed_networks(networks: Vec<CardNetwork>) -> Self {
        Self {
            allowed_networks: Some(networks),
        }
    }
}

impl ValidationRule for CardNumberRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "card_number"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let field = InputElementType::CardNumber;
        let digits: String = input.chars().filter(|c| *c != ' ').collect();

        if digits.is_empty() {
            return ValidationError::required(field).into();
        }

        if !all_digits(&digits) {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidFormat,
                "Card number must contain only digits",
            )
            .into();
        }

        if digits.len() < MIN_LENGTH || digits.len() > MAX_LENGTH {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidLength,
                format!(
                    "Card number must be between {} and {} digits",
                    MIN_LENGTH, MAX_LENGTH
                ),
            )
            .into();
        }

        if !luhn_valid(&digits) {
            return ValidationError::invalid(field, ErrorKind::InvalidChecksum, "Invalid card number")
                .into();
        }

        if let Some(allowed) = &self.allowed_networks {
            let network = CardNetwork::detect(&digits);
            if !allowed.contains(&network) {
                return ValidationError::invalid(
                    field,
                    ErrorKind::UnsupportedCardNetwork,
                    format!("{} cards are not supported", network.display_name()),
                )
                .into();
            }
        }

        ValidationResult::Valid
    }
}

/// Luhn mod-10 checksum over an ASCII digit string.
///
/// Returns false for empty input or any non-digit character.
pub fn luhn_valid(digits: &str) -> bool {
    if !all_digits(digits) {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}
