use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::{all_digits, ValidationRule};

pub const DEFAULT_OTP_LENGTH: usize = 6;

/// One-time passcode of a fixed number of digits
#[derive(Debug, Clone, Copy)]
pub struct OtpRule {
    length: usize,
}

impl OtpRule {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for OtpRule {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_LENGTH)
    }
}

impl ValidationRule for OtpRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "otp_code"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let field = InputElementType::OtpCode;
        let otp = input.trim();

        if otp.is_empty() {
            return ValidationError::required(field).into();
        }

        if !all_digits(otp) {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidFormat,
                "Code must contain only digits",
            )
            .into();
        }

        if otp.len() != self.length {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidLength,
                format!("Code must be {} digits", self.length),
            )
            .into();
        }

        ValidationResult::Valid
    }
}
