use crate::clock::Clock;
use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::{all_digits, ValidationRule};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Card expiry as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpiryDateInput {
    pub month: String,
    pub year: String,
}

impl ExpiryDateInput {
    pub fn new(month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            year: year.into(),
        }
    }

    /// Split `"MM/YY"` (or `"MMYY"`) into its parts.
    ///
    /// Anything else keeps the whole value as the month and leaves the year
    /// empty, which the rule reports as a format error.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Some((month, year)) = value.split_once('/') {
            return Self::new(month.trim(), year.trim());
        }
        if value.len() == 4 && all_digits(value) {
            return Self::new(&value[..2], &value[2..]);
        }
        Self::new(value, "")
    }
}

impl fmt::Display for ExpiryDateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Expiry check against the clock's current UTC month.
///
/// A card is still valid during its expiry month.
pub struct ExpiryDateRule {
    clock: Arc<dyn Clock>,
}

impl ExpiryDateRule {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl ValidationRule for ExpiryDateRule {
    type Input = ExpiryDateInput;

    fn rule_id(&self) -> &'static str {
        "expiry_date"
    }

    fn validate(&self, input: &ExpiryDateInput) -> ValidationResult {
        let field = InputElementType::ExpiryDate;
        let month = input.month.trim();
        let year = input.year.trim();

        if month.is_empty() && year.is_empty() {
            return ValidationError::required(field).into();
        }

        let month_ok = all_digits(month) && month.len() <= 2;
        let year_ok = all_digits(year) && (year.len() == 2 || year.len() == 4);
        if !month_ok || !year_ok {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidFormat,
                "Expiry date must be in MM/YY format",
            )
            .into();
        }

        // both parts are at most four ASCII digits
        let month: u32 = month.parse().unwrap_or(0);
        let year: i32 = year.parse().unwrap_or(0);

        if !(1..=12).contains(&month) {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidMonth,
                "Expiry month must be between 01 and 12",
            )
            .into();
        }

        let year = if year < 100 { 2000 + year } else { year };
        let today = self.clock.today();
        if (year, month) < (today.year(), today.month()) {
            return ValidationError::invalid(field, ErrorKind::Expired, "Card has expired").into();
        }

        ValidationResult::Valid
    }
}
