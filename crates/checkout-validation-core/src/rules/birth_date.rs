use crate::clock::Clock;
use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

pub const MINIMUM_AGE: i32 = 18;

lazy_static! {
    static ref BIRTH_DATE_REGEX: Regex = Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap();
}

/// Date of birth in `DD/MM/YYYY`, rejected when in the future or under 18
pub struct BirthDateRule {
    clock: Arc<dyn Clock>,
}

impl BirthDateRule {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Whole years elapsed between `birth` and `today`
fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

impl ValidationRule for BirthDateRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "birth_date"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let field = InputElementType::BirthDate;
        let value = input.trim();

        if value.is_empty() {
            return ValidationError::required(field).into();
        }

        let birth = if BIRTH_DATE_REGEX.is_match(value) {
            NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
        } else {
            None
        };
        let Some(birth) = birth else {
            return ValidationError::invalid(
                field,
                ErrorKind::InvalidFormat,
                "Date of birth must be in DD/MM/YYYY format",
            )
            .into();
        };

        let today = self.clock.today();
        if birth > today {
            return ValidationError::invalid(
                field,
                ErrorKind::FutureDate,
                "Date of birth cannot be in the future",
            )
            .into();
        }

        if age_on(birth, today) < MINIMUM_AGE {
            return ValidationError::invalid(
                field,
                ErrorKind::Underage,
                format!("You must be at least {} years old", MINIMUM_AGE),
            )
            .into();
        }

        ValidationResult::Valid
    }
}
