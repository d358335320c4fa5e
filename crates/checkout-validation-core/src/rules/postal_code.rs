use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::result::ValidationResult;
use crate::rules::ValidationRule;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// ZIP or ZIP+4
    static ref US_POSTAL_REGEX: Regex = Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").unwrap();

    /// Canadian A1A 1A1, space optional
    static ref CA_POSTAL_REGEX: Regex = Regex::new(r"^[A-Za-z][0-9][A-Za-z] ?[0-9][A-Za-z][0-9]$").unwrap();

    /// UK outward code, optional space, inward code
    static ref GB_POSTAL_REGEX: Regex =
        Regex::new(r"^[A-Za-z]{1,2}[0-9][A-Za-z0-9]? ?[0-9][A-Za-z]{2}$").unwrap();

    static ref GENERIC_POSTAL_REGEX: Regex = Regex::new(r"^[A-Za-z0-9\s\-]+$").unwrap();
}

/// Postal code check, specific to the billing country when one is known
#[derive(Debug, Clone, Default)]
pub struct PostalCodeRule {
    country: Option<String>,
}

impl PostalCodeRule {
    pub fn new(country: Option<&str>) -> Self {
        let country = country
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty());
        Self { country }
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    fn invalid_format(message: &str) -> ValidationResult {
        ValidationError::invalid(InputElementType::PostalCode, ErrorKind::InvalidFormat, message)
            .into()
    }

    fn invalid_length(message: &str) -> ValidationResult {
        ValidationError::invalid(InputElementType::PostalCode, ErrorKind::InvalidLength, message)
            .into()
    }
}

impl ValidationRule for PostalCodeRule {
    type Input = str;

    fn rule_id(&self) -> &'static str {
        "postal_code"
    }

    fn validate(&self, input: &str) -> ValidationResult {
        let code = input.trim();

        if code.is_empty() {
            return ValidationError::required(InputElementType::PostalCode).into();
        }

        match self.country.as_deref() {
            Some("US") => {
                if !US_POSTAL_REGEX.is_match(code) {
                    return Self::invalid_format("ZIP code must be 5 digits or ZIP+4");
                }
            }
            Some("CA") => {
                if !CA_POSTAL_REGEX.is_match(code) {
                    return Self::invalid_format("Postal code must be in A1A 1A1 format");
                }
            }
            Some("GB") => {
                let length = code.chars().count();
                if !(5..=8).contains(&length) {
                    return Self::invalid_length("Postcode must be between 5 and 8 characters");
                }
                if !GB_POSTAL_REGEX.is_match(code) {
                    return Self::invalid_format("Invalid UK postcode");
                }
            }
            _ => {
                if !GENERIC_POSTAL_REGEX.is_match(code) {
                    return Self::invalid_format("Postal code contains invalid characters");
                }
                let length = code.chars().count();
                if !(3..=10).contains(&length) {
                    return Self::invalid_length("Postal code must be between 3 and 10 characters");
                }
            }
        }

        ValidationResult::Valid
    }
}
