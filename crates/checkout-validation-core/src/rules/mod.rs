use crate::result::ValidationResult;

pub mod address;
pub mod birth_date;
pub mod card_number;
pub mod city;
pub mod country_code;
pub mod cvv;
pub mod email;
pub mod expiry_date;
pub mod name;
pub mod otp;
pub mod phone_number;
pub mod postal_code;
pub mod retail_outlet;
pub mod state;

pub use address::AddressLineRule;
pub use birth_date::BirthDateRule;
pub use card_number::{luhn_valid, CardNumberRule};
pub use city::CityRule;
pub use country_code::CountryCodeRule;
pub use cvv::CvvRule;
pub use email::EmailRule;
pub use expiry_date::{ExpiryDateInput, ExpiryDateRule};
pub use name::NameRule;
pub use otp::OtpRule;
pub use phone_number::PhoneNumberRule;
pub use postal_code::PostalCodeRule;
pub use retail_outlet::RetailOutletRule;
pub use state::StateRule;

/// Trait that all field validation rules implement.
///
/// Rules hold only the parameters they were built with and never mutate
/// after construction, so a single instance can be shared across threads.
pub trait ValidationRule: Send + Sync {
    /// Value this rule checks
    type Input: ?Sized;

    /// Unique identifier for this rule
    fn rule_id(&self) -> &'static str;

    /// Check the input, never panicking on malformed values
    fn validate(&self, input: &Self::Input) -> ValidationResult;
}

pub(crate) fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
