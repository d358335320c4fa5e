use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical form field a value belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InputElementType {
    CardNumber,
    Cvv,
    ExpiryDate,
    CardholderName,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    CountryCode,
    RetailOutlet,
    OtpCode,
    BirthDate,
    Unknown,
}

impl InputElementType {
    pub const ALL: [InputElementType; 18] = [
        InputElementType::CardNumber,
        InputElementType::Cvv,
        InputElementType::ExpiryDate,
        InputElementType::CardholderName,
        InputElementType::FirstName,
        InputElementType::LastName,
        InputElementType::Email,
        InputElementType::PhoneNumber,
        InputElementType::AddressLine1,
        InputElementType::AddressLine2,
        InputElementType::City,
        InputElementType::State,
        InputElementType::PostalCode,
        InputElementType::CountryCode,
        InputElementType::RetailOutlet,
        InputElementType::OtpCode,
        InputElementType::BirthDate,
        InputElementType::Unknown,
    ];

    /// Stable snake_case identifier, also used for `error_id` and serde
    pub fn as_str(&self) -> &'static str {
        match self {
            InputElementType::CardNumber => "card_number",
            InputElementType::Cvv => "cvv",
            InputElementType::ExpiryDate => "expiry_date",
            InputElementType::CardholderName => "cardholder_name",
            InputElementType::FirstName => "first_name",
            InputElementType::LastName => "last_name",
            InputElementType::Email => "email",
            InputElementType::PhoneNumber => "phone_number",
            InputElementType::AddressLine1 => "address_line_1",
            InputElementType::AddressLine2 => "address_line_2",
            InputElementType::City => "city",
            InputElementType::State => "state",
            InputElementType::PostalCode => "postal_code",
            InputElementType::CountryCode => "country_code",
            InputElementType::RetailOutlet => "retail_outlet",
            InputElementType::OtpCode => "otp_code",
            InputElementType::BirthDate => "birth_date",
            InputElementType::Unknown => "unknown",
        }
    }

    /// Kebab-case form used inside error codes (`required-card-number`)
    pub fn slug(&self) -> String {
        self.as_str().replace('_', "-")
    }

    /// English label used when no localized field name is available
    pub fn display_name(&self) -> &'static str {
        match self {
            InputElementType::CardNumber => "Card number",
            InputElementType::Cvv => "CVV",
            InputElementType::ExpiryDate => "Expiry date",
            InputElementType::CardholderName => "Cardholder name",
            InputElementType::FirstName => "First name",
            InputElementType::LastName => "Last name",
            InputElementType::Email => "Email",
            InputElementType::PhoneNumber => "Phone number",
            InputElementType::AddressLine1 => "Address line 1",
            InputElementType::AddressLine2 => "Address line 2",
            InputElementType::City => "City",
            InputElementType::State => "State",
            InputElementType::PostalCode => "Postal code",
            InputElementType::CountryCode => "Country",
            InputElementType::RetailOutlet => "Retail outlet",
            InputElementType::OtpCode => "OTP code",
            InputElementType::BirthDate => "Date of birth",
            InputElementType::Unknown => "Field",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL.iter().copied().find(|t| t.as_str() == normalized)
    }

    /// Derive the field from an error code such as `invalid-cvv-length`.
    ///
    /// The longest matching slug wins so that `address-line-1` is not
    /// mistaken for a shorter field. Falls back to `Unknown`.
    pub fn from_error_code(code: &str) -> Self {
        match code {
            "expired-card" | "invalid-expiry-month" => return InputElementType::ExpiryDate,
            "unsupported-card-type" => return InputElementType::CardNumber,
            "underage" | "future-birth-date" => return InputElementType::BirthDate,
            _ => {}
        }

        Self::ALL
            .iter()
            .copied()
            .filter(|t| *t != InputElementType::Unknown)
            .filter(|t| {
                let slug = t.slug();
                code.split_once(slug.as_str()).map_or(false, |(prefix, suffix)| {
                    (prefix.is_empty() || prefix.ends_with('-'))
                        && (suffix.is_empty() || suffix.starts_with('-'))
                })
            })
            .max_by_key(|t| t.slug().len())
            .unwrap_or(InputElementType::Unknown)
    }

    /// Key under which a message catalog stores the localized field name
    pub fn field_name_key(&self) -> String {
        format!("{}_field", self.as_str())
    }
}

impl fmt::Display for InputElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad class of a validation failure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Required,
    Format,
    Range,
    Semantic,
    Unknown,
}

/// Specific reason a value was rejected
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Required,
    InvalidFormat,
    InvalidCharacters,
    InvalidLength,
    InvalidMonth,
    InvalidChecksum,
    UnsupportedCardNetwork,
    Expired,
    FutureDate,
    Underage,
    UnknownField,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::Required => ErrorCategory::Required,
            ErrorKind::InvalidFormat | ErrorKind::InvalidCharacters => ErrorCategory::Format,
            ErrorKind::InvalidLength | ErrorKind::InvalidMonth => ErrorCategory::Range,
            ErrorKind::InvalidChecksum
            | ErrorKind::UnsupportedCardNetwork
            | ErrorKind::Expired
            | ErrorKind::FutureDate
            | ErrorKind::Underage => ErrorCategory::Semantic,
            ErrorKind::UnknownField => ErrorCategory::Unknown,
        }
    }

    /// Machine-readable code for this kind on the given field
    pub fn code_for(&self, field: InputElementType) -> String {
        let slug = field.slug();
        match self {
            ErrorKind::Required => format!("required-{}", slug),
            ErrorKind::InvalidFormat => format!("invalid-{}-format", slug),
            ErrorKind::InvalidCharacters => format!("invalid-{}-characters", slug),
            ErrorKind::InvalidLength => format!("invalid-{}-length", slug),
            ErrorKind::InvalidMonth => "invalid-expiry-month".to_string(),
            ErrorKind::InvalidChecksum => format!("invalid-{}", slug),
            ErrorKind::UnsupportedCardNetwork => "unsupported-card-type".to_string(),
            ErrorKind::Expired => "expired-card".to_string(),
            ErrorKind::FutureDate => "future-birth-date".to_string(),
            ErrorKind::Underage => "underage".to_string(),
            ErrorKind::UnknownField => "invalid-unknown-field".to_string(),
        }
    }
}

/// Structured validation failure.
///
/// `code` is the stable contract; `message` is replaceable copy. The
/// localization keys let a host application substitute its own text through
/// [`crate::messages::ErrorMessageResolver`] without touching codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    pub input_element_type: InputElementType,
    pub kind: ErrorKind,
    pub error_id: String,
    pub field_name_key: Option<String>,
    pub error_message_key: Option<String>,
    pub error_format_key: Option<String>,
}

impl ValidationError {
    pub fn new(field: InputElementType, kind: ErrorKind, message: impl Into<String>) -> Self {
        let suffix = if kind == ErrorKind::Required { "required" } else { "invalid" };
        Self {
            code: kind.code_for(field),
            message: message.into(),
            input_element_type: field,
            kind,
            error_id: format!("{}_{}", field.as_str(), suffix),
            field_name_key: None,
            error_message_key: Some(format!("checkout_components_{}_{}", field.as_str(), suffix)),
            error_format_key: None,
        }
    }

    /// Required-field error with the `{field} is required` format variant
    pub fn required(field: InputElementType) -> Self {
        Self::new(
            field,
            ErrorKind::Required,
            format!("{} is required", field.display_name()),
        )
        .with_format_key("form_error_required_format")
    }

    pub fn invalid(field: InputElementType, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(field, kind, message)
    }

    /// Simplified form: only a code and a message. The field is derived from
    /// the code.
    pub fn from_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let field = InputElementType::from_error_code(&code);
        let kind = if code.starts_with("required-") {
            ErrorKind::Required
        } else if code == ErrorKind::UnknownField.code_for(InputElementType::Unknown) {
            ErrorKind::UnknownField
        } else {
            ErrorKind::InvalidFormat
        };
        let suffix = if kind == ErrorKind::Required { "required" } else { "invalid" };
        Self {
            error_id: format!("{}_{}", field.as_str(), suffix),
            code,
            message: message.into(),
            input_element_type: field,
            kind,
            field_name_key: None,
            error_message_key: None,
            error_format_key: None,
        }
    }

    pub fn with_format_key(mut self, format_key: impl Into<String>) -> Self {
        self.error_format_key = Some(format_key.into());
        self.field_name_key = Some(self.input_element_type.field_name_key());
        self
    }

    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.error_message_key = Some(key.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_error_shape() {
        let err = ValidationError::required(InputElementType::CardNumber);
        assert_eq!(err.code, "required-card-number");
        assert_eq!(err.error_id, "card_number_required");
        assert_eq!(err.message, "Card number is required");
        assert_eq!(err.field_name_key.as_deref(), Some("card_number_field"));
        assert_eq!(err.category(), ErrorCategory::Required);
    }

    #[test]
    fn test_codes_per_kind() {
        assert_eq!(
            ErrorKind::InvalidLength.code_for(InputElementType::Cvv),
            "invalid-cvv-length"
        );
        assert_eq!(
            ErrorKind::InvalidChecksum.code_for(InputElementType::CardNumber),
            "invalid-card-number"
        );
        assert_eq!(
            ErrorKind::Expired.code_for(InputElementType::ExpiryDate),
            "expired-card"
        );
    }

    #[test]
    fn test_field_from_error_code() {
        assert_eq!(
            InputElementType::from_error_code("invalid-card-number-length"),
            InputElementType::CardNumber
        );
        assert_eq!(
            InputElementType::from_error_code("required-address-line-1"),
            InputElementType::AddressLine1
        );
        assert_eq!(
            InputElementType::from_error_code("expired-card"),
            InputElementType::ExpiryDate
        );
        assert_eq!(
            InputElementType::from_error_code("something-else"),
            InputElementType::Unknown
        );
    }

    #[test]
    fn test_simplified_error_derives_field() {
        let err = ValidationError::from_code("invalid-otp-code-format", "OTP must be numeric");
        assert_eq!(err.input_element_type, InputElementType::OtpCode);
        assert_eq!(err.error_id, "otp_code_invalid");
    }

    #[test]
    fn test_simplified_error_with_unmapped_code() {
        let err = ValidationError::from_code("invalid-gift-card", "Gift card not accepted");
        assert_eq!(err.input_element_type, InputElementType::Unknown);
        assert_eq!(err.kind, ErrorKind::InvalidFormat);
        assert_eq!(err.category(), ErrorCategory::Format);

        let err = ValidationError::from_code("invalid-unknown-field", "Unknown field type");
        assert_eq!(err.kind, ErrorKind::UnknownField);
        assert_eq!(err.category(), ErrorCategory::Unknown);
    }

    #[test]
    fn test_input_type_from_str() {
        assert_eq!(InputElementType::from_str("card-number"), Some(InputElementType::CardNumber));
        assert_eq!(InputElementType::from_str("CVV"), Some(InputElementType::Cvv));
        assert_eq!(InputElementType::from_str("nope"), None);
    }

    #[test]
    fn test_display_is_error_code() {
        let err = ValidationError::invalid(InputElementType::Email, ErrorKind::InvalidFormat, "bad");
        assert_eq!(err.to_string(), "invalid-email-format: bad");
    }
}
