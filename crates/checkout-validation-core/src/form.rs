use crate::error::InputElementType;
use crate::network::CardNetwork;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const CARD_NETWORK_KEY: &str = "card_network";

/// Values entered in a payment form, keyed by field.
///
/// Empty strings are stored as absent. Serializes as a flat object such as
/// `{"card_number": "4111…", "cvv": "123", "card_network": "VISA"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct FormData {
    values: BTreeMap<InputElementType, String>,
    card_network: Option<CardNetwork>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: InputElementType, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn with_card_network(mut self, network: CardNetwork) -> Self {
        self.card_network = Some(network);
        self
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse form data")
    }

    pub fn set(&mut self, field: InputElementType, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    pub fn get(&self, field: InputElementType) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn card_network(&self) -> Option<CardNetwork> {
        self.card_network
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<BTreeMap<String, String>> for FormData {
    type Error = String;

    fn try_from(raw: BTreeMap<String, String>) -> std::result::Result<Self, Self::Error> {
        let mut form = FormData::new();
        for (key, value) in raw {
            if key == CARD_NETWORK_KEY {
                let network = CardNetwork::from_str(&value)
                    .ok_or_else(|| format!("unknown card network: {}", value))?;
                form.card_network = Some(network);
                continue;
            }
            let field = InputElementType::from_str(&key)
                .ok_or_else(|| format!("unknown form field: {}", key))?;
            form.set(field, value);
        }
        Ok(form)
    }
}

impl From<FormData> for BTreeMap<String, String> {
    fn from(form: FormData) -> Self {
        let mut raw: BTreeMap<String, String> = form
            .values
            .into_iter()
            .map(|(field, value)| (field.as_str().to_string(), value))
            .collect();
        if let Some(network) = form.card_network {
            raw.insert(CARD_NETWORK_KEY.to_string(), network.raw_value().to_string());
        }
        raw
    }
}

/// Which fields a form validates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfiguration {
    pub card_fields: Vec<InputElementType>,
    #[serde(default)]
    pub billing_fields: Vec<InputElementType>,
}

impl FormConfiguration {
    /// Card number, expiry, CVV and cardholder name
    pub fn card_only() -> Self {
        Self {
            card_fields: vec![
                InputElementType::CardNumber,
                InputElementType::ExpiryDate,
                InputElementType::Cvv,
                InputElementType::CardholderName,
            ],
            billing_fields: Vec::new(),
        }
    }

    pub fn with_billing_address(mut self) -> Self {
        self.billing_fields = vec![
            InputElementType::FirstName,
            InputElementType::LastName,
            InputElementType::AddressLine1,
            InputElementType::AddressLine2,
            InputElementType::City,
            InputElementType::State,
            InputElementType::PostalCode,
            InputElementType::CountryCode,
        ];
        self
    }

    /// Card fields followed by billing fields
    pub fn field_types(&self) -> Vec<InputElementType> {
        self.card_fields
            .iter()
            .chain(self.billing_fields.iter())
            .copied()
            .collect()
    }
}

impl Default for FormConfiguration {
    fn default() -> Self {
        Self::card_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_absent() {
        let mut form = FormData::new()
            .with(InputElementType::CardNumber, "4111111111111111")
            .with(InputElementType::Cvv, "");
        assert_eq!(form.get(InputElementType::Cvv), None);
        assert_eq!(form.len(), 1);

        form.set(InputElementType::CardNumber, "");
        assert!(form.is_empty());
    }

    #[test]
    fn test_form_from_json() {
        let form = FormData::from_json(
            r#"{"card_number": "378282246310005", "cvv": "1234", "card_network": "AMEX", "city": ""}"#,
        )
        .unwrap();
        assert_eq!(form.get(InputElementType::CardNumber), Some("378282246310005"));
        assert_eq!(form.card_network(), Some(CardNetwork::Amex));
        assert_eq!(form.get(InputElementType::City), None);
    }

    #[test]
    fn test_form_json_rejects_unknown_keys() {
        assert!(FormData::from_json(r#"{"shoe_size": "9"}"#).is_err());
        assert!(FormData::from_json(r#"{"card_network": "PAYPAL"}"#).is_err());
        assert!(FormData::from_json(r#"{"cvv": 123}"#).is_err());
    }

    #[test]
    fn test_form_to_json() {
        let form = FormData::new()
            .with(InputElementType::Cvv, "123")
            .with_card_network(CardNetwork::Visa);
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["cvv"], "123");
        assert_eq!(value["card_network"], "VISA");
    }

    #[test]
    fn test_configurations() {
        let card = FormConfiguration::default();
        assert_eq!(card.field_types().len(), 4);
        let full = FormConfiguration::card_only().with_billing_address();
        let types = full.field_types();
        assert_eq!(types.len(), 12);
        assert_eq!(types[0], InputElementType::CardNumber);
        assert!(types.contains(&InputElementType::PostalCode));
    }
}
