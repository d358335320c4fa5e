//! Localized error copy.
//!
//! Error codes never change; only the human-readable message is looked up
//! here. A [`MessageCatalog`] maps localization keys to text and the
//! [`ErrorMessageResolver`] applies it to failed results.

use crate::error::{InputElementType, ValidationError};
use crate::result::ValidationResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

pub const FIELD_PLACEHOLDER: &str = "{field}";
pub const REQUIRED_FORMAT_KEY: &str = "form_error_required_format";

/// Localization key to message text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English field names and the required-field format.
    ///
    /// Per-field message keys are left out so rule messages, which name the
    /// exact constraint, are kept unless a host overrides them.
    pub fn english() -> Self {
        let mut catalog = Self::new();
        catalog.insert(REQUIRED_FORMAT_KEY, "{field} is required");
        for field in InputElementType::ALL {
            catalog.insert(field.field_name_key(), field.display_name());
        }
        catalog
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Overlay `other` on this catalog; its keys win
    pub fn merge(&mut self, other: MessageCatalog) {
        self.messages.extend(other.messages);
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse message catalog")
    }

    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read message catalog: {}", path))?;
        Self::from_toml_str(&content)
    }
}

/// Chooses the message shown for a validation error
#[derive(Debug, Clone)]
pub struct ErrorMessageResolver {
    catalog: MessageCatalog,
}

impl ErrorMessageResolver {
    pub fn new(catalog: MessageCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Format string with the field name substituted, then the plain message
    /// key, then the error's own message.
    pub fn resolve(&self, error: &ValidationError) -> String {
        if let (Some(format_key), Some(field_key)) = (&error.error_format_key, &error.field_name_key) {
            if let (Some(format), Some(field_name)) =
                (self.catalog.get(format_key), self.catalog.get(field_key))
            {
                return format.replace(FIELD_PLACEHOLDER, field_name);
            }
        }

        if let Some(message) = error
            .error_message_key
            .as_deref()
            .and_then(|key| self.catalog.get(key))
        {
            return message.to_string();
        }

        error.message.clone()
    }

    /// Replace the message of a failed result with the resolved text
    pub fn apply(&self, result: ValidationResult) -> ValidationResult {
        match result {
            ValidationResult::Valid => ValidationResult::Valid,
            ValidationResult::Invalid(error) => {
                let message = self.resolve(&error);
                ValidationResult::Invalid(error.with_message(message))
            }
        }
    }
}

impl Default for ErrorMessageResolver {
    fn default() -> Self {
        Self::new(MessageCatalog::english())
    }
}
