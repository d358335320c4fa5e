use crate::cache::ValidationResultCache;
use crate::config::ValidationConfig;
use crate::error::{ErrorKind, InputElementType, ValidationError};
use crate::factory::{DefaultRulesFactory, RulesFactory};
use crate::form::{FormConfiguration, FormData};
use crate::messages::ErrorMessageResolver;
use crate::network::CardNetwork;
use crate::result::{FieldError, ValidationResult};
use crate::rules::{ExpiryDateInput, ValidationRule};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// 0 is the cache's default scope
static NEXT_CACHE_SCOPE: AtomicU64 = AtomicU64::new(1);

fn next_cache_scope() -> u64 {
    NEXT_CACHE_SCOPE.fetch_add(1, Ordering::Relaxed)
}

/// Entry point for field and form validation.
///
/// Dispatches each field to its rule, memoizes results in the injected
/// cache and resolves error messages before they are returned or stored.
/// Shareable across threads; the cache is the only mutable state. Each
/// service caches under its own scope, so services with different rules or
/// messages can share one cache without seeing each other's results.
pub struct ValidationService {
    factory: Arc<dyn RulesFactory>,
    cache: Arc<ValidationResultCache>,
    resolver: ErrorMessageResolver,
    scope: u64,
}

impl ValidationService {
    pub fn new(factory: Arc<dyn RulesFactory>, cache: Arc<ValidationResultCache>) -> Self {
        Self {
            factory,
            cache,
            resolver: ErrorMessageResolver::default(),
            scope: next_cache_scope(),
        }
    }

    /// System clock, default cache, English messages
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(DefaultRulesFactory::new()),
            Arc::new(ValidationResultCache::default()),
        )
    }

    pub fn from_config(config: &ValidationConfig) -> Self {
        let factory = DefaultRulesFactory::new().with_otp_length(config.validation.otp_length);
        let cache = ValidationResultCache::new(config.cache_config());
        Self::new(Arc::new(factory), Arc::new(cache))
            .with_message_resolver(ErrorMessageResolver::new(config.message_catalog()))
    }

    pub fn with_message_resolver(mut self, resolver: ErrorMessageResolver) -> Self {
        self.resolver = resolver;
        self.scope = next_cache_scope();
        self
    }

    pub fn cache(&self) -> &Arc<ValidationResultCache> {
        &self.cache
    }

    pub fn rules_factory(&self) -> &Arc<dyn RulesFactory> {
        &self.factory
    }

    /// Run any rule directly, without caching
    pub fn validate<R>(&self, input: &R::Input, rule: &R) -> ValidationResult
    where
        R: ValidationRule + ?Sized,
    {
        self.resolver.apply(rule.validate(input))
    }

    fn cached<R>(
        &self,
        field: InputElementType,
        input: &R::Input,
        cache_input: &str,
        context: Option<&str>,
        rule: R,
    ) -> ValidationResult
    where
        R: ValidationRule,
    {
        self.cache
            .scoped_validation(self.scope, field.as_str(), cache_input, context, || {
                self.resolver.apply(rule.validate(input))
            })
    }

    /// Date-sensitive results are keyed by the day they were computed on
    fn today(&self) -> String {
        self.factory.clock().today().to_string()
    }

    fn required(&self, field: InputElementType) -> ValidationResult {
        self.resolver.apply(ValidationError::required(field).into())
    }

    /// Validate one field value.
    ///
    /// A missing card number, expiry, CVV or cardholder name is reported as
    /// required without running the rule; other fields treat a missing value
    /// as empty. Unknown fields always fail.
    pub fn validate_field(&self, field: InputElementType, value: Option<&str>) -> ValidationResult {
        let value = match (field, value) {
            (
                InputElementType::CardNumber
                | InputElementType::ExpiryDate
                | InputElementType::Cvv
                | InputElementType::CardholderName,
                None,
            ) => return self.required(field),
            (_, value) => value.unwrap_or(""),
        };

        let factory = &self.factory;
        match field {
            InputElementType::CardNumber => self.validate_card_number(value),
            InputElementType::ExpiryDate => {
                let expiry = ExpiryDateInput::parse(value);
                self.validate_expiry(&expiry.month, &expiry.year)
            }
            InputElementType::Cvv => self.validate_cvv(value, None),
            InputElementType::CardholderName => self.validate_cardholder_name(value),
            InputElementType::FirstName => {
                self.cached(field, value, value, None, factory.create_first_name_rule())
            }
            InputElementType::LastName => {
                self.cached(field, value, value, None, factory.create_last_name_rule())
            }
            InputElementType::Email => {
                self.cached(field, value, value, None, factory.create_email_rule())
            }
            InputElementType::PhoneNumber => {
                self.cached(field, value, value, None, factory.create_phone_number_rule())
            }
            InputElementType::AddressLine1 => {
                self.cached(field, value, value, None, factory.create_address_line_rule(true))
            }
            InputElementType::AddressLine2 => {
                self.cached(field, value, value, None, factory.create_address_line_rule(false))
            }
            InputElementType::City => {
                self.cached(field, value, value, None, factory.create_city_rule())
            }
            InputElementType::State => {
                self.cached(field, value, value, None, factory.create_state_rule())
            }
            InputElementType::PostalCode => self.validate_postal_code(value, None),
            InputElementType::CountryCode => {
                self.cached(field, value, value, None, factory.create_country_code_rule())
            }
            InputElementType::RetailOutlet => {
                self.cached(field, value, value, None, factory.create_retail_outlet_rule())
            }
            InputElementType::OtpCode => {
                self.cached(field, value, value, None, factory.create_otp_rule())
            }
            InputElementType::BirthDate => {
                let today = self.today();
                self.cached(field, value, value, Some(&today), factory.create_birth_date_rule())
            }
            InputElementType::Unknown => {
                tracing::warn!("Validation requested for unknown field type, rejecting");
                self.resolver.apply(
                    ValidationError::new(field, ErrorKind::UnknownField, "Unknown field type").into(),
                )
            }
        }
    }

    pub fn validate_card_number(&self, number: &str) -> ValidationResult {
        let rule = self.factory.create_card_number_rule();
        self.cached(InputElementType::CardNumber, number, number, None, rule)
    }

    pub fn validate_expiry(&self, month: &str, year: &str) -> ValidationResult {
        let input = ExpiryDateInput::new(month, year);
        let rule = self.factory.create_expiry_date_rule();
        let today = self.today();
        self.cached(InputElementType::ExpiryDate, &input, &input.to_string(), Some(&today), rule)
    }

    /// CVV check sized for `network`; three digits when unknown
    pub fn validate_cvv(&self, cvv: &str, network: Option<CardNetwork>) -> ValidationResult {
        let rule = self.factory.create_cvv_rule(network);
        let context = network.map(|n| n.raw_value());
        self.cached(InputElementType::Cvv, cvv, cvv, context, rule)
    }

    pub fn validate_cardholder_name(&self, name: &str) -> ValidationResult {
        let rule = self.factory.create_cardholder_name_rule();
        self.cached(InputElementType::CardholderName, name, name, None, rule)
    }

    pub fn validate_postal_code(&self, code: &str, country: Option<&str>) -> ValidationResult {
        let rule = self.factory.create_postal_code_rule(country);
        let context = rule.country().map(str::to_string);
        self.cached(InputElementType::PostalCode, code, code, context.as_deref(), rule)
    }

    /// Validate every field the configuration lists
    pub fn validate_form_data(
        &self,
        form: &FormData,
        configuration: &FormConfiguration,
    ) -> Vec<FieldError> {
        self.validate_fields(&configuration.field_types(), form)
    }

    /// Validate the given fields against the form's values, returning one
    /// `FieldError` per failing field in input order.
    pub fn validate_fields(&self, field_types: &[InputElementType], form: &FormData) -> Vec<FieldError> {
        field_types
            .iter()
            .filter_map(|&field| {
                let value = form.get(field);
                let result = match (field, value) {
                    (InputElementType::Cvv, Some(cvv)) => {
                        self.validate_cvv(cvv, Self::form_card_network(form))
                    }
                    (InputElementType::PostalCode, value) => self.validate_postal_code(
                        value.unwrap_or(""),
                        form.get(InputElementType::CountryCode),
                    ),
                    (field, value) => self.validate_field(field, value),
                };
                result.into_field_error(field)
            })
            .collect()
    }

    /// Explicit network, else the one detected from the card number
    fn form_card_network(form: &FormData) -> Option<CardNetwork> {
        form.card_network().or_else(|| {
            form.get(InputElementType::CardNumber)
                .map(CardNetwork::detect)
                .filter(|network| *network != CardNetwork::Unknown)
        })
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::with_defaults()
    }
}
