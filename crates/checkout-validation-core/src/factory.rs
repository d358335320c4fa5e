use crate::clock::{Clock, SystemClock};
use crate::network::CardNetwork;
use crate::rules::otp::DEFAULT_OTP_LENGTH;
use crate::rules::{
    AddressLineRule, BirthDateRule, CardNumberRule, CityRule, CountryCodeRule, CvvRule, EmailRule,
    ExpiryDateRule, NameRule, OtpRule, PhoneNumberRule, PostalCodeRule, RetailOutletRule,
    StateRule,
};
use std::sync::Arc;

/// Builds configured rule instances.
///
/// Implementors only supply the clock and OTP length; every `create_*`
/// method has a default and has no side effects.
pub trait RulesFactory: Send + Sync {
    fn clock(&self) -> Arc<dyn Clock>;

    fn otp_length(&self) -> usize {
        DEFAULT_OTP_LENGTH
    }

    fn create_card_number_rule(&self) -> CardNumberRule {
        CardNumberRule::new()
    }

    fn create_card_number_rule_for_networks(&self, networks: Vec<CardNetwork>) -> CardNumberRule {
        CardNumberRule::with_allowed_networks(networks)
    }

    fn create_expiry_date_rule(&self) -> ExpiryDateRule {
        ExpiryDateRule::new(self.clock())
    }

    fn create_cvv_rule(&self, network: Option<CardNetwork>) -> CvvRule {
        CvvRule::new(network)
    }

    fn create_cardholder_name_rule(&self) -> NameRule {
        NameRule::cardholder()
    }

    fn create_first_name_rule(&self) -> NameRule {
        NameRule::first_name()
    }

    fn create_last_name_rule(&self) -> NameRule {
        NameRule::last_name()
    }

    fn create_email_rule(&self) -> EmailRule {
        EmailRule
    }

    fn create_phone_number_rule(&self) -> PhoneNumberRule {
        PhoneNumberRule
    }

    fn create_address_line_rule(&self, required: bool) -> AddressLineRule {
        if required {
            AddressLineRule::line1()
        } else {
            AddressLineRule::line2()
        }
    }

    fn create_city_rule(&self) -> CityRule {
        CityRule
    }

    fn create_state_rule(&self) -> StateRule {
        StateRule
    }

    fn create_postal_code_rule(&self, country: Option<&str>) -> PostalCodeRule {
        PostalCodeRule::new(country)
    }

    fn create_country_code_rule(&self) -> CountryCodeRule {
        CountryCodeRule
    }

    fn create_otp_rule(&self) -> OtpRule {
        OtpRule::new(self.otp_length())
    }

    fn create_birth_date_rule(&self) -> BirthDateRule {
        BirthDateRule::new(self.clock())
    }

    fn create_retail_outlet_rule(&self) -> RetailOutletRule {
        RetailOutletRule
    }
}

/// Standard factory backed by the system clock
pub struct DefaultRulesFactory {
    clock: Arc<dyn Clock>,
    otp_length: usize,
}

impl DefaultRulesFactory {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            otp_length: DEFAULT_OTP_LENGTH,
        }
    }

    pub fn with_otp_length(mut self, otp_length: usize) -> Self {
        self.otp_length = otp_length;
        self
    }
}

impl Default for DefaultRulesFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesFactory for DefaultRulesFactory {
    fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    fn otp_length(&self) -> usize {
        self.otp_length
    }
}
