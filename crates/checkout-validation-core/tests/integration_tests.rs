// Integration tests for checkout-validation-core

use checkout_validation_core::{
    CacheConfig, CardNetwork, DefaultRulesFactory, FixedClock, FormConfiguration, FormData,
    InputElementType, RulesFactory, ValidationConfig, ValidationResultCache, ValidationService,
};
use std::sync::Arc;
use std::time::Duration;

fn april_2024_service() -> ValidationService {
    let clock = Arc::new(FixedClock::from_ymd(2024, 4, 10).unwrap());
    ValidationService::new(
        Arc::new(DefaultRulesFactory::with_clock(clock)),
        Arc::new(ValidationResultCache::default()),
    )
}

#[test]
fn test_known_test_cards() {
    let service = april_2024_service();
    for card in [
        "4111111111111111",
        "5555555555554444",
        "378282246310005",
        "6011111111111117",
        "3530111333300000",
        "30569309025904",
        "4242424242424242",
    ] {
        assert!(service.validate_card_number(card).is_valid(), "{}", card);
    }
    assert_eq!(
        service.validate_card_number("4111111111111112").error_code(),
        Some("invalid-card-number")
    );
}

#[test]
fn test_single_digit_change_breaks_checksum() {
    let service = april_2024_service();
    let card = "4111111111111111";
    for position in 0..card.len() {
        for digit in b'0'..=b'9' {
            let mut bytes = card.as_bytes().to_vec();
            if bytes[position] == digit {
                continue;
            }
            bytes[position] = digit;
            let mutated = String::from_utf8(bytes).unwrap();
            assert_eq!(
                service.validate_card_number(&mutated).error_code(),
                Some("invalid-card-number"),
                "{}",
                mutated
            );
        }
    }
}

#[test]
fn test_validation_is_idempotent() {
    let service = april_2024_service();
    let first = service.validate_field(InputElementType::Email, Some("not-an-email"));
    let second = service.validate_field(InputElementType::Email, Some("not-an-email"));
    assert_eq!(first, second);

    let metrics = service.cache().metrics();
    assert_eq!(metrics.total_hits, 1);
    assert_eq!(metrics.total_misses, 1);
}

#[test]
fn test_expiry_boundary() {
    let service = april_2024_service();
    assert!(service.validate_expiry("04", "24").is_valid());
    assert!(service.validate_expiry("05", "24").is_valid());
    assert_eq!(service.validate_expiry("03", "24").error_code(), Some("expired-card"));
    assert_eq!(service.validate_expiry("13", "24").error_code(), Some("invalid-expiry-month"));
}

#[test]
fn test_cvv_depends_on_network() {
    let service = april_2024_service();
    assert!(service.validate_cvv("1234", Some(CardNetwork::Amex)).is_valid());
    assert!(!service.validate_cvv("123", Some(CardNetwork::Amex)).is_valid());
    assert!(service.validate_cvv("123", Some(CardNetwork::Visa)).is_valid());
    assert!(service.validate_cvv("123", None).is_valid());
    assert!(!service.validate_cvv("1234", None).is_valid());
}

#[test]
fn test_whitespace_is_required_for_text_fields() {
    let service = april_2024_service();
    for field in [
        InputElementType::CardholderName,
        InputElementType::FirstName,
        InputElementType::LastName,
        InputElementType::AddressLine1,
        InputElementType::City,
        InputElementType::State,
        InputElementType::PostalCode,
        InputElementType::CountryCode,
        InputElementType::Email,
        InputElementType::Cvv,
    ] {
        let result = service.validate_field(field, Some("   "));
        let expected = format!("required-{}", field.slug());
        assert_eq!(result.error_code(), Some(expected.as_str()), "{}", field);
    }
}

#[test]
fn test_unknown_field_never_valid() {
    let service = april_2024_service();
    for value in [None, Some(""), Some("4111111111111111"), Some("anything")] {
        let result = service.validate_field(InputElementType::Unknown, value);
        assert_eq!(result.error_code(), Some("invalid-unknown-field"));
    }
}

#[test]
fn test_form_aggregation() {
    let service = april_2024_service();
    let form = FormData::new()
        .with(InputElementType::CardNumber, "4111111111111112")
        .with(InputElementType::ExpiryDate, "12/26")
        .with(InputElementType::Cvv, "123")
        .with(InputElementType::CardholderName, "J");

    let errors = service.validate_form_data(&form, &FormConfiguration::card_only());
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].field_type, InputElementType::CardNumber);
    assert_eq!(errors[0].error_code, "invalid-card-number");
    assert_eq!(errors[1].field_type, InputElementType::CardholderName);
    assert_eq!(errors[1].error_code, "invalid-cardholder-name-length");
}

#[test]
fn test_only_failing_fields_are_reported() {
    let service = april_2024_service();
    let form = FormData::new()
        .with(InputElementType::CardNumber, "")
        .with(InputElementType::Cvv, "123");

    let errors = service.validate_fields(&[InputElementType::CardNumber, InputElementType::Cvv], &form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field_type, InputElementType::CardNumber);
    assert_eq!(errors[0].error_code, "required-card-number");
}

#[test]
fn test_empty_form_reports_every_required_field() {
    let service = april_2024_service();
    let configuration = FormConfiguration::card_only().with_billing_address();
    let errors = service.validate_form_data(&FormData::new(), &configuration);

    // address line 2 is the only optional field
    assert_eq!(errors.len(), configuration.field_types().len() - 1);
    assert!(errors.iter().all(|e| e.error_code.starts_with("required-")));
    assert!(!errors
        .iter()
        .any(|e| e.field_type == InputElementType::AddressLine2));
}

#[test]
fn test_valid_billing_form() {
    let service = april_2024_service();
    let form: FormData = serde_json::from_str(
        r#"{
            "card_number": "4111 1111 1111 1111",
            "expiry_date": "08/27",
            "cvv": "737",
            "cardholder_name": "Ada Lovelace",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "address_line_1": "12 St James's Square",
            "city": "London",
            "state": "Greater London",
            "postal_code": "SW1Y 4JH",
            "country_code": "GB"
        }"#,
    )
    .unwrap();

    let errors = service.validate_form_data(&form, &FormConfiguration::card_only().with_billing_address());
    assert!(errors.is_empty(), "{:?}", errors);
}

#[test]
fn test_postal_code_country_specific() {
    let service = april_2024_service();
    assert!(service.validate_postal_code("90210", Some("US")).is_valid());
    assert!(!service.validate_postal_code("90210", Some("GB")).is_valid());
    assert!(service.validate_postal_code("SW1A 1AA", Some("GB")).is_valid());
    assert!(!service.validate_postal_code("SW1A 1AA", Some("US")).is_valid());
}

#[test]
fn test_unsupported_network_through_factory_rule() {
    let service = april_2024_service();
    let rule = service
        .rules_factory()
        .create_card_number_rule_for_networks(vec![CardNetwork::Visa, CardNetwork::MasterCard]);
    assert!(service.validate("5555555555554444", &rule).is_valid());
    assert_eq!(
        service.validate("378282246310005", &rule).error_code(),
        Some("unsupported-card-type")
    );
}

#[test]
fn test_cache_never_exceeds_capacity() {
    let service = april_2024_service();
    for i in 0..250 {
        service.validate_field(InputElementType::OtpCode, Some(&format!("{:06}", i)));
    }
    let metrics = service.cache().metrics();
    assert_eq!(metrics.current_entries, 200);
    assert_eq!(metrics.max_entries, 200);
    assert_eq!(metrics.total_misses, 250);
}

#[test]
fn test_clear_cache_resets_metrics() {
    let service = april_2024_service();
    service.validate_card_number("4111111111111111");
    service.validate_card_number("4111111111111111");
    service.cache().clear_cache();

    let metrics = service.cache().metrics();
    assert_eq!(metrics.total_lookups(), 0);
    assert_eq!(metrics.current_entries, 0);

    // the same key is recomputed after a clear
    service.validate_card_number("4111111111111111");
    let metrics = service.cache().metrics();
    assert_eq!(metrics.total_hits, 0);
    assert_eq!(metrics.total_misses, 1);
    assert_eq!(metrics.current_entries, 1);
}

#[test]
fn test_services_sharing_a_cache_keep_their_own_rules() {
    let cache = Arc::new(ValidationResultCache::default());
    let four = ValidationService::new(
        Arc::new(DefaultRulesFactory::new().with_otp_length(4)),
        cache.clone(),
    );
    let six = ValidationService::new(Arc::new(DefaultRulesFactory::new()), cache.clone());

    assert!(four.validate_field(InputElementType::OtpCode, Some("1234")).is_valid());
    assert_eq!(
        six.validate_field(InputElementType::OtpCode, Some("1234")).error_code(),
        Some("invalid-otp-code-length")
    );
    assert!(four.validate_field(InputElementType::OtpCode, Some("1234")).is_valid());

    let metrics = cache.metrics();
    assert_eq!(metrics.total_hits, 1);
    assert_eq!(metrics.total_misses, 2);
    assert_eq!(metrics.current_entries, 2);
}

#[test]
fn test_expiry_results_follow_the_clock() {
    let cache = Arc::new(ValidationResultCache::default());
    let april = ValidationService::new(
        Arc::new(DefaultRulesFactory::with_clock(Arc::new(
            FixedClock::from_ymd(2024, 4, 10).unwrap(),
        ))),
        cache.clone(),
    );
    let june = ValidationService::new(
        Arc::new(DefaultRulesFactory::with_clock(Arc::new(
            FixedClock::from_ymd(2024, 6, 1).unwrap(),
        ))),
        cache,
    );

    assert!(april.validate_expiry("05", "24").is_valid());
    assert_eq!(june.validate_expiry("05", "24").error_code(), Some("expired-card"));
}

#[test]
fn test_expired_entries_are_recomputed() {
    let clock = Arc::new(FixedClock::from_ymd(2024, 4, 10).unwrap());
    let service = ValidationService::new(
        Arc::new(DefaultRulesFactory::with_clock(clock)),
        Arc::new(ValidationResultCache::new(CacheConfig {
            enabled: true,
            ttl: Duration::from_millis(40),
            max_entries: 200,
        })),
    );

    service.validate_cvv("123", None);
    service.validate_cvv("123", None);
    std::thread::sleep(Duration::from_millis(80));
    service.validate_cvv("123", None);

    let metrics = service.cache().metrics();
    assert_eq!(metrics.total_hits, 1);
    assert_eq!(metrics.total_misses, 2);
    assert_eq!(metrics.current_entries, 1);
}

#[test]
fn test_concurrent_metrics_are_consistent() {
    let service = april_2024_service();
    let threads = 8;
    let calls_per_thread = 500;
    let cards = ["4111111111111111", "5555555555554444", "378282246310005", "1234"];

    std::thread::scope(|scope| {
        for t in 0..threads {
            let service = &service;
            scope.spawn(move || {
                for i in 0..calls_per_thread {
                    let card = cards[(t + i) % cards.len()];
                    let result = service.validate_card_number(card);
                    assert_eq!(result.is_valid(), card != "1234");
                }
            });
        }
    });

    let metrics = service.cache().metrics();
    assert_eq!(metrics.total_lookups(), (threads * calls_per_thread) as u64);
    assert_eq!(metrics.current_entries, cards.len());
    assert!(metrics.total_misses >= cards.len() as u64);
}

#[test]
fn test_typing_session_hit_rate() {
    let service = april_2024_service();
    service.validate_expiry("08", "27");
    service.validate_cvv("737", None);
    service.validate_cardholder_name("Ada Lovelace");

    // each keystroke validates the new prefix, then the form re-renders and
    // revalidates every card field
    let card = "4111111111111111";
    for end in 1..=card.len() {
        let prefix = &card[..end];
        service.validate_card_number(prefix);

        service.validate_card_number(prefix);
        service.validate_expiry("08", "27");
        service.validate_cvv("737", None);
        service.validate_cardholder_name("Ada Lovelace");
    }

    let metrics = service.cache().metrics();
    assert_eq!(metrics.total_misses, 19);
    assert_eq!(metrics.total_hits, 64);
    assert!(
        (0.70..=0.85).contains(&metrics.hit_rate),
        "hit rate {}",
        metrics.hit_rate
    );
}

#[test]
fn test_health_check_on_fresh_service() {
    let report = ValidationService::with_defaults().perform_health_check();
    assert!(report.is_healthy, "{:?}", report.issues);
    assert!(report.summary().starts_with("Validation Service Health Report:"));
}

#[test]
fn test_service_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkout.toml");
    std::fs::write(
        &path,
        r#"
[cache]
max_entries = 25

[validation]
otp_length = 8

[messages]
checkout_components_otp_code_invalid = "That code does not look right"
"#,
    )
    .unwrap();

    let config = ValidationConfig::load(path.to_str()).unwrap();
    let service = ValidationService::from_config(&config);

    assert!(service
        .validate_field(InputElementType::OtpCode, Some("12345678"))
        .is_valid());
    let result = service.validate_field(InputElementType::OtpCode, Some("123456"));
    assert_eq!(result.error_code(), Some("invalid-otp-code-length"));
    assert_eq!(result.error_message(), Some("That code does not look right"));
    assert_eq!(service.cache().metrics().max_entries, 25);
}
