use crate::cache::CacheMetrics;
use crate::error::InputElementType;
use crate::network::CardNetwork;
use crate::service::ValidationService;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

pub const HEALTH_CHECK_TEST_CARD: &str = "4111111111111111";

const LOW_HIT_RATE_THRESHOLD: f64 = 0.5;
const LOW_HIT_RATE_MIN_HITS: u64 = 100;

const BENCHMARK_CARDS: [&str; 3] = ["4111111111111111", "5555555555554444", "378282246310005"];

/// Fields that must never accept a missing value
pub const REQUIRED_FIELD_TYPES: [InputElementType; 11] = [
    InputElementType::CardNumber,
    InputElementType::ExpiryDate,
    InputElementType::Cvv,
    InputElementType::CardholderName,
    InputElementType::PostalCode,
    InputElementType::CountryCode,
    InputElementType::FirstName,
    InputElementType::LastName,
    InputElementType::AddressLine1,
    InputElementType::City,
    InputElementType::State,
];

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub is_healthy: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub cache_metrics: CacheMetrics,
}

fn render_list(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join("; ")
    }
}

impl HealthReport {
    pub fn summary(&self) -> String {
        format!(
            "Validation Service Health Report:\nStatus: {}\nIssues: {}\nWarnings: {}\n\n{}",
            if self.is_healthy { "Healthy" } else { "Unhealthy" },
            render_list(&self.issues),
            render_list(&self.warnings),
            self.cache_metrics.performance_summary()
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceBenchmark {
    /// Mean wall time per call, keyed by operation
    pub average_validation_times: BTreeMap<String, Duration>,
    pub total_iterations: usize,
}

impl PerformanceBenchmark {
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Validation Performance Benchmark ({} iterations):",
            self.total_iterations
        );
        for (operation, average) in &self.average_validation_times {
            out.push_str(&format!(
                "\n- {}: {:.4}ms",
                operation,
                average.as_secs_f64() * 1000.0
            ));
        }
        out
    }
}

impl ValidationService {
    /// Self-test of the rule wiring and cache.
    ///
    /// The run goes through the normal cached paths, so it is counted in the
    /// metrics it reports.
    pub fn perform_health_check(&self) -> HealthReport {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        let before = self.cache().metrics();
        if before.total_hits > LOW_HIT_RATE_MIN_HITS && before.hit_rate < LOW_HIT_RATE_THRESHOLD {
            warnings.push(format!(
                "Low cache hit rate: {:.1}%",
                before.hit_rate * 100.0
            ));
        }

        if !self.validate_card_number(HEALTH_CHECK_TEST_CARD).is_valid() {
            issues.push("Card validation failed for known valid test card".to_string());
        }

        for field in REQUIRED_FIELD_TYPES {
            if self.validate_field(field, None).is_valid() {
                issues.push(format!("Required field {} accepted a missing value", field));
            }
        }

        let report = HealthReport {
            is_healthy: issues.is_empty(),
            issues,
            warnings,
            cache_metrics: self.cache().metrics(),
        };

        if report.is_healthy {
            tracing::info!(
                "Validation health check passed with {} warning(s)",
                report.warnings.len()
            );
        } else {
            tracing::warn!("Validation health check failed: {:?}", report.issues);
        }

        report
    }

    /// Time the hot-path validations over `iterations` rounds
    pub fn benchmark_validation_performance(&self, iterations: usize) -> PerformanceBenchmark {
        let mut totals: BTreeMap<String, Duration> = BTreeMap::new();
        let mut record = |operation: &str, elapsed: Duration| {
            *totals.entry(operation.to_string()).or_default() += elapsed;
        };

        for i in 0..iterations {
            let card = BENCHMARK_CARDS[i % BENCHMARK_CARDS.len()];

            let started = Instant::now();
            self.validate_card_number(card);
            record("card_number", started.elapsed());

            let started = Instant::now();
            self.validate_cvv("123", Some(CardNetwork::Visa));
            record("cvv", started.elapsed());

            let started = Instant::now();
            self.validate_expiry("12", "30");
            record("expiry_date", started.elapsed());
        }

        let average_validation_times = totals
            .into_iter()
            .map(|(operation, total)| {
                let average = if iterations == 0 {
                    Duration::ZERO
                } else {
                    total.div_f64(iterations as f64)
                };
                (operation, average)
            })
            .collect();

        PerformanceBenchmark {
            average_validation_times,
            total_iterations: iterations,
        }
    }
}
