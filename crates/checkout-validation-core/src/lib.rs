pub mod cache;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod factory;
pub mod form;
pub mod messages;
pub mod network;
pub mod result;
pub mod rules;
pub mod service;

pub use cache::{CacheConfig, CacheKey, CacheMetrics, ValidationResultCache};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ValidationConfig;
pub use diagnostics::{HealthReport, PerformanceBenchmark};
pub use error::{ErrorCategory, ErrorKind, InputElementType, ValidationError};
pub use factory::{DefaultRulesFactory, RulesFactory};
pub use form::{FormConfiguration, FormData};
pub use messages::{ErrorMessageResolver, MessageCatalog};
pub use network::CardNetwork;
pub use result::{FieldError, ValidationResult};
pub use rules::{ExpiryDateInput, ValidationRule};
pub use service::ValidationService;
