use crate::result::ValidationResult;
use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_ENTRIES: usize = 200;

/// Scope used by [`ValidationResultCache::cached_validation`]
pub const DEFAULT_SCOPE: u64 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(enabled_str) = std::env::var("VALIDATION_CACHE_ENABLED") {
            config.enabled = enabled_str.to_lowercase() == "true";
        }

        if let Ok(ttl_str) = std::env::var("VALIDATION_CACHE_TTL_SECONDS") {
            if let Ok(secs) = ttl_str.parse::<u64>() {
                config.ttl = Duration::from_secs(secs);
            }
        }

        if let Ok(max_str) = std::env::var("VALIDATION_CACHE_MAX_ENTRIES") {
            if let Ok(max_entries) = max_str.parse::<usize>() {
                config.max_entries = max_entries;
            }
        }

        tracing::info!(
            "Validation cache config loaded: enabled={}, ttl={:?}, max_entries={}",
            config.enabled,
            config.ttl,
            config.max_entries
        );

        config
    }
}

/// Identity of a memoized validation.
///
/// `scope` separates callers whose rules or messages differ while sharing one
/// cache. `context` carries whatever else the outcome depends on, such as the
/// card network for a CVV or the country for a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub scope: u64,
    pub kind: &'static str,
    pub input: String,
    pub context: Option<String>,
}

impl CacheKey {
    pub fn new(kind: &'static str, input: &str, context: Option<&str>) -> Self {
        Self::scoped(DEFAULT_SCOPE, kind, input, context)
    }

    pub fn scoped(scope: u64, kind: &'static str, input: &str, context: Option<&str>) -> Self {
        Self {
            scope,
            kind,
            input: input.to_string(),
            context: context.map(str::to_string),
        }
    }
}

struct CachedResult {
    result: ValidationResult,
    created_at: Instant,
}

struct CacheState {
    entries: LruCache<CacheKey, CachedResult>,
    hits: u64,
    misses: u64,
    total_validation_time: Duration,
}

/// Point-in-time view of cache performance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheMetrics {
    pub total_hits: u64,
    pub total_misses: u64,
    pub current_entries: usize,
    pub max_entries: usize,
    /// Fraction of lookups served from the cache, 0.0 to 1.0
    pub hit_rate: f64,
    /// Mean time spent in the validator on a miss
    pub average_validation_time: Duration,
}

impl CacheMetrics {
    pub fn total_lookups(&self) -> u64 {
        self.total_hits + self.total_misses
    }

    pub fn performance_summary(&self) -> String {
        format!(
            "Validation Cache Performance:\n\
             - Hit Rate: {:.1}% ({} hits, {} misses)\n\
             - Cache Usage: {}/{} entries\n\
             - Average Validation Time: {:.3}ms",
            self.hit_rate * 100.0,
            self.total_hits,
            self.total_misses,
            self.current_entries,
            self.max_entries,
            self.average_validation_time.as_secs_f64() * 1000.0
        )
    }
}

/// Bounded, TTL-expiring memoization of validation results.
///
/// One mutex guards the entries and the counters together, so every call is
/// counted exactly once as a hit or a miss and snapshots are consistent. The
/// validator itself runs outside the lock; a miss is recorded with its timing
/// and stored entry once the validator returns.
pub struct ValidationResultCache {
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl ValidationResultCache {
    pub fn new(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
                total_validation_time: Duration::ZERO,
            }),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Return the fresh cached result for the key, or run `validator`, store
    /// its result and return it. A disabled cache always runs the validator.
    pub fn cached_validation<F>(
        &self,
        kind: &'static str,
        input: &str,
        context: Option<&str>,
        validator: F,
    ) -> ValidationResult
    where
        F: FnOnce() -> ValidationResult,
    {
        self.lookup_or_validate(CacheKey::new(kind, input, context), validator)
    }

    /// Same as [`cached_validation`](Self::cached_validation), with entries
    /// visible only to lookups in the same `scope`
    pub fn scoped_validation<F>(
        &self,
        scope: u64,
        kind: &'static str,
        input: &str,
        context: Option<&str>,
        validator: F,
    ) -> ValidationResult
    where
        F: FnOnce() -> ValidationResult,
    {
        self.lookup_or_validate(CacheKey::scoped(scope, kind, input, context), validator)
    }

    fn lookup_or_validate<F>(&self, key: CacheKey, validator: F) -> ValidationResult
    where
        F: FnOnce() -> ValidationResult,
    {
        if !self.config.enabled {
            return validator();
        }
        let kind = key.kind;

        {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let cached = state
                .entries
                .get(&key)
                .map(|entry| (entry.result.clone(), entry.created_at));

            match cached {
                Some((result, created_at)) if created_at.elapsed() < self.config.ttl => {
                    state.hits += 1;
                    tracing::debug!("Validation cache hit: kind={}", kind);
                    return result;
                }
                Some(_) => {
                    state.entries.pop(&key);
                    tracing::debug!("Validation cache entry expired: kind={}", kind);
                }
                None => {}
            }
        }

        let started = Instant::now();
        let result = validator();
        let elapsed = started.elapsed();

        // miss, timing and entry land together
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.misses += 1;
        state.total_validation_time += elapsed;
        let stored = CachedResult {
            result: result.clone(),
            created_at: Instant::now(),
        };
        if let Some((evicted, _)) = state.entries.push(key.clone(), stored) {
            if evicted != key {
                tracing::debug!("Validation cache evicted least recently used: kind={}", evicted.kind);
            }
        }

        result
    }

    /// Drop every entry and reset the counters
    pub fn clear_cache(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.hits = 0;
        state.misses = 0;
        state.total_validation_time = Duration::ZERO;
        tracing::debug!("Validation cache cleared");
    }

    pub fn metrics(&self) -> CacheMetrics {
        let state = self.state.lock();
        let lookups = state.hits + state.misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            state.hits as f64 / lookups as f64
        };
        let average_validation_time = if state.misses == 0 {
            Duration::ZERO
        } else {
            state.total_validation_time.div_f64(state.misses as f64)
        };

        CacheMetrics {
            total_hits: state.hits,
            total_misses: state.misses,
            current_entries: state.entries.len(),
            max_entries: state.entries.cap().get(),
            hit_rate,
            average_validation_time,
        }
    }
}

impl Default for ValidationResultCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
