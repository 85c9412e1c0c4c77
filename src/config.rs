//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::breaker::CircuitBreakerConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of posts held by the cache
    pub cache_max_entries: usize,
    /// Lifetime of a cached post in seconds
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Consecutive search failures that open the circuit
    pub breaker_max_failures: u32,
    /// Seconds the search circuit stays open
    pub breaker_reset_timeout: u64,
    /// Posts fetched per search scan
    pub search_scan_limit: usize,
    /// Cache sweep interval in seconds, 0 disables the sweep task
    pub cache_sweep_interval: u64,
    /// Capacity of the event notification queue
    pub event_queue_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cached posts (default: 100)
    /// - `CACHE_TTL` - Cached post lifetime in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `BREAKER_MAX_FAILURES` - Failures before the search circuit opens (default: 5)
    /// - `BREAKER_RESET_TIMEOUT` - Open circuit cooldown in seconds (default: 30)
    /// - `SEARCH_SCAN_LIMIT` - Posts scanned per search (default: 100)
    /// - `CACHE_SWEEP_INTERVAL` - Sweep frequency in seconds, 0 = off (default: 60)
    /// - `EVENT_QUEUE_CAPACITY` - Pending event limit (default: 256)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            breaker_max_failures: env_or("BREAKER_MAX_FAILURES", defaults.breaker_max_failures),
            breaker_reset_timeout: env_or("BREAKER_RESET_TIMEOUT", defaults.breaker_reset_timeout),
            search_scan_limit: env_or("SEARCH_SCAN_LIMIT", defaults.search_scan_limit),
            cache_sweep_interval: env_or("CACHE_SWEEP_INTERVAL", defaults.cache_sweep_interval),
            event_queue_capacity: env_or("EVENT_QUEUE_CAPACITY", defaults.event_queue_capacity),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig::new(
            self.breaker_max_failures,
            Duration::from_secs(self.breaker_reset_timeout),
        )
    }

    /// Sweep interval, or None when sweeping is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.cache_sweep_interval > 0).then(|| Duration::from_secs(self.cache_sweep_interval))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_max_entries: 100,
            cache_ttl: 300,
            server_port: 8080,
            breaker_max_failures: 5,
            breaker_reset_timeout: 30,
            search_scan_limit: 100,
            cache_sweep_interval: 60,
            event_queue_capacity: 256,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
