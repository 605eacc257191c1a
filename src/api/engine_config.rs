use serde::{Deserialize, Serialize};

use crate::core::Domain;
use crate::error::{PlotError, PlotResult};

/// Lower bound of the real-time emission rate.
pub const MIN_RATE_HZ: u32 = 1;
/// Upper bound (and default) of the real-time emission rate.
pub const MAX_RATE_HZ: u32 = 256;
/// Default batch size drawn from the sampler per pacing interval.
pub const DEFAULT_BATCH_SIZE: usize = 10;
/// Default minimum spacing between redraw notifications.
pub const DEFAULT_REFRESH_INTERVAL_MS: f64 = 16.0;

/// Public engine bootstrap configuration.
///
/// Everything the original shell kept as ambient UI state (speed field,
/// real-time toggle) lives here explicitly and travels with each call.
/// The type is serializable so host applications can persist plotting
/// setup without inventing their own format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotEngineConfig {
    /// Sampling interval used when the caller does not pass one.
    #[serde(default)]
    pub domain: Domain,
    /// Real-time batches per second, clamped to `MIN_RATE_HZ..=MAX_RATE_HZ`.
    #[serde(default = "default_rate_hz")]
    pub rate_hz: u32,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Minimum spacing between redraw notifications, in milliseconds.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: f64,
}

impl PlotEngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            domain: Domain::default(),
            rate_hz: default_rate_hz(),
            batch_size: default_batch_size(),
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn with_rate_hz(mut self, rate_hz: u32) -> Self {
        self.rate_hz = rate_hz;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn with_refresh_interval_ms(mut self, refresh_interval_ms: f64) -> Self {
        self.refresh_interval_ms = refresh_interval_ms;
        self
    }

    /// Rate clamped into the supported range.
    #[must_use]
    pub fn clamped_rate_hz(self) -> u32 {
        self.rate_hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ)
    }

    /// Parses a user-typed rate field: numeric input is clamped into range,
    /// anything else falls back to the default.
    #[must_use]
    pub fn rate_from_text(text: &str) -> u32 {
        text.trim()
            .parse::<u32>()
            .map(|rate| rate.clamp(MIN_RATE_HZ, MAX_RATE_HZ))
            .unwrap_or_else(|_| default_rate_hz())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> PlotResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| PlotError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

impl Default for PlotEngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_rate_hz() -> u32 {
    MAX_RATE_HZ
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_refresh_interval_ms() -> f64 {
    DEFAULT_REFRESH_INTERVAL_MS
}
