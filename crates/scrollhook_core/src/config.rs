//! Hook configuration
//!
//! Event names and the throttle interval, with defaults matching browser
//! hosts. Can be loaded from TOML:
//!
//! ```toml
//! throttle_ms = 100
//! scroll_event = "wheel"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use scrollhook_platform::event_names;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default interval between throttled scroll dispatches
pub const DEFAULT_THROTTLE_MS: u64 = 50;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config is not valid TOML or has the wrong shape
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An event name is empty
    #[error("Event name for `{0}` must not be empty")]
    EmptyEventName(&'static str),

    /// The synthetic event reuses the raw scroll event name, so the scroll
    /// handler would run on every raw event and the throttle would be moot
    #[error("Synthetic event `{0}` must differ from the raw scroll event")]
    SyntheticEventLoop(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Hook configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Minimum interval between synthetic scroll dispatches (ms)
    pub throttle_ms: u64,
    /// Raw window event that drives the throttle
    pub scroll_event: String,
    /// Synthetic event dispatched by the throttle
    pub synthetic_event: String,
    /// One-shot document event for the initial pass
    pub ready_event: String,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            throttle_ms: DEFAULT_THROTTLE_MS,
            scroll_event: event_names::SCROLL.to_string(),
            synthetic_event: event_names::OPTIMIZED_SCROLL.to_string(),
            ready_event: event_names::DOM_CONTENT_LOADED.to_string(),
        }
    }
}

impl HookConfig {
    /// Parse and validate a TOML config
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check event names
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("scroll_event", &self.scroll_event),
            ("synthetic_event", &self.synthetic_event),
            ("ready_event", &self.ready_event),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyEventName(field));
            }
        }

        if self.synthetic_event == self.scroll_event {
            return Err(ConfigError::SyntheticEventLoop(self.synthetic_event.clone()));
        }

        Ok(())
    }

    /// Throttle interval as a duration
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Set the throttle interval
    pub fn throttle_ms(mut self, ms: u64) -> Self {
        self.throttle_ms = ms;
        self
    }

    /// Set the raw scroll event name
    pub fn scroll_event(mut self, name: impl Into<String>) -> Self {
        self.scroll_event = name.into();
        self
    }

    /// Set the synthetic event name
    pub fn synthetic_event(mut self, name: impl Into<String>) -> Self {
        self.synthetic_event = name.into();
        self
    }

    /// Set the document ready event name
    pub fn ready_event(mut self, name: impl Into<String>) -> Self {
        self.ready_event = name.into();
        self
    }
}
