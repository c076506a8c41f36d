//! Application configuration module
//!
//! Type-safe configuration loading from environment variables (and,
//! optionally, a file) using the `config` and `dotenvy` crates.
//! Variables use the `ACTIVITY_LEDGER` prefix and `__` between nested
//! keys.
//!
//! # Example
//!
//! ```no_run
//! use activity_ledger::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.init_tracing();
//! ```

mod error;
mod features;
mod ledger;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use ledger::LedgerConfig;
pub use telemetry::{init_tracing, TelemetryConfig};

use serde::Deserialize;
use std::path::Path;

use crate::adapters::SystemClock;
use crate::domain::activity::{LifecycleEngine, TransitionPolicy};

const ENV_PREFIX: &str = "ACTIVITY_LEDGER";
const ENV_SEPARATOR: &str = "__";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a
/// working configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Lifecycle rules and calendar settings
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Logging output
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ACTIVITY_LEDGER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `ACTIVITY_LEDGER__LEDGER__UTC_OFFSET_MINUTES=60` -> `ledger.utc_offset_minutes = 60`
    /// - `ACTIVITY_LEDGER__TELEMETRY__JSON=true` -> `telemetry.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables on top
    ///
    /// The format follows the file extension (`.toml`, `.yaml`, `.json`).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ledger.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Guard settings for the transition validator
    pub fn transition_policy(&self) -> TransitionPolicy {
        self.ledger.transition_policy(&self.features)
    }

    /// Lifecycle engine configured with this policy
    pub fn lifecycle_engine(&self) -> LifecycleEngine {
        LifecycleEngine::new(self.transition_policy())
    }

    /// Wall clock evaluating "today" at the configured offset
    pub fn system_clock(&self) -> Result<SystemClock, ValidationError> {
        Ok(SystemClock::new(self.ledger.utc_offset()?))
    }

    /// Install tracing if enabled. Returns true if a subscriber was installed.
    pub fn init_tracing(&self) -> bool {
        self.features.enable_tracing && init_tracing(&self.telemetry)
    }
}
