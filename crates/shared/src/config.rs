//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::{CurrencyCode, UserId};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Workflow configuration.
    #[serde(default)]
    pub workflow: WorkflowSettings,
    /// Exchange-rate quotes used to seed the rate table.
    #[serde(default)]
    pub rates: Vec<RateSeed>,
}

/// Workflow configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowSettings {
    /// Approver of last resort, used when an employee has no approval rule
    /// and no manager. Absent means such submissions fail.
    #[serde(default)]
    pub default_approver_id: Option<UserId>,
}

/// A single directional exchange-rate quote.
///
/// Quotes are not assumed reciprocal; configure both directions explicitly
/// when both are needed.
#[derive(Debug, Clone, Deserialize)]
pub struct RateSeed {
    /// Source currency.
    pub from: CurrencyCode,
    /// Target currency.
    pub to: CurrencyCode,
    /// Units of `to` per one unit of `from`.
    pub rate: Decimal,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("EXPENSA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
