/*
[INPUT]:  YAML configuration file + BANDBOOK__* environment overrides
[OUTPUT]: Validated engine configuration
[POS]:    Configuration layer - loaded once at startup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::Account;
use crate::strategy::StrategyParams;

const ENV_PREFIX: &str = "BANDBOOK";
const ENV_SEPARATOR: &str = "__";

/// Top-level configuration for the simulated market maker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Public order book endpoint returning `[id, price, signedAmount]` entries
    pub orderbook_url: String,
    /// Band width in percent around each best price
    #[serde(with = "rust_decimal::serde::str")]
    pub order_range: Decimal,
    /// Open orders allowed per side
    pub allowed_active_orders: usize,
    /// Starting balances
    #[serde(alias = "account")]
    pub initial_account: Account,
    /// Seconds between update cycles
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,
    /// Seconds between balance reports
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,
    /// HTTP timeout for one order book fetch
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Fixed seed for reproducible price draws
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_update_interval_secs() -> u64 {
    5
}

fn default_report_interval_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl EngineConfig {
    /// Load configuration from a YAML file, apply environment overrides, and validate
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let file_config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;

        // Decimals are staged as strings and env values stay unparsed, so no
        // field round-trips through f64.
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&file_config).context("stage file config")?)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()
            .context("apply environment overrides")?;

        let config: Self = settings
            .try_deserialize()
            .context("deserialize engine config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.orderbook_url.trim().is_empty(), "orderbook_url must not be empty");
        ensure!(
            self.order_range > Decimal::ZERO,
            "order_range must be positive, got {}",
            self.order_range
        );
        ensure!(self.allowed_active_orders > 0, "allowed_active_orders must be at least 1");
        ensure!(
            !self.initial_account.quote.is_sign_negative()
                && !self.initial_account.base.is_sign_negative(),
            "initial_account balances must not be negative"
        );
        ensure!(self.update_interval_secs > 0, "update_interval_secs must be positive");
        ensure!(self.report_interval_secs > 0, "report_interval_secs must be positive");
        ensure!(self.request_timeout_secs > 0, "request_timeout_secs must be positive");
        Ok(())
    }

    pub fn strategy_params(&self) -> StrategyParams {
        StrategyParams {
            order_range: self.order_range,
            allowed_active_orders: self.allowed_active_orders,
        }
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Render the resolved configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serialize engine config")
    }
}
