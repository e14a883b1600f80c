//! Configuration for the cost estimator

use std::path::PathBuf;

use core_config::{ConfigError, FromEnv, env_optional, env_parse_or};
use domain_pricing::{Currency, DEFAULT_USD_INR_RATE, PlanTier, Timeframe};

/// Defaults applied when the matching command-line flag is absent
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// USD to display-currency rate (`ESTIMATOR_EXCHANGE_RATE`)
    pub exchange_rate: f64,
    /// Display currency (`ESTIMATOR_CURRENCY`)
    pub currency: Currency,
    /// Reporting period (`ESTIMATOR_TIMEFRAME`)
    pub timeframe: Timeframe,
    /// Subscription plan (`ESTIMATOR_PLAN`)
    pub plan: PlanTier,
    /// JSON rate catalog replacing the built-in tables (`ESTIMATOR_RATES_FILE`)
    pub rates_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange_rate: DEFAULT_USD_INR_RATE,
            currency: Currency::Usd,
            timeframe: Timeframe::Monthly,
            plan: PlanTier::Basic,
            rates_file: None,
        }
    }
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            exchange_rate: env_parse_or("ESTIMATOR_EXCHANGE_RATE", defaults.exchange_rate)?,
            currency: env_parse_or("ESTIMATOR_CURRENCY", defaults.currency)?,
            timeframe: env_parse_or("ESTIMATOR_TIMEFRAME", defaults.timeframe)?,
            plan: env_parse_or("ESTIMATOR_PLAN", defaults.plan)?,
            rates_file: env_optional("ESTIMATOR_RATES_FILE").map(PathBuf::from),
        })
    }
}
