//! Estimate reports: file loading, option resolution, and the JSON payloads
//! printed by each command.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use domain_pricing::{
    ClassEquivalence, CostRange, Currency, EquivalenceTable, EstimateAggregator, EstimateSet, Plan,
    PlanTier, ProviderCost, ProviderTotal, RateCatalog, ServiceConfiguration, ServiceLine,
    Timeframe, ensure_valid_configuration, format_amount, project, validate_service_limits,
};
use eyre::{Result, WrapErr, ensure};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Fully resolved options for one `estimate` run
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateOptions {
    pub plan: PlanTier,
    pub timeframe: Timeframe,
    pub currency: Currency,
    pub exchange_rate: f64,
    pub rates_file: Option<PathBuf>,
}

impl EstimateOptions {
    /// Command-line values win; anything missing comes from `config`.
    pub fn resolve(
        config: &Config,
        plan: Option<PlanTier>,
        timeframe: Option<Timeframe>,
        currency: Option<Currency>,
        exchange_rate: Option<f64>,
        rates_file: Option<PathBuf>,
    ) -> Self {
        Self {
            plan: plan.unwrap_or(config.plan),
            timeframe: timeframe.unwrap_or(config.timeframe),
            currency: currency.unwrap_or(config.currency),
            exchange_rate: exchange_rate.unwrap_or(config.exchange_rate),
            rates_file: rates_file.or_else(|| config.rates_file.clone()),
        }
    }
}

/// Output of the `estimate` command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub plan: PlanTier,
    pub timeframe: Timeframe,
    pub currency: Currency,
    pub estimates: EstimateSet,
    pub cheapest: ProviderTotal,
    /// Cheapest provider per service line
    pub cheapest_by_service: BTreeMap<ServiceLine, ProviderCost>,
    /// Lowest and highest provider totals
    pub range: CostRange,
    /// Most expensive total minus the cheapest one
    pub savings: f64,
    /// Provider totals rendered for display, keyed by provider
    pub formatted_totals: BTreeMap<String, String>,
    pub warnings: Vec<String>,
}

/// Output of the `validate` command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub plan: PlanTier,
    pub within_limits: bool,
    pub warnings: Vec<String>,
}

/// Read a service configuration; missing fields take their defaults.
/// Without a path the default configuration is used.
pub fn load_configuration(path: Option<&Path>) -> Result<ServiceConfiguration> {
    let Some(path) = path else {
        debug!("No configuration file given, using defaults");
        return Ok(ServiceConfiguration::default());
    };

    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read configuration {}", path.display()))?;
    let config: ServiceConfiguration = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("Failed to parse configuration {}", path.display()))?;

    info!(path = %path.display(), "Loaded service configuration");
    Ok(config)
}

/// Read a JSON rate catalog, or fall back to the built-in tables
pub fn load_rates(path: Option<&Path>) -> Result<RateCatalog> {
    let Some(path) = path else {
        return Ok(RateCatalog::builtin());
    };

    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read rate catalog {}", path.display()))?;
    let catalog = RateCatalog::from_json(&contents)
        .wrap_err_with(|| format!("Rejected rate catalog {}", path.display()))?;

    info!(path = %path.display(), "Loaded custom rate catalog");
    Ok(catalog)
}

/// Price `config` under the resolved options
pub fn build_report(
    aggregator: &EstimateAggregator,
    config: &ServiceConfiguration,
    options: &EstimateOptions,
) -> Result<EstimateReport> {
    ensure!(
        options.exchange_rate.is_finite() && options.exchange_rate > 0.0,
        "Exchange rate must be a positive number, got {}",
        options.exchange_rate
    );

    let plan = Plan::for_tier(options.plan);
    let warnings = validate_service_limits(config, &plan.limits);
    for warning in &warnings {
        warn!(plan = %plan.tier, "{warning}");
    }

    let monthly_usd = aggregator.aggregate_checked(config, &plan)?;
    let estimates = project(
        &monthly_usd,
        options.timeframe,
        options.currency,
        options.exchange_rate,
    );

    let formatted_totals = estimates
        .iter()
        .map(|(provider, breakdown)| {
            (
                provider.to_string(),
                format_amount(breakdown.total, options.currency),
            )
        })
        .collect();

    let cheapest_by_service = ServiceLine::ALL
        .into_iter()
        .map(|line| (line, estimates.cheapest_for(line)))
        .collect();

    Ok(EstimateReport {
        plan: plan.tier,
        timeframe: options.timeframe,
        currency: options.currency,
        cheapest: estimates.cheapest(),
        cheapest_by_service,
        range: estimates.total_range(),
        savings: estimates.savings_range(),
        estimates,
        formatted_totals,
        warnings,
    })
}

/// Check `config` against the structural ranges and the plan's limits
pub fn build_validation(config: &ServiceConfiguration, tier: PlanTier) -> Result<ValidationReport> {
    ensure_valid_configuration(config)?;

    let plan = Plan::for_tier(tier);
    let warnings = validate_service_limits(config, &plan.limits);

    Ok(ValidationReport {
        plan: plan.tier,
        within_limits: warnings.is_empty(),
        warnings,
    })
}

/// Canonical instance classes with their per-provider equivalents
pub fn class_listing() -> Vec<ClassEquivalence> {
    EquivalenceTable::builtin().entries().to_vec()
}
