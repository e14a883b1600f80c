//! Per-Provider Cost Calculator
//!
//! Turns a [`ServiceConfiguration`] into a [`CostBreakdown`] for a single
//! provider. The calculation never fails: unknown classes, media, engines,
//! uptime targets and support tiers price through the fail-open lookups of
//! [`ProviderRateTable`].

use std::sync::Arc;

use crate::instance_map::{EquivalenceTable, InstanceClassResolver};
use crate::models::{CloudProvider, CostBreakdown, ServiceConfiguration};
use crate::rates::ProviderRateTable;

/// Database instances bill for a full month regardless of compute hours
pub const DATABASE_HOURS_PER_MONTH: f64 = 744.0;

/// Compute the monthly USD breakdown of `config` on `provider`
pub fn compute_breakdown(
    config: &ServiceConfiguration,
    provider: CloudProvider,
    rates: &ProviderRateTable,
    resolver: &dyn InstanceClassResolver,
) -> CostBreakdown {
    let instance_class = resolver.resolve(&config.compute.instance_class, provider);
    let compute = rates.compute_rate(&instance_class)
        * f64::from(config.compute.hours_per_month)
        * f64::from(config.compute.instance_count);

    let storage = config.storage.amount_gb as f64 * rates.storage_rate(config.storage.media_type);

    let bandwidth = config.bandwidth.amount_gb as f64 * rates.bandwidth_per_gb;

    let db_rates = rates.database_rates(config.database.engine);
    let database = f64::from(config.database.storage_gb) * db_rates.storage_per_gb
        + db_rates.instance_hourly
            * DATABASE_HOURS_PER_MONTH
            * f64::from(config.database.instance_count);

    let disaster_recovery = if config.disaster_recovery.enabled {
        let protected_gb = config.storage.amount_gb as f64 + f64::from(config.database.storage_gb);
        let backup = protected_gb * rates.disaster_recovery.backup_per_gb;
        let replication = compute * (rates.disaster_recovery.replication_multiplier - 1.0);
        backup + replication
    } else {
        0.0
    };

    // Bandwidth and DR sit outside the uptime premium
    let core_services = compute + storage + database;
    let uptime_premium = core_services * (rates.uptime_multiplier(config.sla.uptime_target) - 1.0);
    let sla = uptime_premium + rates.support_cost(config.sla.support_tier);

    let breakdown =
        CostBreakdown::from_lines(compute, storage, bandwidth, database, disaster_recovery, sla);

    tracing::debug!(
        %provider,
        instance_class = %instance_class,
        uptime_percent = config.sla.uptime_target.percent(),
        total = breakdown.total,
        "Computed provider breakdown"
    );

    breakdown
}

/// Calculator bound to one provider's rate table and class resolver
#[derive(Clone)]
pub struct ProviderCalculator {
    provider: CloudProvider,
    rates: ProviderRateTable,
    resolver: Arc<dyn InstanceClassResolver>,
}

impl ProviderCalculator {
    pub fn new(
        provider: CloudProvider,
        rates: ProviderRateTable,
        resolver: Arc<dyn InstanceClassResolver>,
    ) -> Self {
        Self {
            provider,
            rates,
            resolver,
        }
    }

    /// Calculator using the built-in rates and equivalence table
    pub fn builtin(provider: CloudProvider) -> Self {
        Self::new(
            provider,
            ProviderRateTable::for_provider(provider),
            Arc::new(EquivalenceTable::builtin()),
        )
    }

    pub fn provider(&self) -> CloudProvider {
        self.provider
    }

    pub fn compute_breakdown(&self, config: &ServiceConfiguration) -> CostBreakdown {
        compute_breakdown(config, self.provider, &self.rates, self.resolver.as_ref())
    }
}

impl std::fmt::Debug for ProviderCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCalculator")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
