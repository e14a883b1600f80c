//! Provider Rate Tables
//!
//! Unit prices for each simulated provider. Tables are plain data: the
//! built-in ones carry approximate list prices, and callers may inject
//! replacements (for example from a JSON file) without touching the
//! calculators.
//!
//! Every lookup is fail-open: an unknown key prices at zero, or at a 1.0
//! multiplier for uptime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{PricingError, PricingResult};
use crate::models::{CloudProvider, DatabaseEngine, StorageMedia, SupportTier, UptimeTarget};

/// Managed database rates for one engine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseRates {
    /// USD per GB-month
    pub storage_per_gb: f64,
    /// USD per instance-hour
    pub instance_hourly: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterRecoveryRates {
    /// USD per GB of protected data per month
    pub backup_per_gb: f64,
    /// Replicated compute footprint; 1.5 means a 50% surcharge on compute
    pub replication_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaRates {
    pub uptime_multipliers: HashMap<UptimeTarget, f64>,
    /// Flat USD per month
    pub support_costs: HashMap<SupportTier, f64>,
}

/// Unit prices of a single provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRateTable {
    /// USD per hour, keyed by the provider's own instance class name
    pub compute: HashMap<String, f64>,
    /// USD per GB-month
    pub storage: HashMap<StorageMedia, f64>,
    /// USD per GB transferred
    pub bandwidth_per_gb: f64,
    pub database: HashMap<DatabaseEngine, DatabaseRates>,
    pub disaster_recovery: DisasterRecoveryRates,
    pub sla: SlaRates,
}

fn table<K: Eq + Hash + Copy, V: Copy>(entries: &[(K, V)]) -> HashMap<K, V> {
    entries.iter().copied().collect()
}

fn compute_table(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(class, rate)| (class.to_string(), *rate))
        .collect()
}

fn same_rates_for_all_engines(rates: DatabaseRates) -> HashMap<DatabaseEngine, DatabaseRates> {
    table(&[
        (DatabaseEngine::Mysql, rates),
        (DatabaseEngine::Postgresql, rates),
    ])
}

impl ProviderRateTable {
    pub fn aws() -> Self {
        Self {
            compute: compute_table(&[
                ("t3.micro", 0.0104),
                ("t3.small", 0.0208),
                ("t3.medium", 0.0416),
                ("t3.large", 0.0832),
                ("t3.xlarge", 0.1664),
                ("m5.large", 0.096),
                ("m5.xlarge", 0.192),
                ("c5.large", 0.085),
                ("c5.xlarge", 0.17),
            ]),
            storage: table(&[(StorageMedia::Ssd, 0.10), (StorageMedia::Hdd, 0.045)]),
            bandwidth_per_gb: 0.09,
            database: same_rates_for_all_engines(DatabaseRates {
                storage_per_gb: 0.115,
                instance_hourly: 0.017,
            }),
            disaster_recovery: DisasterRecoveryRates {
                backup_per_gb: 0.05,
                replication_multiplier: 1.5,
            },
            sla: SlaRates {
                uptime_multipliers: table(&[
                    (UptimeTarget::Basic, 1.0),
                    (UptimeTarget::Standard, 1.03),
                    (UptimeTarget::Premium, 1.08),
                    (UptimeTarget::Enterprise, 1.15),
                ]),
                support_costs: table(&[
                    (SupportTier::Basic, 0.0),
                    (SupportTier::Developer, 29.0),
                    (SupportTier::Business, 100.0),
                    (SupportTier::Enterprise, 1000.0),
                ]),
            },
        }
    }

    pub fn azure() -> Self {
        Self {
            compute: compute_table(&[
                ("B1s", 0.0104),
                ("B1ms", 0.0208),
                ("B2s", 0.0416),
                ("B2ms", 0.0832),
                ("B4ms", 0.1664),
                ("D2s_v3", 0.096),
                ("D4s_v3", 0.192),
                ("F2s_v2", 0.085),
                ("F4s_v2", 0.17),
            ]),
            storage: table(&[(StorageMedia::Ssd, 0.12), (StorageMedia::Hdd, 0.04)]),
            bandwidth_per_gb: 0.087,
            database: same_rates_for_all_engines(DatabaseRates {
                storage_per_gb: 0.12,
                instance_hourly: 0.018,
            }),
            disaster_recovery: DisasterRecoveryRates {
                backup_per_gb: 0.055,
                replication_multiplier: 1.4,
            },
            sla: SlaRates {
                uptime_multipliers: table(&[
                    (UptimeTarget::Basic, 1.0),
                    (UptimeTarget::Standard, 1.05),
                    (UptimeTarget::Premium, 1.12),
                    (UptimeTarget::Enterprise, 1.20),
                ]),
                support_costs: table(&[
                    (SupportTier::Basic, 0.0),
                    (SupportTier::Developer, 100.0),
                    (SupportTier::Business, 1000.0),
                    (SupportTier::Enterprise, 2000.0),
                ]),
            },
        }
    }

    pub fn gcp() -> Self {
        Self {
            compute: compute_table(&[
                ("e2-micro", 0.00838),
                ("e2-small", 0.01675),
                ("e2-medium", 0.03351),
                ("e2-standard-2", 0.067),
                ("e2-standard-4", 0.134),
                ("n1-standard-1", 0.0475),
                ("n1-standard-2", 0.095),
                ("n2-standard-2", 0.097),
                ("n2-standard-4", 0.194),
            ]),
            storage: table(&[(StorageMedia::Ssd, 0.17), (StorageMedia::Hdd, 0.04)]),
            bandwidth_per_gb: 0.085,
            database: same_rates_for_all_engines(DatabaseRates {
                storage_per_gb: 0.09,
                instance_hourly: 0.015,
            }),
            disaster_recovery: DisasterRecoveryRates {
                backup_per_gb: 0.026,
                replication_multiplier: 1.3,
            },
            sla: SlaRates {
                uptime_multipliers: table(&[
                    (UptimeTarget::Basic, 1.0),
                    (UptimeTarget::Standard, 1.02),
                    (UptimeTarget::Premium, 1.08),
                    (UptimeTarget::Enterprise, 1.15),
                ]),
                support_costs: table(&[
                    (SupportTier::Basic, 0.0),
                    (SupportTier::Developer, 100.0),
                    (SupportTier::Business, 500.0),
                    (SupportTier::Enterprise, 1500.0),
                ]),
            },
        }
    }

    /// Built-in table for `provider`
    pub fn for_provider(provider: CloudProvider) -> Self {
        match provider {
            CloudProvider::Aws => Self::aws(),
            CloudProvider::Azure => Self::azure(),
            CloudProvider::Gcp => Self::gcp(),
        }
    }

    /// Hourly rate of a provider-specific instance class, 0 if unknown
    pub fn compute_rate(&self, instance_class: &str) -> f64 {
        self.compute.get(instance_class).copied().unwrap_or(0.0)
    }

    pub fn storage_rate(&self, media: StorageMedia) -> f64 {
        self.storage.get(&media).copied().unwrap_or(0.0)
    }

    pub fn database_rates(&self, engine: DatabaseEngine) -> DatabaseRates {
        self.database.get(&engine).copied().unwrap_or_default()
    }

    /// Price multiplier for an uptime commitment, 1.0 if unknown
    pub fn uptime_multiplier(&self, target: UptimeTarget) -> f64 {
        self.sla.uptime_multipliers.get(&target).copied().unwrap_or(1.0)
    }

    pub fn support_cost(&self, tier: SupportTier) -> f64 {
        self.sla.support_costs.get(&tier).copied().unwrap_or(0.0)
    }

    /// Reject negative or non-finite rates, and multipliers below 1.0
    pub fn ensure_valid(&self) -> PricingResult<()> {
        let amounts = self
            .compute
            .values()
            .chain(self.storage.values())
            .chain(self.database.values().flat_map(|r| [&r.storage_per_gb, &r.instance_hourly]))
            .chain(self.sla.support_costs.values())
            .chain([&self.bandwidth_per_gb, &self.disaster_recovery.backup_per_gb]);

        for amount in amounts {
            if !amount.is_finite() || *amount < 0.0 {
                return Err(PricingError::InvalidConfiguration(format!(
                    "rate {amount} must be a non-negative finite number"
                )));
            }
        }

        let multipliers = self
            .sla
            .uptime_multipliers
            .values()
            .chain([&self.disaster_recovery.replication_multiplier]);

        for multiplier in multipliers {
            if !multiplier.is_finite() || *multiplier < 1.0 {
                return Err(PricingError::InvalidConfiguration(format!(
                    "multiplier {multiplier} must be at least 1.0"
                )));
            }
        }

        Ok(())
    }
}

/// Rate tables for every supported provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCatalog {
    pub aws: ProviderRateTable,
    pub azure: ProviderRateTable,
    pub gcp: ProviderRateTable,
}

impl RateCatalog {
    pub fn builtin() -> Self {
        Self {
            aws: ProviderRateTable::aws(),
            azure: ProviderRateTable::azure(),
            gcp: ProviderRateTable::gcp(),
        }
    }

    pub fn get(&self, provider: CloudProvider) -> &ProviderRateTable {
        match provider {
            CloudProvider::Aws => &self.aws,
            CloudProvider::Azure => &self.azure,
            CloudProvider::Gcp => &self.gcp,
        }
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> PricingResult<Self> {
        let catalog: RateCatalog = serde_json::from_str(json)
            .map_err(|e| PricingError::InvalidConfiguration(format!("rate catalog: {e}")))?;

        for provider in CloudProvider::ALL {
            if let Err(PricingError::InvalidConfiguration(reason)) =
                catalog.get(provider).ensure_valid()
            {
                return Err(PricingError::InvalidConfiguration(format!(
                    "{provider} rates: {reason}"
                )));
            }
        }

        Ok(catalog)
    }
}

impl Default for RateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
