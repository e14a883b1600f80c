use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use ts_rs::TS;
use validator::Validate;

/// Cloud provider enumeration
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    TS,
    Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CloudProvider {
    #[default]
    Aws,
    Azure,
    Gcp,
}

impl CloudProvider {
    /// Every supported provider, in comparison order
    pub const ALL: [CloudProvider; 3] = [CloudProvider::Aws, CloudProvider::Azure, CloudProvider::Gcp];

    /// Human-facing provider name
    pub fn label(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS",
            CloudProvider::Azure => "Azure",
            CloudProvider::Gcp => "GCP",
        }
    }
}

/// Block storage media type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, TS, Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageMedia {
    #[default]
    Ssd,
    Hdd,
}

/// Managed database engine
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, TS, Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DatabaseEngine {
    #[default]
    Mysql,
    Postgresql,
}

/// Backup cadence for disaster recovery.
///
/// Carried through the configuration for display; it has no effect on cost.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, TS, Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BackupFrequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
}

/// Uptime commitment, serialized as its percentage string ("99.9")
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, TS, Hash,
)]
#[ts(export)]
pub enum UptimeTarget {
    #[serde(rename = "99.5")]
    #[strum(serialize = "99.5")]
    Basic,
    #[default]
    #[serde(rename = "99.9")]
    #[strum(serialize = "99.9")]
    Standard,
    #[serde(rename = "99.95")]
    #[strum(serialize = "99.95")]
    Premium,
    #[serde(rename = "99.99")]
    #[strum(serialize = "99.99")]
    Enterprise,
}

impl UptimeTarget {
    pub const ALL: [UptimeTarget; 4] = [
        UptimeTarget::Basic,
        UptimeTarget::Standard,
        UptimeTarget::Premium,
        UptimeTarget::Enterprise,
    ];

    pub fn percent(&self) -> f64 {
        match self {
            UptimeTarget::Basic => 99.5,
            UptimeTarget::Standard => 99.9,
            UptimeTarget::Premium => 99.95,
            UptimeTarget::Enterprise => 99.99,
        }
    }
}

/// Vendor support plan
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, TS, Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SupportTier {
    #[default]
    Basic,
    Developer,
    Business,
    Enterprise,
}

impl SupportTier {
    pub const ALL: [SupportTier; 4] = [
        SupportTier::Basic,
        SupportTier::Developer,
        SupportTier::Business,
        SupportTier::Enterprise,
    ];
}

/// Display currency. Every amount the engine computes is in USD.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, TS, Hash,
)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Currency {
    #[default]
    Usd,
    Inr,
    Eur,
    Gbp,
}

/// Reporting period for projected estimates
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, TS, Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Timeframe {
    #[default]
    Monthly,
    Yearly,
}

impl Timeframe {
    /// Number of billing months covered
    pub fn months(&self) -> u32 {
        match self {
            Timeframe::Monthly => 1,
            Timeframe::Yearly => 12,
        }
    }
}

// ============================================================================
// Service configuration
// ============================================================================

/// Virtual machine usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputeConfig {
    /// Canonical instance class (AWS naming, e.g. "t3.medium")
    #[validate(length(min = 1, max = 64))]
    pub instance_class: String,
    #[validate(range(min = 1))]
    pub instance_count: u32,
    #[validate(range(min = 1, max = 744))]
    pub hours_per_month: u32,
    /// Region code; does not affect price
    pub region: String,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            instance_class: "t3.medium".to_string(),
            instance_count: 1,
            hours_per_month: 744,
            region: "us-east-1".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    pub media_type: StorageMedia,
    #[validate(range(min = 1))]
    pub amount_gb: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_type: StorageMedia::Ssd,
            amount_gb: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct BandwidthConfig {
    /// Outbound transfer per month
    #[validate(range(min = 1))]
    pub amount_gb: u64,
}

impl Default for BandwidthConfig {
    fn default() -> Self {
        Self { amount_gb: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseConfig {
    pub engine: DatabaseEngine,
    #[validate(range(min = 20, max = 1000))]
    pub storage_gb: u32,
    #[validate(range(min = 1, max = 10))]
    pub instance_count: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            engine: DatabaseEngine::Mysql,
            storage_gb: 20,
            instance_count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct DisasterRecoveryConfig {
    pub enabled: bool,
    pub backup_frequency: BackupFrequency,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SlaConfig {
    pub uptime_target: UptimeTarget,
    pub support_tier: SupportTier,
}

/// Full set of hypothetical resource usage priced by the engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfiguration {
    #[validate(nested)]
    pub compute: ComputeConfig,
    #[validate(nested)]
    pub storage: StorageConfig,
    #[validate(nested)]
    pub bandwidth: BandwidthConfig,
    #[validate(nested)]
    pub database: DatabaseConfig,
    #[validate(nested)]
    pub disaster_recovery: DisasterRecoveryConfig,
    #[validate(nested)]
    pub sla: SlaConfig,
}

// ============================================================================
// Estimates
// ============================================================================

/// Round a USD amount to whole cents, half away from zero
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One priced service line of a [`CostBreakdown`], excluding the total
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    TS,
    Hash,
)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ServiceLine {
    Compute,
    Storage,
    Bandwidth,
    Database,
    DisasterRecovery,
    Sla,
}

impl ServiceLine {
    pub const ALL: [ServiceLine; 6] = [
        ServiceLine::Compute,
        ServiceLine::Storage,
        ServiceLine::Bandwidth,
        ServiceLine::Database,
        ServiceLine::DisasterRecovery,
        ServiceLine::Sla,
    ];
}

/// Monthly cost of one provider, split by service line
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub compute: f64,
    pub storage: f64,
    pub bandwidth: f64,
    pub database: f64,
    pub disaster_recovery: f64,
    pub sla: f64,
    pub total: f64,
}

impl CostBreakdown {
    /// Build a breakdown from raw line amounts.
    ///
    /// Each line is rounded to cents first; `total` is the rounded sum of the
    /// rounded lines.
    pub fn from_lines(
        compute: f64,
        storage: f64,
        bandwidth: f64,
        database: f64,
        disaster_recovery: f64,
        sla: f64,
    ) -> Self {
        let mut breakdown = Self {
            compute: round_cents(compute),
            storage: round_cents(storage),
            bandwidth: round_cents(bandwidth),
            database: round_cents(database),
            disaster_recovery: round_cents(disaster_recovery),
            sla: round_cents(sla),
            total: 0.0,
        };
        breakdown.total = round_cents(breakdown.lines_sum());
        breakdown
    }

    pub fn line(&self, line: ServiceLine) -> f64 {
        match line {
            ServiceLine::Compute => self.compute,
            ServiceLine::Storage => self.storage,
            ServiceLine::Bandwidth => self.bandwidth,
            ServiceLine::Database => self.database,
            ServiceLine::DisasterRecovery => self.disaster_recovery,
            ServiceLine::Sla => self.sla,
        }
    }

    /// Sum of the six service lines, excluding `total`
    pub fn lines_sum(&self) -> f64 {
        self.compute + self.storage + self.bandwidth + self.database + self.disaster_recovery + self.sla
    }

    /// Apply `f` to every service line, re-round, and recompute `total`
    pub fn map_lines(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_lines(
            f(self.compute),
            f(self.storage),
            f(self.bandwidth),
            f(self.database),
            f(self.disaster_recovery),
            f(self.sla),
        )
    }

    /// Apply `f` to every field including `total`, without rounding
    pub fn map_all(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            compute: f(self.compute),
            storage: f(self.storage),
            bandwidth: f(self.bandwidth),
            database: f(self.database),
            disaster_recovery: f(self.disaster_recovery),
            sla: f(self.sla),
            total: f(self.total),
        }
    }
}

/// Per-provider breakdowns produced by one aggregation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EstimateSet {
    pub aws: CostBreakdown,
    pub azure: CostBreakdown,
    pub gcp: CostBreakdown,
}

impl EstimateSet {
    /// Build a set by evaluating `f` once per provider, in `CloudProvider::ALL` order
    pub fn from_fn(mut f: impl FnMut(CloudProvider) -> CostBreakdown) -> Self {
        let aws = f(CloudProvider::Aws);
        let azure = f(CloudProvider::Azure);
        let gcp = f(CloudProvider::Gcp);
        Self { aws, azure, gcp }
    }

    pub fn get(&self, provider: CloudProvider) -> &CostBreakdown {
        match provider {
            CloudProvider::Aws => &self.aws,
            CloudProvider::Azure => &self.azure,
            CloudProvider::Gcp => &self.gcp,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CloudProvider, &CostBreakdown)> {
        CloudProvider::ALL
            .into_iter()
            .map(move |provider| (provider, self.get(provider)))
    }

    /// Transform every provider's breakdown into a new set
    pub fn map(&self, f: impl Fn(&CostBreakdown) -> CostBreakdown) -> Self {
        Self::from_fn(|provider| f(self.get(provider)))
    }
}

/// A provider paired with its total, used for cheapest-provider reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProviderTotal {
    pub provider: CloudProvider,
    pub total: f64,
}

/// Cheapest provider for a single service line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProviderCost {
    pub provider: CloudProvider,
    pub cost: f64,
}

/// Lowest and highest provider totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}
