//! Pricing Domain
//!
//! Multi-provider cloud cost estimation. Given a hypothetical
//! [`ServiceConfiguration`] and a subscription [`Plan`], the engine prices the
//! same workload on AWS, Azure and GCP and returns comparable breakdowns.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Projector  │  ← Timeframe & currency, display time only
//! └──────▲──────┘
//!        │
//! ┌──────┴──────┐
//! │ Aggregator  │  ← One calculator per provider + plan discount
//! └──────▲──────┘
//!        │
//! ┌──────┴──────┐
//! │ Calculator  │  ← Config → CostBreakdown for one provider
//! └──────▲──────┘
//!        │
//! ┌──────┴──────┐
//! │ Rates / Map │  ← Rate tables, instance class equivalence
//! └─────────────┘
//! ```
//!
//! Every layer is a pure function of its inputs: no I/O, no shared mutable
//! state.

pub mod aggregator;
pub mod calculator;
pub mod error;
pub mod instance_map;
pub mod models;
pub mod plan;
pub mod projector;
pub mod rates;
pub mod validation;

// Re-export commonly used types
pub use error::{PricingError, PricingResult};
pub use models::{
    BackupFrequency, BandwidthConfig, CloudProvider, ComputeConfig, CostBreakdown, CostRange,
    Currency, DatabaseConfig, DatabaseEngine, DisasterRecoveryConfig, EstimateSet, ProviderCost,
    ProviderTotal, ServiceConfiguration, ServiceLine, SlaConfig, StorageConfig, StorageMedia,
    SupportTier, Timeframe, UptimeTarget, round_cents,
};
pub use plan::{Plan, PlanTier, ResourceLimits, discount_multiplier};

pub use aggregator::{EstimateAggregator, aggregate, apply_discount, plan_adjusted_price};
pub use calculator::{DATABASE_HOURS_PER_MONTH, ProviderCalculator, compute_breakdown};
pub use instance_map::{ClassEquivalence, EquivalenceTable, InstanceClassResolver, default_class};
pub use projector::{DEFAULT_USD_INR_RATE, convert_currency, format_amount, project};
pub use rates::{ProviderRateTable, RateCatalog};
pub use validation::{ensure_valid_configuration, ensure_valid_plan, validate_service_limits};
