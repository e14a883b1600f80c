//! Subscription plans: a flat discount plus advisory resource limits.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use ts_rs::TS;
use validator::Validate;

/// Plan tier identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, TS, Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlanTier {
    #[default]
    Basic,
    Enterprise,
    Student,
}

/// Resource ceilings of a plan. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLimits {
    pub max_instances: Option<u64>,
    pub max_storage_gb: Option<u64>,
    pub max_bandwidth_gb: Option<u64>,
}

impl ResourceLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub tier: PlanTier,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Percentage taken off every service line, in [0, 100]
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount_percent: f64,
    pub limits: ResourceLimits,
}

impl Plan {
    pub fn basic() -> Self {
        Self {
            tier: PlanTier::Basic,
            name: "Basic Plan".to_string(),
            description: "Perfect for small projects and learning".to_string(),
            discount_percent: 0.0,
            limits: ResourceLimits {
                max_instances: Some(5),
                max_storage_gb: Some(1000),
                max_bandwidth_gb: Some(5000),
            },
        }
    }

    pub fn enterprise() -> Self {
        Self {
            tier: PlanTier::Enterprise,
            name: "Enterprise Plan".to_string(),
            description: "Comprehensive solution for businesses".to_string(),
            discount_percent: 15.0,
            limits: ResourceLimits::unbounded(),
        }
    }

    pub fn student() -> Self {
        Self {
            tier: PlanTier::Student,
            name: "Student Plan".to_string(),
            description: "Special pricing for students and educators".to_string(),
            discount_percent: 50.0,
            limits: ResourceLimits {
                max_instances: Some(3),
                max_storage_gb: Some(500),
                max_bandwidth_gb: Some(2000),
            },
        }
    }

    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Basic => Self::basic(),
            PlanTier::Enterprise => Self::enterprise(),
            PlanTier::Student => Self::student(),
        }
    }

    /// Every built-in plan, cheapest commitment first
    pub fn catalog() -> Vec<Plan> {
        vec![Self::basic(), Self::enterprise(), Self::student()]
    }

    /// Same plan with a different discount
    pub fn with_discount(mut self, discount_percent: f64) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    /// Multiplier applied to each service line
    pub fn discount_multiplier(&self) -> f64 {
        discount_multiplier(self.discount_percent)
    }
}

/// `(100 - d) / 100` with `d` clamped to `0..=100`, so a discount never
/// produces negative prices. NaN counts as no discount.
pub fn discount_multiplier(discount_percent: f64) -> f64 {
    if discount_percent.is_nan() {
        return 1.0;
    }
    (100.0 - discount_percent.clamp(0.0, 100.0)) / 100.0
}

impl Default for Plan {
    fn default() -> Self {
        Self::basic()
    }
}
