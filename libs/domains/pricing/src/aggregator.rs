//! Estimate Aggregator
//!
//! Runs every provider's calculator against the same configuration and
//! applies the plan discount uniformly.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::calculator::ProviderCalculator;
use crate::error::PricingResult;
use crate::instance_map::{EquivalenceTable, InstanceClassResolver};
use crate::models::{
    CloudProvider, CostBreakdown, CostRange, EstimateSet, ProviderCost, ProviderTotal,
    ServiceConfiguration, ServiceLine, round_cents,
};
use crate::plan::{Plan, discount_multiplier};
use crate::rates::RateCatalog;
use crate::validation::{ensure_valid_configuration, ensure_valid_plan};

static BUILTIN: Lazy<EstimateAggregator> = Lazy::new(EstimateAggregator::builtin);

/// Estimate `config` under `plan` with the built-in rate tables
pub fn aggregate(config: &ServiceConfiguration, plan: &Plan) -> EstimateSet {
    BUILTIN.aggregate(config, plan)
}

/// Multi-provider estimator. Holds no mutable state, so a single instance
/// can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct EstimateAggregator {
    aws: ProviderCalculator,
    azure: ProviderCalculator,
    gcp: ProviderCalculator,
}

impl EstimateAggregator {
    pub fn new(catalog: RateCatalog, resolver: Arc<dyn InstanceClassResolver>) -> Self {
        let RateCatalog { aws, azure, gcp } = catalog;
        Self {
            aws: ProviderCalculator::new(CloudProvider::Aws, aws, resolver.clone()),
            azure: ProviderCalculator::new(CloudProvider::Azure, azure, resolver.clone()),
            gcp: ProviderCalculator::new(CloudProvider::Gcp, gcp, resolver),
        }
    }

    pub fn builtin() -> Self {
        Self::new(RateCatalog::builtin(), Arc::new(EquivalenceTable::builtin()))
    }

    /// Same built-in equivalences, different rates
    pub fn with_rates(catalog: RateCatalog) -> Self {
        Self::new(catalog, Arc::new(EquivalenceTable::builtin()))
    }

    pub fn calculator(&self, provider: CloudProvider) -> &ProviderCalculator {
        match provider {
            CloudProvider::Aws => &self.aws,
            CloudProvider::Azure => &self.azure,
            CloudProvider::Gcp => &self.gcp,
        }
    }

    /// Undiscounted breakdown for a single provider
    pub fn compute_breakdown(
        &self,
        config: &ServiceConfiguration,
        provider: CloudProvider,
    ) -> CostBreakdown {
        self.calculator(provider).compute_breakdown(config)
    }

    #[tracing::instrument(skip_all, fields(plan = %plan.tier, discount = plan.discount_percent))]
    pub fn aggregate(&self, config: &ServiceConfiguration, plan: &Plan) -> EstimateSet {
        let estimates = EstimateSet::from_fn(|provider| self.compute_breakdown(config, provider));
        let estimates = apply_discount(&estimates, plan.discount_percent);

        let cheapest = estimates.cheapest();
        tracing::info!(
            cheapest = cheapest.provider.label(),
            cheapest_total = cheapest.total,
            "Aggregated provider estimates"
        );

        estimates
    }

    /// [`aggregate`](Self::aggregate) after checking configuration ranges and
    /// the plan discount
    pub fn aggregate_checked(
        &self,
        config: &ServiceConfiguration,
        plan: &Plan,
    ) -> PricingResult<EstimateSet> {
        ensure_valid_configuration(config)?;
        ensure_valid_plan(plan)?;
        Ok(self.aggregate(config, plan))
    }
}

impl Default for EstimateAggregator {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Take `discount_percent` off every service line of every provider.
///
/// Lines are re-rounded to cents and `total` is rebuilt from them. A zero,
/// negative or NaN discount returns the estimates unchanged; anything above
/// 100 is treated as 100.
pub fn apply_discount(estimates: &EstimateSet, discount_percent: f64) -> EstimateSet {
    if discount_percent.is_nan() || discount_percent <= 0.0 {
        return *estimates;
    }

    let multiplier = discount_multiplier(discount_percent);
    estimates.map(|breakdown| breakdown.map_lines(|line| line * multiplier))
}

/// Discounted single amount, rounded to cents
pub fn plan_adjusted_price(base_price: f64, plan: &Plan) -> f64 {
    if plan.discount_percent == 0.0 {
        return base_price;
    }
    round_cents(base_price * plan.discount_multiplier())
}

impl EstimateSet {
    /// Lowest `amount` across providers; ties go to the earlier provider
    fn lowest(&self, amount: impl Fn(&CostBreakdown) -> f64) -> (CloudProvider, f64) {
        self.iter()
            .map(|(provider, b)| (provider, amount(b)))
            .reduce(|best, next| if next.1 < best.1 { next } else { best })
            .unwrap_or((CloudProvider::Aws, amount(&self.aws)))
    }

    /// Provider with the lowest total; ties go to the earlier provider
    pub fn cheapest(&self) -> ProviderTotal {
        let (provider, total) = self.lowest(|b| b.total);
        ProviderTotal { provider, total }
    }

    /// Provider with the lowest cost for one service line; ties go to the
    /// earlier provider
    pub fn cheapest_for(&self, line: ServiceLine) -> ProviderCost {
        let (provider, cost) = self.lowest(|b| b.line(line));
        ProviderCost { provider, cost }
    }

    /// Lowest and highest totals across providers
    pub fn total_range(&self) -> CostRange {
        self.iter().fold(
            CostRange {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |range, (_, b)| CostRange {
                min: range.min.min(b.total),
                max: range.max.max(b.total),
            },
        )
    }

    /// What choosing the cheapest provider saves over the most expensive one.
    /// Not rounded, so it stays exact on projected amounts.
    pub fn savings_range(&self) -> f64 {
        self.total_range().spread()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(total_seed: f64) -> CostBreakdown {
        CostBreakdown::from_lines(total_seed, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn test_zero_discount_passes_through() {
        let config = ServiceConfiguration::default();
        let aggregator = EstimateAggregator::builtin();

        let estimates = aggregator.aggregate(&config, &Plan::basic());
        for provider in CloudProvider::ALL {
            assert_eq!(
                *estimates.get(provider),
                aggregator.compute_breakdown(&config, provider)
            );
        }
    }

    #[test]
    fn test_student_discount_halves_lines() {
        let config = ServiceConfiguration::default();
        let aggregator = EstimateAggregator::builtin();

        let full = aggregator.aggregate(&config, &Plan::basic());
        let student = aggregator.aggregate(&config, &Plan::student());

        for provider in CloudProvider::ALL {
            let (f, s) = (full.get(provider), student.get(provider));
            assert_eq!(s.compute, round_cents(f.compute * 0.5));
            assert_eq!(s.database, round_cents(f.database * 0.5));
        }
        assert_eq!(student.aws.bandwidth, 22.5);
        assert!((student.aws.total - student.aws.lines_sum()).abs() < 0.005);
        assert!(student.aws.total < full.aws.total);
    }

    #[test]
    fn test_apply_discount_rebuilds_total() {
        let set = EstimateSet {
            aws: CostBreakdown::from_lines(0.01, 0.01, 0.01, 0.0, 0.0, 0.0),
            ..Default::default()
        };
        let discounted = apply_discount(&set, 50.0);

        // Each half-cent line rounds back up to a cent before summing
        assert_eq!(discounted.aws.compute, 0.01);
        assert_eq!(discounted.aws.total, 0.03);
        assert_eq!(discounted.azure, CostBreakdown::default());
    }

    #[test]
    fn test_full_discount_zeroes_everything() {
        let estimates = aggregate(&ServiceConfiguration::default(), &Plan::basic().with_discount(100.0));
        for (_, b) in estimates.iter() {
            assert_eq!(b.total, 0.0);
        }
    }

    #[test]
    fn test_plan_adjusted_price() {
        assert_eq!(plan_adjusted_price(99.99, &Plan::basic()), 99.99);
        assert_eq!(plan_adjusted_price(100.0, &Plan::enterprise()), 85.0);
        assert_eq!(plan_adjusted_price(10.02, &Plan::student()), 5.01);
    }

    #[test]
    fn test_cheapest_and_ties() {
        let set = EstimateSet {
            aws: breakdown(20.0),
            azure: breakdown(10.0),
            gcp: breakdown(10.0),
        };
        let cheapest = set.cheapest();
        assert_eq!(cheapest.provider, CloudProvider::Azure);
        assert_eq!(cheapest.total, 10.0);
        assert_eq!(set.savings_range(), 10.0);
        assert_eq!(set.total_range(), CostRange { min: 10.0, max: 20.0 });
    }

    #[test]
    fn test_cheapest_for_each_line() {
        let set = EstimateSet {
            aws: CostBreakdown::from_lines(5.0, 1.0, 9.0, 2.0, 0.0, 3.0),
            azure: CostBreakdown::from_lines(4.0, 1.0, 8.0, 3.0, 0.0, 3.0),
            gcp: CostBreakdown::from_lines(6.0, 2.0, 7.0, 2.0, 0.0, 1.0),
        };

        let expected = [
            (ServiceLine::Compute, CloudProvider::Azure, 4.0),
            (ServiceLine::Storage, CloudProvider::Aws, 1.0),
            (ServiceLine::Bandwidth, CloudProvider::Gcp, 7.0),
            (ServiceLine::Database, CloudProvider::Aws, 2.0),
            (ServiceLine::DisasterRecovery, CloudProvider::Aws, 0.0),
            (ServiceLine::Sla, CloudProvider::Gcp, 1.0),
        ];
        for (line, provider, cost) in expected {
            assert_eq!(set.cheapest_for(line), ProviderCost { provider, cost }, "{line}");
        }
    }

    #[test]
    fn test_discount_above_full_clamps_to_zero() {
        let aggregator = EstimateAggregator::builtin();
        let plan = Plan::basic().with_discount(150.0);

        let estimates = aggregator.aggregate(&ServiceConfiguration::default(), &plan);

        for (provider, b) in estimates.iter() {
            for line in ServiceLine::ALL {
                assert_eq!(b.line(line), 0.0, "{provider} {line}");
            }
            assert_eq!(b.total, 0.0);
        }
    }

    #[test]
    fn test_nan_discount_passes_through() {
        let set = aggregate(&ServiceConfiguration::default(), &Plan::basic());
        assert_eq!(apply_discount(&set, f64::NAN), set);
    }

    #[test]
    fn test_calculator_lookup_matches_provider() {
        let aggregator = EstimateAggregator::builtin();
        for provider in CloudProvider::ALL {
            assert_eq!(aggregator.calculator(provider).provider(), provider);
        }
    }

    #[test]
    fn test_aggregate_checked_rejects_bad_input() {
        let aggregator = EstimateAggregator::builtin();

        let mut config = ServiceConfiguration::default();
        config.compute.instance_count = 0;
        assert!(aggregator.aggregate_checked(&config, &Plan::basic()).is_err());

        let plan = Plan::basic().with_discount(f64::NAN);
        assert!(aggregator
            .aggregate_checked(&ServiceConfiguration::default(), &plan)
            .is_err());

        assert!(aggregator
            .aggregate_checked(&ServiceConfiguration::default(), &Plan::enterprise())
            .is_ok());
    }

    #[test]
    fn test_custom_rates_flow_through() {
        let mut catalog = RateCatalog::builtin();
        catalog.gcp.bandwidth_per_gb = 0.0;

        let estimates = EstimateAggregator::with_rates(catalog)
            .aggregate(&ServiceConfiguration::default(), &Plan::basic());

        assert_eq!(estimates.gcp.bandwidth, 0.0);
        assert_eq!(estimates.aws.bandwidth, 45.0);
    }
}
