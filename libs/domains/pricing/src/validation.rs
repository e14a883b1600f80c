//! Plan limit warnings and boundary checks.
//!
//! [`validate_service_limits`] is advisory: it reports what exceeds the plan
//! and never blocks estimation. The `ensure_valid_*` helpers are the strict
//! boundary used by the checked entry points.

use validator::Validate;

use crate::error::{PricingError, PricingResult};
use crate::models::ServiceConfiguration;
use crate::plan::{Plan, ResourceLimits};

fn exceeds(value: u64, limit: Option<u64>) -> Option<u64> {
    limit.filter(|max| value > *max)
}

/// Human-readable warnings for every dimension over its plan limit
pub fn validate_service_limits(config: &ServiceConfiguration, limits: &ResourceLimits) -> Vec<String> {
    let mut warnings = Vec::new();

    let instances = u64::from(config.compute.instance_count);
    if let Some(max) = exceeds(instances, limits.max_instances) {
        warnings.push(format!(
            "Compute instances ({instances}) exceed plan limit ({max})"
        ));
    }

    let storage = config.storage.amount_gb;
    if let Some(max) = exceeds(storage, limits.max_storage_gb) {
        warnings.push(format!(
            "Storage amount ({storage} GB) exceeds plan limit ({max} GB)"
        ));
    }

    let bandwidth = config.bandwidth.amount_gb;
    if let Some(max) = exceeds(bandwidth, limits.max_bandwidth_gb) {
        warnings.push(format!(
            "Bandwidth amount ({bandwidth} GB) exceeds plan limit ({max} GB)"
        ));
    }

    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "Configuration exceeds plan limits");
    }

    warnings
}

pub fn ensure_valid_configuration(config: &ServiceConfiguration) -> PricingResult<()> {
    config.validate()?;
    Ok(())
}

pub fn ensure_valid_plan(plan: &Plan) -> PricingResult<()> {
    if !plan.discount_percent.is_finite() {
        return Err(PricingError::InvalidConfiguration(format!(
            "discount_percent must be finite, got {}",
            plan.discount_percent
        )));
    }
    plan.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_fits_basic_plan() {
        let warnings = validate_service_limits(&ServiceConfiguration::default(), &Plan::basic().limits);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_instance_limit_warning() {
        let mut config = ServiceConfiguration::default();
        config.compute.instance_count = 10;
        let limits = ResourceLimits {
            max_instances: Some(5),
            ..ResourceLimits::unbounded()
        };

        let warnings = validate_service_limits(&config, &limits);

        assert_eq!(warnings, vec!["Compute instances (10) exceed plan limit (5)".to_string()]);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let mut config = ServiceConfiguration::default();
        config.compute.instance_count = 5;
        config.storage.amount_gb = 1000;
        config.bandwidth.amount_gb = 5000;

        assert!(validate_service_limits(&config, &Plan::basic().limits).is_empty());
    }

    #[test]
    fn test_all_dimensions_reported_in_order() {
        let mut config = ServiceConfiguration::default();
        config.compute.instance_count = 4;
        config.storage.amount_gb = 501;
        config.bandwidth.amount_gb = 2001;

        let warnings = validate_service_limits(&config, &Plan::student().limits);

        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("Compute instances (4)"));
        assert_eq!(warnings[1], "Storage amount (501 GB) exceeds plan limit (500 GB)");
        assert_eq!(warnings[2], "Bandwidth amount (2001 GB) exceeds plan limit (2000 GB)");
    }

    #[test]
    fn test_unbounded_limits_always_pass() {
        let mut config = ServiceConfiguration::default();
        config.compute.instance_count = u32::MAX;
        config.storage.amount_gb = u64::MAX;
        config.bandwidth.amount_gb = u64::MAX;

        assert!(validate_service_limits(&config, &Plan::enterprise().limits).is_empty());
    }

    #[test]
    fn test_ensure_valid_configuration_reports_field() {
        let mut config = ServiceConfiguration::default();
        config.database.instance_count = 11;

        let err = ensure_valid_configuration(&config).unwrap_err();
        let PricingError::InvalidConfiguration(message) = err;
        assert!(message.contains("instance_count"), "{message}");
    }

    #[test]
    fn test_ensure_valid_plan() {
        assert!(ensure_valid_plan(&Plan::student()).is_ok());
        assert!(ensure_valid_plan(&Plan::basic().with_discount(f64::INFINITY)).is_err());
        assert!(ensure_valid_plan(&Plan::basic().with_discount(101.0)).is_err());
    }
}
