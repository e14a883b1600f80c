//! File-driven estimate runs, the way the `estimate` command performs them

use std::io::Write;

use cost_estimator::report::{EstimateOptions, build_report, load_configuration, load_rates};
use domain_pricing::{
    Currency, EstimateAggregator, PlanTier, RateCatalog, ServiceConfiguration, StorageMedia,
    Timeframe,
};
use tempfile::NamedTempFile;

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn monthly_usd(plan: PlanTier) -> EstimateOptions {
    EstimateOptions {
        plan,
        timeframe: Timeframe::Monthly,
        currency: Currency::Usd,
        exchange_rate: 83.25,
        rates_file: None,
    }
}

#[test]
fn test_partial_configuration_fills_defaults() {
    let file = json_file(r#"{ "compute": { "instanceClass": "c5.large", "instanceCount": 3 } }"#);

    let config = load_configuration(Some(file.path())).unwrap();

    assert_eq!(config.compute.instance_class, "c5.large");
    assert_eq!(config.compute.instance_count, 3);
    assert_eq!(config.compute.hours_per_month, 744);
    assert_eq!(config.storage, ServiceConfiguration::default().storage);
}

#[test]
fn test_malformed_configuration_is_an_error() {
    let file = json_file("{ not json");

    let err = load_configuration(Some(file.path())).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse configuration"));
}

#[test]
fn test_no_rates_file_uses_builtin_tables() {
    assert_eq!(load_rates(None).unwrap(), RateCatalog::builtin());
}

#[test]
fn test_custom_rates_change_the_estimate() {
    let mut catalog = RateCatalog::builtin();
    catalog.aws.bandwidth_per_gb = 0.0;
    catalog.aws.storage.insert(StorageMedia::Ssd, 0.2);
    let file = json_file(&serde_json::to_string(&catalog).unwrap());

    let aggregator = EstimateAggregator::with_rates(load_rates(Some(file.path())).unwrap());
    let report = build_report(
        &aggregator,
        &ServiceConfiguration::default(),
        &monthly_usd(PlanTier::Basic),
    )
    .unwrap();

    assert_eq!(report.estimates.aws.bandwidth, 0.0);
    assert_eq!(report.estimates.aws.storage, 20.0);
    // Other providers keep their own tables
    let builtin = domain_pricing::aggregate(
        &ServiceConfiguration::default(),
        &domain_pricing::Plan::basic(),
    );
    assert_eq!(report.estimates.gcp, builtin.gcp);
}

#[test]
fn test_negative_rates_are_rejected() {
    let mut catalog = RateCatalog::builtin();
    catalog.gcp.bandwidth_per_gb = -1.0;
    let file = json_file(&serde_json::to_string(&catalog).unwrap());

    let err = load_rates(Some(file.path())).unwrap_err();
    assert!(format!("{err:#}").contains("gcp"));
}

#[test]
fn test_report_json_shape() {
    let report = build_report(
        &EstimateAggregator::builtin(),
        &ServiceConfiguration::default(),
        &monthly_usd(PlanTier::Enterprise),
    )
    .unwrap();

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["plan"], "enterprise");
    assert_eq!(json["timeframe"], "monthly");
    assert_eq!(json["currency"], "USD");
    for provider in ["aws", "azure", "gcp"] {
        assert!(json["estimates"][provider]["total"].is_number());
        assert!(json["formattedTotals"][provider].is_string());
    }
    assert!(json["cheapest"]["provider"].is_string());
    assert!(json["warnings"].as_array().unwrap().is_empty());

    for line in [
        "compute",
        "storage",
        "bandwidth",
        "database",
        "disasterRecovery",
        "sla",
    ] {
        assert!(json["cheapestByService"][line]["provider"].is_string(), "{line}");
        assert!(json["cheapestByService"][line]["cost"].is_number(), "{line}");
    }
    // Disaster recovery is off by default, so every provider ties at zero
    assert_eq!(json["cheapestByService"]["disasterRecovery"]["provider"], "aws");

    let (min, max) = (
        json["range"]["min"].as_f64().unwrap(),
        json["range"]["max"].as_f64().unwrap(),
    );
    assert_eq!(min, report.cheapest.total);
    assert!(max >= min);
    assert_eq!(json["savings"].as_f64().unwrap(), max - min);
}
