//! Cost Estimator
//!
//! Prices a hypothetical service configuration on AWS, Azure, and GCP and
//! prints the comparison as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use cost_estimator::config::Config;
use cost_estimator::report::{
    EstimateOptions, build_report, build_validation, class_listing, load_configuration, load_rates,
};
use domain_pricing::{Currency, EstimateAggregator, Plan, PlanTier, Timeframe};
use eyre::Result;
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "cost-estimator")]
#[command(about = "Compare estimated cloud costs across AWS, Azure, and GCP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate costs for a service configuration on every provider
    Estimate {
        /// JSON service configuration. Defaults to the built-in starter configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Subscription plan (basic, enterprise, student)
        #[arg(short, long)]
        plan: Option<PlanTier>,

        /// Reporting period (monthly, yearly)
        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// Display currency (USD, INR, EUR, GBP)
        #[arg(short = 'C', long)]
        currency: Option<Currency>,

        /// USD to display-currency exchange rate
        #[arg(short = 'x', long)]
        exchange_rate: Option<f64>,

        /// JSON rate catalog replacing the built-in tables
        #[arg(short, long)]
        rates: Option<PathBuf>,
    },

    /// Check a service configuration against a plan's limits
    Validate {
        /// JSON service configuration. Defaults to the built-in starter configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Subscription plan (basic, enterprise, student)
        #[arg(short, long)]
        plan: Option<PlanTier>,
    },

    /// List the subscription plans
    Plans,

    /// List canonical instance classes and their provider equivalents
    Classes,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    install_color_eyre();

    let cli = Cli::parse();

    let environment = Environment::from_env();
    init_tracing(&environment);

    run(cli)
}

/// Execute one command. Environment defaults are read only by the commands
/// that use them.
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Estimate {
            config: config_path,
            plan,
            timeframe,
            currency,
            exchange_rate,
            rates,
        } => {
            let config = Config::from_env()?;
            let options =
                EstimateOptions::resolve(&config, plan, timeframe, currency, exchange_rate, rates);
            let service = load_configuration(config_path.as_deref())?;
            let aggregator =
                EstimateAggregator::with_rates(load_rates(options.rates_file.as_deref())?);

            let report = build_report(&aggregator, &service, &options)?;
            info!(
                cheapest = report.cheapest.provider.label(),
                savings = report.savings,
                warnings = report.warnings.len(),
                "Estimate complete"
            );
            print_json(&report)?;
        }

        Commands::Validate {
            config: config_path,
            plan,
        } => {
            let plan = match plan {
                Some(plan) => plan,
                None => Config::from_env()?.plan,
            };
            let service = load_configuration(config_path.as_deref())?;
            let report = build_validation(&service, plan)?;
            print_json(&report)?;
        }

        Commands::Plans => print_json(&Plan::catalog())?,

        Commands::Classes => print_json(&class_listing())?,
    }

    Ok(())
}
