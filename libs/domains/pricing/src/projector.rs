//! Currency & Timeframe Projector
//!
//! Display-time transforms over an already computed [`EstimateSet`].
//! Toggling timeframe or currency never re-runs the calculators.

use crate::models::{Currency, EstimateSet, Timeframe};

/// Approximate USD to INR rate used when no live rate is supplied
pub const DEFAULT_USD_INR_RATE: f64 = 83.25;

/// Scale `estimates` to `timeframe`, then convert from USD to `currency`.
///
/// Every field, `total` included, is multiplied; nothing is re-rounded.
/// `exchange_rate` is ignored for USD.
pub fn project(
    estimates: &EstimateSet,
    timeframe: Timeframe,
    currency: Currency,
    exchange_rate: f64,
) -> EstimateSet {
    let scaled = match timeframe {
        Timeframe::Monthly => *estimates,
        Timeframe::Yearly => {
            let months = f64::from(timeframe.months());
            estimates.map(|b| b.map_all(|amount| amount * months))
        }
    };

    convert_currency(&scaled, currency, exchange_rate)
}

/// Convert USD amounts into `currency`
pub fn convert_currency(estimates: &EstimateSet, currency: Currency, exchange_rate: f64) -> EstimateSet {
    match currency {
        Currency::Usd => *estimates,
        _ => estimates.map(|b| b.map_all(|amount| convert_amount(amount, currency, exchange_rate))),
    }
}

pub fn convert_amount(amount: f64, currency: Currency, exchange_rate: f64) -> f64 {
    match currency {
        Currency::Usd => amount,
        _ => amount * exchange_rate,
    }
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Inr => "Indian Rupee",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
        }
    }

    /// Digits shown after the decimal point
    pub fn display_decimals(&self) -> usize {
        match self {
            Currency::Inr => 0,
            _ => 2,
        }
    }
}

/// Group an unsigned integer string. INR uses lakh/crore grouping
/// (`12,34,567`), everything else groups by thousands.
fn group_digits(digits: &str, currency: Currency) -> String {
    let (head, tail) = if digits.len() > 3 {
        digits.split_at(digits.len() - 3)
    } else {
        return digits.to_string();
    };

    let group = match currency {
        Currency::Inr => 2,
        _ => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Render an amount for display, e.g. `$1,234.50` or `₹1,02,735`
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let decimals = currency.display_decimals();
    let rendered = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let sign = if amount < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };

    let grouped = group_digits(whole, currency);
    match fraction {
        Some(fraction) => format!("{sign}{}{grouped}.{fraction}", currency.symbol()),
        None => format!("{sign}{}{grouped}", currency.symbol()),
    }
}
