use thiserror::Error;
use validator::ValidationErrors;

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur in the pricing domain.
///
/// Estimation itself is total: unknown lookups fall back to neutral values.
/// Only the checked entry points, which guard the boundary, return errors.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Configuration, plan, or rate data outside its allowed domain
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<ValidationErrors> for PricingError {
    fn from(errors: ValidationErrors) -> Self {
        PricingError::InvalidConfiguration(errors.to_string())
    }
}
