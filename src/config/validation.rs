//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::ClientConfig;

/// Intrinsic gas of the cheapest possible transaction.
pub const MIN_GAS_LIMIT: u64 = 21_000;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.endpoint) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                errors.push(ValidationError::new(
                    "endpoint",
                    format!("unsupported scheme '{}'", url.scheme()),
                ));
            }
        }
        Err(e) => errors.push(ValidationError::new("endpoint", e.to_string())),
    }

    if config.chain_id == 0 {
        errors.push(ValidationError::new("chain_id", "must be greater than 0"));
    }

    if config.gas_limit < MIN_GAS_LIMIT {
        errors.push(ValidationError::new(
            "gas_limit",
            format!("must be at least {}", MIN_GAS_LIMIT),
        ));
    }

    if config.gas_price_wei == 0 {
        errors.push(ValidationError::new("gas_price_wei", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
