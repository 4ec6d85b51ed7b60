//! # Tariff Descriptions
//!
//! A `Tariff` is the serializable form of a pricing policy, used to load
//! pricing from configuration:
//!
//! ```yaml
//! kind: sum
//! parts:
//!   - kind: per_started_hour
//!     rate: 5.00 EUR
//!   - kind: fixed
//!     amount: 1.00 EUR
//! ```
//!
//! Custom policies have no tariff form; they exist only in code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use parkade_core::{Money, MoneyError};

use crate::policy::PricingPolicy;

/// Serializable pricing description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tariff {
    /// Flat amount.
    Fixed {
        /// The amount.
        amount: Money,
    },
    /// Rate per hour.
    PerHour {
        /// Price of one hour.
        rate: Money,
        /// Charge a partial trailing hour as a full one.
        #[serde(default)]
        count_started: bool,
    },
    /// Rate per started hour.
    PerStartedHour {
        /// Price of one hour.
        rate: Money,
    },
    /// Rate per finished hour.
    PerFinishedHour {
        /// Price of one hour.
        rate: Money,
    },
    /// Rate per started hour plus a flat amount.
    PerStartedHourAndFixed {
        /// Price of one hour.
        rate: Money,
        /// Flat amount.
        fixed: Money,
    },
    /// Rate per finished hour plus a flat amount.
    PerFinishedHourAndFixed {
        /// Price of one hour.
        rate: Money,
        /// Flat amount.
        fixed: Money,
    },
    /// Sum of all parts, left to right.
    Sum {
        /// At least one part.
        parts: Vec<Tariff>,
    },
}

/// Errors loading or converting a tariff.
#[derive(Error, Debug)]
pub enum TariffError {
    /// YAML text is malformed or does not describe a tariff.
    #[error("invalid tariff YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON text is malformed or does not describe a tariff.
    #[error("invalid tariff JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A `sum` with no parts.
    #[error("sum tariff has no parts")]
    EmptySum,

    /// Leaves use different currencies.
    #[error("inconsistent tariff currencies: {0}")]
    Currency(#[from] MoneyError),
}

impl Tariff {
    /// Parse a tariff from YAML.
    pub fn from_yaml(text: &str) -> Result<Self, TariffError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse a tariff from JSON.
    pub fn from_json(text: &str) -> Result<Self, TariffError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the pricing policy this tariff describes.
    ///
    /// # Errors
    ///
    /// [`TariffError::EmptySum`] for an empty `sum`, and
    /// [`TariffError::Currency`] when leaves mix currencies.
    pub fn to_policy<T>(&self) -> Result<PricingPolicy<T>, TariffError> {
        let policy = self.build()?;
        policy.currency()?;
        Ok(policy)
    }

    fn build<T>(&self) -> Result<PricingPolicy<T>, TariffError> {
        let policy = match self {
            Self::Fixed { amount } => PricingPolicy::fixed(*amount),
            Self::PerHour {
                rate,
                count_started,
            } => PricingPolicy::per_hour(*rate, *count_started),
            Self::PerStartedHour { rate } => PricingPolicy::per_started_hour(*rate),
            Self::PerFinishedHour { rate } => PricingPolicy::per_finished_hour(*rate),
            Self::PerStartedHourAndFixed { rate, fixed } => {
                PricingPolicy::per_started_hour_and_fixed(*rate, *fixed)
            }
            Self::PerFinishedHourAndFixed { rate, fixed } => {
                PricingPolicy::per_finished_hour_and_fixed(*rate, *fixed)
            }
            Self::Sum { parts } => {
                let mut parts = parts.iter();
                let first = parts.next().ok_or(TariffError::EmptySum)?.build()?;
                parts.try_fold(first, |acc, part| {
                    Ok::<_, TariffError>(acc.and(part.build()?))
                })?
            }
        };
        Ok(policy)
    }
}
