//! Pool configuration.
//!
//! Defaults reproduce plain builder behaviour: auto ids `"0"`, `"1"`, ...
//! and no tariff. Override through environment variables or explicit
//! construction.

use parkade_pricing::{Tariff, TariffError};

/// Prefix prepended to generated slot ids.
pub const ENV_AUTO_ID_PREFIX: &str = "PARKADE_AUTO_ID_PREFIX";
/// First number used for generated slot ids.
pub const ENV_AUTO_ID_START: &str = "PARKADE_AUTO_ID_START";
/// Tariff text (YAML or JSON) used when no pricing policy is set in code.
pub const ENV_TARIFF: &str = "PARKADE_TARIFF";

/// Settings consumed by [`PoolBuilder::with_config`](crate::PoolBuilder::with_config).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolConfig {
    /// Prefix for generated slot ids. Default: empty.
    pub auto_id_prefix: String,
    /// First generated slot number. Default: 0.
    pub auto_id_start: usize,
    /// Fallback pricing when the builder gets no explicit policy.
    pub tariff: Option<Tariff>,
}

impl PoolConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PARKADE_AUTO_ID_PREFIX` (default: empty)
    /// - `PARKADE_AUTO_ID_START` (default: 0)
    /// - `PARKADE_TARIFF` (default: none; YAML, so JSON works too)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let auto_id_start = match lookup(ENV_AUTO_ID_START) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: ENV_AUTO_ID_START.to_string(),
                    value: raw,
                })?,
            None => 0,
        };
        let tariff = lookup(ENV_TARIFF)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| Tariff::from_yaml(&raw))
            .transpose()
            .map_err(|source| ConfigError::InvalidTariff {
                var: ENV_TARIFF.to_string(),
                source,
            })?;

        Ok(Self {
            auto_id_prefix: lookup(ENV_AUTO_ID_PREFIX).unwrap_or_default(),
            auto_id_start,
            tariff,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: String, value: String },
    #[error("{var} does not describe a tariff: {source}")]
    InvalidTariff {
        var: String,
        #[source]
        source: TariffError,
    },
}
