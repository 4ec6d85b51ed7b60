//! # Pool Errors
//!
//! - [`ConfigurationError`] — build time, fatal: the pool is never created.
//! - [`PoolError`] — check-out time, surfaced to the caller and never
//!   retried internally.
//!
//! A check-in that finds no space is not represented here; it is an
//! unsuccessful `CheckInResult`.

use thiserror::Error;

use parkade_core::{MoneyError, SlotId, Timestamp};
use parkade_pricing::TariffError;
use parkade_state::SlotError;

/// Pool validation failure.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// No pricing policy was set and no tariff was configured.
    #[error("a pricing policy is required; set one with pricing_policy(...)")]
    MissingPricingPolicy,

    /// The pool has no slot.
    #[error("the pool does not contain any slot; add some with add_slot(...)")]
    EmptyPool,

    /// Two slots share an id.
    #[error("slot id {0} is used more than once")]
    DuplicateSlotId(SlotId),

    /// The pricing policy combines amounts in different currencies.
    #[error("pricing policy mixes currencies: {0}")]
    MixedCurrencies(MoneyError),

    /// The configured tariff cannot be turned into a policy.
    #[error("invalid tariff: {0}")]
    Tariff(#[from] TariffError),
}

/// Check-out failure.
#[derive(Error, Debug)]
pub enum PoolError {
    /// No slot holds this entity.
    #[error("car {entity} not found")]
    EntityNotFound {
        /// Debug rendering of the entity.
        entity: String,
    },

    /// Departure precedes arrival; the slot is still occupied.
    #[error("slot {slot}: departure {departure} precedes arrival {arrival}")]
    InvalidTimeRange {
        /// Occupied slot.
        slot: SlotId,
        /// Recorded arrival.
        arrival: Timestamp,
        /// Rejected departure.
        departure: Timestamp,
    },

    /// The pricing policy failed; the slot is still occupied.
    #[error("pricing failed for slot {slot}: {source}")]
    Pricing {
        /// Occupied slot.
        slot: SlotId,
        /// Underlying monetary error.
        #[source]
        source: MoneyError,
    },

    /// Any other slot transition failure.
    #[error("slot transition rejected: {0}")]
    Slot(SlotError),
}

impl PoolError {
    /// Whether this is [`PoolError::EntityNotFound`].
    pub fn is_entity_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }

    /// Whether this is [`PoolError::InvalidTimeRange`].
    pub fn is_invalid_time_range(&self) -> bool {
        matches!(self, Self::InvalidTimeRange { .. })
    }
}

impl From<SlotError> for PoolError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::InvalidTimeRange {
                slot,
                arrival,
                departure,
            } => Self::InvalidTimeRange {
                slot,
                arrival,
                departure,
            },
            other => Self::Slot(other),
        }
    }
}
