//! # The Pool
//!
//! Ordered slots plus the active pricing policy, behind one lock.
//!
//! ## Selection Rule
//!
//! Always the lowest-index free slot. The alternative scan starts only after
//! the *whole* primary scan failed, so a slot matching through its
//! alternative predicate never wins over a later slot that matches
//! primarily:
//!
//! ```text
//! index:     0            1            2
//! slot:   [alt-only]  [primary]    [primary]
//! check-in ──────────────▲ picks 1, not 0
//! ```
//!
//! ## Consistency
//!
//! Counting queries lock the slot list like check-in and check-out do, so
//! they never observe a half-done transition.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use parkade_core::{Money, SlotId, Timestamp};
use parkade_pricing::PricingPolicy;
use parkade_state::{Closed, Open, Slot, SlotSnapshot, Usage};

use crate::builder::PoolBuilder;
use crate::error::{ConfigurationError, PoolError};

// ─── Results ─────────────────────────────────────────────────────────

/// Outcome of a check-in.
#[must_use]
#[derive(Debug)]
pub struct CheckInResult<T> {
    usage: Option<Usage<T, Open>>,
}

impl<T> CheckInResult<T> {
    /// Whether a slot was allocated.
    pub fn is_successful(&self) -> bool {
        self.usage.is_some()
    }

    /// Snapshot of the new open usage, if a slot was allocated.
    pub fn usage(&self) -> Option<&Usage<T, Open>> {
        self.usage.as_ref()
    }

    /// Take the open usage out of the result.
    pub fn into_usage(self) -> Option<Usage<T, Open>> {
        self.usage
    }
}

impl<T> Clone for CheckInResult<T> {
    fn clone(&self) -> Self {
        Self {
            usage: self.usage.clone(),
        }
    }
}

/// Outcome of a successful check-out.
#[derive(Debug)]
pub struct CheckOutResult<T> {
    usage: Usage<T, Closed>,
    price: Money,
}

impl<T> CheckOutResult<T> {
    /// Snapshot of the closed usage.
    pub fn usage(&self) -> &Usage<T, Closed> {
        &self.usage
    }

    /// Price computed by the pool's pricing policy.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Split into usage and price.
    pub fn into_parts(self) -> (Usage<T, Closed>, Money) {
        (self.usage, self.price)
    }
}

impl<T> Clone for CheckOutResult<T> {
    fn clone(&self) -> Self {
        Self {
            usage: self.usage.clone(),
            price: self.price,
        }
    }
}

// ─── The Pool ────────────────────────────────────────────────────────

/// Allocation engine over a fixed, ordered set of slots.
///
/// `Pool<T>` is `Send + Sync` whenever `T` is; share it as `Arc<Pool<T>>`.
pub struct Pool<T> {
    slots: Mutex<Vec<Slot<T>>>,
    pricing: PricingPolicy<T>,
}

impl<T> Pool<T> {
    /// Start building a pool.
    pub fn builder() -> PoolBuilder<T> {
        PoolBuilder::new()
    }

    /// Validate the parts and assemble a pool.
    ///
    /// # Errors
    ///
    /// In this order: [`ConfigurationError::MissingPricingPolicy`],
    /// [`ConfigurationError::EmptyPool`],
    /// [`ConfigurationError::DuplicateSlotId`],
    /// [`ConfigurationError::MixedCurrencies`].
    pub fn from_parts(
        slots: Vec<Slot<T>>,
        pricing: Option<PricingPolicy<T>>,
    ) -> Result<Self, ConfigurationError> {
        let pricing = pricing.ok_or(ConfigurationError::MissingPricingPolicy)?;
        if slots.is_empty() {
            return Err(ConfigurationError::EmptyPool);
        }
        if let Some(dup) = first_duplicate_id(&slots) {
            return Err(ConfigurationError::DuplicateSlotId(dup));
        }
        pricing
            .currency()
            .map_err(ConfigurationError::MixedCurrencies)?;

        tracing::info!(slots = slots.len(), pricing = ?pricing, "pool built");
        Ok(Self {
            slots: Mutex::new(slots),
            pricing,
        })
    }

    /// Total number of slots.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Always `false` for a validated pool.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of occupied slots.
    pub fn occupied_len(&self) -> usize {
        self.count(|s| !s.is_free())
    }

    /// The active pricing policy.
    pub fn pricing_policy(&self) -> &PricingPolicy<T> {
        &self.pricing
    }

    /// Snapshots of every slot, in pool order.
    pub fn slots(&self) -> Vec<SlotSnapshot<T>> {
        self.slots.lock().iter().map(Slot::snapshot).collect()
    }

    /// Slots whose primary predicate accepts `entity`.
    pub fn size_for(&self, entity: &T) -> usize {
        self.count(|s| s.matches(entity))
    }

    /// Slots whose alternative predicate accepts `entity`.
    pub fn size_alt_for(&self, entity: &T) -> usize {
        self.count(|s| s.matches_alt(entity))
    }

    /// Slots accepting `entity` through either predicate.
    pub fn size_compatible_for(&self, entity: &T) -> usize {
        self.count(|s| s.matches_compatible(entity))
    }

    /// Free slots whose primary predicate accepts `entity`.
    pub fn available_size_for(&self, entity: &T) -> usize {
        self.count(|s| s.is_free() && s.matches(entity))
    }

    /// Free slots whose alternative predicate accepts `entity`.
    pub fn available_size_alt_for(&self, entity: &T) -> usize {
        self.count(|s| s.is_free() && s.matches_alt(entity))
    }

    /// Free slots accepting `entity` through either predicate.
    pub fn available_size_compatible_for(&self, entity: &T) -> usize {
        self.count(|s| s.is_free() && s.matches_compatible(entity))
    }

    fn count(&self, predicate: impl Fn(&Slot<T>) -> bool) -> usize {
        self.slots.lock().iter().filter(|s| predicate(s)).count()
    }
}

fn first_duplicate_id<T>(slots: &[Slot<T>]) -> Option<SlotId> {
    let mut seen = HashSet::with_capacity(slots.len());
    slots
        .iter()
        .map(Slot::id)
        .find(|id| !seen.insert(*id))
        .cloned()
}

impl<T: std::fmt::Debug> Pool<T> {
    /// Allocate a slot to `entity`, arriving at `arrival`.
    ///
    /// Returns an unsuccessful result, not an error, when no compatible
    /// slot is free.
    pub fn check_in(&self, entity: Arc<T>, arrival: Timestamp) -> CheckInResult<T> {
        let mut slots = self.slots.lock();

        let selected = slots
            .iter()
            .position(|s| s.is_free() && s.matches(&entity))
            .map(|index| (index, false))
            .or_else(|| {
                slots
                    .iter()
                    .position(|s| s.is_free() && s.matches_alt(&entity))
                    .map(|index| (index, true))
            });

        let Some((index, via_alternative)) = selected else {
            tracing::debug!(entity = ?entity, "no compatible free slot");
            return CheckInResult { usage: None };
        };

        match slots[index].occupy(entity, arrival, via_alternative) {
            Ok(usage) => {
                tracing::debug!(
                    slot = %usage.slot_id(),
                    entity = ?usage.entity(),
                    arrival = %arrival,
                    via_alternative,
                    "checked in"
                );
                CheckInResult { usage: Some(usage) }
            }
            Err(e) => {
                // Selection only considers free slots under the same lock.
                tracing::error!(error = %e, "selected slot refused occupancy");
                CheckInResult { usage: None }
            }
        }
    }

    /// [`check_in`](Self::check_in) arriving now.
    pub fn check_in_now(&self, entity: Arc<T>) -> CheckInResult<T> {
        self.check_in(entity, Timestamp::now())
    }

    /// Release the slot held by `entity`, departing at `departure`, and
    /// price the stay.
    ///
    /// # Errors
    ///
    /// - [`PoolError::EntityNotFound`] if no slot holds this very entity.
    /// - [`PoolError::InvalidTimeRange`] if `departure` precedes arrival.
    /// - [`PoolError::Pricing`] if the pricing policy fails.
    ///
    /// The slot stays occupied on every error.
    pub fn check_out(
        &self,
        entity: &Arc<T>,
        departure: Timestamp,
    ) -> Result<CheckOutResult<T>, PoolError> {
        let mut slots = self.slots.lock();

        let Some(slot) = slots.iter_mut().find(|s| s.holds(entity)) else {
            tracing::warn!(entity = ?entity, "check-out of an entity holding no slot");
            return Err(PoolError::EntityNotFound {
                entity: format!("{entity:?}"),
            });
        };

        let closed = slot.closing(departure).map_err(|e| {
            tracing::warn!(slot = %slot.id(), error = %e, "check-out rejected");
            PoolError::from(e)
        })?;
        let price = self
            .pricing
            .price(&closed)
            .map_err(|source| PoolError::Pricing {
                slot: slot.id().clone(),
                source,
            })?;
        let usage = slot.release(departure)?;

        tracing::debug!(
            slot = %usage.slot_id(),
            entity = ?usage.entity(),
            departure = %departure,
            price = %price,
            "checked out"
        );
        Ok(CheckOutResult { usage, price })
    }

    /// [`check_out`](Self::check_out) departing now.
    pub fn check_out_now(&self, entity: &Arc<T>) -> Result<CheckOutResult<T>, PoolError> {
        self.check_out(entity, Timestamp::now())
    }
}

impl<T> std::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("Pool");
        // Pricing runs under the lock, so formatting from there must not block.
        match self.slots.try_lock() {
            Some(slots) => {
                let occupied = slots.iter().filter(|s| !s.is_free()).count();
                out.field("len", &slots.len()).field("occupied", &occupied);
            }
            None => {
                out.field("slots", &format_args!("<locked>"));
            }
        }
        out.field("pricing", &self.pricing).finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
