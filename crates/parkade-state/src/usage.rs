//! # Usage Typestate Machine
//!
//! A `Usage` is one occupancy episode: which entity sat in which slot, from
//! when, and whether the slot was taken through its alternative predicate.
//!
//! ## States
//!
//! ```text
//! Open ──close(departure)──▶ Closed (terminal)
//! ```
//!
//! `Usage<T, Open>` is created at check-in with no departure.
//! `Usage<T, Closed>` carries a departure `>= arrival`; it is a terminal,
//! immutable snapshot and has no transition methods at all.
//!
//! `close` borrows the open usage and returns a *new* closed value, so a
//! rejected departure leaves the open record exactly as it was.
//!
//! ```compile_fail
//! use std::sync::Arc;
//! use parkade_core::{SlotId, Timestamp};
//! use parkade_state::usage::*;
//!
//! let open = Usage::open(Arc::new("car"), SlotId::new("0"), Timestamp::now(), false);
//! let closed = open.close(Timestamp::now()).unwrap();
//! // ERROR: no method named `close` found for `Usage<&str, Closed>`
//! let _again = closed.close(Timestamp::now());
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Duration;
use thiserror::Error;

use parkade_core::{SlotId, Timestamp};

// ─── State Types ─────────────────────────────────────────────────────

/// Usage state: entity is in the slot, no departure yet.
#[derive(Debug, Clone, Copy)]
pub struct Open;

/// Usage state: entity has left (terminal).
#[derive(Debug, Clone, Copy)]
pub struct Closed;

mod private {
    pub trait Sealed {}
    impl Sealed for super::Open {}
    impl Sealed for super::Closed {}
}

/// Marker trait for usage states. Sealed.
pub trait UsageState: private::Sealed + std::fmt::Debug {
    /// Canonical state name.
    fn name() -> &'static str;

    /// Whether no further transition exists.
    fn is_terminal() -> bool {
        false
    }
}

impl UsageState for Open {
    fn name() -> &'static str {
        "OPEN"
    }
}

impl UsageState for Closed {
    fn name() -> &'static str {
        "CLOSED"
    }
    fn is_terminal() -> bool {
        true
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised while closing a usage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Departure precedes arrival.
    #[error("departure {departure} precedes arrival {arrival}")]
    InvalidTimeRange {
        /// Recorded arrival.
        arrival: Timestamp,
        /// Rejected departure.
        departure: Timestamp,
    },
}

// ─── The Usage ───────────────────────────────────────────────────────

/// One occupancy episode, parameterized by its lifecycle state.
pub struct Usage<T, S: UsageState> {
    entity: Arc<T>,
    slot_id: SlotId,
    arrival: Timestamp,
    via_alternative: bool,
    departure: Option<Timestamp>,
    _state: PhantomData<S>,
}

impl<T, S: UsageState> Usage<T, S> {
    /// The occupying entity.
    pub fn entity(&self) -> &Arc<T> {
        &self.entity
    }

    /// Slot this usage belongs to.
    pub fn slot_id(&self) -> &SlotId {
        &self.slot_id
    }

    /// Arrival time.
    pub fn arrival(&self) -> Timestamp {
        self.arrival
    }

    /// Whether the slot was selected through its alternative predicate.
    pub fn via_alternative(&self) -> bool {
        self.via_alternative
    }

    /// Whether `entity` is the very entity (same allocation) held here.
    pub fn is_for(&self, entity: &Arc<T>) -> bool {
        Arc::ptr_eq(&self.entity, entity)
    }

    /// Canonical state name (`"OPEN"` / `"CLOSED"`).
    pub fn state_name(&self) -> &'static str {
        S::name()
    }

    /// Whether the usage is terminal.
    pub fn is_terminal(&self) -> bool {
        S::is_terminal()
    }
}

impl<T> Usage<T, Open> {
    /// Start an occupancy episode.
    pub fn open(entity: Arc<T>, slot_id: SlotId, arrival: Timestamp, via_alternative: bool) -> Self {
        Self {
            entity,
            slot_id,
            arrival,
            via_alternative,
            departure: None,
            _state: PhantomData,
        }
    }

    /// Closed snapshot of this usage departing at `departure` (OPEN → CLOSED).
    ///
    /// # Errors
    ///
    /// [`UsageError::InvalidTimeRange`] if `departure < arrival`. Equal
    /// timestamps are allowed.
    pub fn close(&self, departure: Timestamp) -> Result<Usage<T, Closed>, UsageError> {
        if departure < self.arrival {
            return Err(UsageError::InvalidTimeRange {
                arrival: self.arrival,
                departure,
            });
        }
        Ok(Usage {
            entity: Arc::clone(&self.entity),
            slot_id: self.slot_id.clone(),
            arrival: self.arrival,
            via_alternative: self.via_alternative,
            departure: Some(departure),
            _state: PhantomData,
        })
    }

    /// Time spent in the slot as of `now`, zero if `now` precedes arrival.
    pub fn elapsed_at(&self, now: Timestamp) -> Duration {
        now.duration_since(self.arrival).max(Duration::zero())
    }
}

impl<T> Usage<T, Closed> {
    /// Departure time.
    pub fn departure(&self) -> Timestamp {
        // Always set for a closed usage.
        self.departure.unwrap_or(self.arrival)
    }

    /// Time between arrival and departure; never negative.
    pub fn duration(&self) -> Duration {
        self.departure().duration_since(self.arrival)
    }
}

impl<T, S: UsageState> Clone for Usage<T, S> {
    fn clone(&self) -> Self {
        Self {
            entity: Arc::clone(&self.entity),
            slot_id: self.slot_id.clone(),
            arrival: self.arrival,
            via_alternative: self.via_alternative,
            departure: self.departure,
            _state: PhantomData,
        }
    }
}

impl<T: std::fmt::Debug, S: UsageState> std::fmt::Debug for Usage<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Usage")
            .field("state", &S::name())
            .field("entity", &self.entity)
            .field("slot_id", &self.slot_id)
            .field("arrival", &self.arrival)
            .field("via_alternative", &self.via_alternative)
            .field("departure", &self.departure)
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
