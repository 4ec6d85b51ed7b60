//! # Slot Occupancy State Machine
//!
//! A slot is one allocatable unit with an acceptance policy and at most one
//! open usage.
//!
//! ## States
//!
//! ```text
//!          occupy(entity, arrival, via_alt)
//!   FREE ───────────────────────────────────▶ OCCUPIED
//!        ◀───────────────────────────────────
//!               release(departure)
//! ```
//!
//! There is no waiting or reserved state. `is_free()` holds exactly when no
//! open usage is stored.
//!
//! ## Failure Semantics
//!
//! Every failing transition leaves the slot unchanged: occupying an
//! occupied slot is refused instead of overwriting, and a departure before
//! the arrival keeps the slot occupied.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use parkade_core::{SlotId, Timestamp};

use crate::acceptance::SharedAcceptance;
use crate::usage::{Closed, Open, Usage, UsageError};

// ─── Slot State ──────────────────────────────────────────────────────

/// Runtime occupancy state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotState {
    /// No open usage.
    Free,
    /// Holds one open usage.
    Occupied,
}

impl std::fmt::Display for SlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Free => "FREE",
            Self::Occupied => "OCCUPIED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur during slot transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// `occupy` on a slot that already holds a usage.
    #[error("slot {slot} is already occupied")]
    AlreadyOccupied {
        /// The slot.
        slot: SlotId,
    },

    /// `release` on a free slot.
    #[error("slot {slot} is not occupied")]
    NotOccupied {
        /// The slot.
        slot: SlotId,
    },

    /// Departure precedes the arrival of the open usage.
    #[error("slot {slot}: departure {departure} precedes arrival {arrival}")]
    InvalidTimeRange {
        /// The slot, still occupied.
        slot: SlotId,
        /// Recorded arrival.
        arrival: Timestamp,
        /// Rejected departure.
        departure: Timestamp,
    },
}

impl SlotError {
    fn from_usage(slot: &SlotId, err: UsageError) -> Self {
        match err {
            UsageError::InvalidTimeRange { arrival, departure } => Self::InvalidTimeRange {
                slot: slot.clone(),
                arrival,
                departure,
            },
        }
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────

/// Point-in-time copy of a slot for reporting.
pub struct SlotSnapshot<T> {
    /// Slot identifier.
    pub id: SlotId,
    /// Occupancy state at snapshot time.
    pub state: SlotState,
    /// Copy of the open usage, if occupied.
    pub occupant: Option<Usage<T, Open>>,
}

impl<T> Clone for SlotSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            state: self.state,
            occupant: self.occupant.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SlotSnapshot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotSnapshot")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("occupant", &self.occupant)
            .finish()
    }
}

// ─── The Slot ────────────────────────────────────────────────────────

/// One allocatable unit: identity, acceptance policy, optional occupant.
pub struct Slot<T> {
    id: SlotId,
    policy: SharedAcceptance<T>,
    active: Option<Usage<T, Open>>,
}

impl<T> Slot<T> {
    /// Create a free slot.
    pub fn new(id: SlotId, policy: SharedAcceptance<T>) -> Self {
        Self {
            id,
            policy,
            active: None,
        }
    }

    /// Slot identifier.
    pub fn id(&self) -> &SlotId {
        &self.id
    }

    /// Acceptance policy of this slot.
    pub fn policy(&self) -> &SharedAcceptance<T> {
        &self.policy
    }

    /// Whether the slot holds no open usage.
    pub fn is_free(&self) -> bool {
        self.active.is_none()
    }

    /// Current occupancy state.
    pub fn state(&self) -> SlotState {
        if self.is_free() {
            SlotState::Free
        } else {
            SlotState::Occupied
        }
    }

    /// Primary match, regardless of occupancy.
    pub fn matches(&self, entity: &T) -> bool {
        self.policy.accepts(entity)
    }

    /// Alternative match, regardless of occupancy.
    pub fn matches_alt(&self, entity: &T) -> bool {
        self.policy.accepts_alt(entity)
    }

    /// Primary or alternative match, regardless of occupancy.
    pub fn matches_compatible(&self, entity: &T) -> bool {
        self.policy.is_compatible(entity)
    }

    /// The open usage, if occupied.
    pub fn occupant(&self) -> Option<&Usage<T, Open>> {
        self.active.as_ref()
    }

    /// Whether this exact entity (by identity) occupies the slot.
    pub fn holds(&self, entity: &Arc<T>) -> bool {
        self.active.as_ref().is_some_and(|u| u.is_for(entity))
    }

    /// Occupy the slot (FREE → OCCUPIED) and return a snapshot of the new
    /// open usage.
    pub fn occupy(
        &mut self,
        entity: Arc<T>,
        arrival: Timestamp,
        via_alternative: bool,
    ) -> Result<Usage<T, Open>, SlotError> {
        if !self.is_free() {
            return Err(SlotError::AlreadyOccupied {
                slot: self.id.clone(),
            });
        }
        let usage = Usage::open(entity, self.id.clone(), arrival, via_alternative);
        self.active = Some(usage.clone());
        Ok(usage)
    }

    /// The closed usage `release(departure)` would produce, without
    /// changing the slot.
    pub fn closing(&self, departure: Timestamp) -> Result<Usage<T, Closed>, SlotError> {
        let active = self.active.as_ref().ok_or_else(|| SlotError::NotOccupied {
            slot: self.id.clone(),
        })?;
        active
            .close(departure)
            .map_err(|e| SlotError::from_usage(&self.id, e))
    }

    /// Release the slot (OCCUPIED → FREE) and return the closed usage.
    ///
    /// On error the slot is left exactly as it was.
    pub fn release(&mut self, departure: Timestamp) -> Result<Usage<T, Closed>, SlotError> {
        let closed = self.closing(departure)?;
        self.active = None;
        Ok(closed)
    }

    /// Point-in-time copy for reporting.
    pub fn snapshot(&self) -> SlotSnapshot<T> {
        SlotSnapshot {
            id: self.id.clone(),
            state: self.state(),
            occupant: self.active.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
