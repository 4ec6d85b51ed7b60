//! # parkade-state — Slot and Usage State Machines
//!
//! ## State Machines
//!
//! - **Usage** (`usage.rs`): one occupancy episode, `Open → Closed`, encoded
//!   with the typestate pattern. `Usage<T, Open>` has `.close()`;
//!   `Usage<T, Closed>` has `.departure()` and `.duration()` and no way back.
//!
//! - **Slot** (`slot.rs`): `Free ⇄ Occupied`. A slot owns at most one open
//!   usage. `occupy` and `release` are the only transitions.
//!
//! ## Acceptance
//!
//! `acceptance.rs` defines the two-tier predicate every slot carries: a
//! primary `accepts` and a fallback `accepts_alt`.
//!
//! ## Snapshots
//!
//! Everything handed out of a slot is an independent `Usage` value. The
//! entity itself is shared as `Arc<T>` and never mutated here.

pub mod acceptance;
pub mod slot;
pub mod usage;

// ─── Acceptance re-exports ──────────────────────────────────────────

pub use acceptance::{AcceptancePolicy, SharedAcceptance};

// ─── Usage re-exports ───────────────────────────────────────────────

pub use usage::{Closed, Open, Usage, UsageError, UsageState};

// ─── Slot re-exports ────────────────────────────────────────────────

pub use slot::{Slot, SlotError, SlotSnapshot, SlotState};
