//! # parkade-pool — Allocation Engine
//!
//! A [`Pool`] owns an ordered list of slots and one pricing policy. It is
//! the only entry point that mutates slots.
//!
//! ## Check-in
//!
//! 1. First free slot, in insertion order, whose primary predicate accepts
//!    the entity.
//! 2. Only if step 1 found nothing: first free slot whose alternative
//!    predicate accepts it.
//! 3. Otherwise an unsuccessful [`CheckInResult`]. Running out of space is
//!    not an error.
//!
//! ## Check-out
//!
//! Locate the slot holding the entity (identity, not equality), close the
//! usage, price it, free the slot. Unknown entities and departures before
//! arrival are errors; on any error the slot stays occupied.
//!
//! ## Concurrency
//!
//! One `parking_lot::Mutex` guards the slot list. Check-in, check-out and
//! the counting queries each hold it for their whole scan, so counts are
//! strictly consistent with every completed check-in/check-out. Custom
//! pricing functions run under that lock and must not call back into the
//! pool.
//!
//! ## Construction
//!
//! [`PoolBuilder`] collects slots and the pricing policy and validates
//! them in [`PoolBuilder::build`]. [`PoolConfig`] supplies auto-id and
//! tariff defaults from the environment.

pub mod builder;
pub mod config;
pub mod error;
pub mod pool;

pub use builder::PoolBuilder;
pub use config::{ConfigError, PoolConfig};
pub use error::{ConfigurationError, PoolError};
pub use pool::{CheckInResult, CheckOutResult, Pool};
