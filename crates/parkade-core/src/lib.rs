//! # parkade-core — Foundational Types
//!
//! Primitives shared by every other crate in the workspace. It depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **UTC-only timestamps.** `Timestamp` is always UTC at full clock
//!    precision, so arrival/departure ordering is a plain comparison.
//!
//! 2. **Integer money.** `Money` stores minor units (`i64`) with an explicit
//!    `Currency`. All arithmetic is checked; mixing currencies is an error,
//!    never a silent conversion.
//!
//! 3. **Newtype identifiers.** A `SlotId` is not a bare `String`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `parkade-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod money;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::{MoneyError, ParkadeError};
pub use identity::SlotId;
pub use money::{Currency, Money};
pub use temporal::Timestamp;
