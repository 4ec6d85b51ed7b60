//! # parkade-pricing — Pricing Policies
//!
//! - **Policy** (`policy.rs`): the `PricingPolicy<T>` algebra. Three
//!   primitives (`Fixed`, `PerHour`, `Sum`) plus `Custom` closures; the
//!   named shortcuts (`per_started_hour`, `per_finished_hour_and_fixed`, ...)
//!   are compositions of the primitives.
//!
//! - **Tariff** (`tariff.rs`): a serde description of a policy, so a pool's
//!   pricing can come from YAML or JSON configuration.
//!
//! Policies are immutable values. Evaluation is a recursive fold over the
//! tree and only reads the closed usage.

pub mod policy;
pub mod tariff;

pub use policy::{per_hour_price, PriceFn, PricingPolicy};
pub use tariff::{Tariff, TariffError};
