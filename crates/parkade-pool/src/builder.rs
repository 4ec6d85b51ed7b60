//! Pool construction.
//!
//! Slots keep the order in which they are added; that order is the scan
//! order of every check-in.

use parkade_core::SlotId;
use parkade_pricing::{PricingPolicy, Tariff};
use parkade_state::{acceptance, SharedAcceptance, Slot};

use crate::config::PoolConfig;
use crate::error::ConfigurationError;
use crate::pool::Pool;

/// Collects slots and a pricing policy, then validates them into a [`Pool`].
///
/// ```
/// use parkade_core::{Currency, Money};
/// use parkade_pool::PoolBuilder;
/// use parkade_pricing::PricingPolicy;
///
/// let pool = PoolBuilder::<u32>::new()
///     .add_slots_fn(|n: &u32| n % 2 == 0, 2)
///     .pricing_policy(PricingPolicy::fixed(Money::of(3, Currency::EUR).unwrap()))
///     .build()
///     .unwrap();
/// assert_eq!(pool.len(), 2);
/// ```
pub struct PoolBuilder<T> {
    slots: Vec<Slot<T>>,
    pricing: Option<PricingPolicy<T>>,
    tariff: Option<Tariff>,
    auto_id_prefix: String,
    next_auto_id: usize,
}

impl<T> Default for PoolBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PoolBuilder<T> {
    /// Empty builder with default configuration.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Empty builder using `config` for auto ids and fallback pricing.
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            slots: Vec::new(),
            pricing: None,
            tariff: config.tariff,
            auto_id_prefix: config.auto_id_prefix,
            next_auto_id: config.auto_id_start,
        }
    }

    /// Append a slot with an explicit id.
    pub fn add_slot(mut self, id: impl Into<SlotId>, policy: SharedAcceptance<T>) -> Self {
        self.slots.push(Slot::new(id.into(), policy));
        self
    }

    /// Append a slot with a generated id.
    pub fn add_auto_slot(mut self, policy: SharedAcceptance<T>) -> Self {
        let id = SlotId::auto(&self.auto_id_prefix, self.next_auto_id);
        self.next_auto_id += 1;
        self.slots.push(Slot::new(id, policy));
        self
    }

    /// Append `n` slots sharing one policy, with generated ids.
    pub fn add_slots(self, policy: SharedAcceptance<T>, n: usize) -> Self {
        (0..n).fold(self, |builder, _| builder.add_auto_slot(policy.clone()))
    }

    /// Append a slot accepting whatever `main` accepts.
    pub fn add_slot_fn<F>(self, id: impl Into<SlotId>, main: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.add_slot(id, acceptance::only(main))
    }

    /// Append `n` slots accepting whatever `main` accepts.
    pub fn add_slots_fn<F>(self, main: F, n: usize) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.add_slots(acceptance::only(main), n)
    }

    /// Append `n` slots with a primary and an alternative predicate.
    pub fn add_slots_with_alternative<F, G>(self, main: F, alt: G, n: usize) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
        G: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.add_slots(acceptance::with_alternative(main, alt), n)
    }

    /// Set the pricing policy. Takes precedence over a configured tariff.
    pub fn pricing_policy(mut self, policy: PricingPolicy<T>) -> Self {
        self.pricing = Some(policy);
        self
    }

    /// Number of slots added so far.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Validate and assemble the pool.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Tariff`] if the configured tariff is invalid,
    /// then whatever [`Pool::from_parts`] rejects.
    pub fn build(self) -> Result<Pool<T>, ConfigurationError> {
        let pricing = match (self.pricing, self.tariff) {
            (Some(policy), _) => Some(policy),
            (None, Some(tariff)) => Some(tariff.to_policy()?),
            (None, None) => None,
        };
        Pool::from_parts(self.slots, pricing)
    }
}

impl<T> std::fmt::Debug for PoolBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolBuilder")
            .field("slots", &self.slots.len())
            .field("pricing", &self.pricing)
            .field("tariff", &self.tariff)
            .field("next_auto_id", &self.next_auto_id)
            .finish()
    }
}
