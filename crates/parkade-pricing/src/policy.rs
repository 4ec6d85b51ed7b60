//! # Pricing Policy Algebra
//!
//! A pricing policy maps a closed usage to an amount:
//!
//! | Primitive | Price |
//! |-----------|-------|
//! | `Fixed(a)` | `a`, whatever the duration |
//! | `PerHour { rate, count_started: false }` | `rate × whole hours` |
//! | `PerHour { rate, count_started: true }` | `rate × whole hours`, plus `rate` if a partial hour remains |
//! | `Sum(p, q)` | `p + q` |
//! | `Custom(f)` | `f(usage)` |
//!
//! So with `rate = 5 EUR`: 50 minutes costs 5 EUR per started hour and
//! 0 EUR per finished hour; 119 minutes costs 10 EUR and 5 EUR.
//!
//! All arithmetic goes through the checked `Money` operations, so a
//! currency mix or an overflow is an error, not a wrong number.

use std::sync::Arc;

use chrono::Duration;

use parkade_core::{Currency, Money, MoneyError};
use parkade_state::{Closed, Usage};

/// User-supplied pricing function.
pub type PriceFn<T> = Arc<dyn Fn(&Usage<T, Closed>) -> Result<Money, MoneyError> + Send + Sync>;

/// Pricing policy tree.
pub enum PricingPolicy<T> {
    /// Flat amount.
    Fixed(Money),
    /// Rate per elapsed hour.
    PerHour {
        /// Price of one hour.
        rate: Money,
        /// Charge a partial trailing hour as a full one.
        count_started: bool,
    },
    /// Sum of two policies.
    Sum(Box<PricingPolicy<T>>, Box<PricingPolicy<T>>),
    /// Arbitrary function of the usage.
    Custom(PriceFn<T>),
}

impl<T> PricingPolicy<T> {
    /// Flat `amount` regardless of duration.
    pub fn fixed(amount: Money) -> Self {
        Self::Fixed(amount)
    }

    /// `rate` per hour; see the module table for `count_started`.
    pub fn per_hour(rate: Money, count_started: bool) -> Self {
        Self::PerHour {
            rate,
            count_started,
        }
    }

    /// `rate` for every started hour.
    pub fn per_started_hour(rate: Money) -> Self {
        Self::per_hour(rate, true)
    }

    /// `rate` for every finished hour.
    pub fn per_finished_hour(rate: Money) -> Self {
        Self::per_hour(rate, false)
    }

    /// `rate` per started hour plus a flat `fixed` amount.
    pub fn per_started_hour_and_fixed(rate: Money, fixed: Money) -> Self {
        Self::per_started_hour(rate).and(Self::fixed(fixed))
    }

    /// `rate` per finished hour plus a flat `fixed` amount.
    pub fn per_finished_hour_and_fixed(rate: Money, fixed: Money) -> Self {
        Self::per_finished_hour(rate).and(Self::fixed(fixed))
    }

    /// Sum of two policies.
    pub fn sum(first: Self, second: Self) -> Self {
        Self::Sum(Box::new(first), Box::new(second))
    }

    /// `self + other`.
    pub fn and(self, other: Self) -> Self {
        Self::sum(self, other)
    }

    /// Policy computed by `f`.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Usage<T, Closed>) -> Result<Money, MoneyError> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Evaluate the policy against a closed usage.
    pub fn price(&self, usage: &Usage<T, Closed>) -> Result<Money, MoneyError> {
        match self {
            Self::Fixed(amount) => Ok(*amount),
            Self::PerHour {
                rate,
                count_started,
            } => per_hour_price(usage.duration(), rate, *count_started),
            Self::Sum(first, second) => first.price(usage)?.checked_add(&second.price(usage)?),
            Self::Custom(f) => f(usage),
        }
    }

    /// The one currency used by the non-custom leaves.
    ///
    /// `Ok(None)` when every leaf is custom.
    ///
    /// # Errors
    ///
    /// [`MoneyError::CurrencyMismatch`] when two leaves disagree; such a
    /// policy could never price a `Sum` successfully.
    pub fn currency(&self) -> Result<Option<Currency>, MoneyError> {
        match self {
            Self::Fixed(amount) => Ok(Some(amount.currency())),
            Self::PerHour { rate, .. } => Ok(Some(rate.currency())),
            Self::Custom(_) => Ok(None),
            Self::Sum(first, second) => match (first.currency()?, second.currency()?) {
                (Some(left), Some(right)) if left != right => Err(MoneyError::CurrencyMismatch {
                    left: left.to_string(),
                    right: right.to_string(),
                }),
                (left, right) => Ok(left.or(right)),
            },
        }
    }
}

/// `rate × whole hours of duration`, plus one `rate` when `count_started`
/// and a partial hour remains. Negative durations count as zero.
pub fn per_hour_price(
    duration: Duration,
    rate: &Money,
    count_started: bool,
) -> Result<Money, MoneyError> {
    let duration = duration.max(Duration::zero());
    let hours = duration.num_hours();
    let price = rate.checked_mul(hours)?;
    let partial = duration - Duration::hours(hours) > Duration::zero();
    if count_started && partial {
        price.checked_add(rate)
    } else {
        Ok(price)
    }
}

impl<T> Clone for PricingPolicy<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(amount) => Self::Fixed(*amount),
            Self::PerHour {
                rate,
                count_started,
            } => Self::PerHour {
                rate: *rate,
                count_started: *count_started,
            },
            Self::Sum(first, second) => Self::Sum(first.clone(), second.clone()),
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<T> std::fmt::Debug for PricingPolicy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(amount) => f.debug_tuple("Fixed").field(amount).finish(),
            Self::PerHour {
                rate,
                count_started,
            } => f
                .debug_struct("PerHour")
                .field("rate", rate)
                .field("count_started", count_started)
                .finish(),
            Self::Sum(first, second) => f.debug_tuple("Sum").field(first).field(second).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use parkade_core::{SlotId, Timestamp};
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum CarType {
        Gas,
        Electric20Kw,
        Electric50Kw,
    }

    fn euros(n: i64) -> Money {
        Money::of(n, Currency::EUR).unwrap()
    }

    fn usage_of(car: CarType, minutes: i64) -> Usage<CarType, Closed> {
        let start = Timestamp::parse("2026-01-15T06:05:00Z").unwrap();
        let end = start.checked_add(Duration::minutes(minutes)).unwrap();
        Usage::open(Arc::new(car), SlotId::new("dummy"), start, false)
            .close(end)
            .unwrap()
    }

    fn assert_price(expected_euros: i64, policy: &PricingPolicy<CarType>, minutes: i64) {
        assert_eq!(
            policy.price(&usage_of(CarType::Gas, minutes)).unwrap(),
            euros(expected_euros),
            "{policy:?} over {minutes} minutes"
        );
    }

    #[test]
    fn test_per_hour() {
        assert_price(5, &PricingPolicy::per_hour(euros(5), true), 30);
        assert_price(0, &PricingPolicy::per_hour(euros(5), false), 30);
    }

    #[test]
    fn test_half_second_past_the_hour_starts_another() {
        let start = Timestamp::parse("2026-01-15T06:00:00Z").unwrap();
        let end = Timestamp::parse("2026-01-15T07:00:00.500Z").unwrap();
        let usage = Usage::open(Arc::new(CarType::Gas), SlotId::new("0"), start, false)
            .close(end)
            .unwrap();
        assert_eq!(
            PricingPolicy::per_started_hour(euros(5)).price(&usage).unwrap(),
            euros(10)
        );
        assert_eq!(
            PricingPolicy::per_finished_hour(euros(5)).price(&usage).unwrap(),
            euros(5)
        );
    }

    #[test]
    fn test_per_finished_hour() {
        let policy = PricingPolicy::per_finished_hour(euros(5));
        assert_price(0, &policy, 30);
        assert_price(5, &policy, 60);
        assert_price(5, &policy, 119);
    }

    #[test]
    fn test_per_started_hour() {
        let policy = PricingPolicy::per_started_hour(euros(5));
        assert_price(5, &policy, 30);
        assert_price(5, &policy, 50);
        assert_price(5, &policy, 60);
        assert_price(10, &policy, 61);
        assert_price(10, &policy, 119);
    }

    #[test]
    fn test_zero_duration_costs_nothing_per_hour() {
        assert_price(0, &PricingPolicy::per_started_hour(euros(5)), 0);
    }

    #[test]
    fn test_fixed() {
        let policy = PricingPolicy::fixed(euros(5));
        assert_price(5, &policy, 30);
        assert_price(5, &policy, 60);
        assert_price(5, &policy, 119);
    }

    #[test]
    fn test_per_finished_hour_and_fixed() {
        let policy = PricingPolicy::per_finished_hour_and_fixed(euros(5), euros(1));
        assert_price(1, &policy, 30);
        assert_price(6, &policy, 60);
        assert_price(6, &policy, 119);
    }

    #[test]
    fn test_per_started_hour_and_fixed() {
        let policy = PricingPolicy::per_started_hour_and_fixed(euros(5), euros(1));
        assert_price(6, &policy, 30);
        assert_price(6, &policy, 60);
        assert_price(11, &policy, 119);
    }

    #[test]
    fn test_sum() {
        let policy = PricingPolicy::sum(
            PricingPolicy::fixed(euros(1)),
            PricingPolicy::per_finished_hour(euros(5)),
        );
        assert_price(1, &policy, 30);
        assert_price(6, &policy, 60);
        assert_price(6, &policy, 119);
    }

    #[test]
    fn test_per_hour_price_helper() {
        let two_hours = Duration::hours(2);
        assert_eq!(per_hour_price(two_hours, &euros(5), true).unwrap(), euros(10));
        assert_eq!(per_hour_price(two_hours, &euros(5), false).unwrap(), euros(10));
        let two_hours_one_minute = two_hours + Duration::minutes(1);
        assert_eq!(
            per_hour_price(two_hours_one_minute, &euros(5), true).unwrap(),
            euros(15)
        );
        assert_eq!(
            per_hour_price(two_hours_one_minute, &euros(5), false).unwrap(),
            euros(10)
        );
        assert_eq!(
            per_hour_price(Duration::minutes(-30), &euros(5), true).unwrap(),
            euros(0)
        );
    }

    #[test]
    fn test_custom_free_for_electric() {
        let paid = PricingPolicy::<CarType>::per_started_hour(euros(10));
        let policy = PricingPolicy::custom(move |usage: &Usage<CarType, Closed>| {
            match **usage.entity() {
                CarType::Electric20Kw | CarType::Electric50Kw => Ok(euros(0)),
                CarType::Gas => paid.price(usage),
            }
        });
        assert_eq!(
            policy.price(&usage_of(CarType::Electric20Kw, 5000)).unwrap(),
            euros(0)
        );
        assert_eq!(
            policy.price(&usage_of(CarType::Electric50Kw, 5000)).unwrap(),
            euros(0)
        );
        assert_eq!(policy.price(&usage_of(CarType::Gas, 90)).unwrap(), euros(20));
    }

    #[test]
    fn test_sum_of_mixed_currencies_fails() {
        let usd = Money::of(1, Currency::USD).unwrap();
        let policy = PricingPolicy::<CarType>::fixed(euros(1)).and(PricingPolicy::fixed(usd));
        assert!(matches!(
            policy.price(&usage_of(CarType::Gas, 10)),
            Err(MoneyError::CurrencyMismatch { .. })
        ));
        assert!(policy.currency().is_err());
    }

    #[test]
    fn test_currency_of_tree() {
        let policy = PricingPolicy::<CarType>::per_started_hour_and_fixed(euros(5), euros(1));
        assert_eq!(policy.currency().unwrap(), Some(Currency::EUR));
        let custom = PricingPolicy::<CarType>::custom(|_| Ok(euros(0)));
        assert_eq!(custom.currency().unwrap(), None);
        let mixed = custom.and(PricingPolicy::fixed(euros(2)));
        assert_eq!(mixed.currency().unwrap(), Some(Currency::EUR));
    }

    #[test]
    fn test_clone_and_debug() {
        let policy = PricingPolicy::<CarType>::per_started_hour_and_fixed(euros(5), euros(1));
        let copy = policy.clone();
        assert_eq!(format!("{policy:?}"), format!("{copy:?}"));
        let custom = PricingPolicy::<CarType>::custom(|_| Ok(euros(0)));
        assert_eq!(format!("{custom:?}"), "Custom(..)");
    }

    proptest! {
        /// Started-hour pricing never charges less than finished-hour
        /// pricing, and never more than one extra rate unit.
        #[test]
        fn started_hour_bounds_finished_hour(minutes in 0i64..100_000) {
            let started = PricingPolicy::<CarType>::per_started_hour(euros(5));
            let finished = PricingPolicy::<CarType>::per_finished_hour(euros(5));
            let usage = usage_of(CarType::Gas, minutes);
            let s = started.price(&usage).unwrap().minor_units();
            let f = finished.price(&usage).unwrap().minor_units();
            prop_assert!(s >= f);
            prop_assert!(s - f <= euros(5).minor_units());
            prop_assert_eq!(s == f, minutes % 60 == 0);
        }

        /// A sum prices as the sum of its parts.
        #[test]
        fn sum_is_additive(minutes in 0i64..10_000, fixed in 0i64..1_000) {
            let rate = PricingPolicy::<CarType>::per_started_hour(euros(3));
            let flat = PricingPolicy::<CarType>::fixed(euros(fixed));
            let usage = usage_of(CarType::Gas, minutes);
            let expected = rate.price(&usage).unwrap().checked_add(&flat.price(&usage).unwrap()).unwrap();
            prop_assert_eq!(rate.and(flat).price(&usage).unwrap(), expected);
        }
    }
}
