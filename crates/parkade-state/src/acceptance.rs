//! # Acceptance Policies
//!
//! A slot decides which entities it takes through a two-tier predicate:
//!
//! - `accepts(e)` — the slot is *made for* this entity (primary match).
//! - `accepts_alt(e)` — the slot *can take* this entity when no primary
//!   slot is free (alternative match). Defaults to `false`.
//!
//! `is_compatible(e)` is the OR of both. The two tiers are independent;
//! nothing requires them to be disjoint.
//!
//! Policies are stateless and shared by reference
//! ([`SharedAcceptance`]) across every slot built from them.
//!
//! ```
//! use parkade_state::{acceptance, AcceptancePolicy};
//!
//! #[derive(Debug)]
//! struct Car { electric: bool, needs_charge: bool }
//!
//! let gas_slot = acceptance::with_alternative(
//!     |c: &Car| !c.electric,
//!     |c: &Car| !c.needs_charge,
//! );
//! let topped_up = Car { electric: true, needs_charge: false };
//! assert!(!gas_slot.accepts(&topped_up));
//! assert!(gas_slot.accepts_alt(&topped_up));
//! assert!(gas_slot.is_compatible(&topped_up));
//! ```

use std::sync::Arc;

/// Two-tier predicate evaluated against an entity.
///
/// Implementations must be total and side-effect free: the pool evaluates
/// them any number of times, in scan order, while holding its lock.
pub trait AcceptancePolicy<T>: Send + Sync {
    /// Primary match.
    fn accepts(&self, entity: &T) -> bool;

    /// Alternative match, tried only after every primary candidate failed.
    fn accepts_alt(&self, _entity: &T) -> bool {
        false
    }

    /// Primary or alternative match.
    fn is_compatible(&self, entity: &T) -> bool {
        self.accepts(entity) || self.accepts_alt(entity)
    }
}

/// Policy handle shared between slots.
pub type SharedAcceptance<T> = Arc<dyn AcceptancePolicy<T>>;

/// Single predicate; the alternative tier never matches.
#[derive(Debug, Clone, Copy)]
pub struct Only<F> {
    main: F,
}

impl<T, F> AcceptancePolicy<T> for Only<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn accepts(&self, entity: &T) -> bool {
        (self.main)(entity)
    }
}

/// Independent primary and alternative predicates.
#[derive(Debug, Clone, Copy)]
pub struct WithAlternative<F, G> {
    main: F,
    alt: G,
}

impl<T, F, G> AcceptancePolicy<T> for WithAlternative<F, G>
where
    F: Fn(&T) -> bool + Send + Sync,
    G: Fn(&T) -> bool + Send + Sync,
{
    fn accepts(&self, entity: &T) -> bool {
        (self.main)(entity)
    }

    fn accepts_alt(&self, entity: &T) -> bool {
        (self.alt)(entity)
    }
}

/// Accepts every entity as a primary match.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAny;

impl<T> AcceptancePolicy<T> for AcceptAny {
    fn accepts(&self, _entity: &T) -> bool {
        true
    }
}

/// Build a policy from a single predicate.
pub fn only<T, F>(main: F) -> SharedAcceptance<T>
where
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Arc::new(Only { main })
}

/// Build a policy from a primary and an alternative predicate.
pub fn with_alternative<T, F, G>(main: F, alt: G) -> SharedAcceptance<T>
where
    F: Fn(&T) -> bool + Send + Sync + 'static,
    G: Fn(&T) -> bool + Send + Sync + 'static,
{
    Arc::new(WithAlternative { main, alt })
}

/// Policy accepting everything.
pub fn any<T>() -> SharedAcceptance<T> {
    Arc::new(AcceptAny)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_never_matches_alternative() {
        let even = only(|n: &u32| n % 2 == 0);
        assert!(even.accepts(&4));
        assert!(!even.accepts(&3));
        assert!(!even.accepts_alt(&4));
        assert!(!even.accepts_alt(&3));
        assert!(!even.is_compatible(&3));
    }

    #[test]
    fn test_with_alternative_wires_both_tiers() {
        let policy = with_alternative(|n: &u32| *n < 10, |n: &u32| *n < 20);
        assert!(policy.accepts(&5));
        assert!(policy.accepts_alt(&5));
        assert!(!policy.accepts(&15));
        assert!(policy.accepts_alt(&15));
        assert!(policy.is_compatible(&15));
        assert!(!policy.is_compatible(&25));
    }

    #[test]
    fn test_any_accepts_everything() {
        let policy = any::<&str>();
        assert!(policy.accepts(&"anything"));
        assert!(!policy.accepts_alt(&"anything"));
    }

    #[test]
    fn test_shared_handle_is_the_same_policy() {
        let policy = only(|n: &i32| *n > 0);
        let clone = Arc::clone(&policy);
        assert!(Arc::ptr_eq(&policy, &clone));
        assert_eq!(policy.accepts(&1), clone.accepts(&1));
    }
}
