//! Property tests over random check-in/check-out sequences.

use std::sync::Arc;

use chrono::Duration;
use parkade_core::{Currency, Money, Timestamp};
use parkade_pool::{Pool, PoolBuilder};
use parkade_pricing::PricingPolicy;
use proptest::prelude::*;

#[derive(Debug)]
struct Vehicle {
    small: bool,
}

#[derive(Debug, Clone)]
enum Op {
    Arrive { small: bool },
    Leave { pick: usize, minutes: i64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(|small| Op::Arrive { small }),
        (any::<usize>(), 0i64..600).prop_map(|(pick, minutes)| Op::Leave { pick, minutes }),
    ]
}

/// Small-only slots, then large slots that also take small vehicles.
fn pool(small_slots: usize, large_slots: usize) -> Pool<Vehicle> {
    PoolBuilder::new()
        .add_slots_fn(|v: &Vehicle| v.small, small_slots)
        .add_slots_with_alternative(|v: &Vehicle| !v.small, |v: &Vehicle| v.small, large_slots)
        .pricing_policy(PricingPolicy::per_started_hour(
            Money::of(2, Currency::EUR).unwrap(),
        ))
        .build()
        .unwrap()
}

fn start() -> Timestamp {
    Timestamp::parse("2026-03-01T08:00:00Z").unwrap()
}

proptest! {
    #[test]
    fn occupancy_matches_model(
        small_slots in 1usize..6,
        large_slots in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let pool = pool(small_slots, large_slots);
        let probe_small = Vehicle { small: true };
        let probe_large = Vehicle { small: false };
        let mut parked: Vec<Arc<Vehicle>> = Vec::new();

        for op in ops {
            match op {
                Op::Arrive { small } => {
                    let free_before = if small {
                        pool.available_size_compatible_for(&probe_small)
                    } else {
                        pool.available_size_for(&probe_large)
                    };
                    let vehicle = Arc::new(Vehicle { small });
                    let result = pool.check_in(Arc::clone(&vehicle), start());
                    prop_assert_eq!(result.is_successful(), free_before > 0);
                    if let Some(usage) = result.usage() {
                        // Small vehicles only use a large slot once small ones are gone.
                        if usage.via_alternative() {
                            prop_assert_eq!(pool.available_size_for(&probe_small), 0);
                        }
                        parked.push(vehicle);
                    }
                }
                Op::Leave { pick, minutes } => {
                    if parked.is_empty() {
                        continue;
                    }
                    let vehicle = parked.swap_remove(pick % parked.len());
                    let departure = start().checked_add(Duration::minutes(minutes)).unwrap();
                    let out = pool.check_out(&vehicle, departure).unwrap();
                    let hours = (minutes + 59) / 60;
                    prop_assert_eq!(out.price().minor_units(), hours * 200);
                    prop_assert!(pool.check_out(&vehicle, departure).unwrap_err().is_entity_not_found());
                }
            }

            prop_assert_eq!(pool.occupied_len(), parked.len());
            let free = pool.available_size_compatible_for(&probe_small);
            prop_assert_eq!(free, small_slots + large_slots - parked.len());
        }
    }

    #[test]
    fn earlier_departure_never_frees_slot(back in 1i64..10_000) {
        let pool = pool(1, 1);
        let vehicle = Arc::new(Vehicle { small: true });
        let arrival = start();
        prop_assert!(pool.check_in(Arc::clone(&vehicle), arrival).is_successful());

        let departure = arrival.checked_add(Duration::seconds(-back)).unwrap();
        let err = pool.check_out(&vehicle, departure).unwrap_err();
        prop_assert!(err.is_invalid_time_range());
        prop_assert_eq!(pool.occupied_len(), 1);
    }
}
