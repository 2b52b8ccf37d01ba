//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store semantics over generated keys and lifetimes.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;

use crate::cache::{CacheKey, CacheStore, Lifetime, Payload, ResponseHandle, TimeUnit};
use crate::clock::ManualClock;

// == Strategies ==
fn address_strategy() -> impl Strategy<Value = String> {
    "/[a-z0-9/:_-]{0,32}".prop_map(|s| s)
}

fn key_strategy() -> impl Strategy<Value = CacheKey> {
    (address_strategy(), proptest::option::of("[a-z0-9:]{1,8}"))
        .prop_map(|(address, disambiguator)| CacheKey::new(address, disambiguator))
}

fn unit_strategy() -> impl Strategy<Value = TimeUnit> {
    prop_oneof![
        Just(TimeUnit::Seconds),
        Just(TimeUnit::Minutes),
        Just(TimeUnit::Hours),
        Just(TimeUnit::Days),
    ]
}

fn lifetime_strategy() -> impl Strategy<Value = Lifetime> {
    (0u64..1000, unit_strategy()).prop_map(|(amount, unit)| Lifetime::new(amount, unit))
}

fn new_store() -> (CacheStore, ManualClock) {
    let clock = ManualClock::default();
    (CacheStore::with_clock(Arc::new(clock.clone())), clock)
}

fn store_text(store: &mut CacheStore, key: &CacheKey, lifetime: Lifetime, body: &str) {
    store.store(
        key.clone(),
        lifetime,
        Payload::Text(body.to_string()),
        200,
        Arc::new(ResponseHandle::default()),
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing under a key and fetching it back yields the latest store,
    // no matter how many stores happened
    #[test]
    fn prop_last_store_wins(
        ops in prop::collection::vec((key_strategy(), "[a-z]{1,16}"), 1..40)
    ) {
        let (mut store, _clock) = new_store();
        let mut model: HashMap<CacheKey, String> = HashMap::new();

        for (key, body) in &ops {
            store_text(&mut store, key, Lifetime::default(), body);
            model.insert(key.clone(), body.clone());
        }

        prop_assert_eq!(store.len(), model.len());
        for (key, body) in &model {
            let entry = store.fetch(key).unwrap();
            prop_assert_eq!(entry.payload.as_text(), Some(body.as_str()));
        }
    }

    // Entries stay valid strictly before their lifetime elapses and are
    // stale from then on, while fetch keeps returning them
    #[test]
    fn prop_validity_follows_lifetime(
        key in key_strategy(),
        lifetime in lifetime_strategy(),
        elapsed_secs in 0i64..200_000,
    ) {
        let (mut store, clock) = new_store();
        store_text(&mut store, &key, lifetime, "body");

        clock.advance(Duration::seconds(elapsed_secs));
        let expected_valid = Duration::seconds(elapsed_secs) < lifetime.as_duration();

        prop_assert_eq!(store.fetch_valid(&key).is_some(), expected_valid);
        prop_assert!(store.fetch(&key).is_some());
    }

    // Disambiguated keys on the same address never collide with each other
    // or with the bare address
    #[test]
    fn prop_disambiguators_do_not_collide(
        address in address_strategy(),
        a in "[a-z0-9]{1,8}",
        b in "[a-z0-9]{1,8}",
    ) {
        prop_assume!(a != b);
        let (mut store, _clock) = new_store();
        let key_a = CacheKey::with_disambiguator(address.clone(), a.clone());
        let key_b = CacheKey::with_disambiguator(address.clone(), b.clone());

        store_text(&mut store, &key_a, Lifetime::default(), &a);
        store_text(&mut store, &key_b, Lifetime::default(), &b);

        prop_assert_eq!(store.len(), 2);
        prop_assert_eq!(store.fetch(&key_a).unwrap().payload.as_text(), Some(a.as_str()));
        prop_assert_eq!(store.fetch(&key_b).unwrap().payload.as_text(), Some(b.as_str()));
        prop_assert!(store.fetch(&CacheKey::address(address)).is_none());
    }

    // Clearing leaves nothing behind
    #[test]
    fn prop_clear_removes_everything(keys in prop::collection::vec(key_strategy(), 0..30)) {
        let (mut store, _clock) = new_store();
        for key in &keys {
            store_text(&mut store, key, Lifetime::default(), "x");
        }

        store.clear_cache();

        prop_assert!(store.is_empty());
        for key in &keys {
            prop_assert!(store.fetch(key).is_none());
        }
    }

    // A lifetime survives a Display/FromStr round trip
    #[test]
    fn prop_lifetime_parse_display(lifetime in lifetime_strategy()) {
        let parsed: Lifetime = lifetime.to_string().parse().unwrap();
        prop_assert_eq!(parsed, lifetime);
    }
}
