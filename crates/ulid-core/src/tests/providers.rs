use super::{monotonic_at, FixedEntropy, KNOWN_MS};
use crate::{
    Api, Clock, DefaultProvider, Error, ManualClock, MicrosecondProvider, Provider, Randomness,
    SeededEntropy, SystemClock, Timestamp, Ulid,
};
use std::sync::Arc;

#[test]
fn default_provider_reads_clock_and_entropy() {
    let clock = Arc::new(ManualClock::new_ms(KNOWN_MS));
    let api = Api::new_with(DefaultProvider::new(clock.clone(), FixedEntropy(0xAB)));
    let id = api.new().unwrap();
    assert_eq!(id.timestamp().ms(), KNOWN_MS);
    assert_eq!(id.randomness().bytes(), [0xAB; 10]);

    clock.advance_ms(5);
    assert_eq!(api.new().unwrap().timestamp().ms(), KNOWN_MS + 5);
}

#[test]
fn seeded_entropy_is_reproducible() {
    let generate = |seed| {
        let api = Api::new_with(DefaultProvider::new(
            ManualClock::new_ms(KNOWN_MS),
            SeededEntropy::new(seed),
        ));
        (0..10).map(|_| api.new().unwrap()).collect::<Vec<_>>()
    };
    assert_eq!(generate(42), generate(42));
    assert_ne!(generate(42), generate(43));
}

#[test]
fn monotonic_increments_within_a_millisecond() {
    let (_clock, api) = monotonic_at(KNOWN_MS, 0x10);
    let ids = (0..1000).map(|_| api.new().unwrap()).collect::<Vec<_>>();
    assert_eq!(ids[0].randomness().bytes(), [0x10; 10]);
    for pair in ids.windows(2) {
        assert_eq!(pair[0].timestamp(), pair[1].timestamp());
        assert_eq!(pair[0].as_u128() + 1, pair[1].as_u128());
        assert!(pair[0].to_string() < pair[1].to_string());
    }
}

#[test]
fn monotonic_draws_fresh_randomness_each_millisecond() {
    let (clock, api) = monotonic_at(KNOWN_MS, 0x10);
    let first = api.new().unwrap();
    api.new().unwrap();
    clock.advance_ms(1);
    let next = api.new().unwrap();
    assert_eq!(next.timestamp().ms(), KNOWN_MS + 1);
    assert_eq!(next.randomness(), first.randomness());
    assert!(next > first);
}

#[test]
fn monotonic_survives_clock_going_backwards() {
    let (clock, api) = monotonic_at(KNOWN_MS, 0);
    let before = api.new().unwrap();
    clock.set_ms(KNOWN_MS - 1000);
    let after = api.new().unwrap();
    assert_eq!(after.timestamp().ms(), KNOWN_MS);
    assert!(after > before);
}

#[test]
fn monotonic_fails_once_randomness_is_exhausted() {
    let (clock, api) = monotonic_at(KNOWN_MS, 0xFF);
    let last = api.new().unwrap();
    assert_eq!(last, Ulid::last_at(Timestamp::from_ms(KNOWN_MS).unwrap()));
    match api.new() {
        Err(Error::MonotonicOverflow(time)) => assert_eq!(time.ms(), KNOWN_MS),
        res => panic!("expected monotonic overflow, got {res:?}"),
    }

    // The next millisecond has a fresh randomness space
    clock.advance_ms(1);
    assert!(api.new().unwrap() > last);
}

#[test]
fn monotonic_from_timestamp_shares_the_sequence() {
    let (_clock, api) = monotonic_at(KNOWN_MS, 0);
    let time = Timestamp::from_ms(KNOWN_MS).unwrap();
    let a = api.new().unwrap();
    let b = api.from_timestamp(&time).unwrap();
    let c = api.new().unwrap();
    assert!(a < b && b < c);

    // Other milliseconds get their own randomness without disturbing the sequence
    let old = api.from_timestamp(&Timestamp::from_ms(1).unwrap()).unwrap();
    assert_eq!(old.randomness(), Randomness::MIN);
    assert!(api.new().unwrap() > c);
}

#[test]
fn monotonic_explicit_future_timestamp_does_not_hold_back_the_clock() {
    let (clock, api) = monotonic_at(KNOWN_MS, 0);
    let first = api.new().unwrap();

    let tomorrow = Timestamp::from_ms(KNOWN_MS + 86_400_000).unwrap();
    assert_eq!(api.from_timestamp(&tomorrow).unwrap().timestamp(), tomorrow);
    api.from_timestamp(&Timestamp::MAX).unwrap();

    let after = api.new().unwrap();
    assert_eq!(after.timestamp().ms(), KNOWN_MS);
    assert_eq!(after.randomness().as_u128(), first.randomness().as_u128() + 1);

    clock.advance_ms(1);
    assert_eq!(api.new().unwrap().timestamp().ms(), KNOWN_MS + 1);
}

#[test]
fn monotonic_explicit_timestamps_form_their_own_sequence() {
    let (clock, api) = monotonic_at(KNOWN_MS, 0);
    api.new().unwrap();

    let next_ms = Timestamp::from_ms(KNOWN_MS + 1).unwrap();
    let a = api.from_timestamp(&next_ms).unwrap();
    let b = api.from_timestamp(&next_ms).unwrap();
    assert!(a < b);

    // Once the clock reaches that millisecond it carries on after them
    clock.advance_ms(1);
    assert!(api.new().unwrap() > b);
}

#[test]
fn monotonic_is_ordered_across_threads() {
    let (_clock, api) = monotonic_at(KNOWN_MS, 0);
    let api = Arc::new(api);
    let threads = (0..4)
        .map(|_| {
            let api = api.clone();
            std::thread::spawn(move || (0..250).map(|_| api.new().unwrap()).collect::<Vec<_>>())
        })
        .collect::<Vec<_>>();
    let mut all = Vec::new();
    for t in threads {
        let ids = t.join().unwrap();
        assert!(ids.windows(2).all(|p| p[0] < p[1]));
        all.extend(ids);
    }
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 1000);
    assert_eq!(all[0].randomness(), Randomness::MIN);
    assert_eq!(all[999].randomness().as_u128(), 999);
}

#[test]
fn microsecond_provider_orders_within_a_millisecond() {
    let clock = Arc::new(ManualClock::default());
    let provider = MicrosecondProvider::new(clock.clone(), FixedEntropy(0xFF));

    clock.set_us(KNOWN_MS * 1000 + 123);
    let (time, randomness) = provider.new_parts().unwrap();
    assert_eq!(time.ms(), KNOWN_MS);
    assert_eq!(randomness.as_u128() >> 64, 123);
    assert_eq!(randomness.bytes()[2..], [0xFF; 8]);

    clock.set_us(KNOWN_MS * 1000 + 999);
    let (later_time, later) = provider.new_parts().unwrap();
    assert_eq!(later_time, time);
    assert!(later > randomness);
}

#[test]
fn microsecond_provider_only_uses_the_clock_for_its_own_millisecond() {
    let clock = Arc::new(ManualClock::default());
    let provider = MicrosecondProvider::new(clock.clone(), FixedEntropy(0xFF));
    clock.set_us(KNOWN_MS * 1000 + 500);

    let now = provider.randomness(Timestamp::from_ms(KNOWN_MS).unwrap()).unwrap();
    assert_eq!(now.as_u128() >> 64, 500);

    let earlier = provider.randomness(Timestamp::from_ms(KNOWN_MS - 5).unwrap()).unwrap();
    assert_eq!(earlier.as_u128() >> 64, 0);
    assert_eq!(earlier.bytes()[2..], [0xFF; 8]);
}

#[test]
fn manual_clock_saturates() {
    assert_eq!(ManualClock::new_ms(u64::MAX).microseconds().unwrap(), u64::MAX);

    let clock = ManualClock::new_ms(1);
    clock.advance_ms(u64::MAX);
    assert_eq!(clock.microseconds().unwrap(), u64::MAX);

    clock.set_ms(u64::MAX / 10);
    assert_eq!(clock.microseconds().unwrap(), u64::MAX);
}

#[test]
fn system_clock_is_after_epoch() {
    let ms = SystemClock.milliseconds().unwrap();
    let us = SystemClock.microseconds().unwrap();
    // 2020-01-01T00:00:00Z
    assert!(ms > 1_577_836_800_000);
    assert!(us / 1000 >= ms);
}
