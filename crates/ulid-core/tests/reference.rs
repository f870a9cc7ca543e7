use ulid_core::{Randomness, Timestamp, Ulid};
use ulid_test_utils::{arbitrary_ulid, fixed_api, seeded_monotonic_api, ULID_1, ULID_2, VECTORS};

#[test]
fn known_vectors() {
    for v in VECTORS {
        let id: Ulid = v.ulid.parse().unwrap();
        assert_eq!(id.as_u128(), v.int, "{v:?}");
        assert_eq!(id.to_string(), v.ulid);
        assert_eq!(id.timestamp().to_string(), v.timestamp);
        assert_eq!(id.timestamp().ms(), v.timestamp_ms);
        assert_eq!(id.randomness().to_string(), v.randomness);
        assert_eq!(id.to_uuid().to_string(), v.uuid);
        assert_eq!(
            id.timestamp()
                .datetime()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            v.datetime
        );
        assert_eq!(ulid_core::parse(v.uuid).unwrap(), id);
        assert_eq!(ulid_core::parse(&v.int.to_string()).unwrap(), id);
    }
    assert!(ULID_1 < ULID_2);
}

#[test]
fn matches_reference_encoder() {
    let mut ids = VECTORS
        .iter()
        .map(|v| Ulid::from_u128(v.int))
        .collect::<Vec<_>>();
    ids.extend([Ulid::MIN, Ulid::MAX]);
    for id in ids {
        let reference = ulid::Ulid(id.as_u128());
        assert_eq!(id.to_string(), reference.to_string());
        assert_eq!(id.timestamp().ms(), reference.timestamp_ms());
        assert_eq!(
            ulid::Ulid::from_string(&id.to_string()).unwrap().0,
            id.as_u128()
        );
    }
}

#[test]
fn fuzz_matches_reference_encoder() {
    bolero::check!().with_type::<u128>().for_each(|v| {
        let id = Ulid::from_u128(*v);
        assert_eq!(id.to_string(), ulid::Ulid(*v).to_string());
    });
}

#[test]
fn fuzz_arbitrary_ulids_roundtrip() {
    bolero::check!().for_each(|data: &[u8]| {
        if let Ok(id) = arbitrary_ulid(data) {
            assert_eq!(id.to_string().parse::<Ulid>().unwrap(), id);
        }
    });
}

#[test]
fn fixed_api_is_deterministic() {
    let (clock, api) = fixed_api(VECTORS[1].timestamp_ms, 0);
    assert_eq!(
        api.new().unwrap(),
        Ulid::first_at(Timestamp::from_ms(VECTORS[1].timestamp_ms).unwrap())
    );
    clock.advance_ms(1);
    assert_eq!(
        api.new().unwrap().timestamp().ms(),
        VECTORS[1].timestamp_ms + 1
    );
}

#[test]
fn seeded_monotonic_sequences_replay() {
    let run = || {
        let (clock, api) = seeded_monotonic_api(VECTORS[2].timestamp_ms, 7);
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.extend((0..100).map(|_| api.new().unwrap()));
            clock.advance_ms(1);
        }
        ids
    };
    let ids = run();
    assert_eq!(ids, run());
    assert!(ids.windows(2).all(|p| p[0] < p[1]));
    assert_ne!(ids[100].randomness(), Randomness::MIN);
}
