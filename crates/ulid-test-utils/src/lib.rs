use std::sync::Arc;
use ulid_core::{
    Api, DefaultProvider, EntropySource, ManualClock, MonotonicProvider, SeededEntropy, Ulid,
};

/// A ULID together with its other known representations
#[derive(Clone, Copy, Debug)]
pub struct Vector {
    pub ulid: &'static str,
    pub int: u128,
    pub timestamp: &'static str,
    pub timestamp_ms: u64,
    pub randomness: &'static str,
    pub uuid: &'static str,
    pub datetime: &'static str,
}

pub const VECTORS: &[Vector] = &[
    Vector {
        ulid: "00000000000000000000000000",
        int: 0,
        timestamp: "0000000000",
        timestamp_ms: 0,
        randomness: "0000000000000000",
        uuid: "00000000-0000-0000-0000-000000000000",
        datetime: "1970-01-01T00:00:00.000Z",
    },
    Vector {
        ulid: "01ARZ3NDEKTSV4RRFFQ69G5FAV",
        int: 1777027686520646174104517696511196507,
        timestamp: "01ARZ3NDEK",
        timestamp_ms: 1469922850259,
        randomness: "TSV4RRFFQ69G5FAV",
        uuid: "01563e3a-b5d3-d676-4c61-efb99302bd5b",
        datetime: "2016-07-30T23:54:10.259Z",
    },
    Vector {
        ulid: "01BX5ZZKBKACTAV9WEVGEMMVRZ",
        int: 1824037644831285921095405231938367263,
        timestamp: "01BX5ZZKBK",
        timestamp_ms: 1508808576371,
        randomness: "ACTAV9WEVGEMMVRZ",
        uuid: "015f4bff-cd73-5334-ada7-8edc1d4a6f1f",
        datetime: "2017-10-24T01:29:36.371Z",
    },
];

pub const ULID_1: Ulid = Ulid::from_u128(VECTORS[1].int);
pub const ULID_2: Ulid = Ulid::from_u128(VECTORS[2].int);

/// Fills every requested byte with the same value
#[derive(Clone, Copy, Debug)]
pub struct FixedEntropy(pub u8);

impl EntropySource for FixedEntropy {
    fn fill(&self, buf: &mut [u8]) -> anyhow::Result<()> {
        buf.fill(self.0);
        Ok(())
    }
}

pub type ManualApi<P> = (Arc<ManualClock>, Api<P>);

/// API with a clock stopped at `ms` that only moves when told to
pub fn fixed_api(ms: u64, byte: u8) -> ManualApi<DefaultProvider<Arc<ManualClock>, FixedEntropy>> {
    let clock = Arc::new(ManualClock::new_ms(ms));
    let api = Api::new_with(DefaultProvider::new(clock.clone(), FixedEntropy(byte)));
    (clock, api)
}

pub fn seeded_monotonic_api(
    ms: u64,
    seed: u64,
) -> ManualApi<MonotonicProvider<Arc<ManualClock>, SeededEntropy>> {
    let clock = Arc::new(ManualClock::new_ms(ms));
    let api = Api::new_with(MonotonicProvider::new(clock.clone(), SeededEntropy::new(seed)));
    (clock, api)
}

/// Build a ULID out of fuzzer-provided bytes
pub fn arbitrary_ulid(data: &[u8]) -> arbitrary::Result<Ulid> {
    arbitrary::Arbitrary::arbitrary(&mut arbitrary::Unstructured::new(data))
}
