use crate::{ids::impl_for_value, Error, Part};
use std::time::Duration;
use web_time::SystemTime;

pub trait SystemTimeExt {
    fn ms_since_posix(&self) -> crate::Result<u64>;

    fn us_since_posix(&self) -> crate::Result<u64>;

    fn from_ms_since_posix(ms: u64) -> SystemTime;
}

impl SystemTimeExt for SystemTime {
    fn ms_since_posix(&self) -> crate::Result<u64> {
        self.duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| Error::InvalidTime(*self))?
            .as_millis()
            .try_into()
            .map_err(|_| Error::InvalidTime(*self))
    }

    fn us_since_posix(&self) -> crate::Result<u64> {
        self.duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| Error::InvalidTime(*self))?
            .as_micros()
            .try_into()
            .map_err(|_| Error::InvalidTime(*self))
    }

    fn from_ms_since_posix(ms: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(ms)
    }
}

/// Milliseconds since UNIX_EPOCH, restricted to the 48 bits a ULID can hold
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "u64", into = "u64")
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const MIN: Timestamp = Timestamp(0);
    pub const MAX: Timestamp = Timestamp((1 << Part::Timestamp.bits()) - 1);

    pub fn now() -> crate::Result<Timestamp> {
        Timestamp::from_system_time(SystemTime::now())
    }

    pub fn from_ms(ms: u64) -> crate::Result<Timestamp> {
        if ms > Timestamp::MAX.0 {
            return Err(Error::overflow(Part::Timestamp));
        }
        Ok(Timestamp(ms))
    }

    /// Build a timestamp from (possibly fractional) seconds since UNIX_EPOCH
    ///
    /// Sub-millisecond precision is truncated.
    pub fn from_seconds(seconds: f64) -> crate::Result<Timestamp> {
        if !seconds.is_finite() {
            return Err(Error::NotFinite {
                part: Part::Timestamp,
            });
        }
        if seconds < 0.0 {
            return Err(Error::Negative {
                part: Part::Timestamp,
            });
        }
        let ms = (seconds * 1000.0).trunc();
        if ms > Timestamp::MAX.0 as f64 {
            return Err(Error::overflow(Part::Timestamp));
        }
        Timestamp::from_ms(ms as u64)
    }

    pub fn from_system_time(time: SystemTime) -> crate::Result<Timestamp> {
        Timestamp::from_ms(time.ms_since_posix()?).map_err(|_| Error::InvalidTime(time))
    }

    pub fn from_bytes(bytes: [u8; 6]) -> Timestamp {
        let mut buf = [0; 8];
        buf[2..].copy_from_slice(&bytes);
        Timestamp(u64::from_be_bytes(buf))
    }

    pub(crate) fn try_from_u128(value: u128) -> crate::Result<Timestamp> {
        u64::try_from(value)
            .map_err(|_| Error::overflow(Part::Timestamp))
            .and_then(Timestamp::from_ms)
    }

    pub const fn ms(&self) -> u64 {
        self.0
    }

    pub fn bytes(&self) -> [u8; 6] {
        let mut res = [0; 6];
        res.copy_from_slice(&self.0.to_be_bytes()[2..]);
        res
    }

    pub fn seconds(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub fn system_time(&self) -> SystemTime {
        SystemTime::from_ms_since_posix(self.0)
    }

    pub fn datetime(&self) -> chrono::DateTime<chrono::Utc> {
        // All 48-bit millisecond values are within chrono's supported range
        chrono::DateTime::from_timestamp_millis(self.0 as i64)
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MAX_UTC)
    }
}

impl TryFrom<u64> for Timestamp {
    type Error = Error;

    fn try_from(ms: u64) -> crate::Result<Timestamp> {
        Timestamp::from_ms(ms)
    }
}

impl From<Timestamp> for u64 {
    fn from(t: Timestamp) -> u64 {
        t.0
    }
}

impl From<[u8; 6]> for Timestamp {
    fn from(bytes: [u8; 6]) -> Timestamp {
        Timestamp::from_bytes(bytes)
    }
}

impl_for_value!(Timestamp, Part::Timestamp);

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Timestamp {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Timestamp(u.int_in_range(0..=Timestamp::MAX.0)?))
    }
}
