//! Conversions from the many primitive representations of timestamps and
//! randomness accepted by [`Api::from_timestamp`](crate::Api::from_timestamp)
//! and [`Api::from_randomness`](crate::Api::from_randomness)

use crate::{Error, Part, Randomness, Timestamp, Ulid};
use web_time::SystemTime;

pub trait ToTimestamp {
    fn to_timestamp(&self) -> crate::Result<Timestamp>;
}

pub trait ToRandomness {
    fn to_randomness(&self) -> crate::Result<Randomness>;
}

impl ToTimestamp for Timestamp {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        Ok(*self)
    }
}

impl ToTimestamp for Ulid {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        Ok(self.timestamp())
    }
}

impl ToTimestamp for SystemTime {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        Timestamp::from_system_time(*self)
    }
}

impl<Tz: chrono::TimeZone> ToTimestamp for chrono::DateTime<Tz> {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        let ms = u64::try_from(self.timestamp_millis()).map_err(|_| Error::Negative {
            part: Part::Timestamp,
        })?;
        Timestamp::from_ms(ms)
    }
}

/// Seconds since UNIX_EPOCH
impl ToTimestamp for f64 {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        Timestamp::from_seconds(*self)
    }
}

/// Seconds since UNIX_EPOCH
impl ToTimestamp for u64 {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        let ms = self
            .checked_mul(1000)
            .ok_or_else(|| Error::overflow(Part::Timestamp))?;
        Timestamp::from_ms(ms)
    }
}

/// Seconds since UNIX_EPOCH
impl ToTimestamp for i64 {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        u64::try_from(*self)
            .map_err(|_| Error::Negative {
                part: Part::Timestamp,
            })?
            .to_timestamp()
    }
}

/// Base32-encoded timestamp, as found in the first 10 characters of a ULID
impl ToTimestamp for str {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        self.parse()
    }
}

impl ToTimestamp for String {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        self.as_str().to_timestamp()
    }
}

impl ToTimestamp for [u8] {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        <[u8; 6]>::try_from(self)
            .map(Timestamp::from_bytes)
            .map_err(|_| Error::bytes_length(Part::Timestamp, self.len()))
    }
}

impl ToTimestamp for Vec<u8> {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        self.as_slice().to_timestamp()
    }
}

impl ToTimestamp for [u8; 6] {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        Ok(Timestamp::from_bytes(*self))
    }
}

impl<T: ToTimestamp + ?Sized> ToTimestamp for &T {
    fn to_timestamp(&self) -> crate::Result<Timestamp> {
        (**self).to_timestamp()
    }
}

impl ToRandomness for Randomness {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        Ok(*self)
    }
}

impl ToRandomness for Ulid {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        Ok(self.randomness())
    }
}

impl ToRandomness for u128 {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        Randomness::from_u128(*self)
    }
}

/// Truncated towards zero
impl ToRandomness for f64 {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        if !self.is_finite() {
            return Err(Error::NotFinite {
                part: Part::Randomness,
            });
        }
        if *self < 0.0 {
            return Err(Error::Negative {
                part: Part::Randomness,
            });
        }
        let value = self.trunc();
        if value > Randomness::MAX.as_u128() as f64 {
            return Err(Error::overflow(Part::Randomness));
        }
        Randomness::from_u128(value as u128)
    }
}

/// Base32-encoded randomness, as found in the last 16 characters of a ULID
impl ToRandomness for str {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        self.parse()
    }
}

impl ToRandomness for String {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        self.as_str().to_randomness()
    }
}

impl ToRandomness for [u8] {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        <[u8; 10]>::try_from(self)
            .map(Randomness::from_bytes)
            .map_err(|_| Error::bytes_length(Part::Randomness, self.len()))
    }
}

impl ToRandomness for Vec<u8> {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        self.as_slice().to_randomness()
    }
}

impl ToRandomness for [u8; 10] {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        Ok(Randomness::from_bytes(*self))
    }
}

impl<T: ToRandomness + ?Sized> ToRandomness for &T {
    fn to_randomness(&self) -> crate::Result<Randomness> {
        (**self).to_randomness()
    }
}
