use crate::{
    DefaultProvider, Error, MicrosecondProvider, MonotonicProvider, Part, Provider, ToRandomness,
    ToTimestamp, Ulid,
};
use anyhow::anyhow;
use std::sync::LazyLock;

/// ULID constructors, drawing new timestamps and randomness from `P`
#[derive(Debug, Default)]
pub struct Api<P> {
    provider: P,
}

impl<P: Provider> Api<P> {
    pub fn new_with(provider: P) -> Api<P> {
        Api { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Create a new ULID from the current time
    #[allow(clippy::new_ret_no_self, clippy::should_implement_trait)]
    pub fn new(&self) -> crate::Result<Ulid> {
        let (time, randomness) = self.provider.new_parts()?;
        Ok(Ulid::from_parts(time, randomness))
    }

    /// Fails unless `value` is exactly 16 bytes
    pub fn from_bytes(&self, value: &[u8]) -> crate::Result<Ulid> {
        Ulid::try_from(value)
    }

    pub fn from_int(&self, value: u128) -> Ulid {
        Ulid::from_u128(value)
    }

    /// Fails on negative values
    pub fn from_signed_int(&self, value: i128) -> crate::Result<Ulid> {
        u128::try_from(value)
            .map(Ulid::from_u128)
            .map_err(|_| Error::Negative { part: Part::Ulid })
    }

    /// Parse a 26-character base32 ULID
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, value: &str) -> crate::Result<Ulid> {
        value.parse()
    }

    #[cfg(feature = "uuid")]
    pub fn from_uuid(&self, value: uuid::Uuid) -> Ulid {
        Ulid::from_uuid(value)
    }

    /// Create a ULID with the given timestamp and new randomness
    pub fn from_timestamp<T: ToTimestamp + ?Sized>(&self, timestamp: &T) -> crate::Result<Ulid> {
        let time = timestamp.to_timestamp()?;
        let randomness = self.provider.randomness(time)?;
        Ok(Ulid::from_parts(time, randomness))
    }

    /// Create a ULID with the current timestamp and the given randomness
    pub fn from_randomness<R: ToRandomness + ?Sized>(&self, randomness: &R) -> crate::Result<Ulid> {
        let randomness = randomness.to_randomness()?;
        let time = self.provider.timestamp()?;
        Ok(Ulid::from_parts(time, randomness))
    }

    /// Read a ULID from any of its common textual forms
    ///
    /// Accepts the 26-character base32 form, a UUID in its hyphenated
    /// (36 characters) or simple (32 characters) form, or a decimal integer.
    ///
    /// The length decides the form first: a 26, 32 or 36 character input is
    /// never read as decimal, even when it is made only of digits. Such
    /// integers must be converted with [`Api::from_int`] instead.
    pub fn parse(&self, value: &str) -> crate::Result<Ulid> {
        let value = value.trim();
        match value.len() {
            26 => value.parse(),
            32 | 36 => parse_uuid(value),
            _ if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => value
                .parse::<u128>()
                .map(Ulid::from_u128)
                .map_err(|_| Error::overflow(Part::Ulid)),
            _ => Err(Error::Other(anyhow!(
                "cannot parse {value:?} as a ULID, UUID or integer"
            ))),
        }
    }
}

#[cfg(feature = "uuid")]
fn parse_uuid(value: &str) -> crate::Result<Ulid> {
    uuid::Uuid::try_parse(value)
        .map(Ulid::from_uuid)
        .map_err(|e| Error::Other(anyhow!(e).context(format!("parsing {value:?} as a UUID"))))
}

#[cfg(not(feature = "uuid"))]
fn parse_uuid(value: &str) -> crate::Result<Ulid> {
    let hex = value.replace('-', "");
    if hex.len() != 32 {
        return Err(Error::Other(anyhow!("{value:?} is not a UUID")));
    }
    u128::from_str_radix(&hex, 16)
        .map(Ulid::from_u128)
        .map_err(|e| Error::Other(anyhow!(e).context(format!("parsing {value:?} as a UUID"))))
}

static DEFAULT: LazyLock<Api<DefaultProvider>> = LazyLock::new(Api::default);
static MONOTONIC: LazyLock<Api<MonotonicProvider>> = LazyLock::new(Api::default);
static MICROSECOND: LazyLock<Api<MicrosecondProvider>> = LazyLock::new(Api::default);

/// Process-wide API with fresh randomness for every ULID
pub fn default() -> &'static Api<DefaultProvider> {
    &DEFAULT
}

/// Process-wide API generating strictly increasing ULIDs
pub fn monotonic() -> &'static Api<MonotonicProvider> {
    &MONOTONIC
}

/// Process-wide API ordering ULIDs by microsecond within a millisecond
pub fn microsecond() -> &'static Api<MicrosecondProvider> {
    &MICROSECOND
}
