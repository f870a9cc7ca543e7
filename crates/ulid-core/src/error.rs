use crate::Timestamp;
use web_time::SystemTime;

pub type Result<T> = std::result::Result<T, Error>;

/// The component of a ULID a value was meant to become
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Part {
    Ulid,
    Timestamp,
    Randomness,
}

impl Part {
    pub const fn bytes(self) -> usize {
        match self {
            Part::Ulid => 16,
            Part::Timestamp => 6,
            Part::Randomness => 10,
        }
    }

    pub const fn chars(self) -> usize {
        match self {
            Part::Ulid => 26,
            Part::Timestamp => 10,
            Part::Randomness => 16,
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Part::Ulid => 128,
            Part::Timestamp => 48,
            Part::Randomness => 80,
        }
    }
}

impl std::fmt::Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Part::Ulid => "ulid",
            Part::Timestamp => "timestamp",
            Part::Randomness => "randomness",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Unit {
    Bytes,
    Characters,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Unit::Bytes => "bytes",
            Unit::Characters => "characters",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Expected {part} to be {expected} {unit}; got {actual} {unit}")]
    InvalidLength {
        part: Part,
        unit: Unit,
        expected: usize,
        actual: usize,
    },

    #[error("Non-base32 character {character:?} found at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Value does not fit in the {bits} bits of a {part}")]
    Overflow { part: Part, bits: u32 },

    #[error("Cannot build a {part} from a negative value")]
    Negative { part: Part },

    #[error("Cannot build a {part} from a non-finite value")]
    NotFinite { part: Part },

    #[error("{0:?} is outside the range of valid ULID timestamps")]
    InvalidTime(SystemTime),

    #[error("Randomness exhausted while generating monotonic ULIDs at {0:?}")]
    MonotonicOverflow(Timestamp),

    #[error(transparent)]
    Other(anyhow::Error),
}

impl Error {
    pub(crate) fn overflow(part: Part) -> Error {
        Error::Overflow {
            part,
            bits: part.bits(),
        }
    }

    pub(crate) fn bytes_length(part: Part, actual: usize) -> Error {
        Error::InvalidLength {
            part,
            unit: Unit::Bytes,
            expected: part.bytes(),
            actual,
        }
    }

    pub(crate) fn chars_length(part: Part, actual: usize) -> Error {
        Error::InvalidLength {
            part,
            unit: Unit::Characters,
            expected: part.chars(),
            actual,
        }
    }
}

pub trait ResultExt: Sized {
    type Ok;

    fn wrap_with_context(self, f: impl FnOnce() -> String) -> Result<Self::Ok>;

    fn wrap_context(self, s: &str) -> Result<Self::Ok> {
        self.wrap_with_context(|| s.to_string())
    }
}

impl<T> ResultExt for Result<T> {
    type Ok = T;

    fn wrap_with_context(self, f: impl FnOnce() -> String) -> Result<T> {
        match self {
            Err(Error::Other(e)) => Err(Error::Other(e.context(f()))),
            r => r,
        }
    }
}

impl<T> ResultExt for anyhow::Result<T> {
    type Ok = T;

    fn wrap_with_context(self, f: impl FnOnce() -> String) -> Result<T> {
        match self {
            Err(e) => Err(Error::Other(e.context(f()))),
            Ok(r) => Ok(r),
        }
    }
}
