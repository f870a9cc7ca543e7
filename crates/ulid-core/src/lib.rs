//! Universally Unique Lexicographically Sortable Identifiers
//!
//! The crate-root constructors use [`api::default()`], which draws time from
//! the system clock and randomness from the operating system. Use
//! [`api::monotonic()`] when ULIDs generated within one millisecond must stay
//! ordered, or build an [`Api`] around your own [`Provider`].

pub mod api;
pub mod base32;
mod clock;
mod convert;
mod entropy;
mod error;
mod ids;
mod provider;
mod randomness;
mod timestamp;

pub use api::Api;
pub use clock::*;
pub use convert::*;
pub use entropy::*;
pub use error::*;
pub use ids::Ulid;
pub use provider::*;
pub use randomness::*;
pub use timestamp::*;


pub fn new() -> Result<Ulid> {
    api::default().new()
}

pub fn from_bytes(value: &[u8]) -> Result<Ulid> {
    api::default().from_bytes(value)
}

pub fn from_int(value: u128) -> Ulid {
    api::default().from_int(value)
}

pub fn from_str(value: &str) -> Result<Ulid> {
    api::default().from_str(value)
}

#[cfg(feature = "uuid")]
pub fn from_uuid(value: uuid::Uuid) -> Ulid {
    api::default().from_uuid(value)
}

pub fn from_timestamp<T: ToTimestamp + ?Sized>(timestamp: &T) -> Result<Ulid> {
    api::default().from_timestamp(timestamp)
}

pub fn from_randomness<R: ToRandomness + ?Sized>(randomness: &R) -> Result<Ulid> {
    api::default().from_randomness(randomness)
}

pub fn parse(value: &str) -> Result<Ulid> {
    api::default().parse(value)
}
