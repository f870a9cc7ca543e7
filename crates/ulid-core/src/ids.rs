use crate::{base32, Error, Part, Randomness, Timestamp};

/// A Universally Unique Lexicographically Sortable Identifier
///
/// The 128 bits are laid out big-endian as a 48-bit millisecond timestamp
/// followed by 80 bits of randomness. Ordering ULIDs as integers, as
/// big-endian bytes, or as their canonical strings always gives the same
/// result.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd, educe::Educe)]
#[educe(Debug)]
pub struct Ulid(#[educe(Debug(method(debug_ulid)))] u128);

fn debug_ulid(value: &u128, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&base32::encode_u128(*value, Part::Ulid))
}

impl Ulid {
    pub const MIN: Ulid = Ulid(0);
    pub const MAX: Ulid = Ulid(u128::MAX);

    pub fn from_parts(timestamp: Timestamp, randomness: Randomness) -> Ulid {
        Ulid((u128::from(timestamp.ms()) << Part::Randomness.bits()) | randomness.as_u128())
    }

    pub const fn from_u128(value: u128) -> Ulid {
        Ulid(value)
    }

    pub(crate) fn try_from_u128(value: u128) -> crate::Result<Ulid> {
        Ok(Ulid(value))
    }

    pub const fn from_bytes(bytes: [u8; 16]) -> Ulid {
        Ulid(u128::from_be_bytes(bytes))
    }

    /// The smallest ULID that can be generated during millisecond `time`
    pub fn first_at(time: Timestamp) -> Ulid {
        Ulid::from_parts(time, Randomness::MIN)
    }

    /// The largest ULID that can be generated during millisecond `time`
    pub fn last_at(time: Timestamp) -> Ulid {
        Ulid::from_parts(time, Randomness::MAX)
    }

    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    pub const fn to_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    pub fn timestamp(&self) -> Timestamp {
        Timestamp::from_bytes(self.timestamp_bytes())
    }

    pub fn randomness(&self) -> Randomness {
        Randomness::from_bytes(self.randomness_bytes())
    }

    fn timestamp_bytes(&self) -> [u8; 6] {
        let mut res = [0; 6];
        res.copy_from_slice(&self.to_bytes()[..6]);
        res
    }

    fn randomness_bytes(&self) -> [u8; 10] {
        let mut res = [0; 10];
        res.copy_from_slice(&self.to_bytes()[6..]);
        res
    }

    #[cfg(feature = "uuid")]
    pub fn to_uuid(&self) -> uuid::Uuid {
        uuid::Uuid::from_bytes(self.to_bytes())
    }

    #[cfg(feature = "uuid")]
    pub fn from_uuid(id: uuid::Uuid) -> Ulid {
        Ulid::from_bytes(*id.as_bytes())
    }
}

impl From<u128> for Ulid {
    fn from(value: u128) -> Ulid {
        Ulid(value)
    }
}

impl From<Ulid> for u128 {
    fn from(id: Ulid) -> u128 {
        id.0
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(bytes: [u8; 16]) -> Ulid {
        Ulid::from_bytes(bytes)
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(id: Ulid) -> [u8; 16] {
        id.to_bytes()
    }
}

impl TryFrom<&[u8]> for Ulid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> crate::Result<Ulid> {
        <[u8; 16]>::try_from(bytes)
            .map(Ulid::from_bytes)
            .map_err(|_| Error::bytes_length(Part::Ulid, bytes.len()))
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Ulid {
    fn from(id: uuid::Uuid) -> Ulid {
        Ulid::from_uuid(id)
    }
}

#[cfg(feature = "uuid")]
impl From<Ulid> for uuid::Uuid {
    fn from(id: Ulid) -> uuid::Uuid {
        id.to_uuid()
    }
}

impl PartialEq<u128> for Ulid {
    fn eq(&self, other: &u128) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<u128> for Ulid {
    fn partial_cmp(&self, other: &u128) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl PartialEq<[u8; 16]> for Ulid {
    fn eq(&self, other: &[u8; 16]) -> bool {
        self.to_bytes() == *other
    }
}

/// A string is equal to a ULID if it decodes to it, whatever its case
impl PartialEq<str> for Ulid {
    fn eq(&self, other: &str) -> bool {
        other.parse::<Ulid>().is_ok_and(|o| o == *self)
    }
}

impl PartialEq<&str> for Ulid {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

macro_rules! impl_fmt_for_ulid {
    ($($trait:ident),*) => {
        $(
            impl std::fmt::$trait for Ulid {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    std::fmt::$trait::fmt(&self.0, f)
                }
            }
        )*
    };
}

impl_fmt_for_ulid!(LowerHex, UpperHex, Octal, Binary);

macro_rules! impl_for_value {
    ($type:ty, $part:expr) => {
        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&crate::base32::encode_u128(u128::from(self.0), $part))
            }
        }

        impl std::str::FromStr for $type {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                Self::try_from_u128(crate::base32::decode_u128(s, $part)?)
            }
        }

        deepsize::known_deep_size!(0; $type); // These types do not allocate
    };
}

pub(crate) use impl_for_value;

impl_for_value!(Ulid, Part::Ulid);

#[cfg(feature = "serde")]
impl serde::Serialize for Ulid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_bytes(&self.to_bytes())
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Ulid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Ulid, D::Error> {
        struct UlidVisitor;

        impl serde::de::Visitor<'_> for UlidVisitor {
            type Value = Ulid;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a 26-character base32 string or 16 bytes")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Ulid, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Ulid, E> {
                Ulid::try_from(v).map_err(E::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(UlidVisitor)
        } else {
            deserializer.deserialize_bytes(UlidVisitor)
        }
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Ulid {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Ulid::from_bytes(u.arbitrary()?))
    }
}
