use crate::{base32, ids::impl_for_value, Error, Part};

/// The 80 random low bits of a ULID
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd, educe::Educe)]
#[educe(Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct Randomness(#[educe(Debug(method(debug_randomness)))] u128);

fn debug_randomness(value: &u128, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&base32::encode_u128(*value, Part::Randomness))
}

impl Randomness {
    pub const MIN: Randomness = Randomness(0);
    pub const MAX: Randomness = Randomness((1 << Part::Randomness.bits()) - 1);

    pub fn from_u128(value: u128) -> crate::Result<Randomness> {
        Randomness::try_from_u128(value)
    }

    pub(crate) fn try_from_u128(value: u128) -> crate::Result<Randomness> {
        if value > Randomness::MAX.0 {
            return Err(Error::overflow(Part::Randomness));
        }
        Ok(Randomness(value))
    }

    pub fn from_bytes(bytes: [u8; 10]) -> Randomness {
        let mut buf = [0; 16];
        buf[6..].copy_from_slice(&bytes);
        Randomness(u128::from_be_bytes(buf))
    }

    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    pub fn bytes(&self) -> [u8; 10] {
        let mut res = [0; 10];
        res.copy_from_slice(&self.0.to_be_bytes()[6..]);
        res
    }

    /// The randomness directly following this one, if any
    pub fn checked_next(&self) -> Option<Randomness> {
        Some(self.0 + 1).filter(|r| *r <= Randomness::MAX.0).map(Randomness)
    }
}

impl From<[u8; 10]> for Randomness {
    fn from(bytes: [u8; 10]) -> Randomness {
        Randomness::from_bytes(bytes)
    }
}

impl From<Randomness> for String {
    fn from(r: Randomness) -> String {
        r.to_string()
    }
}

impl TryFrom<String> for Randomness {
    type Error = Error;

    fn try_from(s: String) -> crate::Result<Randomness> {
        s.parse()
    }
}

impl_for_value!(Randomness, Part::Randomness);

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Randomness {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Randomness(u.int_in_range(0..=Randomness::MAX.0)?))
    }
}
