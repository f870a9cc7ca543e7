//! Crockford base-32 encoding over the fixed-width ULID layouts
//!
//! Every layout is handled as a big-endian integer: a ULID is 128 bits in 26
//! characters, a timestamp 48 bits in 10 characters and randomness 80 bits in
//! 16 characters. The first character of a ULID or a timestamp only carries 3
//! significant bits, so anything above `7` there is rejected as an overflow.

use crate::{Error, Part};

pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const INVALID: u8 = 0xFF;

const DECODING: [u8; 256] = decoding_table();

const fn decoding_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        let c = ALPHABET[i];
        table[c as usize] = i as u8;
        table[c.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    // Crockford aliases for characters that are easily confused
    table[b'I' as usize] = 1;
    table[b'i' as usize] = 1;
    table[b'L' as usize] = 1;
    table[b'l' as usize] = 1;
    table[b'O' as usize] = 0;
    table[b'o' as usize] = 0;
    table
}

pub(crate) fn encode_u128(value: u128, part: Part) -> String {
    let chars = part.chars();
    let mut res = String::with_capacity(chars);
    for i in (0..chars).rev() {
        let digit = ((value >> (5 * i)) & 0x1F) as usize;
        res.push(ALPHABET[digit] as char);
    }
    res
}

pub(crate) fn decode_u128(value: &str, part: Part) -> crate::Result<u128> {
    let digits = str_to_bytes(value, part)?;
    // Number of high bits of the first character that must stay zero
    let surplus = part.chars() as u32 * 5 - part.bits();
    let mut res: u128 = 0;
    for (i, c) in digits.iter().enumerate() {
        let digit = DECODING[*c as usize];
        if i == 0 && surplus > 0 && (digit >> (5 - surplus)) != 0 {
            return Err(Error::overflow(part));
        }
        res = (res << 5) | u128::from(digit);
    }
    Ok(res)
}

/// Check that `value` has the length of `part` and only contains base-32
/// characters, returning its ASCII bytes
pub fn str_to_bytes(value: &str, part: Part) -> crate::Result<&[u8]> {
    let actual = value.chars().count();
    if actual != part.chars() {
        return Err(Error::chars_length(part, actual));
    }
    for (position, character) in value.chars().enumerate() {
        let valid = u8::try_from(character)
            .map(|b| DECODING[b as usize] != INVALID)
            .unwrap_or(false);
        if !valid {
            return Err(Error::InvalidCharacter {
                character,
                position,
            });
        }
    }
    Ok(value.as_bytes())
}

/// Encode a ULID, timestamp or randomness, picked by the length of `value`
pub fn encode(value: &[u8]) -> crate::Result<String> {
    if let Ok(ulid) = <&[u8; 16]>::try_from(value) {
        return Ok(encode_ulid(ulid));
    }
    if let Ok(timestamp) = <&[u8; 6]>::try_from(value) {
        return Ok(encode_timestamp(timestamp));
    }
    if let Ok(randomness) = <&[u8; 10]>::try_from(value) {
        return Ok(encode_randomness(randomness));
    }
    Err(Error::Other(anyhow::anyhow!(
        "Expected 6, 10 or 16 bytes to encode; got {} bytes",
        value.len()
    )))
}

pub fn encode_ulid(value: &[u8; 16]) -> String {
    encode_u128(u128::from_be_bytes(*value), Part::Ulid)
}

pub fn encode_timestamp(value: &[u8; 6]) -> String {
    let mut buf = [0; 16];
    buf[10..].copy_from_slice(value);
    encode_u128(u128::from_be_bytes(buf), Part::Timestamp)
}

pub fn encode_randomness(value: &[u8; 10]) -> String {
    let mut buf = [0; 16];
    buf[6..].copy_from_slice(value);
    encode_u128(u128::from_be_bytes(buf), Part::Randomness)
}

/// Decode a ULID, timestamp or randomness, picked by the length of `value`
pub fn decode(value: &str) -> crate::Result<Vec<u8>> {
    match value.chars().count() {
        26 => Ok(decode_ulid(value)?.to_vec()),
        10 => Ok(decode_timestamp(value)?.to_vec()),
        16 => Ok(decode_randomness(value)?.to_vec()),
        len => Err(Error::Other(anyhow::anyhow!(
            "Expected 10, 16 or 26 characters to decode; got {len} characters"
        ))),
    }
}

pub fn decode_ulid(value: &str) -> crate::Result<[u8; 16]> {
    Ok(decode_u128(value, Part::Ulid)?.to_be_bytes())
}

pub fn decode_timestamp(value: &str) -> crate::Result<[u8; 6]> {
    let bytes = decode_u128(value, Part::Timestamp)?.to_be_bytes();
    let mut res = [0; 6];
    res.copy_from_slice(&bytes[10..]);
    Ok(res)
}

pub fn decode_randomness(value: &str) -> crate::Result<[u8; 10]> {
    let bytes = decode_u128(value, Part::Randomness)?.to_be_bytes();
    let mut res = [0; 10];
    res.copy_from_slice(&bytes[6..]);
    Ok(res)
}
