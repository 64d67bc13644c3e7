//! Account address derivation and decoding.
//!
//! Address format: `nano_` + base32(public_key, 52 chars) + base32(checksum, 8 chars)
//!
//! The body encodes 260 bits — four zero pad bits followed by the 256-bit
//! public key — so the first character is always `1` or `3`. The checksum is
//! Blake2b-40(public_key) with its five bytes reversed. Base-32 alphabet:
//! `13456789abcdefghijkmnopqrstuwxyz` (avoids visually ambiguous characters).
//! Total length: 5 (prefix) + 52 + 8 = 65 characters; the legacy `xrb_`
//! prefix is accepted on decode.

use blake2::digest::consts::U5;
use blake2::{Blake2b, Digest};
use thiserror::Error;

use nanolattice_types::{Address, PublicKey};

type Blake2b40 = Blake2b<U5>;

/// Base-32 alphabet (32 chars, avoids 0/O, 2/Z, l/I, v).
const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Number of base-32 characters for the public key (260 bits / 5).
const BODY_CHARS: usize = 52;
/// Number of base-32 characters for the checksum (40 bits / 5).
const CHECKSUM_CHARS: usize = 8;
/// Expected length after the prefix.
const ENCODED_LEN: usize = BODY_CHARS + CHECKSUM_CHARS;

/// Errors arising from address decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address has a wrong prefix or length")]
    Malformed,

    #[error("address contains characters outside the base-32 alphabet")]
    InvalidEncoding,

    #[error("address checksum mismatch")]
    InvalidChecksum,
}

/// Encode bytes as base-32, preceded by `leading_zero_bits` zero pad bits.
///
/// The pad makes the total bit count a multiple of five, so no tail handling
/// is needed: 4 + 256 = 260 for the body, 0 + 40 = 40 for the checksum.
fn encode_base32(bytes: &[u8], leading_zero_bits: u32) -> String {
    let mut result = String::with_capacity((leading_zero_bits as usize + bytes.len() * 8) / 5);
    let mut buffer: u32 = 0;
    let mut bits = leading_zero_bits;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            result.push(BASE32_ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
        }
    }
    result
}

fn decode_char(c: u8) -> Result<u8, AddressError> {
    if c >= 128 {
        return Err(AddressError::InvalidEncoding);
    }
    let val = BASE32_DECODE[c as usize];
    if val == 0xFF {
        return Err(AddressError::InvalidEncoding);
    }
    Ok(val)
}

/// Decode the 52-character body into the 32-byte public key, dropping the
/// four leading pad bits (which must be zero).
fn decode_body(s: &str) -> Result<[u8; 32], AddressError> {
    let chars = s.as_bytes();
    debug_assert_eq!(chars.len(), BODY_CHARS);

    let first = decode_char(chars[0])?;
    if first > 1 {
        return Err(AddressError::Malformed);
    }

    let mut result = [0u8; 32];
    let mut buffer: u32 = first as u32;
    let mut bits: u32 = 1;
    let mut pos = 0;

    for &c in &chars[1..] {
        buffer = (buffer << 5) | decode_char(c)? as u32;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            result[pos] = (buffer >> bits) as u8;
            pos += 1;
        }
    }
    // 1 + 51 * 5 = 256 bits exactly.
    Ok(result)
}

/// Decode the 8-character checksum into its 5 bytes.
fn decode_checksum(s: &str) -> Result<[u8; 5], AddressError> {
    let chars = s.as_bytes();
    debug_assert_eq!(chars.len(), CHECKSUM_CHARS);

    let mut result = [0u8; 5];
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;
    let mut pos = 0;

    for &c in chars {
        buffer = (buffer << 5) | decode_char(c)? as u32;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            result[pos] = (buffer >> bits) as u8;
            pos += 1;
        }
    }
    Ok(result)
}

fn checksum(public_key: &PublicKey) -> [u8; 5] {
    let digest = Blake2b40::digest(public_key.as_bytes());
    let mut bytes = [0u8; 5];
    bytes.copy_from_slice(&digest);
    bytes.reverse();
    bytes
}

/// Derive the `nano_` address of a public key.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let body = encode_base32(public_key.as_bytes(), 4);
    let check = encode_base32(&checksum(public_key), 0);
    Address::new(format!("{}{}{}", Address::PREFIX, body, check))
}

/// Decode an address back into its public key.
///
/// Accepts both the `nano_` and legacy `xrb_` prefixes. Fails on wrong
/// length, characters outside the alphabet, or a checksum mismatch; a valid
/// decode round-trips exactly through [`derive_address`].
pub fn decode_address(address: &str) -> Result<PublicKey, AddressError> {
    let encoded = address
        .strip_prefix(Address::PREFIX)
        .or_else(|| address.strip_prefix(Address::LEGACY_PREFIX))
        .ok_or(AddressError::Malformed)?;
    if encoded.len() != ENCODED_LEN {
        return Err(AddressError::Malformed);
    }

    let (body, check) = encoded.split_at(BODY_CHARS);
    let key_bytes = decode_body(body)?;
    let checksum_bytes = decode_checksum(check)?;

    let public_key = PublicKey(key_bytes);
    if checksum_bytes != checksum(&public_key) {
        return Err(AddressError::InvalidChecksum);
    }
    Ok(public_key)
}

/// Whether a string is a well-formed address with a correct checksum.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::derive_keypair;
    use nanolattice_types::Seed;

    fn pk_from_hex(s: &str) -> PublicKey {
        PublicKey(hex::decode(s).unwrap().try_into().unwrap())
    }

    /// Published fixture: all-zero seed, index 0.
    #[test]
    fn zero_seed_golden_address() {
        let pk = pk_from_hex("c008b814a7d269a1fa3c6528b19201a24d797912db9996ff02a1ff356e45552b");
        let addr = derive_address(&pk);
        assert_eq!(
            addr.as_str(),
            "nano_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7"
        );
    }

    #[test]
    fn low_seed_golden_addresses() {
        let pk = pk_from_hex("66327ffecdbf7616ced4aced29647b6f8d4a10bf4db1a45c9d4e1b53ef7a4eab");
        assert_eq!(
            derive_address(&pk).as_str(),
            "nano_1sjkhzzeuhup4u9fbd9f77k9puwfbaadymfjnjgbtmiuchqqnmodbwrsnhn9"
        );
    }

    #[test]
    fn derive_and_validate() {
        let kp = derive_keypair(&Seed([3u8; 32]), 0);
        let addr = derive_address(&kp.public);
        assert!(addr.as_str().starts_with("nano_"));
        assert_eq!(addr.as_str().len(), 65);
        assert!(validate_address(addr.as_str()));
    }

    #[test]
    fn decode_roundtrip() {
        let kp = derive_keypair(&Seed([8u8; 32]), 5);
        let addr = derive_address(&kp.public);
        assert_eq!(decode_address(addr.as_str()).unwrap(), kp.public);
    }

    #[test]
    fn legacy_prefix_accepted() {
        let pk = pk_from_hex("c008b814a7d269a1fa3c6528b19201a24d797912db9996ff02a1ff356e45552b");
        assert_eq!(
            decode_address("xrb_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7")
                .unwrap(),
            pk
        );
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let kp = derive_keypair(&Seed([8u8; 32]), 0);
        let mut addr = derive_address(&kp.public).as_str().to_string();
        let last = addr.pop().unwrap();
        addr.push(if last == '1' { '3' } else { '1' });
        assert_eq!(decode_address(&addr), Err(AddressError::InvalidChecksum));
    }

    #[test]
    fn corrupted_body_rejected() {
        let kp = derive_keypair(&Seed([8u8; 32]), 0);
        let addr = derive_address(&kp.public).as_str().to_string();
        // Flip a body character (position 10) to a different alphabet char.
        let mut chars: Vec<char> = addr.chars().collect();
        chars[10] = if chars[10] == '1' { '3' } else { '1' };
        let corrupted: String = chars.into_iter().collect();
        assert!(decode_address(&corrupted).is_err());
    }

    #[test]
    fn wrong_prefix_rejected() {
        assert_eq!(
            decode_address("ban_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7"),
            Err(AddressError::Malformed)
        );
    }

    #[test]
    fn wrong_length_rejected() {
        assert_eq!(decode_address("nano_tooshort"), Err(AddressError::Malformed));
        assert_eq!(decode_address("nano_"), Err(AddressError::Malformed));
    }

    #[test]
    fn invalid_characters_rejected() {
        let addr = format!("nano_{}", "0".repeat(60));
        assert_eq!(decode_address(&addr), Err(AddressError::InvalidEncoding));
    }

    #[test]
    fn different_keys_different_addresses() {
        let k1 = derive_keypair(&Seed([1u8; 32]), 0);
        let k2 = derive_keypair(&Seed([1u8; 32]), 1);
        assert_ne!(
            derive_address(&k1.public).as_str(),
            derive_address(&k2.public).as_str()
        );
    }
}
