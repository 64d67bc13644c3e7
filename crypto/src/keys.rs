//! Deterministic account key derivation.
//!
//! An account keypair is a pure function of (seed, index):
//!
//! 1. private key = Blake2b-256(seed ‖ index as big-endian u32)
//! 2. public key  = Ed25519 scalar multiplication of the clamped
//!    Blake2b-512 expansion of the private key
//!
//! Step 2 is where this ledger deviates from stock Ed25519: the key
//! expansion digest is Blake2b-512 instead of SHA-512, and the result must
//! match conforming relays bit-for-bit.

use blake2::digest::consts::U64;
use blake2::{Blake2b, Digest};
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;
use thiserror::Error;
use zeroize::Zeroize;

use nanolattice_types::{KeyPair, PrivateKey, PublicKey, Seed};

use crate::hash::blake2b_256_multi;

pub(crate) type Blake2b512 = Blake2b<U64>;

/// Errors arising from key material handling.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("secure random source unavailable: {0}")]
    Rng(String),
}

/// Generate a fresh 32-byte wallet seed from the OS random source.
pub fn generate_seed() -> Result<Seed, KeyError> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| KeyError::Rng(e.to_string()))?;
    Ok(Seed(bytes))
}

/// Derive the private key for an account index of a seed.
pub fn derive_private_key(seed: &Seed, index: u32) -> PrivateKey {
    PrivateKey(blake2b_256_multi(&[
        seed.as_bytes(),
        &index.to_be_bytes(),
    ]))
}

/// Expand a private key into its signing scalar and message prefix.
///
/// This is RFC 8032 key expansion with Blake2b-512 as the digest. The
/// returned scalar is the clamped lower half reduced mod ℓ; the prefix seeds
/// the deterministic nonce in [`crate::sign`].
pub(crate) fn expand_private_key(private: &PrivateKey) -> (Scalar, [u8; 32]) {
    let digest = Blake2b512::digest(private.0);
    let mut h = [0u8; 64];
    h.copy_from_slice(&digest);

    let mut lower = [0u8; 32];
    lower.copy_from_slice(&h[..32]);
    lower[0] &= 248;
    lower[31] &= 127;
    lower[31] |= 64;

    let mut prefix = [0u8; 32];
    prefix.copy_from_slice(&h[32..]);

    let scalar = Scalar::from_bytes_mod_order(lower);
    lower.zeroize();
    h.zeroize();
    (scalar, prefix)
}

/// Derive the public key from a private key (ed25519-blake2b).
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let (scalar, _prefix) = expand_private_key(private);
    PublicKey(EdwardsPoint::mul_base(&scalar).compress().to_bytes())
}

/// Derive the full keypair for an account index of a seed (deterministic).
pub fn derive_keypair(seed: &Seed, index: u32) -> KeyPair {
    let private = derive_private_key(seed, index);
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Reconstruct a full keypair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}
