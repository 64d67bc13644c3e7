//! Cryptographic primitives for the nanolattice core.
//!
//! - **Blake2b** for every digest: block hashes, key derivation, checksums
//! - **Ed25519 with Blake2b-512** for signing — the ledger substitutes
//!   Blake2b for the scheme's standard SHA-512, so signatures are built on
//!   the curve directly rather than through a stock Ed25519 crate
//! - Seed ⇄ 24-word mnemonic conversion (checksummed entropy encoding)
//! - Address derivation with `nano_` prefix and base-32 encoding
//!
//! Everything here is pure and synchronous; the only side effect in the
//! crate is reading the OS random source in [`generate_seed`].

pub mod address;
pub mod hash;
pub mod keys;
pub mod mnemonic;
pub mod sign;

pub use address::{decode_address, derive_address, validate_address, AddressError};
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{
    derive_keypair, derive_private_key, generate_seed, keypair_from_private,
    public_from_private, KeyError,
};
pub use mnemonic::{mnemonic_to_seed, seed_to_mnemonic, validate_mnemonic, MnemonicError};
pub use sign::{sign_message, verify_signature};
