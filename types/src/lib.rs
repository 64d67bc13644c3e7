//! Fundamental types for the nanolattice client core.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: amounts, hashes, keys, addresses, and pending payments.

pub mod address;
pub mod amount;
pub mod hash;
pub mod keys;
pub mod pending;

pub use address::Address;
pub use amount::{Amount, AmountError, Unit};
pub use hash::BlockHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Seed, Signature};
pub use pending::PendingPayment;
