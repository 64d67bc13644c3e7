//! The state block: one transition of one account's chain.
//!
//! Wire format of the canonical hash input, fixed by protocol:
//!
//! ```text
//! preamble (32 bytes, constant 0x…06 marking the state block format)
//! account public key   (32 bytes)
//! previous block hash  (32 bytes, zero for the first block of a chain)
//! representative key   (32 bytes)
//! balance after        (16 bytes, big-endian)
//! link                 (32 bytes)
//! ```
//!
//! Signature and work are *not* part of the hash — the hash is a pure
//! function of the logical fields, which is what makes offline chaining
//! possible (the next block's `previous` is known before broadcast).

use serde::{Deserialize, Serialize};

use nanolattice_crypto::{blake2b_256_multi, sign_message, verify_signature};
use nanolattice_types::{Amount, BlockHash, KeyPair, PublicKey, Signature};

use crate::error::BlockError;

/// Preamble discriminating the unified state block format in the hash.
const STATE_PREAMBLE: [u8; 32] = {
    let mut bytes = [0u8; 32];
    bytes[31] = 0x06;
    bytes
};

/// The transition kind of a state block.
///
/// An *open* block (the first of a chain) is a `Receive` whose `previous` is
/// zero; it is not a separate kind on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subtype {
    /// Moves funds out: balance decreases, link names the destination.
    Send,
    /// Claims a pending send: balance increases, link names the send block.
    Receive,
    /// Re-delegates voting weight: balance unchanged, link is zero.
    Change,
}

impl Subtype {
    pub fn as_str(self) -> &'static str {
        match self {
            Subtype::Send => "send",
            Subtype::Receive => "receive",
            Subtype::Change => "change",
        }
    }
}

/// The link field — 32 bytes whose meaning depends on the transition kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Link {
    /// Send: the destination account's public key.
    Destination(PublicKey),
    /// Receive: the hash of the pending send block being claimed.
    Source(BlockHash),
    /// Change: no link.
    Zero,
}

impl Link {
    pub fn to_bytes(self) -> [u8; 32] {
        match self {
            Link::Destination(key) => key.0,
            Link::Source(hash) => *hash.as_bytes(),
            Link::Zero => [0u8; 32],
        }
    }
}

/// Canonical block hash — the single hashing code path for every subtype.
fn canonical_hash(
    account: &PublicKey,
    previous: &BlockHash,
    representative: &PublicKey,
    balance: Amount,
    link: &Link,
) -> BlockHash {
    BlockHash::new(blake2b_256_multi(&[
        &STATE_PREAMBLE,
        account.as_bytes(),
        previous.as_bytes(),
        representative.as_bytes(),
        &balance.raw().to_be_bytes(),
        &link.to_bytes(),
    ]))
}

/// A fully specified block that has not been signed yet.
///
/// Produced by the builders in [`crate::builder`]; consumed by [`Self::sign`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedBlock {
    pub subtype: Subtype,
    pub account: PublicKey,
    pub previous: BlockHash,
    pub representative: PublicKey,
    pub balance: Amount,
    pub link: Link,
}

impl UnsignedBlock {
    /// The canonical hash of this block's logical fields.
    pub fn hash(&self) -> BlockHash {
        canonical_hash(
            &self.account,
            &self.previous,
            &self.representative,
            self.balance,
            &self.link,
        )
    }

    /// Sign the canonical hash, producing a [`StateBlock`] without work.
    ///
    /// Fails with [`BlockError::KeyMismatch`] if the keypair does not own the
    /// block's account.
    pub fn sign(self, keys: &KeyPair) -> Result<StateBlock, BlockError> {
        if keys.public != self.account {
            return Err(BlockError::KeyMismatch);
        }
        let signature = sign_message(self.hash().as_bytes(), &keys.private);
        Ok(StateBlock {
            subtype: self.subtype,
            account: self.account,
            previous: self.previous,
            representative: self.representative,
            balance: self.balance,
            link: self.link,
            signature,
            work: None,
        })
    }
}

/// A signed state block, optionally carrying its anti-spam work nonce.
///
/// Ready to broadcast once work is attached; immutable history once a relay
/// accepts it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlock {
    pub subtype: Subtype,
    pub account: PublicKey,
    pub previous: BlockHash,
    pub representative: PublicKey,
    pub balance: Amount,
    pub link: Link,
    pub signature: Signature,
    pub work: Option<u64>,
}

impl StateBlock {
    /// The canonical hash — identical to the hash that was signed.
    pub fn hash(&self) -> BlockHash {
        canonical_hash(
            &self.account,
            &self.previous,
            &self.representative,
            self.balance,
            &self.link,
        )
    }

    /// Verify the signature against the recomputed hash and the account key.
    pub fn verify_signature(&self) -> bool {
        verify_signature(self.hash().as_bytes(), &self.signature, &self.account)
    }

    /// Whether this is the first block of its account's chain.
    pub fn is_open(&self) -> bool {
        self.previous.is_zero()
    }

    /// The hash this block's work must be computed against: the previous
    /// block, or the account key itself for the first block of a chain.
    pub fn work_root(&self) -> BlockHash {
        if self.is_open() {
            BlockHash::new(self.account.0)
        } else {
            self.previous
        }
    }

    /// Attach an externally generated work nonce.
    pub fn attach_work(&mut self, work: u64) {
        self.work = Some(work);
    }

    /// Whether the block carries everything a relay needs (signature + work).
    pub fn is_broadcastable(&self) -> bool {
        self.work.is_some()
    }
}
