//! Block construction errors.

use thiserror::Error;

use nanolattice_crypto::AddressError;
use nanolattice_types::{Amount, BlockHash};

/// Errors surfaced while building, signing or applying blocks.
///
/// These are never silently corrected: a caller may have precomputed hashes
/// chained on the block it asked for, so altering it behind their back would
/// invalidate cryptographic assumptions elsewhere.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("insufficient balance: tried to move {amount} out of {balance}")]
    InsufficientBalance { balance: Amount, amount: Amount },

    #[error("chain mismatch: block previous is {block_previous} but the frontier is {frontier}")]
    ChainMismatch {
        frontier: BlockHash,
        block_previous: BlockHash,
    },

    #[error("invalid link: no unreceived pending send {0}")]
    InvalidLink(BlockHash),

    #[error("balance overflow receiving {amount} into {balance}")]
    BalanceOverflow { balance: Amount, amount: Amount },

    #[error("signing key does not own the block's account")]
    KeyMismatch,

    #[error("block belongs to a different account")]
    WrongAccount,

    #[error("account has no chain yet; its first block must receive funds")]
    UnopenedAccount,

    #[error("invalid destination address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("block signature does not verify against the account key")]
    InvalidSignature,
}
