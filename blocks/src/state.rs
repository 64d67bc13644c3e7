//! The per-account frontier record.

use serde::{Deserialize, Serialize};

use nanolattice_types::{Amount, BlockHash, PublicKey};

use crate::block::StateBlock;
use crate::error::BlockError;

/// An account's chain position: the explicit, versioned record every builder
/// consumes and every accepted block advances.
///
/// Builders never read ambient account state — they take an `AccountState`
/// and the next version comes out of [`AccountState::apply`]. Whoever owns
/// the record owns the right to extend the chain, which is how the
/// one-in-flight-block-per-account rule is enforced at the call site (see
/// [`crate::chain::Chain`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// The account's public key.
    pub account: PublicKey,
    /// Hash of the chain tip, or zero for an account with no chain yet.
    pub frontier: BlockHash,
    /// Balance as of the frontier.
    pub balance: Amount,
    /// Representative as of the frontier.
    pub representative: PublicKey,
}

impl AccountState {
    /// State for an account that has no chain yet (a "virtual" account that
    /// may only exist as the target of pending sends).
    pub fn new_account(account: PublicKey, representative: PublicKey) -> Self {
        Self {
            account,
            frontier: BlockHash::ZERO,
            balance: Amount::ZERO,
            representative,
        }
    }

    /// Whether the account has no blocks yet.
    pub fn is_new(&self) -> bool {
        self.frontier.is_zero()
    }

    /// The hash work must be computed against for the *next* block: the
    /// frontier, or the account key itself while the chain is empty.
    pub fn work_root(&self) -> BlockHash {
        if self.is_new() {
            BlockHash::new(self.account.0)
        } else {
            self.frontier
        }
    }

    /// Advance to the state after `block`.
    ///
    /// The block hash becomes the new frontier — it is a pure function of the
    /// block's fields, so chains can be extended before anything is
    /// broadcast. Fails with [`BlockError::ChainMismatch`] when the block was
    /// built against a stale frontier, which is how a racing builder learns
    /// it must rebuild.
    pub fn apply(&self, block: &StateBlock) -> Result<Self, BlockError> {
        if block.account != self.account {
            return Err(BlockError::WrongAccount);
        }
        if block.previous != self.frontier {
            return Err(BlockError::ChainMismatch {
                frontier: self.frontier,
                block_previous: block.previous,
            });
        }
        Ok(Self {
            account: self.account,
            frontier: block.hash(),
            balance: block.balance,
            representative: block.representative,
        })
    }
}
