//! Owned per-account chain: build, sign and advance in one place.
//!
//! Two builders starting from the same frontier would produce two blocks
//! with the same `previous`, and the ledger will only ever accept one of
//! them. Owning a `Chain` (exclusively, via `&mut`) is what rules that out:
//! hold exactly one `Chain` per account, behind a mutex if several tasks
//! build blocks for it.

use nanolattice_types::{Address, Amount, BlockHash, KeyPair, PendingPayment};

use crate::block::StateBlock;
use crate::builder;
use crate::error::BlockError;
use crate::state::AccountState;

/// An account's chain head plus the operations that extend it.
///
/// Every successful build advances the frontier to the new block's hash
/// immediately — the hash is known before broadcast, so whole runs of blocks
/// can be built and signed offline and broadcast later in order (each still
/// needs its own work).
#[derive(Clone, Debug)]
pub struct Chain {
    state: AccountState,
}

impl Chain {
    pub fn new(state: AccountState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AccountState {
        &self.state
    }

    pub fn frontier(&self) -> BlockHash {
        self.state.frontier
    }

    pub fn balance(&self) -> Amount {
        self.state.balance
    }

    /// Build, sign and apply a send block.
    pub fn send(
        &mut self,
        keys: &KeyPair,
        destination: &Address,
        amount: Amount,
    ) -> Result<StateBlock, BlockError> {
        let block = builder::send(&self.state, destination, amount)?.sign(keys)?;
        self.state = self.state.apply(&block)?;
        Ok(block)
    }

    /// Build, sign and apply a receive block for a pending send.
    pub fn receive(
        &mut self,
        keys: &KeyPair,
        pending: &PendingPayment,
    ) -> Result<StateBlock, BlockError> {
        let block = builder::receive(&self.state, pending)?.sign(keys)?;
        self.state = self.state.apply(&block)?;
        Ok(block)
    }

    /// Build, sign and apply a representative change block.
    pub fn change(
        &mut self,
        keys: &KeyPair,
        new_representative: &Address,
    ) -> Result<StateBlock, BlockError> {
        let block = builder::change(&self.state, new_representative)?.sign(keys)?;
        self.state = self.state.apply(&block)?;
        Ok(block)
    }

    /// Apply a block that was built elsewhere (e.g. observed from the relay).
    ///
    /// The signature is verified first — a block that fails verification is
    /// never accepted into the chain. Fails with [`BlockError::ChainMismatch`]
    /// if the block was built against a frontier this chain has already moved
    /// past — the caller must rebuild against [`Chain::state`].
    pub fn commit(&mut self, block: &StateBlock) -> Result<(), BlockError> {
        if !block.verify_signature() {
            return Err(BlockError::InvalidSignature);
        }
        self.state = self.state.apply(block)?;
        Ok(())
    }
}
