//! Pre-broadcast verification gate.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use nanolattice_blocks::StateBlock;
use nanolattice_types::BlockHash;
use nanolattice_work::{ensure_valid, WorkError};

use crate::error::RelayError;
use crate::traits::{LedgerRelay, WorkSource};

/// Why a block was refused before it ever reached the relay.
#[derive(Debug, Error)]
pub enum BroadcastError {
    /// The signature does not verify against the recomputed hash. Fatal for
    /// this block: it is never corrected or retried.
    #[error("refusing to broadcast: block signature does not verify")]
    InvalidSignature,

    #[error("refusing to broadcast: no work attached")]
    MissingWork,

    #[error("refusing to broadcast: {0}")]
    InvalidWork(#[from] WorkError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Hands locally built blocks to the relay, but only after the signature and
/// the attached work verify locally.
///
/// A block that fails verification here would be rejected by every
/// conforming relay anyway; refusing early keeps a corrupted block from
/// burning a broadcast round-trip and makes the failure attributable.
pub struct Broadcaster<R> {
    relay: Arc<R>,
}

impl<R: LedgerRelay> Broadcaster<R> {
    pub fn new(relay: Arc<R>) -> Self {
        Self { relay }
    }

    /// Verify and broadcast a block whose work is already attached.
    ///
    /// `threshold` is the difficulty currently required by the network for
    /// this block's subtype, as reported by the relay.
    pub async fn submit(
        &self,
        block: &StateBlock,
        threshold: u64,
    ) -> Result<BlockHash, BroadcastError> {
        if !block.verify_signature() {
            warn!(hash = %block.hash(), "dropping block with invalid signature");
            return Err(BroadcastError::InvalidSignature);
        }
        let work = block.work.ok_or(BroadcastError::MissingWork)?;
        ensure_valid(work, &block.work_root(), threshold)?;

        let hash = self.relay.broadcast(block).await?;
        debug!(hash = %hash, subtype = block.subtype.as_str(), "block accepted by relay");
        Ok(hash)
    }

    /// Fetch work from `work_source` if the block has none, then submit.
    pub async fn attach_work_and_submit<W: WorkSource>(
        &self,
        work_source: &W,
        block: &mut StateBlock,
        threshold: u64,
    ) -> Result<BlockHash, BroadcastError> {
        if block.work.is_none() {
            let nonce = work_source
                .request_work(&block.work_root(), threshold)
                .await
                .map_err(BroadcastError::Relay)?;
            block.attach_work(nonce);
        }
        self.submit(block, threshold).await
    }
}
