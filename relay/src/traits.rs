//! The relay and work-source capabilities the core consumes.

use std::future::Future;

use tokio::sync::broadcast;

use nanolattice_blocks::{AccountState, StateBlock};
use nanolattice_crypto::{decode_address, derive_address};
use nanolattice_types::{Address, Amount, BlockHash, PendingPayment, PublicKey};

use crate::error::RelayError;

/// An account's chain tip as reported by the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrontierInfo {
    pub frontier: BlockHash,
    pub balance: Amount,
    pub representative: Address,
}

/// A confirmed incoming send targeting some account, as delivered by a
/// relay's confirmation feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationEvent {
    /// Hash of the confirmed send block.
    pub hash: BlockHash,
    /// The account the funds are destined for.
    pub destination: Address,
    /// The sending account.
    pub source: Address,
    /// Amount transferred.
    pub amount: Amount,
}

/// A ledger node used as a dumb read/broadcast relay.
///
/// The trait is transport-agnostic; implementations typically wrap an HTTP
/// RPC client plus an optional WebSocket feed. Methods borrow their
/// arguments only for the duration of the returned future.
pub trait LedgerRelay: Send + Sync {
    /// The account's chain tip, or `None` for an account with no chain yet.
    fn frontier(
        &self,
        account: &Address,
    ) -> impl Future<Output = Result<Option<FrontierInfo>, RelayError>> + Send;

    /// The account's unreceived pending sends.
    fn pending(
        &self,
        account: &Address,
    ) -> impl Future<Output = Result<Vec<PendingPayment>, RelayError>> + Send;

    /// Submit a signed block; returns its hash on acceptance.
    fn broadcast(
        &self,
        block: &StateBlock,
    ) -> impl Future<Output = Result<BlockHash, RelayError>> + Send;

    /// Subscribe to confirmed blocks involving `account`.
    ///
    /// This capability is optional: relays without a push feed return `None`
    /// and callers fall back to polling [`LedgerRelay::pending`]. Each call
    /// returns an independent receiver, so concurrent subscribers all see
    /// every event.
    fn subscribe_confirmations(
        &self,
        account: &Address,
    ) -> Option<broadcast::Receiver<ConfirmationEvent>>;
}

/// An external proof-of-work provider.
///
/// May be absent entirely — callers can attach manually computed work.
pub trait WorkSource: Send + Sync {
    /// Compute (or look up) a nonce for `root` meeting `threshold`.
    fn request_work(
        &self,
        root: &BlockHash,
        threshold: u64,
    ) -> impl Future<Output = Result<u64, RelayError>> + Send;
}

/// Fetch an account's state from the relay as an [`AccountState`] ready for
/// the block builders.
///
/// Accounts the relay has never seen become `new_account` states with
/// `default_representative`, so their first receive opens the chain.
pub async fn account_state<R: LedgerRelay>(
    relay: &R,
    account: &PublicKey,
    default_representative: &PublicKey,
) -> Result<AccountState, RelayError> {
    let address = derive_address(account);
    match relay.frontier(&address).await? {
        Some(info) => {
            let representative = decode_address(info.representative.as_str())
                .map_err(|e| RelayError::InvalidResponse(format!("representative: {e}")))?;
            Ok(AccountState {
                account: *account,
                frontier: info.frontier,
                balance: info.balance,
                representative,
            })
        }
        None => Ok(AccountState::new_account(*account, *default_representative)),
    }
}
