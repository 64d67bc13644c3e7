//! Pending payments: sends not yet acknowledged by the destination chain.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, BlockHash};

/// A send block targeting some account that the account has not yet received.
///
/// Created implicitly on the network whenever a send block names an account
/// as its destination; resolved when that account publishes a receive block
/// whose link is `send_hash`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPayment {
    /// Hash of the send block holding the funds.
    pub send_hash: BlockHash,
    /// The sending account.
    pub source: Address,
    /// Amount transferred by the send block.
    pub amount: Amount,
}
