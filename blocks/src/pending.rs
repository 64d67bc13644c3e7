//! The set of pending sends an account could receive.

use std::collections::HashMap;

use nanolattice_types::{BlockHash, PendingPayment};

use crate::error::BlockError;

/// Pending sends keyed by send-block hash.
///
/// Entries appear when a send targeting the account is observed and are
/// consumed exactly once by [`PendingSet::take`] — claiming the same send
/// twice (or a send that never existed) is an [`BlockError::InvalidLink`].
#[derive(Clone, Debug, Default)]
pub struct PendingSet {
    entries: HashMap<BlockHash, PendingPayment>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a pending send. Returns `false` if it was already tracked.
    pub fn insert(&mut self, payment: PendingPayment) -> bool {
        self.entries
            .insert(payment.send_hash, payment)
            .is_none()
    }

    /// Consume a pending send for receiving.
    pub fn take(&mut self, send_hash: &BlockHash) -> Result<PendingPayment, BlockError> {
        self.entries
            .remove(send_hash)
            .ok_or(BlockError::InvalidLink(*send_hash))
    }

    pub fn contains(&self, send_hash: &BlockHash) -> bool {
        self.entries.contains_key(send_hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingPayment> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanolattice_types::{Address, Amount};

    fn payment(tag: u8, amount: u128) -> PendingPayment {
        PendingPayment {
            send_hash: BlockHash::new([tag; 32]),
            source: Address::new("nano_source"),
            amount: Amount::new(amount),
        }
    }

    #[test]
    fn insert_and_take() {
        let mut set = PendingSet::new();
        assert!(set.insert(payment(1, 10)));
        assert!(set.contains(&BlockHash::new([1u8; 32])));
        let taken = set.take(&BlockHash::new([1u8; 32])).unwrap();
        assert_eq!(taken.amount, Amount::new(10));
        assert!(set.is_empty());
    }

    #[test]
    fn double_take_is_invalid_link() {
        let mut set = PendingSet::new();
        set.insert(payment(2, 5));
        let hash = BlockHash::new([2u8; 32]);
        set.take(&hash).unwrap();
        assert_eq!(set.take(&hash), Err(BlockError::InvalidLink(hash)));
    }

    #[test]
    fn unknown_hash_is_invalid_link() {
        let mut set = PendingSet::new();
        let hash = BlockHash::new([9u8; 32]);
        assert_eq!(set.take(&hash), Err(BlockError::InvalidLink(hash)));
    }

    #[test]
    fn duplicate_insert_reports_false() {
        let mut set = PendingSet::new();
        assert!(set.insert(payment(3, 1)));
        assert!(!set.insert(payment(3, 1)));
        assert_eq!(set.len(), 1);
    }
}
