//! Block builders: pure functions from an account state and an intent to an
//! unsigned block.

use nanolattice_crypto::decode_address;
use nanolattice_types::{Address, Amount, PendingPayment};

use crate::block::{Link, Subtype, UnsignedBlock};
use crate::error::BlockError;
use crate::state::AccountState;

/// Build a send block moving `amount` to `destination`.
///
/// Fails with [`BlockError::InsufficientBalance`] when `amount` exceeds the
/// balance; sending the entire balance is allowed and leaves zero.
pub fn send(
    state: &AccountState,
    destination: &Address,
    amount: Amount,
) -> Result<UnsignedBlock, BlockError> {
    if state.is_new() {
        return Err(BlockError::UnopenedAccount);
    }
    let destination_key = decode_address(destination.as_str())?;
    let balance = state
        .balance
        .try_sub(amount)
        .map_err(|_| BlockError::InsufficientBalance {
            balance: state.balance,
            amount,
        })?;
    Ok(UnsignedBlock {
        subtype: Subtype::Send,
        account: state.account,
        previous: state.frontier,
        representative: state.representative,
        balance,
        link: Link::Destination(destination_key),
    })
}

/// Build a receive block claiming a pending send.
///
/// On an account with no chain yet this produces the open block (`previous`
/// zero). The pending entry should come from [`crate::pending::PendingSet`]
/// or the relay, which guarantee it has not been claimed already.
pub fn receive(
    state: &AccountState,
    pending: &PendingPayment,
) -> Result<UnsignedBlock, BlockError> {
    let balance = state
        .balance
        .try_add(pending.amount)
        .map_err(|_| BlockError::BalanceOverflow {
            balance: state.balance,
            amount: pending.amount,
        })?;
    Ok(UnsignedBlock {
        subtype: Subtype::Receive,
        account: state.account,
        previous: state.frontier,
        representative: state.representative,
        balance,
        link: Link::Source(pending.send_hash),
    })
}

/// Build a change block delegating to a new representative.
///
/// Balance is unchanged and the link is zero. An account with no chain yet
/// cannot change representative — its first block must receive funds.
pub fn change(
    state: &AccountState,
    new_representative: &Address,
) -> Result<UnsignedBlock, BlockError> {
    if state.is_new() {
        return Err(BlockError::UnopenedAccount);
    }
    let representative = decode_address(new_representative.as_str())?;
    Ok(UnsignedBlock {
        subtype: Subtype::Change,
        account: state.account,
        previous: state.frontier,
        representative,
        balance: state.balance,
        link: Link::Zero,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanolattice_crypto::{derive_address, derive_keypair};
    use nanolattice_types::{BlockHash, Seed};

    fn account_state(balance: u128) -> AccountState {
        let kp = derive_keypair(&Seed([11u8; 32]), 0);
        AccountState {
            account: kp.public,
            frontier: BlockHash::new([0xBB; 32]),
            balance: Amount::new(balance),
            representative: kp.public,
        }
    }

    fn destination() -> Address {
        derive_address(&derive_keypair(&Seed([12u8; 32]), 0).public)
    }

    #[test]
    fn send_decrements_balance() {
        let state = account_state(1000);
        let block = send(&state, &destination(), Amount::new(100)).unwrap();
        assert_eq!(block.balance, Amount::new(900));
        assert_eq!(block.previous, state.frontier);
        assert_eq!(block.subtype, Subtype::Send);
    }

    #[test]
    fn send_entire_balance_leaves_zero() {
        let state = account_state(1000);
        let block = send(&state, &destination(), Amount::new(1000)).unwrap();
        assert!(block.balance.is_zero());
    }

    #[test]
    fn send_over_balance_fails() {
        let state = account_state(1000);
        assert_eq!(
            send(&state, &destination(), Amount::new(1001)),
            Err(BlockError::InsufficientBalance {
                balance: Amount::new(1000),
                amount: Amount::new(1001),
            })
        );
    }

    #[test]
    fn send_from_unopened_account_fails() {
        let kp = derive_keypair(&Seed([13u8; 32]), 0);
        let state = AccountState::new_account(kp.public, kp.public);
        assert_eq!(
            send(&state, &destination(), Amount::ZERO),
            Err(BlockError::UnopenedAccount)
        );
    }

    #[test]
    fn send_rejects_bad_destination() {
        let state = account_state(1000);
        // The zero key with a wrong checksum (the real one is "hifc8npp").
        let bad = Address::new("nano_1111111111111111111111111111111111111111111111111111hifc8npn");
        assert!(matches!(
            send(&state, &bad, Amount::new(1)),
            Err(BlockError::InvalidAddress(_))
        ));
    }

    #[test]
    fn receive_increments_balance_and_links_send() {
        let state = account_state(250);
        let pending = PendingPayment {
            send_hash: BlockHash::new([0xCC; 32]),
            source: destination(),
            amount: Amount::new(50),
        };
        let block = receive(&state, &pending).unwrap();
        assert_eq!(block.balance, Amount::new(300));
        assert_eq!(block.link, Link::Source(pending.send_hash));
        assert_eq!(block.subtype, Subtype::Receive);
    }

    #[test]
    fn receive_on_new_account_is_open() {
        let kp = derive_keypair(&Seed([14u8; 32]), 0);
        let state = AccountState::new_account(kp.public, kp.public);
        let pending = PendingPayment {
            send_hash: BlockHash::new([0xCC; 32]),
            source: destination(),
            amount: Amount::new(42),
        };
        let block = receive(&state, &pending).unwrap();
        assert!(block.previous.is_zero());
        assert_eq!(block.balance, Amount::new(42));
    }

    #[test]
    fn receive_overflow_fails() {
        let state = account_state(u128::MAX);
        let pending = PendingPayment {
            send_hash: BlockHash::new([0xCC; 32]),
            source: destination(),
            amount: Amount::new(1),
        };
        assert!(matches!(
            receive(&state, &pending),
            Err(BlockError::BalanceOverflow { .. })
        ));
    }

    #[test]
    fn change_keeps_balance_and_zeroes_link() {
        let state = account_state(777);
        let new_rep = derive_address(&derive_keypair(&Seed([15u8; 32]), 0).public);
        let block = change(&state, &new_rep).unwrap();
        assert_eq!(block.balance, Amount::new(777));
        assert_eq!(block.link, Link::Zero);
        assert_ne!(block.representative, state.representative);
    }

    #[test]
    fn change_on_new_account_fails() {
        let kp = derive_keypair(&Seed([16u8; 32]), 0);
        let state = AccountState::new_account(kp.public, kp.public);
        let rep = destination();
        assert_eq!(change(&state, &rep), Err(BlockError::UnopenedAccount));
    }
}
