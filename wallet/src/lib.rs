//! Deterministic wallets.
//!
//! A wallet is nothing but a seed: every account it will ever contain is
//! derived from (seed, index), so backing up the seed — or its 24-word
//! mnemonic spelling — backs up every account, past and future.

pub mod wallet;

pub use wallet::{Wallet, WalletAccount, WalletError};
