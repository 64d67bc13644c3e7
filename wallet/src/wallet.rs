//! The seed-scoped wallet and its derived accounts.

use thiserror::Error;

use nanolattice_crypto::{
    derive_address, derive_keypair, generate_seed, mnemonic_to_seed, seed_to_mnemonic, KeyError,
    MnemonicError,
};
use nanolattice_types::{Address, KeyPair, Seed};

/// Errors creating or restoring a wallet.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    #[error("mnemonic error: {0}")]
    Mnemonic(#[from] MnemonicError),
}

/// A deterministic wallet over one seed.
///
/// Holds private material — treat instances like the seed itself.
pub struct Wallet {
    seed: Seed,
}

impl Wallet {
    /// Create a wallet with a fresh random seed.
    pub fn generate() -> Result<Self, WalletError> {
        Ok(Self {
            seed: generate_seed()?,
        })
    }

    /// Restore a wallet from an existing seed.
    pub fn from_seed(seed: Seed) -> Self {
        Self { seed }
    }

    /// Restore a wallet from its 24-word mnemonic phrase.
    pub fn from_mnemonic(phrase: &str) -> Result<Self, WalletError> {
        Ok(Self {
            seed: mnemonic_to_seed(phrase)?,
        })
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// The 24-word mnemonic spelling of the seed.
    pub fn mnemonic(&self) -> Result<String, WalletError> {
        Ok(seed_to_mnemonic(&self.seed)?)
    }

    /// The account at `index`. Pure: the same wallet and index always yield
    /// the same account.
    pub fn account(&self, index: u32) -> WalletAccount {
        let keys = derive_keypair(&self.seed, index);
        let address = derive_address(&keys.public);
        WalletAccount {
            index,
            keys,
            address,
        }
    }
}

/// One derived account of a wallet.
pub struct WalletAccount {
    pub index: u32,
    pub keys: KeyPair,
    pub address: Address,
}
