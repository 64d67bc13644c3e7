//! Seed ⇄ 24-word mnemonic conversion.
//!
//! A mnemonic is the BIP-39 *entropy encoding* of the 32-byte seed: the seed
//! maps to 24 words with an embedded checksum, and parsing the words back
//! recovers the identical seed. No passphrase stretching is involved — the
//! phrase and the seed are two spellings of the same secret.

use bip39::Mnemonic;
use thiserror::Error;

use nanolattice_types::Seed;

/// Word count of every valid wallet mnemonic (256-bit entropy).
pub const WORD_COUNT: usize = 24;

/// Errors arising from mnemonic parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("mnemonic checksum mismatch")]
    InvalidChecksum,

    #[error("expected {WORD_COUNT} words, got {0}")]
    BadWordCount(usize),

    #[error("unrecognized word at position {0}")]
    UnknownWord(usize),

    #[error("invalid mnemonic phrase: {0}")]
    InvalidPhrase(String),
}

fn map_bip39_error(err: bip39::Error) -> MnemonicError {
    match err {
        bip39::Error::InvalidChecksum => MnemonicError::InvalidChecksum,
        bip39::Error::BadWordCount(n) => MnemonicError::BadWordCount(n),
        bip39::Error::UnknownWord(i) => MnemonicError::UnknownWord(i),
        other => MnemonicError::InvalidPhrase(other.to_string()),
    }
}

/// Encode a seed as its 24-word mnemonic phrase.
pub fn seed_to_mnemonic(seed: &Seed) -> Result<String, MnemonicError> {
    let mnemonic = Mnemonic::from_entropy(seed.as_bytes())
        .map_err(|e| MnemonicError::InvalidPhrase(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Decode a 24-word mnemonic phrase back into the seed it encodes.
///
/// Fails with [`MnemonicError::InvalidChecksum`] when the phrase's embedded
/// checksum does not match.
pub fn mnemonic_to_seed(phrase: &str) -> Result<Seed, MnemonicError> {
    let mnemonic = Mnemonic::parse_normalized(phrase).map_err(map_bip39_error)?;
    if mnemonic.word_count() != WORD_COUNT {
        return Err(MnemonicError::BadWordCount(mnemonic.word_count()));
    }
    let entropy = mnemonic.to_entropy();
    let bytes: [u8; 32] = entropy
        .try_into()
        .map_err(|_| MnemonicError::BadWordCount(WORD_COUNT))?;
    Ok(Seed(bytes))
}

/// Whether a phrase is a valid 24-word mnemonic.
pub fn validate_mnemonic(phrase: &str) -> bool {
    mnemonic_to_seed(phrase).is_ok()
}
