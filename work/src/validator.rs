//! Work nonce validation.
//!
//! A nonce is valid for a specific *root* — the account's frontier hash, or
//! the account public key while the chain is empty — at a given difficulty
//! threshold. The verification digest is Blake2b with an 8-byte output over
//! `nonce_le ‖ root`, read as a little-endian u64; the nonce passes when the
//! value meets or exceeds the threshold.
//!
//! Thresholds are variable: relays publish the currently required difficulty
//! and callers pass it in. Nothing here hardcodes a network threshold — see
//! [`crate::thresholds`] for the published defaults.

use blake2::digest::consts::U8;
use blake2::{Blake2b, Digest};

use nanolattice_types::BlockHash;

use crate::error::WorkError;

type Blake2b64 = Blake2b<U8>;

/// Compute the verification value of a nonce against a root.
pub fn work_value(nonce: u64, root: &BlockHash) -> u64 {
    let mut hasher = Blake2b64::new();
    hasher.update(nonce.to_le_bytes());
    hasher.update(root.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest);
    u64::from_le_bytes(out)
}

/// Whether a nonce meets the difficulty threshold for a root.
pub fn validate_work(nonce: u64, root: &BlockHash, threshold: u64) -> bool {
    work_value(nonce, root) >= threshold
}

/// Validate a nonce, surfacing the measured value on failure.
pub fn ensure_valid(nonce: u64, root: &BlockHash, threshold: u64) -> Result<(), WorkError> {
    let value = work_value(nonce, root);
    if value >= threshold {
        Ok(())
    } else {
        Err(WorkError::BelowThreshold { value, threshold })
    }
}

/// Whether work computed against `attached_root` no longer applies.
///
/// Work binds to one root. The moment the account's chain advances (its
/// frontier changes), any nonce computed against the old root is dead weight
/// and a new one must be requested against the new root.
pub fn is_stale(attached_root: &BlockHash, current_root: &BlockHash) -> bool {
    attached_root != current_root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_root() -> BlockHash {
        BlockHash::from_hex("C6F0E993B236BC16D3CEDBFFA5DF1C1889AC9D3A000B47A75D99B40F1A95F27A")
            .unwrap()
    }

    /// Golden vector: nonce 0x1b66 against the fixture root.
    #[test]
    fn work_value_golden() {
        assert_eq!(work_value(0x1b66, &fixture_root()), 0xfffb_53d8_553e_14e9);
    }

    /// Golden vector: nonce 42 against a different root.
    #[test]
    fn work_value_golden_low() {
        let root =
            BlockHash::from_hex("B89704D07BCB35477D1D66DF1C1F14AF208990056CB847971A954565D7871F07")
                .unwrap();
        assert_eq!(work_value(42, &root), 0x9756_3068_2822_7fab);
    }

    #[test]
    fn validate_against_threshold() {
        let root = fixture_root();
        assert!(validate_work(0x1b66, &root, 0xFFF0_0000_0000_0000));
        assert!(validate_work(0x1b66, &root, 0xfffb_53d8_553e_14e9));
        assert!(!validate_work(0x1b66, &root, 0xfffb_53d8_553e_14ea));
    }

    #[test]
    fn ensure_valid_reports_value() {
        let root = fixture_root();
        assert_eq!(ensure_valid(0x1b66, &root, 0xFFF0_0000_0000_0000), Ok(()));
        assert_eq!(
            ensure_valid(0x1b66, &root, u64::MAX),
            Err(WorkError::BelowThreshold {
                value: 0xfffb_53d8_553e_14e9,
                threshold: u64::MAX,
            })
        );
    }

    #[test]
    fn staleness_is_root_inequality() {
        let a = BlockHash::new([1u8; 32]);
        let b = BlockHash::new([2u8; 32]);
        assert!(!is_stale(&a, &a));
        assert!(is_stale(&a, &b));
    }
}
