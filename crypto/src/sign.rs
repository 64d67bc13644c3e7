//! Ed25519 signing and verification with Blake2b-512 digests.
//!
//! The scheme is RFC 8032 Ed25519 with Blake2b-512 substituted for SHA-512
//! in key expansion, nonce generation and the challenge hash. Stock Ed25519
//! verifiers reject these signatures; conforming ledger relays require them.

use blake2::Digest;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;

use nanolattice_types::{PrivateKey, PublicKey, Signature};

use crate::keys::{expand_private_key, Blake2b512};

fn scalar_from_wide_digest(hasher: Blake2b512) -> Scalar {
    let digest = hasher.finalize();
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&digest);
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// Sign a message with a private key. Deterministic: the nonce is derived
/// from the key's expansion prefix and the message.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let (a, prefix) = expand_private_key(private_key);
    let big_a = EdwardsPoint::mul_base(&a).compress();

    let mut hasher = Blake2b512::new();
    hasher.update(prefix);
    hasher.update(message);
    let r = scalar_from_wide_digest(hasher);
    let big_r = EdwardsPoint::mul_base(&r).compress();

    let mut hasher = Blake2b512::new();
    hasher.update(big_r.as_bytes());
    hasher.update(big_a.as_bytes());
    hasher.update(message);
    let k = scalar_from_wide_digest(hasher);

    let s = r + k * a;

    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(big_r.as_bytes());
    bytes[32..].copy_from_slice(s.as_bytes());
    Signature(bytes)
}

/// Verify a signature against a message and public key.
///
/// Returns `true` if the signature is valid. Non-canonical `s` scalars are
/// rejected (malleability protection), as are public keys or `R` values that
/// are not valid curve points.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Some(big_a) = CompressedEdwardsY(public_key.0).decompress() else {
        return false;
    };

    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&signature.0[32..]);
    let Some(s) = Option::<Scalar>::from(Scalar::from_canonical_bytes(s_bytes)) else {
        return false;
    };

    let mut r_bytes = [0u8; 32];
    r_bytes.copy_from_slice(&signature.0[..32]);

    let mut hasher = Blake2b512::new();
    hasher.update(&r_bytes);
    hasher.update(public_key.as_bytes());
    hasher.update(message);
    let k = scalar_from_wide_digest(hasher);

    // Recompute R' = sB - kA and compare against the transmitted R.
    let expected_r = EdwardsPoint::vartime_double_scalar_mul_basepoint(&-k, &big_a, &s);
    expected_r.compress().to_bytes() == r_bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::derive_keypair;
    use nanolattice_types::Seed;

    fn keypair() -> nanolattice_types::KeyPair {
        derive_keypair(&Seed([5u8; 32]), 0)
    }

    #[test]
    fn sign_and_verify() {
        let kp = keypair();
        let msg = b"one block of the lattice";
        let sig = sign_message(msg, &kp.private);
        assert!(verify_signature(msg, &sig, &kp.public));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = keypair();
        let sig = sign_message(b"correct message", &kp.private);
        assert!(!verify_signature(b"wrong message", &sig, &kp.public));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = derive_keypair(&Seed([1u8; 32]), 0);
        let kp2 = derive_keypair(&Seed([2u8; 32]), 0);
        let sig = sign_message(b"test", &kp1.private);
        assert!(!verify_signature(b"test", &sig, &kp2.public));
    }

    #[test]
    fn signature_deterministic() {
        let kp = keypair();
        let sig1 = sign_message(b"deterministic", &kp.private);
        let sig2 = sign_message(b"deterministic", &kp.private);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn empty_message() {
        let kp = keypair();
        let sig = sign_message(b"", &kp.private);
        assert!(verify_signature(b"", &sig, &kp.public));
    }

    #[test]
    fn invalid_public_key() {
        let kp = keypair();
        let sig = sign_message(b"test", &kp.private);
        // 0xFF… has no valid curve-point decompression.
        assert!(!verify_signature(b"test", &sig, &PublicKey([0xFF; 32])));
    }

    #[test]
    fn corrupted_signature_fails() {
        let kp = keypair();
        let mut sig = sign_message(b"test", &kp.private);
        sig.0[0] ^= 0x01;
        assert!(!verify_signature(b"test", &sig, &kp.public));
    }

    #[test]
    fn non_canonical_scalar_rejected() {
        let kp = keypair();
        let mut sig = sign_message(b"test", &kp.private);
        // Force s >= ℓ by setting the top bits of its high byte.
        sig.0[63] |= 0xF0;
        assert!(!verify_signature(b"test", &sig, &kp.public));
    }
}
