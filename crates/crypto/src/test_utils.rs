//! Signing helpers for tests.  The root chain itself never signs.

use alloy_primitives::{Address, B256, keccak256};
use plasma_primitives::{RawSignature, SIGNATURE_LEN};
use secp256k1::{Message, PublicKey, SECP256K1, SecretKey};

use crate::public_key_to_address;

/// Deterministic secret key derived from a seed.
pub fn test_secret_key(seed: u8) -> SecretKey {
    let bytes = keccak256([b'k', seed]);
    SecretKey::from_slice(bytes.as_slice()).expect("test: keccak output is a valid scalar")
}

/// Address controlled by `sk`.
pub fn address_of(sk: &SecretKey) -> Address {
    public_key_to_address(&PublicKey::from_secret_key(SECP256K1, sk))
}

/// Produces an `r ‖ s ‖ v` signature with `v` in {27, 28}.
pub fn sign_hash(hash: &B256, sk: &SecretKey) -> RawSignature {
    let message = Message::from_digest(hash.0);
    let (recid, compact) = SECP256K1
        .sign_ecdsa_recoverable(&message, sk)
        .serialize_compact();

    let mut sig = [0u8; SIGNATURE_LEN];
    sig[..64].copy_from_slice(&compact);
    sig[64] = 27 + recid.to_i32() as u8;
    sig
}
