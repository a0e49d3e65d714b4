//! ECDSA signer recovery.

use alloy_primitives::{Address, B256, keccak256};
use plasma_primitives::RawSignature;
use secp256k1::{
    Message, PublicKey, SECP256K1,
    ecdsa::{RecoverableSignature, RecoveryId},
};

use crate::SignatureError;

/// Capability to recover the address that produced a signature over a hash.
///
/// The root chain only ever needs recovery, never signing, so this is the one
/// seam where a different curve implementation or a deterministic fixture can
/// be swapped in.
pub trait SignerRecovery {
    /// Recovers the signer of `hash`.  Never returns the zero address.
    fn recover_signer(&self, hash: &B256, sig: &RawSignature) -> Result<Address, SignatureError>;
}

/// [`SignerRecovery`] backed by libsecp256k1.
#[derive(Copy, Clone, Debug, Default)]
pub struct Secp256k1Recovery;

impl SignerRecovery for Secp256k1Recovery {
    fn recover_signer(&self, hash: &B256, sig: &RawSignature) -> Result<Address, SignatureError> {
        // Signatures are `r ‖ s ‖ v`; clients disagree on whether `v` is
        // offset by 27, so accept both.
        let v = sig[64];
        let rec = match v {
            0 | 1 => v,
            27 | 28 => v - 27,
            _ => return Err(SignatureError::UnsupportedRecoveryId(v)),
        };

        let recovery_id = RecoveryId::from_i32(rec as i32)
            .map_err(|_| SignatureError::UnsupportedRecoveryId(v))?;
        let recoverable = RecoverableSignature::from_compact(&sig[..64], recovery_id)
            .map_err(|_| SignatureError::InvalidSignatureFormat)?;

        let message = Message::from_digest(hash.0);
        let pubkey = SECP256K1
            .recover_ecdsa(&message, &recoverable)
            .map_err(|_| SignatureError::RecoveryFailed)?;

        let addr = public_key_to_address(&pubkey);
        if addr == Address::ZERO {
            return Err(SignatureError::ZeroAddress);
        }

        Ok(addr)
    }
}

/// Derives the account address of a public key: the last 20 bytes of the
/// keccak hash of the uncompressed key without its prefix byte.
pub fn public_key_to_address(pubkey: &PublicKey) -> Address {
    let uncompressed = pubkey.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    Address::from_slice(&hash[12..])
}

/// Message signed by a confirmation signature: `keccak256(tx_hash ‖ root)`.
pub fn confirmation_digest(tx_hash: &B256, block_root: &B256) -> B256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(tx_hash.as_slice());
    buf[32..].copy_from_slice(block_root.as_slice());
    keccak256(buf)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use secp256k1::SecretKey;

    use super::*;
    use crate::test_utils::{address_of, sign_hash, test_secret_key};

    #[test]
    fn test_recover_roundtrip() {
        let sk = test_secret_key(1);
        let hash = keccak256(b"plasma");
        let sig = sign_hash(&hash, &sk);

        let signer = Secp256k1Recovery.recover_signer(&hash, &sig).unwrap();
        assert_eq!(signer, address_of(&sk));
    }

    #[test]
    fn test_accepts_unoffset_v() {
        let sk = test_secret_key(2);
        let hash = keccak256(b"plasma");
        let mut sig = sign_hash(&hash, &sk);
        sig[64] -= 27;

        let signer = Secp256k1Recovery.recover_signer(&hash, &sig).unwrap();
        assert_eq!(signer, address_of(&sk));
    }

    #[test]
    fn test_rejects_bad_v() {
        let hash = keccak256(b"plasma");
        let mut sig = sign_hash(&hash, &test_secret_key(1));
        sig[64] = 29;
        assert_eq!(
            Secp256k1Recovery.recover_signer(&hash, &sig),
            Err(SignatureError::UnsupportedRecoveryId(29))
        );
    }

    #[test]
    fn test_rejects_zero_signature() {
        let hash = keccak256(b"plasma");
        assert!(Secp256k1Recovery.recover_signer(&hash, &[0u8; 65]).is_err());
    }

    #[test]
    fn test_known_address() {
        // Secret key 1 is the generator point.
        let sk = SecretKey::from_slice(&B256::with_last_byte(1).0).unwrap();
        let expected: Address = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
            .parse()
            .unwrap();
        assert_eq!(address_of(&sk), expected);
    }

    #[test]
    fn test_confirmation_digest_binds_root() {
        let tx_hash = keccak256(b"tx");
        let a = confirmation_digest(&tx_hash, &B256::ZERO);
        let b = confirmation_digest(&tx_hash, &B256::repeat_byte(1));
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn test_wrong_hash_recovers_other_signer(msg in any::<[u8; 32]>(), other in any::<[u8; 32]>()) {
            prop_assume!(msg != other);
            let sk = test_secret_key(3);
            let sig = sign_hash(&B256::from(msg), &sk);
            let recovered = Secp256k1Recovery.recover_signer(&B256::from(other), &sig);
            prop_assert_ne!(recovered, Ok(address_of(&sk)));
        }
    }
}
