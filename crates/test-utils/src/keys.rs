use plasma_crypto::{
    confirmation_digest,
    test_utils::{address_of, sign_hash, test_secret_key},
};
use plasma_primitives::{Address, B256, RawSignature};
use secp256k1::SecretKey;

/// Key pair with its address, derived from a one-byte seed.
#[derive(Clone, Debug)]
pub struct TestAccount {
    secret: SecretKey,
    address: Address,
}

impl TestAccount {
    pub fn new(seed: u8) -> Self {
        let secret = test_secret_key(seed);
        let address = address_of(&secret);
        Self { secret, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    pub fn sign(&self, hash: &B256) -> RawSignature {
        sign_hash(hash, &self.secret)
    }

    /// Confirmation signature over `(tx_hash, root)`.
    pub fn confirm(&self, tx_hash: &B256, root: &B256) -> RawSignature {
        self.sign(&confirmation_digest(tx_hash, root))
    }
}
