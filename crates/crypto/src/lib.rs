//! Signature recovery for transaction owners and confirmations.

mod errors;
mod recovery;

pub use errors::SignatureError;
pub use recovery::{
    Secp256k1Recovery, SignerRecovery, confirmation_digest, public_key_to_address,
};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
