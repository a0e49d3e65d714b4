use thiserror::Error;

/// Errors from recovering the signer of a hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The `v` byte is not one of 0, 1, 27 or 28.
    #[error("unsupported recovery id {0}")]
    UnsupportedRecoveryId(u8),

    /// `r` or `s` is not a valid scalar.
    #[error("invalid signature format")]
    InvalidSignatureFormat,

    /// No public key recovers from the signature.
    #[error("recovery failed")]
    RecoveryFailed,

    /// Recovery produced the zero address.
    #[error("signer is the zero address")]
    ZeroAddress,
}
