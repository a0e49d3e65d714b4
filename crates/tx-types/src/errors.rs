use thiserror::Error;

pub type TxDecodeResult<T> = Result<T, TxDecodeError>;

/// Structural problems with a transaction or its signature blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxDecodeError {
    #[error("rlp: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    #[error("input {index} has output index {oindex}")]
    InvalidOutputIndex { index: usize, oindex: u64 },

    #[error("input {index} has tx index {txindex}")]
    InvalidTxIndex { index: usize, txindex: u64 },

    #[error("signature blob of {0} bytes")]
    SignatureBlobLength(usize),
}
