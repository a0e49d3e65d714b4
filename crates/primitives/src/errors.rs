use thiserror::Error;

/// Errors from packing or unpacking a [`UtxoPos`](crate::UtxoPos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UtxoPosError {
    #[error("output index {0} out of range")]
    OutputIndexOutOfRange(u64),

    #[error("tx index {0} out of range")]
    TxIndexOutOfRange(u64),

    #[error("block number {0} too large to encode")]
    BlockNumberOverflow(u64),
}
