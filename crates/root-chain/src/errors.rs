use plasma_exit_queue::ExitQueueError;
use plasma_params::ParamsError;
use plasma_primitives::{Address, U256, UtxoPos};
use plasma_tx_types::TxDecodeError;
use thiserror::Error;

use crate::LedgerError;

pub type RootChainResult<T> = Result<T, RootChainError>;

/// Reasons a root chain operation is rejected.  A rejected operation leaves
/// the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RootChainError {
    #[error("invalid utxo position {0}")]
    InvalidPosition(UtxoPos),

    #[error("malformed transaction: {0}")]
    MalformedTransaction(#[from] TxDecodeError),

    #[error("invalid signature for input {input}")]
    InvalidSignature { input: usize },

    #[error("inclusion proof for {0} does not match the block root")]
    ProofInvalid(UtxoPos),

    #[error("amount mismatch (expected {expected}, got {got})")]
    AmountMismatch { expected: U256, got: U256 },

    #[error("{0} is not authorized")]
    Unauthorized(Address),

    #[error("exit with priority {0} already exists")]
    ExitAlreadyExists(u64),

    #[error("challenging input does not spend {0}")]
    UtxoNotReferenced(UtxoPos),

    #[error("confirmation signature is not from the exit owner")]
    ConfirmationInvalid,

    #[error("exit queue is empty")]
    EmptyQueue,

    #[error("unknown block {0}")]
    UnknownBlock(u64),

    #[error("priority {0} is already queued")]
    DuplicatePriority(u64),

    #[error("{0} does not own the exiting output")]
    NotOutputOwner(Address),

    #[error("token mismatch (expected {expected}, got {got})")]
    TokenMismatch { expected: Address, got: Address },

    #[error("token {0} is not supported")]
    UnsupportedToken(Address),

    #[error("token {0} was already added")]
    TokenAlreadyAdded(Address),

    #[error("no deposit slots left before block {0}")]
    DepositLimitReached(u64),

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("no live exit with priority {0}")]
    ExitNotFound(u64),

    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),

    #[error("params: {0}")]
    Params(#[from] ParamsError),
}

impl From<ExitQueueError> for RootChainError {
    fn from(value: ExitQueueError) -> Self {
        match value {
            ExitQueueError::DuplicatePriority(p) => Self::DuplicatePriority(p),
            ExitQueueError::EmptyQueue => Self::EmptyQueue,
            ExitQueueError::NotQueued(p) => Self::ExitNotFound(p),
            ExitQueueError::UnknownToken(t) => Self::UnsupportedToken(t),
            ExitQueueError::TokenAlreadyRegistered(t) => Self::TokenAlreadyAdded(t),
        }
    }
}
