use plasma_primitives::Address;
use thiserror::Error;

pub type ExitQueueResult<T> = Result<T, ExitQueueError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExitQueueError {
    #[error("priority {0} is already queued")]
    DuplicatePriority(u64),

    #[error("queue is empty")]
    EmptyQueue,

    #[error("priority {0} is not queued")]
    NotQueued(u64),

    #[error("no exit queue for token {0}")]
    UnknownToken(Address),

    #[error("token {0} already has an exit queue")]
    TokenAlreadyRegistered(Address),
}
