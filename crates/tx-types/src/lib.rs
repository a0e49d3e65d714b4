//! Child chain transaction types and their wire encoding.
//!
//! A transaction always has two inputs, one token and two outputs, RLP encoded
//! as a flat list of eleven items.  Owner signatures are carried next to the
//! transaction, never inside it; see [`TxSignatures`].

mod errors;
mod signatures;
mod transaction;

pub use errors::{TxDecodeError, TxDecodeResult};
pub use signatures::{TxSignatures, is_empty_signature};
pub use transaction::{
    NUM_INPUTS, NUM_OUTPUTS, Transaction, TxInput, TxOutput, compute_leaf_hash, compute_tx_hash,
};
