//! Collection of data types and constants shared by the root chain crates.
//!
//! The EVM-flavoured scalar types are re-exported from [`alloy_primitives`] so
//! downstream crates agree on a single definition of an address or a word.

mod constants;
mod errors;
mod utxo_pos;

pub use alloy_primitives::{Address, B256, U256, keccak256};
pub use constants::*;
pub use errors::UtxoPosError;
pub use utxo_pos::{UtxoPos, UtxoPosParts};

/// Seconds since the unix epoch, as supplied by the caller of an operation.
pub type Timestamp = u64;

/// Address used to denote the native asset in token fields.
pub const NATIVE_TOKEN: Address = Address::ZERO;
