//! Protocol-wide numeric constants.

/// Multiplier applied to the block number when packing a UTXO position.
pub const BLOCK_OFFSET: u64 = 1_000_000_000;

/// Multiplier applied to the transaction index when packing a UTXO position.
pub const TX_OFFSET: u64 = 10_000;

/// Exclusive upper bound on the transaction index within a block.
pub const MAX_TX_INDEX: u64 = 10_000;

/// Largest valid output index.  Transactions have exactly two outputs.
pub const MAX_OUTPUT_INDEX: u8 = 1;

/// One day in seconds.
pub const DAY_SECS: u64 = 24 * 60 * 60;

/// One week in seconds.
pub const WEEK_SECS: u64 = 7 * DAY_SECS;

/// Size of a recoverable ECDSA signature (`r ‖ s ‖ v`).
pub const SIGNATURE_LEN: usize = 65;

/// Raw recoverable signature bytes.
pub type RawSignature = [u8; SIGNATURE_LEN];
