//! Packed identifiers for transaction outputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BLOCK_OFFSET, MAX_OUTPUT_INDEX, MAX_TX_INDEX, TX_OFFSET, UtxoPosError};

/// Position of a transaction output, packed as
/// `blknum * 10^9 + txindex * 10^4 + oindex`.
///
/// The raw value doubles as the priority key of an exit, so it is kept as a
/// plain integer and only unpacked when a caller asks for the parts.  A raw
/// value taken from untrusted input may not decode; see [`UtxoPos::parts`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtxoPos(u64);

/// Unpacked fields of a [`UtxoPos`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct UtxoPosParts {
    pub blknum: u64,
    pub txindex: u64,
    pub oindex: u8,
}

impl UtxoPos {
    /// Wraps a raw packed position without checking it.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Packs the three fields into a position.
    pub fn new(blknum: u64, txindex: u64, oindex: u8) -> Result<Self, UtxoPosError> {
        if oindex > MAX_OUTPUT_INDEX {
            return Err(UtxoPosError::OutputIndexOutOfRange(oindex as u64));
        }

        if txindex >= MAX_TX_INDEX {
            return Err(UtxoPosError::TxIndexOutOfRange(txindex));
        }

        let raw = blknum
            .checked_mul(BLOCK_OFFSET)
            .and_then(|b| b.checked_add(txindex * TX_OFFSET + oindex as u64))
            .ok_or(UtxoPosError::BlockNumberOverflow(blknum))?;

        Ok(Self(raw))
    }

    /// Position of the single output of a deposit block.
    pub fn deposit(blknum: u64) -> Result<Self, UtxoPosError> {
        Self::new(blknum, 0, 0)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Block number field.  Always well-defined, even for malformed positions.
    pub const fn blknum(&self) -> u64 {
        self.0 / BLOCK_OFFSET
    }

    /// Unpacks the position, rejecting values whose lower fields are out of
    /// range.
    pub fn parts(&self) -> Result<UtxoPosParts, UtxoPosError> {
        let rem = self.0 % BLOCK_OFFSET;
        let txindex = rem / TX_OFFSET;
        let oindex = rem % TX_OFFSET;

        if txindex >= MAX_TX_INDEX {
            return Err(UtxoPosError::TxIndexOutOfRange(txindex));
        }

        if oindex > MAX_OUTPUT_INDEX as u64 {
            return Err(UtxoPosError::OutputIndexOutOfRange(oindex));
        }

        Ok(UtxoPosParts {
            blknum: self.blknum(),
            txindex,
            oindex: oindex as u8,
        })
    }
}

impl From<UtxoPos> for u64 {
    fn from(value: UtxoPos) -> Self {
        value.0
    }
}

impl fmt::Display for UtxoPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parts() {
            Ok(p) => write!(f, "{}:{}:{}", p.blknum, p.txindex, p.oindex),
            Err(_) => write!(f, "raw({})", self.0),
        }
    }
}
