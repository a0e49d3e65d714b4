use alloy_primitives::{Address, B256, U256, keccak256};
use alloy_rlp_derive::{RlpDecodable, RlpEncodable};
use plasma_primitives::{MAX_OUTPUT_INDEX, MAX_TX_INDEX, UtxoPos, UtxoPosError};
use serde::{Deserialize, Serialize};

use crate::{TxDecodeError, TxDecodeResult, TxSignatures};

/// Number of input slots in a transaction.
pub const NUM_INPUTS: usize = 2;

/// Number of output slots in a transaction.
pub const NUM_OUTPUTS: usize = 2;

/// Reference to an output being spent.
///
/// A zero block number marks the slot as unused.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TxInput {
    pub blknum: u64,
    pub txindex: u64,
    pub oindex: u8,
}

impl TxInput {
    pub const fn new(blknum: u64, txindex: u64, oindex: u8) -> Self {
        Self {
            blknum,
            txindex,
            oindex,
        }
    }

    /// Input spending a deposit output.
    pub const fn from_deposit(blknum: u64) -> Self {
        Self::new(blknum, 0, 0)
    }

    pub const fn is_present(&self) -> bool {
        self.blknum != 0
    }

    pub fn utxo_pos(&self) -> Result<UtxoPos, UtxoPosError> {
        UtxoPos::new(self.blknum, self.txindex, self.oindex)
    }

    /// Checks whether this input spends exactly `pos`.
    pub fn references(&self, pos: UtxoPos) -> bool {
        self.is_present() && self.utxo_pos().is_ok_and(|p| p == pos)
    }
}

/// New output created by a transaction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TxOutput {
    pub owner: Address,
    pub amount: U256,
}

impl TxOutput {
    pub const fn new(owner: Address, amount: U256) -> Self {
        Self { owner, amount }
    }
}

/// Decoded child chain transaction.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    inputs: [TxInput; NUM_INPUTS],
    token: Address,
    outputs: [TxOutput; NUM_OUTPUTS],
}

/// Flat wire layout:
/// `[blknum1, txindex1, oindex1, blknum2, txindex2, oindex2, token, owner1,
/// amount1, owner2, amount2]`.
#[derive(Debug, RlpEncodable, RlpDecodable)]
struct RawTransaction {
    blknum1: u64,
    txindex1: u64,
    oindex1: u64,
    blknum2: u64,
    txindex2: u64,
    oindex2: u64,
    token: Address,
    owner1: Address,
    amount1: U256,
    owner2: Address,
    amount2: U256,
}

impl Transaction {
    pub fn new(
        inputs: [TxInput; NUM_INPUTS],
        token: Address,
        outputs: [TxOutput; NUM_OUTPUTS],
    ) -> Self {
        Self {
            inputs,
            token,
            outputs,
        }
    }

    pub fn inputs(&self) -> &[TxInput; NUM_INPUTS] {
        &self.inputs
    }

    pub fn input(&self, idx: usize) -> Option<&TxInput> {
        self.inputs.get(idx)
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn outputs(&self) -> &[TxOutput; NUM_OUTPUTS] {
        &self.outputs
    }

    pub fn output(&self, idx: usize) -> Option<&TxOutput> {
        self.outputs.get(idx)
    }

    /// Decodes a transaction, rejecting anything but a canonical 11-item
    /// list with no trailing bytes.
    pub fn decode(buf: &[u8]) -> TxDecodeResult<Self> {
        let raw: RawTransaction = alloy_rlp::decode_exact(buf)?;

        let inputs = [
            check_input(0, raw.blknum1, raw.txindex1, raw.oindex1)?,
            check_input(1, raw.blknum2, raw.txindex2, raw.oindex2)?,
        ];
        let outputs = [
            TxOutput::new(raw.owner1, raw.amount1),
            TxOutput::new(raw.owner2, raw.amount2),
        ];

        Ok(Self::new(inputs, raw.token, outputs))
    }

    pub fn encode(&self) -> Vec<u8> {
        let [in1, in2] = self.inputs;
        let [out1, out2] = self.outputs;
        let raw = RawTransaction {
            blknum1: in1.blknum,
            txindex1: in1.txindex,
            oindex1: in1.oindex as u64,
            blknum2: in2.blknum,
            txindex2: in2.txindex,
            oindex2: in2.oindex as u64,
            token: self.token,
            owner1: out1.owner,
            amount1: out1.amount,
            owner2: out2.owner,
            amount2: out2.amount,
        };
        alloy_rlp::encode(&raw)
    }

    /// Hash of the canonical encoding.  This is what input owners sign.
    pub fn hash(&self) -> B256 {
        compute_tx_hash(&self.encode())
    }
}

fn check_input(index: usize, blknum: u64, txindex: u64, oindex: u64) -> TxDecodeResult<TxInput> {
    if oindex > MAX_OUTPUT_INDEX as u64 {
        return Err(TxDecodeError::InvalidOutputIndex { index, oindex });
    }

    if txindex >= MAX_TX_INDEX {
        return Err(TxDecodeError::InvalidTxIndex { index, txindex });
    }

    Ok(TxInput::new(blknum, txindex, oindex as u8))
}

/// Hashes encoded transaction bytes.
pub fn compute_tx_hash(tx_bytes: &[u8]) -> B256 {
    keccak256(tx_bytes)
}

/// Leaf committed to in a block tree: `keccak256(tx_hash ‖ sig1 ‖ sig2)`.
pub fn compute_leaf_hash(tx_hash: &B256, sigs: &TxSignatures) -> B256 {
    let mut buf = Vec::with_capacity(32 + 2 * plasma_primitives::SIGNATURE_LEN);
    buf.extend_from_slice(tx_hash.as_slice());
    for sig in sigs.input_sigs() {
        buf.extend_from_slice(sig);
    }
    keccak256(buf)
}
