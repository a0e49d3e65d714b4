use plasma_primitives::{Address, B256, Timestamp, U256, UtxoPos};
use serde::{Deserialize, Serialize};

/// Observable record of a successful operation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RootChainEvent {
    Deposit {
        depositor: Address,
        blknum: u64,
        token: Address,
        amount: U256,
    },
    BlockSubmitted {
        blknum: u64,
        root: B256,
        timestamp: Timestamp,
    },
    TokenAdded {
        token: Address,
    },
    ExitStarted {
        exitor: Address,
        priority: u64,
        token: Address,
        amount: U256,
        exitable_at: Timestamp,
    },
    ExitChallenged {
        utxo_pos: UtxoPos,
        challenger: Address,
    },
    ExitFinalized {
        priority: u64,
        owner: Address,
        token: Address,
        amount: U256,
    },
}
