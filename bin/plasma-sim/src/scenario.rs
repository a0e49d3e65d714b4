//! Scenario file format.
//!
//! A scenario seeds ledger balances and then lists calls against the root
//! chain, each with the caller and the block time it executes at.

use alloy_primitives::Bytes;
use plasma_primitives::{Address, B256, NATIVE_TOKEN, Timestamp, U256, UtxoPos};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct Scenario {
    #[serde(default)]
    pub(crate) balances: Vec<Balance>,

    #[serde(default)]
    pub(crate) steps: Vec<Step>,
}

/// Amount minted into an account before the first step runs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Balance {
    pub(crate) account: Address,

    #[serde(default = "native_token")]
    pub(crate) token: Address,

    pub(crate) amount: U256,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Step {
    pub(crate) caller: Address,
    pub(crate) now: Timestamp,

    #[serde(flatten)]
    pub(crate) op: Op,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum Op {
    AddToken {
        token: Address,
    },
    Deposit {
        owner: Address,
        #[serde(default = "native_token")]
        token: Address,
        amount: U256,
    },
    SubmitBlock {
        root: B256,
    },
    StartDepositExit {
        utxo_pos: UtxoPos,
        #[serde(default = "native_token")]
        token: Address,
        amount: U256,
    },
    StartFeeExit {
        #[serde(default = "native_token")]
        token: Address,
        amount: U256,
    },
    StartExit {
        utxo_pos: UtxoPos,
        tx: Bytes,
        proof: Bytes,
        sigs: Bytes,
    },
    ChallengeExit {
        challenging_pos: UtxoPos,
        exiting_pos: UtxoPos,
        input_index: usize,
        tx: Bytes,
        proof: Bytes,
        sigs: Bytes,
        confirmation_sig: Bytes,
    },
    FinalizeExits {
        #[serde(default = "native_token")]
        token: Address,
    },
}

impl Op {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Op::AddToken { .. } => "add_token",
            Op::Deposit { .. } => "deposit",
            Op::SubmitBlock { .. } => "submit_block",
            Op::StartDepositExit { .. } => "start_deposit_exit",
            Op::StartFeeExit { .. } => "start_fee_exit",
            Op::StartExit { .. } => "start_exit",
            Op::ChallengeExit { .. } => "challenge_exit",
            Op::FinalizeExits { .. } => "finalize_exits",
        }
    }
}

fn native_token() -> Address {
    NATIVE_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let json = r#"{
            "balances": [
                { "account": "0x00000000000000000000000000000000000000a1", "amount": "0x64" }
            ],
            "steps": [
                {
                    "caller": "0x00000000000000000000000000000000000000a1",
                    "now": 10,
                    "op": "deposit",
                    "owner": "0x00000000000000000000000000000000000000a1",
                    "amount": "0x64"
                },
                {
                    "caller": "0x00000000000000000000000000000000000000a1",
                    "now": 20,
                    "op": "start_deposit_exit",
                    "utxo_pos": 1000000000,
                    "amount": "0x64"
                }
            ]
        }"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.balances.len(), 1);
        assert_eq!(scenario.balances[0].token, NATIVE_TOKEN);
        assert_eq!(scenario.balances[0].amount, U256::from(100));

        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(scenario.steps[0].op.name(), "deposit");
        match &scenario.steps[1].op {
            Op::StartDepositExit {
                utxo_pos, token, ..
            } => {
                assert_eq!(utxo_pos.raw(), 1_000_000_000);
                assert_eq!(*token, NATIVE_TOKEN);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_parse_hex_payloads() {
        let json = r#"{
            "caller": "0x00000000000000000000000000000000000000a1",
            "now": 0,
            "op": "start_exit",
            "utxo_pos": 1000000000,
            "tx": "0xc0",
            "proof": "0x",
            "sigs": "0x0102"
        }"#;

        let step: Step = serde_json::from_str(json).unwrap();
        match step.op {
            Op::StartExit { tx, proof, sigs, .. } => {
                assert_eq!(tx.as_ref(), &[0xc0]);
                assert!(proof.is_empty());
                assert_eq!(sigs.as_ref(), &[1, 2]);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_unknown_op_rejected() {
        let json = r#"{
            "caller": "0x00000000000000000000000000000000000000a1",
            "now": 0,
            "op": "withdraw"
        }"#;
        assert!(serde_json::from_str::<Step>(json).is_err());
    }
}
