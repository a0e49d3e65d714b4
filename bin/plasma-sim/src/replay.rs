//! Runs a [`Scenario`] against a fresh root chain.

use std::collections::BTreeSet;

use anyhow::Context;
use plasma_crypto::Secp256k1Recovery;
use plasma_params::RootChainParams;
use plasma_primitives::{Address, RawSignature, SIGNATURE_LEN, U256};
use plasma_root_chain::{
    CallContext, MemoryLedger, RootChainController, RootChainError, RootChainEvent,
    RootChainState,
};
use serde::Serialize;
use thiserror::Error;
use tracing::*;

use crate::scenario::{Op, Scenario, Step};

/// Result of one scenario step.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct StepOutcome {
    pub(crate) step: usize,
    pub(crate) op: &'static str,
    pub(crate) events: Vec<RootChainEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl StepOutcome {
    pub(crate) fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct AccountBalance {
    pub(crate) account: Address,
    pub(crate) token: Address,
    pub(crate) amount: U256,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct TokenCustody {
    pub(crate) token: Address,
    pub(crate) amount: U256,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct Summary {
    pub(crate) current_child_block: u64,
    pub(crate) current_deposit_block: u64,
    pub(crate) current_fee_exit: u64,
    pub(crate) live_exits: usize,
    pub(crate) balances: Vec<AccountBalance>,
    pub(crate) custody: Vec<TokenCustody>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct ReplayReport {
    pub(crate) steps: Vec<StepOutcome>,
    pub(crate) summary: Summary,
}

/// Replays `scenario` step by step.
///
/// Rejected steps are recorded and leave the state untouched.  With `strict`
/// set the replay stops after the first rejection.
pub(crate) fn run_scenario(
    operator: Address,
    params: RootChainParams,
    scenario: &Scenario,
    strict: bool,
) -> anyhow::Result<ReplayReport> {
    let mut state = RootChainState::new(operator, params).context("initializing root chain")?;
    let mut ledger = MemoryLedger::new();
    let controller = RootChainController::new(Secp256k1Recovery);

    let mut accounts = BTreeSet::new();
    for bal in &scenario.balances {
        ledger.mint(bal.account, bal.token, bal.amount);
        accounts.insert((bal.account, bal.token));
    }

    let mut outcomes = Vec::with_capacity(scenario.steps.len());
    for (idx, step) in scenario.steps.iter().enumerate() {
        let op = step.op.name();
        debug!(step = idx, %op, caller = %step.caller, now = step.now, "replaying step");

        let outcome = match apply_step(&controller, &mut state, &mut ledger, step) {
            Ok(events) => StepOutcome {
                step: idx,
                op,
                events,
                error: None,
            },
            Err(e) => StepOutcome {
                step: idx,
                op,
                events: Vec::new(),
                error: Some(e.to_string()),
            },
        };

        let stop = strict && outcome.is_rejected();
        outcomes.push(outcome);
        if stop {
            warn!(step = idx, %op, "stopping replay at rejected step");
            break;
        }
    }

    let balances = accounts
        .iter()
        .map(|&(account, token)| AccountBalance {
            account,
            token,
            amount: ledger.balance_of(account, token),
        })
        .collect();
    let custody = state
        .queues()
        .tokens()
        .map(|&token| TokenCustody {
            token,
            amount: ledger.custody_of(token),
        })
        .collect();

    let summary = Summary {
        current_child_block: state.current_child_block(),
        current_deposit_block: state.deposit_block(),
        current_fee_exit: state.current_fee_exit(),
        live_exits: state.exits().live_count(),
        balances,
        custody,
    };

    info!(
        steps = outcomes.len(),
        rejected = outcomes.iter().filter(|o| o.is_rejected()).count(),
        "replay finished"
    );

    Ok(ReplayReport {
        steps: outcomes,
        summary,
    })
}

fn apply_step(
    controller: &RootChainController<Secp256k1Recovery>,
    state: &mut RootChainState,
    ledger: &mut MemoryLedger,
    step: &Step,
) -> Result<Vec<RootChainEvent>, StepError> {
    let ctx = CallContext::new(step.caller, step.now);
    let ev = match &step.op {
        Op::AddToken { token } => controller.add_token(state, &ctx, *token)?,
        Op::Deposit {
            owner,
            token,
            amount,
        } => controller.deposit(state, ledger, &ctx, *owner, *token, *amount)?,
        Op::SubmitBlock { root } => controller.submit_block(state, &ctx, *root)?,
        Op::StartDepositExit {
            utxo_pos,
            token,
            amount,
        } => controller.start_deposit_exit(state, &ctx, *utxo_pos, *token, *amount)?,
        Op::StartFeeExit { token, amount } => {
            controller.start_fee_exit(state, &ctx, *token, *amount)?
        }
        Op::StartExit {
            utxo_pos,
            tx,
            proof,
            sigs,
        } => controller.start_exit(state, &ctx, *utxo_pos, tx, proof, sigs)?,
        Op::ChallengeExit {
            challenging_pos,
            exiting_pos,
            input_index,
            tx,
            proof,
            sigs,
            confirmation_sig,
        } => {
            let confirmation_sig = to_raw_signature(confirmation_sig)?;
            controller.challenge_exit(
                state,
                &ctx,
                *challenging_pos,
                *exiting_pos,
                *input_index,
                tx,
                proof,
                sigs,
                &confirmation_sig,
            )?
        }
        Op::FinalizeExits { token } => {
            return Ok(controller.finalize_exits(state, ledger, &ctx, *token)?);
        }
    };

    Ok(vec![ev])
}

fn to_raw_signature(bytes: &[u8]) -> Result<RawSignature, StepError> {
    RawSignature::try_from(bytes).map_err(|_| StepError::SignatureLength(bytes.len()))
}

#[derive(Debug, Error)]
enum StepError {
    #[error("{0}")]
    Rejected(#[from] RootChainError),

    #[error("confirmation signature must be {SIGNATURE_LEN} bytes, got {0}")]
    SignatureLength(usize),
}
