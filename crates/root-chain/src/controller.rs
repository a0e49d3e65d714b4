//! Root chain operations.
//!
//! Every operation validates its inputs completely before it touches the
//! state, so a rejected call leaves [`RootChainState`] unchanged.  The only
//! operation that mutates state before an external call is
//! [`RootChainController::finalize_exits`], which undoes its batch if the
//! ledger refuses the payout.

use plasma_crypto::{SignerRecovery, confirmation_digest};
use plasma_exit_queue::QueueEntry;
use plasma_merkle::verify_membership;
use plasma_primitives::{Address, B256, RawSignature, Timestamp, U256, UtxoPos, UtxoPosParts};
use plasma_tx_types::{
    Transaction, TxSignatures, compute_leaf_hash, compute_tx_hash, is_empty_signature,
};
use tracing::*;

use crate::{
    CallContext, DepositRecord, ExitRecord, Payout, RootChainError, RootChainEvent,
    RootChainResult, RootChainState, ValueLedger,
};

/// Entry point for every state-changing root chain operation.
#[derive(Clone, Debug, Default)]
pub struct RootChainController<R> {
    recovery: R,
}

impl<R: SignerRecovery> RootChainController<R> {
    pub fn new(recovery: R) -> Self {
        Self { recovery }
    }

    pub fn recovery(&self) -> &R {
        &self.recovery
    }

    /// Registers an exit queue for `token`.  Operator only.
    pub fn add_token(
        &self,
        state: &mut RootChainState,
        ctx: &CallContext,
        token: Address,
    ) -> RootChainResult<RootChainEvent> {
        process_add_token(state, ctx, token).inspect_err(|e| log_rejection("add_token", e))
    }

    /// Takes `amount` of `token` from the caller into custody and records a
    /// deposit block owned by `owner`.
    pub fn deposit<L: ValueLedger>(
        &self,
        state: &mut RootChainState,
        ledger: &mut L,
        ctx: &CallContext,
        owner: Address,
        token: Address,
        amount: U256,
    ) -> RootChainResult<RootChainEvent> {
        process_deposit(state, ledger, ctx, owner, token, amount)
            .inspect_err(|e| log_rejection("deposit", e))
    }

    /// Records the root of the next child chain block.  Operator only.
    pub fn submit_block(
        &self,
        state: &mut RootChainState,
        ctx: &CallContext,
        root: B256,
    ) -> RootChainResult<RootChainEvent> {
        process_submit_block(state, ctx, root).inspect_err(|e| log_rejection("submit_block", e))
    }

    /// Starts an exit of the output created by a deposit.
    pub fn start_deposit_exit(
        &self,
        state: &mut RootChainState,
        ctx: &CallContext,
        utxo_pos: UtxoPos,
        token: Address,
        amount: U256,
    ) -> RootChainResult<RootChainEvent> {
        process_deposit_exit(state, ctx, utxo_pos, token, amount)
            .inspect_err(|e| log_rejection("start_deposit_exit", e))
    }

    /// Starts an exit of collected fees.  Operator only.
    pub fn start_fee_exit(
        &self,
        state: &mut RootChainState,
        ctx: &CallContext,
        token: Address,
        amount: U256,
    ) -> RootChainResult<RootChainEvent> {
        process_fee_exit(state, ctx, token, amount)
            .inspect_err(|e| log_rejection("start_fee_exit", e))
    }

    /// Starts an exit of an output of a child chain transaction.
    ///
    /// The caller must own the output.  Every input the transaction spends
    /// must carry an owner signature and a confirmation signature from the
    /// same signer.
    pub fn start_exit(
        &self,
        state: &mut RootChainState,
        ctx: &CallContext,
        utxo_pos: UtxoPos,
        tx_bytes: &[u8],
        proof: &[u8],
        sigs: &[u8],
    ) -> RootChainResult<RootChainEvent> {
        self.process_exit(state, ctx, utxo_pos, tx_bytes, proof, sigs)
            .inspect_err(|e| log_rejection("start_exit", e))
    }

    /// Invalidates the exit of `exiting_pos` by showing an included
    /// transaction, at `challenging_pos`, whose input `input_index` spends it
    /// and which the exit owner confirmed.
    #[expect(clippy::too_many_arguments, reason = "mirrors the call interface")]
    pub fn challenge_exit(
        &self,
        state: &mut RootChainState,
        ctx: &CallContext,
        challenging_pos: UtxoPos,
        exiting_pos: UtxoPos,
        input_index: usize,
        tx_bytes: &[u8],
        proof: &[u8],
        sigs: &[u8],
        confirmation_sig: &RawSignature,
    ) -> RootChainResult<RootChainEvent> {
        let challenge = Challenge {
            challenging_pos,
            exiting_pos,
            input_index,
            tx_bytes,
            proof,
            sigs,
            confirmation_sig,
        };
        self.process_challenge(state, ctx, &challenge)
            .inspect_err(|e| log_rejection("challenge_exit", e))
    }

    /// Pays out every exit of `token` that has matured, in maturity order.
    ///
    /// Stops at the first exit that is not yet mature.  Challenged exits left
    /// in the queue are dropped without a payout.
    pub fn finalize_exits<L: ValueLedger>(
        &self,
        state: &mut RootChainState,
        ledger: &mut L,
        ctx: &CallContext,
        token: Address,
    ) -> RootChainResult<Vec<RootChainEvent>> {
        process_finalize(state, ledger, ctx, token)
            .inspect_err(|e| log_rejection("finalize_exits", e))
    }

    fn process_exit(
        &self,
        state: &mut RootChainState,
        ctx: &CallContext,
        utxo_pos: UtxoPos,
        tx_bytes: &[u8],
        proof: &[u8],
        sigs: &[u8],
    ) -> RootChainResult<RootChainEvent> {
        let parts = decode_position(utxo_pos)?;
        let tx = Transaction::decode(tx_bytes)?;
        let sigs = TxSignatures::parse(sigs)?;
        let blk = *state.blocks.get(parts.blknum)?;

        let output = *tx
            .output(parts.oindex as usize)
            .ok_or(RootChainError::InvalidPosition(utxo_pos))?;
        if output.owner != ctx.caller() {
            return Err(RootChainError::NotOutputOwner(ctx.caller()));
        }

        let tx_hash = compute_tx_hash(tx_bytes);
        let leaf = compute_leaf_hash(&tx_hash, &sigs);
        if !verify_membership(&leaf, parts.txindex, proof, &blk.root) {
            return Err(RootChainError::ProofInvalid(utxo_pos));
        }

        self.check_input_signatures(&tx, &sigs, &tx_hash, &blk.root)?;

        let exitable_at = state.params.exitable_at(ctx.now(), blk.submitted_at)?;
        add_exit(
            state,
            utxo_pos.raw(),
            output.owner,
            tx.token(),
            output.amount,
            exitable_at,
        )
    }

    /// Each spent input needs an owner signature over the transaction and a
    /// confirmation over `(tx_hash, root)` that recover to the same signer.
    fn check_input_signatures(
        &self,
        tx: &Transaction,
        sigs: &TxSignatures,
        tx_hash: &B256,
        root: &B256,
    ) -> RootChainResult<()> {
        let conf_hash = confirmation_digest(tx_hash, root);

        for (idx, input) in tx.inputs().iter().enumerate() {
            if !input.is_present() {
                continue;
            }

            let invalid = || RootChainError::InvalidSignature { input: idx };
            let sig = sigs.input_sig(idx).ok_or_else(invalid)?;
            let conf = sigs.confirmation(idx).ok_or_else(invalid)?;
            if is_empty_signature(sig) || is_empty_signature(conf) {
                return Err(invalid());
            }

            let signer = self
                .recovery
                .recover_signer(tx_hash, sig)
                .map_err(|_| invalid())?;
            let confirmer = self
                .recovery
                .recover_signer(&conf_hash, conf)
                .map_err(|_| invalid())?;
            if signer != confirmer {
                return Err(invalid());
            }
        }

        Ok(())
    }

    fn process_challenge(
        &self,
        state: &mut RootChainState,
        ctx: &CallContext,
        ch: &Challenge<'_>,
    ) -> RootChainResult<RootChainEvent> {
        let parts = decode_position(ch.challenging_pos)?;
        let tx = Transaction::decode(ch.tx_bytes)?;
        let sigs = TxSignatures::parse(ch.sigs)?;

        let spends_exit = tx
            .input(ch.input_index)
            .is_some_and(|input| input.references(ch.exiting_pos));
        if !spends_exit {
            return Err(RootChainError::UtxoNotReferenced(ch.exiting_pos));
        }

        let priority = ch.exiting_pos.raw();
        let exit = *state
            .exits
            .live(priority)
            .ok_or(RootChainError::ExitNotFound(priority))?;

        let root = state.blocks.get(parts.blknum)?.root;
        let tx_hash = compute_tx_hash(ch.tx_bytes);
        let leaf = compute_leaf_hash(&tx_hash, &sigs);
        if !verify_membership(&leaf, parts.txindex, ch.proof, &root) {
            return Err(RootChainError::ProofInvalid(ch.challenging_pos));
        }

        let conf_hash = confirmation_digest(&tx_hash, &root);
        let confirmer = self
            .recovery
            .recover_signer(&conf_hash, ch.confirmation_sig)
            .map_err(|_| RootChainError::ConfirmationInvalid)?;
        if confirmer != exit.owner {
            return Err(RootChainError::ConfirmationInvalid);
        }

        state.queues.remove(&exit.token, priority)?;
        state.exits.clear(priority);

        debug!(utxo_pos = %ch.exiting_pos, challenger = %ctx.caller(), "challenged exit");
        Ok(RootChainEvent::ExitChallenged {
            utxo_pos: ch.exiting_pos,
            challenger: ctx.caller(),
        })
    }
}

/// Arguments of a challenge, bundled.
#[derive(Debug)]
struct Challenge<'a> {
    challenging_pos: UtxoPos,
    exiting_pos: UtxoPos,
    input_index: usize,
    tx_bytes: &'a [u8],
    proof: &'a [u8],
    sigs: &'a [u8],
    confirmation_sig: &'a RawSignature,
}

fn process_add_token(
    state: &mut RootChainState,
    ctx: &CallContext,
    token: Address,
) -> RootChainResult<RootChainEvent> {
    ensure_operator(state, ctx)?;
    state.queues.add_token(token)?;
    debug!(%token, "added token");
    Ok(RootChainEvent::TokenAdded { token })
}

fn process_deposit<L: ValueLedger>(
    state: &mut RootChainState,
    ledger: &mut L,
    ctx: &CallContext,
    owner: Address,
    token: Address,
    amount: U256,
) -> RootChainResult<RootChainEvent> {
    if !state.queues.has_token(&token) {
        return Err(RootChainError::UnsupportedToken(token));
    }
    if amount.is_zero() {
        return Err(RootChainError::ZeroAmount);
    }
    state.blocks.ensure_deposit_slot()?;

    ledger.take_custody(ctx.caller(), token, amount)?;

    let record = DepositRecord {
        owner,
        token,
        amount,
    };
    // Slot availability was checked above, so this cannot fail after custody
    // was taken.
    let blknum = state.blocks.record_deposit(record, ctx.now())?;

    debug!(%owner, %token, %amount, %blknum, "recorded deposit");
    Ok(RootChainEvent::Deposit {
        depositor: owner,
        blknum,
        token,
        amount,
    })
}

fn process_submit_block(
    state: &mut RootChainState,
    ctx: &CallContext,
    root: B256,
) -> RootChainResult<RootChainEvent> {
    ensure_operator(state, ctx)?;
    let blknum = state.blocks.submit_block(root, ctx.now());
    debug!(%blknum, %root, "submitted block");
    Ok(RootChainEvent::BlockSubmitted {
        blknum,
        root,
        timestamp: ctx.now(),
    })
}

fn process_deposit_exit(
    state: &mut RootChainState,
    ctx: &CallContext,
    utxo_pos: UtxoPos,
    token: Address,
    amount: U256,
) -> RootChainResult<RootChainEvent> {
    let parts = decode_position(utxo_pos)?;
    if parts.txindex != 0 || parts.oindex != 0 {
        return Err(RootChainError::InvalidPosition(utxo_pos));
    }

    let deposit = state
        .blocks
        .get(parts.blknum)
        .ok()
        .and_then(|blk| blk.deposit)
        .ok_or(RootChainError::InvalidPosition(utxo_pos))?;

    if deposit.owner != ctx.caller() {
        return Err(RootChainError::Unauthorized(ctx.caller()));
    }
    if deposit.amount != amount {
        return Err(RootChainError::AmountMismatch {
            expected: deposit.amount,
            got: amount,
        });
    }
    if deposit.token != token {
        return Err(RootChainError::TokenMismatch {
            expected: deposit.token,
            got: token,
        });
    }

    let exitable_at = state.params.deposit_exitable_at(ctx.now())?;
    add_exit(
        state,
        utxo_pos.raw(),
        ctx.caller(),
        token,
        amount,
        exitable_at,
    )
}

fn process_fee_exit(
    state: &mut RootChainState,
    ctx: &CallContext,
    token: Address,
    amount: U256,
) -> RootChainResult<RootChainEvent> {
    ensure_operator(state, ctx)?;

    let priority = state.current_fee_exit;
    let exitable_at = state.params.fee_exitable_at(ctx.now())?;
    let ev = add_exit(state, priority, ctx.caller(), token, amount, exitable_at)?;

    state.current_fee_exit += 1;
    Ok(ev)
}

fn process_finalize<L: ValueLedger>(
    state: &mut RootChainState,
    ledger: &mut L,
    ctx: &CallContext,
    token: Address,
) -> RootChainResult<Vec<RootChainEvent>> {
    state.queues.queue(&token)?;

    let mut undo = Vec::new();
    let mut payouts = Vec::new();
    let mut events = Vec::new();

    while let Some(entry) = state.queues.peek_min(&token)?.copied() {
        if !entry.is_mature(ctx.now()) {
            break;
        }

        state.queues.extract_min(&token)?;
        let was_closed = state.exits.is_closed(entry.priority);
        let record = state.exits.clear(entry.priority);
        undo.push(FinalizeUndo {
            entry,
            record,
            was_closed,
        });
        if record.is_empty() {
            continue;
        }

        payouts.push(Payout {
            to: record.owner,
            amount: record.amount,
        });
        events.push(RootChainEvent::ExitFinalized {
            priority: entry.priority,
            owner: record.owner,
            token,
            amount: record.amount,
        });
    }

    // All exit state for the batch is already cleared at this point.
    let released = if payouts.is_empty() {
        Ok(())
    } else {
        ledger.release_batch(token, &payouts)
    };
    if let Err(e) = released {
        warn!(%token, batch = undo.len(), "ledger refused payout, restoring exits");
        for u in undo.into_iter().rev() {
            state.exits.reopen(u.entry.priority, u.record, u.was_closed);
            state
                .queues
                .insert(&token, u.entry.exitable_at, u.entry.priority)?;
        }
        return Err(e.into());
    }

    let discarded = undo.len() - payouts.len();
    debug!(%token, paid = payouts.len(), %discarded, "finalized exits");
    Ok(events)
}

/// What finalizing one queue entry changed.
#[derive(Debug)]
struct FinalizeUndo {
    entry: QueueEntry,
    record: ExitRecord,
    was_closed: bool,
}

fn ensure_operator(state: &RootChainState, ctx: &CallContext) -> RootChainResult<()> {
    if ctx.caller() != state.operator {
        return Err(RootChainError::Unauthorized(ctx.caller()));
    }
    Ok(())
}

fn decode_position(pos: UtxoPos) -> RootChainResult<UtxoPosParts> {
    pos.parts().map_err(|_| RootChainError::InvalidPosition(pos))
}

/// Inserts an exit into the registry and the token's queue.
fn add_exit(
    state: &mut RootChainState,
    priority: u64,
    owner: Address,
    token: Address,
    amount: U256,
    exitable_at: Timestamp,
) -> RootChainResult<RootChainEvent> {
    // A zero owner is the empty record.
    if owner == Address::ZERO {
        return Err(RootChainError::NotOutputOwner(owner));
    }
    if amount.is_zero() {
        return Err(RootChainError::ZeroAmount);
    }
    state.exits.ensure_vacant(priority)?;

    // Fails without side effects on an unknown token or a queued priority.
    state.queues.insert(&token, exitable_at, priority)?;
    state.exits.put(
        priority,
        ExitRecord {
            owner,
            token,
            amount,
        },
    )?;

    debug!(%owner, %priority, %token, %amount, %exitable_at, "started exit");
    Ok(RootChainEvent::ExitStarted {
        exitor: owner,
        priority,
        token,
        amount,
        exitable_at,
    })
}

fn log_rejection(op: &'static str, err: &RootChainError) {
    warn!(%op, %err, "rejected operation");
}
