//! Aggregate root chain state and its read-only queries.

use plasma_exit_queue::ExitQueues;
use plasma_params::{ParamsError, RootChainParams};
use plasma_primitives::{Address, B256, NATIVE_TOKEN, Timestamp};

use crate::{BlockRegistry, ExitRecord, ExitRegistry, RootChainError, RootChainResult};

/// Everything the root chain stores.  Operations take it by `&mut`, so a call
/// always has exclusive access for its whole duration.
#[derive(Clone, Debug)]
pub struct RootChainState {
    pub(crate) params: RootChainParams,
    pub(crate) operator: Address,
    pub(crate) blocks: BlockRegistry,
    pub(crate) exits: ExitRegistry,
    pub(crate) queues: ExitQueues,
    pub(crate) current_fee_exit: u64,
}

impl RootChainState {
    /// Creates an empty chain with the native token already registered.
    pub fn new(operator: Address, params: RootChainParams) -> Result<Self, ParamsError> {
        params.check_well_formed()?;

        let mut queues = ExitQueues::new();
        // Fresh map, cannot collide.
        let _ = queues.add_token(NATIVE_TOKEN);

        Ok(Self {
            blocks: BlockRegistry::new(params.child_block_interval),
            params,
            operator,
            exits: ExitRegistry::new(),
            queues,
            current_fee_exit: 1,
        })
    }

    pub fn params(&self) -> &RootChainParams {
        &self.params
    }

    pub fn operator(&self) -> Address {
        self.operator
    }

    pub fn blocks(&self) -> &BlockRegistry {
        &self.blocks
    }

    pub fn exits(&self) -> &ExitRegistry {
        &self.exits
    }

    pub fn queues(&self) -> &ExitQueues {
        &self.queues
    }

    /// Number the next deposit block will get.
    pub fn deposit_block(&self) -> u64 {
        self.blocks.next_deposit_block()
    }

    pub fn current_child_block(&self) -> u64 {
        self.blocks.current_child_block()
    }

    /// Priority the next fee exit will get.
    pub fn current_fee_exit(&self) -> u64 {
        self.current_fee_exit
    }

    /// Root and submission time of a block.
    pub fn child_chain(&self, blknum: u64) -> RootChainResult<(B256, Timestamp)> {
        let blk = self.blocks.get(blknum)?;
        Ok((blk.root, blk.submitted_at))
    }

    /// Live exit at `priority`, or the empty record.
    pub fn exit(&self, priority: u64) -> ExitRecord {
        self.exits.get(priority)
    }

    /// Priority and maturity of the next exit to be processed for `token`.
    pub fn next_exit(&self, token: Address) -> RootChainResult<(u64, Timestamp)> {
        let entry = self
            .queues
            .peek_min(&token)?
            .ok_or(RootChainError::EmptyQueue)?;
        Ok((entry.priority, entry.exitable_at))
    }
}
