//! Protocol parameters of the root chain.

use plasma_primitives::{BLOCK_OFFSET, Timestamp, WEEK_SECS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numbering and timing rules for blocks and exits.
///
/// All durations are in seconds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RootChainParams {
    /// Stride between operator-submitted block numbers.  The slots in between
    /// are used by deposit blocks.
    #[serde(default = "default_child_block_interval")]
    pub child_block_interval: u64,

    /// Delay before a deposit exit matures.
    #[serde(default = "default_deposit_exit_delay")]
    pub deposit_exit_delay: Timestamp,

    /// Minimum delay before a child chain output exit matures.
    #[serde(default = "default_min_exit_delay")]
    pub min_exit_delay: Timestamp,

    /// Minimum time between block submission and an exit from that block
    /// maturing.
    #[serde(default = "default_inclusion_exit_delay")]
    pub inclusion_exit_delay: Timestamp,

    /// Added to the deposit exit delay for fee exits, so a fee exit always
    /// matures after a deposit exit started at the same time.
    #[serde(default = "default_fee_exit_offset")]
    pub fee_exit_offset: Timestamp,
}

fn default_child_block_interval() -> u64 {
    1000
}

fn default_deposit_exit_delay() -> Timestamp {
    2 * WEEK_SECS
}

fn default_min_exit_delay() -> Timestamp {
    WEEK_SECS
}

fn default_inclusion_exit_delay() -> Timestamp {
    WEEK_SECS
}

fn default_fee_exit_offset() -> Timestamp {
    1
}

impl Default for RootChainParams {
    fn default() -> Self {
        Self {
            child_block_interval: default_child_block_interval(),
            deposit_exit_delay: default_deposit_exit_delay(),
            min_exit_delay: default_min_exit_delay(),
            inclusion_exit_delay: default_inclusion_exit_delay(),
            fee_exit_offset: default_fee_exit_offset(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("child block interval {0} leaves no room for deposits")]
    ChildBlockIntervalTooSmall(u64),

    #[error("child block interval {0} does not fit a utxo position")]
    ChildBlockIntervalTooLarge(u64),

    #[error("{0} must be non-zero")]
    ZeroDelay(&'static str),

    #[error("exit maturity overflows starting at {0}")]
    TimestampOverflow(Timestamp),
}

impl RootChainParams {
    pub fn check_well_formed(&self) -> Result<(), ParamsError> {
        if self.child_block_interval < 2 {
            return Err(ParamsError::ChildBlockIntervalTooSmall(
                self.child_block_interval,
            ));
        }

        // Block numbers are multiplied by the block offset when packed.
        if self.child_block_interval >= u64::MAX / BLOCK_OFFSET {
            return Err(ParamsError::ChildBlockIntervalTooLarge(
                self.child_block_interval,
            ));
        }

        if self.deposit_exit_delay == 0 {
            return Err(ParamsError::ZeroDelay("deposit_exit_delay"));
        }

        if self.fee_exit_offset == 0 {
            return Err(ParamsError::ZeroDelay("fee_exit_offset"));
        }

        Ok(())
    }

    /// Maturity of a deposit exit started at `now`.
    pub fn deposit_exitable_at(&self, now: Timestamp) -> Result<Timestamp, ParamsError> {
        now.checked_add(self.deposit_exit_delay)
            .ok_or(ParamsError::TimestampOverflow(now))
    }

    /// Maturity of a fee exit started at `now`.  Strictly later than a deposit
    /// exit started at the same time.
    pub fn fee_exitable_at(&self, now: Timestamp) -> Result<Timestamp, ParamsError> {
        self.deposit_exitable_at(now)?
            .checked_add(self.fee_exit_offset)
            .ok_or(ParamsError::TimestampOverflow(now))
    }

    /// Maturity of an exit from a block submitted at `submitted_at`.
    pub fn exitable_at(
        &self,
        now: Timestamp,
        submitted_at: Timestamp,
    ) -> Result<Timestamp, ParamsError> {
        let by_clock = now
            .checked_add(self.min_exit_delay)
            .ok_or(ParamsError::TimestampOverflow(now))?;
        let by_inclusion = submitted_at
            .checked_add(self.inclusion_exit_delay)
            .ok_or(ParamsError::TimestampOverflow(submitted_at))?;
        Ok(by_clock.max(by_inclusion))
    }
}
