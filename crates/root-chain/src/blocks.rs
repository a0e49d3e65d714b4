//! Registry of deposit blocks and operator-submitted child chain blocks.

use std::collections::BTreeMap;

use plasma_primitives::{Address, B256, Timestamp, U256, keccak256};
use serde::{Deserialize, Serialize};

use crate::{RootChainError, RootChainResult};

/// Deposit committed to by a deposit block.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DepositRecord {
    pub owner: Address,
    pub token: Address,
    pub amount: U256,
}

impl DepositRecord {
    /// Root of the single-output deposit block: `keccak256(owner ‖ token ‖
    /// amount)`, each field left-padded to 32 bytes.
    pub fn root(&self) -> B256 {
        let mut buf = [0u8; 96];
        buf[12..32].copy_from_slice(self.owner.as_slice());
        buf[44..64].copy_from_slice(self.token.as_slice());
        buf[64..].copy_from_slice(&self.amount.to_be_bytes::<32>());
        keccak256(buf)
    }
}

/// Block committed to the root chain.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChildBlock {
    pub root: B256,
    pub submitted_at: Timestamp,

    /// Set for deposit blocks.
    pub deposit: Option<DepositRecord>,
}

impl ChildBlock {
    pub fn is_deposit(&self) -> bool {
        self.deposit.is_some()
    }
}

/// Block log.  Submitted blocks take multiples of the interval; deposit
/// blocks fill the numbers between the latest submitted block and the next.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    interval: u64,
    blocks: BTreeMap<u64, ChildBlock>,
    current_child_block: u64,
    current_deposit_block: u64,
}

impl BlockRegistry {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            blocks: BTreeMap::new(),
            current_child_block: interval,
            current_deposit_block: 1,
        }
    }

    /// Number the next submitted block will get.
    pub fn current_child_block(&self) -> u64 {
        self.current_child_block
    }

    /// Number the next deposit block will get.
    pub fn next_deposit_block(&self) -> u64 {
        self.current_child_block - self.interval + self.current_deposit_block
    }

    /// Fails if every deposit slot before the next submitted block is used.
    pub fn ensure_deposit_slot(&self) -> RootChainResult<()> {
        if self.current_deposit_block >= self.interval {
            return Err(RootChainError::DepositLimitReached(
                self.current_child_block,
            ));
        }
        Ok(())
    }

    pub fn record_deposit(
        &mut self,
        deposit: DepositRecord,
        now: Timestamp,
    ) -> RootChainResult<u64> {
        self.ensure_deposit_slot()?;

        let blknum = self.next_deposit_block();
        self.blocks.insert(
            blknum,
            ChildBlock {
                root: deposit.root(),
                submitted_at: now,
                deposit: Some(deposit),
            },
        );
        self.current_deposit_block += 1;
        Ok(blknum)
    }

    pub fn submit_block(&mut self, root: B256, now: Timestamp) -> u64 {
        let blknum = self.current_child_block;
        self.blocks.insert(
            blknum,
            ChildBlock {
                root,
                submitted_at: now,
                deposit: None,
            },
        );
        self.current_child_block += self.interval;
        self.current_deposit_block = 1;
        blknum
    }

    pub fn get(&self, blknum: u64) -> RootChainResult<&ChildBlock> {
        self.blocks
            .get(&blknum)
            .ok_or(RootChainError::UnknownBlock(blknum))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
