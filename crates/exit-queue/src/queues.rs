use std::collections::BTreeMap;

use plasma_primitives::{Address, Timestamp};

use crate::{ExitQueue, ExitQueueError, ExitQueueResult, QueueEntry};

/// One [`ExitQueue`] per registered token.
#[derive(Clone, Debug, Default)]
pub struct ExitQueues {
    queues: BTreeMap<Address, ExitQueue>,
}

impl ExitQueues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_token(&mut self, token: Address) -> ExitQueueResult<()> {
        if self.queues.contains_key(&token) {
            return Err(ExitQueueError::TokenAlreadyRegistered(token));
        }
        self.queues.insert(token, ExitQueue::new());
        Ok(())
    }

    pub fn has_token(&self, token: &Address) -> bool {
        self.queues.contains_key(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Address> + '_ {
        self.queues.keys()
    }

    pub fn queue(&self, token: &Address) -> ExitQueueResult<&ExitQueue> {
        self.queues
            .get(token)
            .ok_or(ExitQueueError::UnknownToken(*token))
    }

    fn queue_mut(&mut self, token: &Address) -> ExitQueueResult<&mut ExitQueue> {
        self.queues
            .get_mut(token)
            .ok_or(ExitQueueError::UnknownToken(*token))
    }

    pub fn insert(
        &mut self,
        token: &Address,
        exitable_at: Timestamp,
        priority: u64,
    ) -> ExitQueueResult<()> {
        self.queue_mut(token)?
            .insert(QueueEntry::new(exitable_at, priority))
    }

    pub fn peek_min(&self, token: &Address) -> ExitQueueResult<Option<&QueueEntry>> {
        Ok(self.queue(token)?.peek_min())
    }

    pub fn extract_min(&mut self, token: &Address) -> ExitQueueResult<QueueEntry> {
        self.queue_mut(token)?.extract_min()
    }

    pub fn remove(&mut self, token: &Address, priority: u64) -> ExitQueueResult<QueueEntry> {
        self.queue_mut(token)?.remove(priority)
    }

    pub fn len(&self, token: &Address) -> ExitQueueResult<usize> {
        Ok(self.queue(token)?.len())
    }
}
