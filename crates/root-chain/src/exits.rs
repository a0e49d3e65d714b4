//! Registry of pending exits keyed by priority.

use std::collections::{BTreeMap, BTreeSet};

use plasma_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{RootChainError, RootChainResult};

/// Claim on `amount` of `token` for `owner`.
///
/// The default value, with a zero owner, stands for "no exit".
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExitRecord {
    pub owner: Address,
    pub token: Address,
    pub amount: U256,
}

impl ExitRecord {
    pub fn is_empty(&self) -> bool {
        self.owner == Address::ZERO
    }
}

/// Live exits, plus the priorities whose exit was already challenged or
/// finalized.  A closed priority cannot be exited again.
#[derive(Clone, Debug, Default)]
pub struct ExitRegistry {
    live: BTreeMap<u64, ExitRecord>,
    closed: BTreeSet<u64>,
}

impl ExitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if `priority` has a live exit or has been closed.
    pub fn ensure_vacant(&self, priority: u64) -> RootChainResult<()> {
        if self.live.contains_key(&priority) || self.closed.contains(&priority) {
            return Err(RootChainError::ExitAlreadyExists(priority));
        }
        Ok(())
    }

    pub fn put(&mut self, priority: u64, record: ExitRecord) -> RootChainResult<()> {
        self.ensure_vacant(priority)?;
        self.live.insert(priority, record);
        Ok(())
    }

    /// Removes and returns the live record, closing the priority.  Returns the
    /// empty record if there was nothing live.
    pub fn clear(&mut self, priority: u64) -> ExitRecord {
        self.closed.insert(priority);
        self.live.remove(&priority).unwrap_or_default()
    }

    /// Reverts a [`clear`](Self::clear) that returned `record`.
    pub fn reopen(&mut self, priority: u64, record: ExitRecord, was_closed: bool) {
        if !was_closed {
            self.closed.remove(&priority);
        }
        if !record.is_empty() {
            self.live.insert(priority, record);
        }
    }

    /// Live record at `priority`, or the empty record.
    pub fn get(&self, priority: u64) -> ExitRecord {
        self.live.get(&priority).copied().unwrap_or_default()
    }

    pub fn live(&self, priority: u64) -> Option<&ExitRecord> {
        self.live.get(&priority)
    }

    pub fn is_closed(&self, priority: u64) -> bool {
        self.closed.contains(&priority)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ExitRecord {
        ExitRecord {
            owner: Address::repeat_byte(1),
            token: Address::ZERO,
            amount: U256::from(9u64),
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut reg = ExitRegistry::new();
        assert!(reg.get(7).is_empty());

        reg.put(7, record()).unwrap();
        assert_eq!(reg.get(7), record());
        assert_eq!(
            reg.put(7, record()),
            Err(RootChainError::ExitAlreadyExists(7))
        );

        assert_eq!(reg.clear(7), record());
        assert!(reg.get(7).is_empty());
        assert!(reg.is_closed(7));
        assert_eq!(
            reg.put(7, record()),
            Err(RootChainError::ExitAlreadyExists(7))
        );
        assert_eq!(reg.live_count(), 0);
    }

    #[test]
    fn test_reopen_reverts_clear() {
        let mut reg = ExitRegistry::new();
        reg.put(7, record()).unwrap();

        let was_closed = reg.is_closed(7);
        let cleared = reg.clear(7);
        reg.reopen(7, cleared, was_closed);
        assert_eq!(reg.get(7), record());
        assert!(!reg.is_closed(7));

        // An already closed priority stays closed.
        reg.clear(9);
        let was_closed = reg.is_closed(9);
        let cleared = reg.clear(9);
        reg.reopen(9, cleared, was_closed);
        assert!(reg.is_closed(9));
        assert!(reg.live(9).is_none());
    }

    #[test]
    fn test_clear_absent_is_empty() {
        let mut reg = ExitRegistry::new();
        assert!(reg.clear(3).is_empty());
    }
}
