//! Value transfer capability the root chain moves funds through.

use std::collections::BTreeMap;

use plasma_primitives::{Address, U256};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("{account} holds {available} of {token}, needs {required}")]
    InsufficientBalance {
        account: Address,
        token: Address,
        available: U256,
        required: U256,
    },

    #[error("custody holds {available} of {token}, needs {required}")]
    InsufficientCustody {
        token: Address,
        available: U256,
        required: U256,
    },

    #[error("amount overflow")]
    Overflow,

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// A single release out of custody.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub to: Address,
    pub amount: U256,
}

/// Underlying ledger holding the value the root chain has custody of.
pub trait ValueLedger {
    /// Moves `amount` of `token` from `from` into custody.
    fn take_custody(&mut self, from: Address, token: Address, amount: U256)
    -> Result<(), LedgerError>;

    /// Releases every payout or none of them.
    fn release_batch(&mut self, token: Address, payouts: &[Payout]) -> Result<(), LedgerError>;

    /// Releases `amount` of `token` from custody to `to`.
    fn release(&mut self, to: Address, token: Address, amount: U256) -> Result<(), LedgerError> {
        self.release_batch(token, &[Payout { to, amount }])
    }
}

/// In-process ledger with plain balance maps.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    balances: BTreeMap<(Address, Address), U256>,
    custody: BTreeMap<Address, U256>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `token` out of thin air for `account`.
    pub fn mint(&mut self, account: Address, token: Address, amount: U256) {
        let bal = self.balances.entry((token, account)).or_default();
        *bal = bal.saturating_add(amount);
    }

    pub fn balance_of(&self, account: Address, token: Address) -> U256 {
        self.balances
            .get(&(token, account))
            .copied()
            .unwrap_or_default()
    }

    pub fn custody_of(&self, token: Address) -> U256 {
        self.custody.get(&token).copied().unwrap_or_default()
    }
}

impl ValueLedger for MemoryLedger {
    fn take_custody(
        &mut self,
        from: Address,
        token: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(from, token);
        let remaining =
            available
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientBalance {
                    account: from,
                    token,
                    available,
                    required: amount,
                })?;
        let custody = self
            .custody_of(token)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.balances.insert((token, from), remaining);
        self.custody.insert(token, custody);
        Ok(())
    }

    fn release_batch(&mut self, token: Address, payouts: &[Payout]) -> Result<(), LedgerError> {
        let mut total = U256::ZERO;
        for p in payouts {
            total = total.checked_add(p.amount).ok_or(LedgerError::Overflow)?;
        }

        let available = self.custody_of(token);
        let remaining = available
            .checked_sub(total)
            .ok_or(LedgerError::InsufficientCustody {
                token,
                available,
                required: total,
            })?;

        self.custody.insert(token, remaining);
        for p in payouts {
            self.mint(p.to, token, p.amount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custody_roundtrip() {
        let alice = Address::repeat_byte(0xaa);
        let token = Address::ZERO;
        let mut ledger = MemoryLedger::new();
        ledger.mint(alice, token, U256::from(100u64));

        ledger
            .take_custody(alice, token, U256::from(60u64))
            .unwrap();
        assert_eq!(ledger.balance_of(alice, token), U256::from(40u64));
        assert_eq!(ledger.custody_of(token), U256::from(60u64));

        ledger.release(alice, token, U256::from(60u64)).unwrap();
        assert_eq!(ledger.balance_of(alice, token), U256::from(100u64));
        assert_eq!(ledger.custody_of(token), U256::ZERO);
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let alice = Address::repeat_byte(0xaa);
        let bob = Address::repeat_byte(0xbb);
        let token = Address::ZERO;
        let mut ledger = MemoryLedger::new();
        ledger.mint(alice, token, U256::from(10u64));
        ledger.take_custody(alice, token, U256::from(10u64)).unwrap();

        let payouts = [
            Payout {
                to: alice,
                amount: U256::from(6u64),
            },
            Payout {
                to: bob,
                amount: U256::from(6u64),
            },
        ];
        assert!(matches!(
            ledger.release_batch(token, &payouts),
            Err(LedgerError::InsufficientCustody { .. })
        ));
        assert_eq!(ledger.custody_of(token), U256::from(10u64));
        assert_eq!(ledger.balance_of(bob, token), U256::ZERO);
    }

    #[test]
    fn test_insufficient_balance() {
        let mut ledger = MemoryLedger::new();
        let err = ledger
            .take_custody(Address::ZERO, Address::ZERO, U256::from(1u64))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    }
}
