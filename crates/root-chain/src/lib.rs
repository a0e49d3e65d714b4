//! Root chain side of the Plasma exit game.
//!
//! [`RootChainState`] holds the block log, the exit registry and the per-token
//! exit queues.  [`RootChainController`] implements the operations that
//! mutate it: deposits, block submission, starting, challenging and
//! finalizing exits.  Value moves through an injected [`ValueLedger`].

mod blocks;
mod context;
mod controller;
mod errors;
mod events;
mod exits;
mod ledger;
mod state;

pub use blocks::{BlockRegistry, ChildBlock, DepositRecord};
pub use context::CallContext;
pub use controller::RootChainController;
pub use errors::{RootChainError, RootChainResult};
pub use events::RootChainEvent;
pub use exits::{ExitRecord, ExitRegistry};
pub use ledger::{LedgerError, MemoryLedger, Payout, ValueLedger};
pub use state::RootChainState;


// Only the integration tests build fixtures.
#[cfg(test)]
#[allow(
    unused_imports,
    clippy::allow_attributes,
    reason = "used by the integration tests"
)]
use plasma_test_utils as _;
