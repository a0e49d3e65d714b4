//! Fixtures for root chain tests: deterministic accounts, a depth-16 block
//! tree builder and signed child chain transactions.

mod block;
mod keys;
mod tree;

pub use block::{BlockFixture, SignedTx};
pub use keys::TestAccount;
pub use tree::FixedMerkleTree;
