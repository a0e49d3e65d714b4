//! Fixed-depth binary Merkle proofs over child chain transactions.
//!
//! Every child chain block commits to its transactions with a tree of depth
//! [`MERKLE_DEPTH`], padded with zero leaves.  A proof is the concatenation of
//! the [`MERKLE_DEPTH`] sibling hashes from the leaf up to the root.

mod hasher;
mod proof;

pub use hasher::{Keccak256Hasher, MerkleHasher};
pub use proof::{MerkleProof, compute_root, verify_membership};

/// Depth of the transaction tree of a child chain block.
pub const MERKLE_DEPTH: usize = 16;

/// Maximum number of leaves a block tree can hold.
pub const MAX_LEAVES: u64 = 1 << MERKLE_DEPTH;

/// Size of a single tree node in bytes.
pub const NODE_LEN: usize = 32;

/// Size of an encoded proof in bytes.
pub const PROOF_LEN: usize = MERKLE_DEPTH * NODE_LEN;
