use alloy_primitives::{B256, keccak256};

/// Generic merkle hashing trait.
pub trait MerkleHasher {
    /// Combines the left and right nodes to form their parent.
    fn hash_node(left: &B256, right: &B256) -> B256;

    fn zero_hash() -> B256 {
        B256::ZERO
    }
}

/// Hashes nodes as `keccak256(left ‖ right)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Keccak256Hasher;

impl MerkleHasher for Keccak256Hasher {
    fn hash_node(left: &B256, right: &B256) -> B256 {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(left.as_slice());
        buf[32..].copy_from_slice(right.as_slice());
        keccak256(buf)
    }
}
