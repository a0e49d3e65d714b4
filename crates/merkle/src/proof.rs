use alloy_primitives::B256;

use crate::{Keccak256Hasher, MAX_LEAVES, MERKLE_DEPTH, MerkleHasher, NODE_LEN, PROOF_LEN};

/// Sibling path from a leaf to the root of a block tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MerkleProof {
    siblings: [B256; MERKLE_DEPTH],
}

impl MerkleProof {
    pub fn new(siblings: [B256; MERKLE_DEPTH]) -> Self {
        Self { siblings }
    }

    /// Parses a proof from its flat encoding.  Returns `None` unless the
    /// buffer is exactly [`PROOF_LEN`] bytes.
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        if buf.len() != PROOF_LEN {
            return None;
        }

        let mut siblings = [B256::ZERO; MERKLE_DEPTH];
        for (sib, chunk) in siblings.iter_mut().zip(buf.chunks_exact(NODE_LEN)) {
            *sib = B256::from_slice(chunk);
        }

        Some(Self { siblings })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.siblings
            .iter()
            .flat_map(|s| s.as_slice().iter().copied())
            .collect()
    }

    pub fn siblings(&self) -> &[B256; MERKLE_DEPTH] {
        &self.siblings
    }
}

/// Folds the proof over the leaf, with the bits of `index` choosing which
/// side the running hash sits on at each level.
pub fn compute_root<H: MerkleHasher>(leaf: &B256, index: u64, proof: &MerkleProof) -> B256 {
    let mut cur = *leaf;
    let mut idx = index;

    for sib in proof.siblings() {
        cur = if idx & 1 == 0 {
            H::hash_node(&cur, sib)
        } else {
            H::hash_node(sib, &cur)
        };
        idx >>= 1;
    }

    cur
}

/// Checks that `leaf` sits at `index` of the tree committed to by `root`.
///
/// Malformed proofs and out-of-range indexes verify as `false`; the caller
/// decides whether that is fatal.
pub fn verify_membership(leaf: &B256, index: u64, proof: &[u8], root: &B256) -> bool {
    if index >= MAX_LEAVES {
        return false;
    }

    let Some(proof) = MerkleProof::from_bytes(proof) else {
        return false;
    };

    compute_root::<Keccak256Hasher>(leaf, index, &proof) == *root
}
