use plasma_merkle::{Keccak256Hasher, MERKLE_DEPTH, MerkleHasher, MerkleProof};
use plasma_primitives::B256;

/// Depth-16 tree over a short list of leaves, padded with zero leaves.
///
/// Only the populated part of each level is stored; everything to the right
/// is an all-zero subtree whose hash is precomputed.
#[derive(Clone, Debug)]
pub struct FixedMerkleTree {
    levels: Vec<Vec<B256>>,
    zeros: [B256; MERKLE_DEPTH + 1],
}

impl FixedMerkleTree {
    pub fn new(leaves: &[B256]) -> Self {
        let mut zeros = [Keccak256Hasher::zero_hash(); MERKLE_DEPTH + 1];
        for d in 0..MERKLE_DEPTH {
            zeros[d + 1] = Keccak256Hasher::hash_node(&zeros[d], &zeros[d]);
        }

        let mut levels = vec![leaves.to_vec()];
        for d in 0..MERKLE_DEPTH {
            let next = levels[d]
                .chunks(2)
                .map(|pair| {
                    let right = pair.get(1).unwrap_or(&zeros[d]);
                    Keccak256Hasher::hash_node(&pair[0], right)
                })
                .collect();
            levels.push(next);
        }

        Self { levels, zeros }
    }

    pub fn root(&self) -> B256 {
        self.levels[MERKLE_DEPTH]
            .first()
            .copied()
            .unwrap_or(self.zeros[MERKLE_DEPTH])
    }

    pub fn proof(&self, index: usize) -> MerkleProof {
        let mut siblings = [B256::ZERO; MERKLE_DEPTH];
        let mut idx = index;
        for (d, sib) in siblings.iter_mut().enumerate() {
            *sib = self.levels[d]
                .get(idx ^ 1)
                .copied()
                .unwrap_or(self.zeros[d]);
            idx >>= 1;
        }
        MerkleProof::new(siblings)
    }
}

#[cfg(test)]
mod tests {
    use plasma_merkle::verify_membership;
    use plasma_primitives::keccak256;

    use super::*;

    #[test]
    fn test_proofs_verify() {
        let leaves: Vec<_> = (0u8..5).map(|i| keccak256([i])).collect();
        let tree = FixedMerkleTree::new(&leaves);

        for (i, leaf) in leaves.iter().enumerate() {
            let proof = tree.proof(i).to_bytes();
            assert!(verify_membership(leaf, i as u64, &proof, &tree.root()));
            assert!(!verify_membership(leaf, i as u64 + 1, &proof, &tree.root()));
        }
    }

    #[test]
    fn test_empty_tree_root() {
        let tree = FixedMerkleTree::new(&[]);
        let one = FixedMerkleTree::new(&[B256::ZERO]);
        assert_eq!(tree.root(), one.root());
    }
}
