//! The incremental Merkle accumulator over published ballot leaves.
//!
//! A binary tree with Poseidon-2 internal nodes, zero-padded to the next
//! power of two. Insertion is append-only and positional: leaf order is
//! significant, and a proof for a leaf is the sibling/direction path from
//! its position to the root. The tree owns all mutation; readers only ever
//! see a fully-updated structure.

use ark_bn254::Fr;
use ark_ff::Zero;

use crate::crypto::poseidon::poseidon;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct VoteTree {
    leaves: Vec<Fr>,
    levels: Vec<Vec<Fr>>,
}

/// Sibling hashes plus path-direction bits (0 = the running node is the
/// left child), ordered leaf to root. Length equals the tree depth at
/// proof time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    pub siblings: Vec<Fr>,
    pub path_indices: Vec<u8>,
}

impl VoteTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.leaves.len()
    }

    /// Levels between the leaves and the root; zero for an empty or
    /// single-leaf tree.
    pub fn depth(&self) -> usize {
        if self.leaves.len() <= 1 {
            0
        } else {
            self.leaves.len().next_power_of_two().trailing_zeros() as usize
        }
    }

    /// Append a leaf. Leaves are addressed by insertion position.
    pub fn insert(&mut self, leaf: Fr) -> Result<()> {
        self.leaves.push(leaf);
        self.rebuild()
    }

    pub fn root(&self) -> Fr {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or_else(Fr::zero)
    }

    /// Inclusion proof for a leaf, located by exact value.
    pub fn proof(&self, leaf: &Fr) -> Result<MerkleProof> {
        let mut index = self
            .leaves
            .iter()
            .position(|l| l == leaf)
            .ok_or(Error::AccumulatorLeafNotFound)?;

        let mut siblings = Vec::with_capacity(self.depth());
        let mut path_indices = Vec::with_capacity(self.depth());

        for level in &self.levels[..self.levels.len().saturating_sub(1)] {
            siblings.push(level[index ^ 1]);
            path_indices.push((index & 1) as u8);
            index >>= 1;
        }

        Ok(MerkleProof {
            siblings,
            path_indices,
        })
    }

    fn rebuild(&mut self) -> Result<()> {
        let width = self.leaves.len().next_power_of_two();
        let mut level = self.leaves.clone();
        level.resize(width, Fr::zero());

        let mut levels = vec![level];
        while levels.last().map(|level| level.len() > 1).unwrap_or(false) {
            let prev = &levels[levels.len() - 1];
            let mut next = Vec::with_capacity(prev.len() / 2);
            for pair in prev.chunks(2) {
                next.push(poseidon(&[pair[0], pair[1]])?);
            }
            levels.push(next);
        }

        self.levels = levels;
        Ok(())
    }
}

/// Standard Merkle path recomputation: fold the leaf up through the
/// sibling path and compare against the published root.
pub fn verify_proof(leaf: &Fr, proof: &MerkleProof, root: &Fr) -> Result<bool> {
    if proof.siblings.len() != proof.path_indices.len() {
        return Err(Error::MerkleTree(
            "sibling and path index lengths differ".into(),
        ));
    }

    let mut current = *leaf;
    for (sibling, bit) in proof.siblings.iter().zip(&proof.path_indices) {
        current = match bit {
            0 => poseidon(&[current, *sibling])?,
            1 => poseidon(&[*sibling, current])?,
            _ => return Err(Error::MerkleTree(format!("path index {bit} is not a bit"))),
        };
    }

    Ok(current == *root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(n: u64) -> Fr {
        Fr::from(n)
    }

    #[test]
    fn empty_tree_has_zero_root_and_depth() {
        let tree = VoteTree::new();
        assert_eq!(tree.root(), Fr::zero());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.size(), 0);
    }

    #[test]
    fn single_leaf_tree_roots_at_the_leaf() {
        let mut tree = VoteTree::new();
        tree.insert(leaf(7)).unwrap();

        assert_eq!(tree.root(), leaf(7));
        assert_eq!(tree.depth(), 0);

        let proof = tree.proof(&leaf(7)).unwrap();
        assert!(proof.siblings.is_empty());
        assert!(verify_proof(&leaf(7), &proof, &tree.root()).unwrap());
    }

    #[test]
    fn depth_grows_with_insertions() {
        let mut tree = VoteTree::new();
        for (count, expected_depth) in [(1, 0), (2, 1), (3, 2), (4, 2), (5, 3)] {
            while tree.size() < count {
                tree.insert(leaf(tree.size() as u64)).unwrap();
            }
            assert_eq!(tree.depth(), expected_depth, "at {count} leaves");
        }
    }

    #[test]
    fn proofs_verify_for_every_leaf() {
        let mut tree = VoteTree::new();
        for n in 0..5 {
            tree.insert(leaf(n)).unwrap();
        }

        for n in 0..5 {
            let proof = tree.proof(&leaf(n)).unwrap();
            assert_eq!(proof.siblings.len(), tree.depth());
            assert!(verify_proof(&leaf(n), &proof, &tree.root()).unwrap());
        }
    }

    #[test]
    fn proof_fails_against_the_wrong_root() {
        let mut tree = VoteTree::new();
        tree.insert(leaf(1)).unwrap();
        tree.insert(leaf(2)).unwrap();

        let proof = tree.proof(&leaf(1)).unwrap();
        assert!(!verify_proof(&leaf(1), &proof, &leaf(999)).unwrap());
        assert!(!verify_proof(&leaf(2), &proof, &tree.root()).unwrap());
    }

    #[test]
    fn missing_leaf_is_reported() {
        let mut tree = VoteTree::new();
        tree.insert(leaf(1)).unwrap();

        assert!(matches!(
            tree.proof(&leaf(2)),
            Err(Error::AccumulatorLeafNotFound)
        ));
    }

    #[test]
    fn insertion_order_changes_the_root() {
        let mut forward = VoteTree::new();
        forward.insert(leaf(1)).unwrap();
        forward.insert(leaf(2)).unwrap();

        let mut reversed = VoteTree::new();
        reversed.insert(leaf(2)).unwrap();
        reversed.insert(leaf(1)).unwrap();

        assert_ne!(forward.root(), reversed.root());
    }
}
