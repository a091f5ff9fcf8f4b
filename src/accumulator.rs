//! Turning ciphertexts into accumulator leaves and inclusion proofs.
//!
//! A published ciphertext is identified in the accumulator by a single
//! field element derived from its canonical compressed encoding: the four
//! extended coordinates of the decoded point are chunked into three 85-bit
//! limbs each, every coordinate's limbs are hashed with a 3-ary Poseidon,
//! and the four coordinate digests are hashed with a 4-ary Poseidon. The
//! two levels exist because the hash primitive is arity-bounded while the
//! point carries twelve limb values.

use ark_bn254::Fr;

use crate::chunk;
use crate::crypto::edwards::ExtendedPoint;
use crate::crypto::merkle::{MerkleProof, VoteTree};
use crate::crypto::poseidon::{limb_to_fr, poseidon};
use crate::crypto::ristretto;
use crate::error::{Error, Result};

/// Hash a ciphertext point into its accumulator leaf.
///
/// The point is first canonicalized through its compressed encoding, so
/// any projective representative of a published ciphertext hashes to the
/// same leaf the circuit recomputes from the published bytes.
pub fn leaf_hash(ciphertext: &ExtendedPoint) -> Result<Fr> {
    let canonical = ristretto::decompress(&ristretto::compress(ciphertext))?;
    let chunked = chunk::chunk_point(&canonical);

    let mut coordinate_digests = Vec::with_capacity(4);
    for limbs in &chunked {
        let inputs: Vec<Fr> = limbs.iter().map(|&limb| limb_to_fr(limb)).collect();
        coordinate_digests.push(poseidon(&inputs)?);
    }

    poseidon(&coordinate_digests)
}

/// Compute a ciphertext's leaf and append it to the accumulator.
/// Insertion order is significant; leaves are positionally addressed.
pub fn insert_ballot(tree: &mut VoteTree, ciphertext: &ExtendedPoint) -> Result<Fr> {
    let leaf = leaf_hash(ciphertext)?;
    tree.insert(leaf)?;
    Ok(leaf)
}

/// Inclusion proof for a published ciphertext.
///
/// `max_depth` is the deepest path the consuming circuit can absorb; a
/// tree that has outgrown it cannot be proven against and is reported as
/// an error. Unpublished ciphertexts surface `AccumulatorLeafNotFound`.
pub fn prove_membership(
    tree: &VoteTree,
    ciphertext: &ExtendedPoint,
    max_depth: usize,
) -> Result<MerkleProof> {
    if tree.depth() > max_depth {
        return Err(Error::MerkleTree(format!(
            "tree depth {} exceeds supported depth {max_depth}",
            tree.depth()
        )));
    }

    let leaf = leaf_hash(ciphertext)?;
    tree.proof(&leaf)
}
