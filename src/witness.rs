//! Assembly of the public/private input bundle for a cancellation proof.
//!
//! For each vote: decode the encoded point and randomizer, recompute the
//! ciphertext, locate it in the accumulator, and collect the chunked
//! coordinates, scalar bits, and inclusion path the circuit consumes. A
//! failure in any single vote aborts the whole bundle: the claimed-sum
//! aggregate is only meaningful over complete, consistent per-vote data.

use ark_bn254::Fr;
use num_bigint::BigUint;

use crate::accumulator;
use crate::chunk;
use crate::crypto::edwards::ExtendedPoint;
use crate::crypto::elgamal;
use crate::crypto::merkle::VoteTree;
use crate::crypto::poseidon::{self, fr_to_decimal};
use crate::crypto::ristretto;
use crate::error::{Error, Result};
use crate::types::{PublicInputs, VoteToCancel, VoteWitness, WitnessBundle, WitnessConfig};

/// Width of the scalar bit decomposition the circuit consumes.
pub const SCALAR_BITS: usize = 255;

/// Decompose a scalar into 255 bits, least-significant first.
pub fn scalar_bits_le(scalar: &BigUint) -> Vec<u8> {
    (0..SCALAR_BITS as u64).map(|i| scalar.bit(i) as u8).collect()
}

/// Build the witness bundle for a batch of votes to cancel.
///
/// Votes are processed and emitted in input order; no reordering or
/// deduplication happens here, and `claimed_sum` hashes the leaf values in
/// that same order, so all parties must agree on the vote ordering.
pub fn prepare_cancellation_witness(
    votes: &[VoteToCancel],
    recipient_hex: &str,
    tree: &VoteTree,
    config: &WitnessConfig,
) -> Result<WitnessBundle> {
    if votes.is_empty() {
        return Err(Error::MalformedInput("no votes to cancel".into()));
    }
    if votes.len() > poseidon::MAX_ARITY {
        return Err(Error::MalformedInput(format!(
            "cannot aggregate {} votes; the claimed sum hashes at most {} leaves",
            votes.len(),
            poseidon::MAX_ARITY
        )));
    }

    let recipient = ristretto::decompress_hex(recipient_hex)?;

    let mut private = Vec::with_capacity(votes.len());
    let mut leaf_hashes: Vec<Fr> = Vec::with_capacity(votes.len());

    for (position, vote) in votes.iter().enumerate() {
        let encoded = ristretto::decompress_hex(&vote.encoded)?;
        let randomizer = parse_randomizer(&vote.randomizer)?;

        let ciphertext = elgamal::encrypt(&encoded, &recipient, &randomizer);
        if let Some(published) = &vote.ciphertext {
            check_published_ciphertext(position, published, &ciphertext)?;
        }

        let leaf = accumulator::leaf_hash(&ciphertext)?;
        let proof = accumulator::prove_membership(tree, &ciphertext, config.tree_depth)?;
        log::debug!("vote {position}: leaf located at proof depth {}", proof.siblings.len());

        private.push(VoteWitness {
            encoded_coords: chunked_decimal(&encoded),
            randomizer_bits: scalar_bits_le(&randomizer),
            siblings: proof.siblings.iter().map(fr_to_decimal).collect(),
            path_indices: proof.path_indices,
        });
        leaf_hashes.push(leaf);
    }

    let claimed_sum = poseidon::poseidon(&leaf_hashes)?;

    Ok(WitnessBundle {
        public: PublicInputs {
            merkle_root: fr_to_decimal(&tree.root()),
            claimed_sum: fr_to_decimal(&claimed_sum),
        },
        private,
    })
}

fn parse_randomizer(s: &str) -> Result<BigUint> {
    let value = BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(|| {
        Error::MalformedInput(format!("randomizer is not a decimal integer: {s}"))
    })?;
    if value.bits() > SCALAR_BITS as u64 {
        return Err(Error::MalformedInput(format!(
            "randomizer exceeds {SCALAR_BITS} bits"
        )));
    }
    Ok(value)
}

/// A vote that arrives with its published ciphertext must recompute to
/// exactly those bytes, otherwise the caller's data is inconsistent.
fn check_published_ciphertext(
    position: usize,
    published_hex: &str,
    recomputed: &ExtendedPoint,
) -> Result<()> {
    let published = hex::decode(published_hex)
        .map_err(|e| Error::InvalidPointEncoding(format!("malformed hex: {e}")))?;
    if published != ristretto::compress(recomputed) {
        return Err(Error::MalformedInput(format!(
            "vote {position}: published ciphertext does not match encoded point and randomizer"
        )));
    }
    Ok(())
}

fn chunked_decimal(point: &ExtendedPoint) -> [[String; 3]; 4] {
    chunk::chunk_point(point).map(|limbs| limbs.map(|limb| limb.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::encoding::embed_str;
    use crate::crypto::merkle::verify_proof;
    use crate::crypto::merkle::MerkleProof;
    use crate::crypto::poseidon::decimal_to_fr;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RECIPIENT_SECRET: u64 = 424242;

    struct Election {
        recipient_hex: String,
        tree: VoteTree,
        votes: Vec<VoteToCancel>,
        leaves: Vec<Fr>,
    }

    fn setup_election(plaintexts: &[&str], seed: u64) -> Election {
        let mut rng = StdRng::seed_from_u64(seed);
        let recipient = ExtendedPoint::base().scalar_mul(&BigUint::from(RECIPIENT_SECRET));
        let recipient_hex = ristretto::compress_hex(&recipient);

        let mut tree = VoteTree::new();
        let mut votes = Vec::new();
        let mut leaves = Vec::new();

        for plaintext in plaintexts {
            let encoded = embed_str(plaintext, &mut rng).unwrap();
            let randomizer = elgamal::random_scalar(&mut rng);
            let ciphertext = elgamal::encrypt(&encoded, &recipient, &randomizer);

            leaves.push(accumulator::insert_ballot(&mut tree, &ciphertext).unwrap());
            votes.push(VoteToCancel {
                encoded: ristretto::compress_hex(&encoded),
                randomizer: randomizer.to_str_radix(10),
                ciphertext: Some(ristretto::compress_hex(&ciphertext)),
            });
        }

        Election {
            recipient_hex,
            tree,
            votes,
            leaves,
        }
    }

    #[test]
    fn bundle_shape_matches_the_circuit_contract() {
        let election = setup_election(&["alpha", "bravo", "charlie"], 1);
        let bundle = prepare_cancellation_witness(
            &election.votes,
            &election.recipient_hex,
            &election.tree,
            &WitnessConfig::default(),
        )
        .unwrap();

        assert_eq!(bundle.private.len(), 3);
        for witness in &bundle.private {
            assert_eq!(witness.randomizer_bits.len(), SCALAR_BITS);
            assert!(witness.randomizer_bits.iter().all(|&b| b <= 1));
            assert_eq!(witness.siblings.len(), election.tree.depth());
            assert_eq!(witness.path_indices.len(), election.tree.depth());
        }
    }

    #[test]
    fn public_inputs_commit_to_root_and_ordered_sum() {
        let election = setup_election(&["alpha", "bravo"], 2);
        let bundle = prepare_cancellation_witness(
            &election.votes,
            &election.recipient_hex,
            &election.tree,
            &WitnessConfig::default(),
        )
        .unwrap();

        assert_eq!(bundle.public.merkle_root, fr_to_decimal(&election.tree.root()));

        let expected_sum = poseidon::poseidon(&election.leaves).unwrap();
        assert_eq!(bundle.public.claimed_sum, fr_to_decimal(&expected_sum));

        // Reversed vote order must change the aggregate.
        let mut reversed = election.votes.clone();
        reversed.reverse();
        let other = prepare_cancellation_witness(
            &reversed,
            &election.recipient_hex,
            &election.tree,
            &WitnessConfig::default(),
        )
        .unwrap();
        assert_ne!(other.public.claimed_sum, bundle.public.claimed_sum);
    }

    #[test]
    fn emitted_paths_replay_to_the_public_root() {
        let election = setup_election(&["alpha", "bravo", "charlie", "delta"], 3);
        let bundle = prepare_cancellation_witness(
            &election.votes,
            &election.recipient_hex,
            &election.tree,
            &WitnessConfig::default(),
        )
        .unwrap();

        let root = decimal_to_fr(&bundle.public.merkle_root).unwrap();
        for (witness, leaf) in bundle.private.iter().zip(&election.leaves) {
            let proof = MerkleProof {
                siblings: witness
                    .siblings
                    .iter()
                    .map(|s| decimal_to_fr(s).unwrap())
                    .collect(),
                path_indices: witness.path_indices.clone(),
            };
            assert!(verify_proof(leaf, &proof, &root).unwrap());
        }
    }

    #[test]
    fn randomizer_bits_are_least_significant_first() {
        let bits = scalar_bits_le(&BigUint::from(123456789u64));
        assert_eq!(bits.len(), SCALAR_BITS);
        // 123456789 = 0b111010110111100110100010101
        assert_eq!(&bits[..8], &[1, 0, 1, 0, 1, 0, 0, 0]);

        let reconstructed = bits
            .iter()
            .enumerate()
            .fold(BigUint::from(0u32), |acc, (i, &b)| {
                acc + (BigUint::from(b) << i)
            });
        assert_eq!(reconstructed, BigUint::from(123456789u64));
    }

    #[test]
    fn unpublished_vote_aborts_the_bundle() {
        let mut election = setup_election(&["alpha", "bravo"], 4);

        // Swap in a vote whose ciphertext was never inserted.
        let mut rng = StdRng::seed_from_u64(99);
        let stray = embed_str("stray", &mut rng).unwrap();
        election.votes[1] = VoteToCancel {
            encoded: ristretto::compress_hex(&stray),
            randomizer: "12345".into(),
            ciphertext: None,
        };

        assert!(matches!(
            prepare_cancellation_witness(
                &election.votes,
                &election.recipient_hex,
                &election.tree,
                &WitnessConfig::default(),
            ),
            Err(Error::AccumulatorLeafNotFound)
        ));
    }

    #[test]
    fn mismatched_published_ciphertext_is_rejected() {
        let mut election = setup_election(&["alpha", "bravo"], 5);
        election.votes[0].ciphertext = election.votes[1].ciphertext.clone();

        assert!(matches!(
            prepare_cancellation_witness(
                &election.votes,
                &election.recipient_hex,
                &election.tree,
                &WitnessConfig::default(),
            ),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn boundary_validation() {
        let election = setup_election(&["alpha"], 6);
        let config = WitnessConfig::default();

        // Empty batch.
        assert!(matches!(
            prepare_cancellation_witness(&[], &election.recipient_hex, &election.tree, &config),
            Err(Error::MalformedInput(_))
        ));

        // Garbage randomizer.
        let mut votes = election.votes.clone();
        votes[0].randomizer = "not-a-number".into();
        assert!(matches!(
            prepare_cancellation_witness(&votes, &election.recipient_hex, &election.tree, &config),
            Err(Error::MalformedInput(_))
        ));

        // Oversized randomizer (256 bits).
        let mut votes = election.votes.clone();
        votes[0].randomizer = (BigUint::from(1u32) << 255u32).to_str_radix(10);
        assert!(matches!(
            prepare_cancellation_witness(&votes, &election.recipient_hex, &election.tree, &config),
            Err(Error::MalformedInput(_))
        ));

        // Bad recipient key.
        assert!(matches!(
            prepare_cancellation_witness(&election.votes, "00ff", &election.tree, &config),
            Err(Error::InvalidPointEncoding(_))
        ));
    }

    #[test]
    fn depth_cap_below_tree_depth_fails() {
        let election = setup_election(&["a", "b", "c", "d", "e"], 7);
        assert_eq!(election.tree.depth(), 3);

        let config = WitnessConfig { tree_depth: 2 };
        assert!(matches!(
            prepare_cancellation_witness(
                &election.votes,
                &election.recipient_hex,
                &election.tree,
                &config,
            ),
            Err(Error::MerkleTree(_))
        ));
    }
}
