//! cancelproof - witness preparation for privacy-preserving vote
//! cancellation.
//!
//! Given encrypted ballots previously published into a Poseidon Merkle
//! accumulator, this library prepares the inputs a zero-knowledge circuit
//! consumes to prove, without revealing which ballot, that a vote was
//! encoded with the protocol's embedding scheme, encrypted to the election
//! key, and included in the accumulator.
//!
//! The pipeline, leaves first: base-field arithmetic mod 2^255 - 19,
//! 85-bit limb chunking matching the circuit's representation, extended
//! coordinate twisted Edwards arithmetic, plaintext-to-point embedding by
//! rejection sampling, additive ElGamal encryption, the two-level Poseidon
//! leaf hash with Merkle inclusion proofs, and finally per-batch witness
//! assembly.

pub mod accumulator;
pub mod chunk;
pub mod crypto;
pub mod error;
pub mod field;
pub mod types;
pub mod witness;

pub use error::{Error, Result};
pub use types::{PublicInputs, VoteToCancel, VoteWitness, WitnessBundle, WitnessConfig};
pub use witness::prepare_cancellation_witness;

pub use accumulator::{insert_ballot, leaf_hash, prove_membership};
pub use crypto::edwards::ExtendedPoint;
pub use crypto::elgamal::{encrypt, random_scalar};
pub use crypto::encoding::{embed, embed_str, extract};
pub use crypto::merkle::{verify_proof, MerkleProof, VoteTree};
pub use crypto::ristretto::{compress, compress_hex, decompress, decompress_hex};
