pub mod edwards;
pub mod elgamal;
pub mod encoding;
pub mod merkle;
pub mod poseidon;
pub mod ristretto;

pub use edwards::ExtendedPoint;
pub use encoding::{embed, embed_str, extract, EMBED_ATTEMPT_BOUND, MAX_PLAINTEXT_LEN};
pub use merkle::{verify_proof, MerkleProof, VoteTree};
pub use poseidon::poseidon;
