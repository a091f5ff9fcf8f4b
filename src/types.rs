use serde::{Deserialize, Serialize};

/// One previously-cast vote the caller wants to cancel.
///
/// Points travel as 32-byte compressed encodings in hex; the randomizer is
/// the decimal scalar that was used to encrypt the vote and must have been
/// retained privately by the voter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteToCancel {
    /// Compressed encoded-vote point, hex.
    pub encoded: String,
    /// Per-vote encryption randomizer, decimal.
    pub randomizer: String,
    /// Published ciphertext, hex. When present it is cross-checked against
    /// the ciphertext recomputed from `encoded` and `randomizer`.
    #[serde(default)]
    pub ciphertext: Option<String>,
}

/// Inputs the verifier sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicInputs {
    /// Accumulator root at witness time, decimal.
    pub merkle_root: String,
    /// Poseidon aggregate over the cancelled leaves, in input order.
    pub claimed_sum: String,
}

/// Private per-vote witness data, shaped for the proof circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteWitness {
    /// Chunked encoded-point coordinates: X, Y, Z, T, three 85-bit limbs
    /// each, decimal.
    pub encoded_coords: [[String; 3]; 4],
    /// Randomizer bit decomposition, 255 bits, least-significant first.
    pub randomizer_bits: Vec<u8>,
    /// Merkle sibling hashes, leaf to root, decimal.
    pub siblings: Vec<String>,
    /// Path-direction bits matching `siblings`.
    pub path_indices: Vec<u8>,
}

/// The complete input bundle for one cancellation proof. Consumed exactly
/// once by the circuit, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitnessBundle {
    pub public: PublicInputs,
    pub private: Vec<VoteWitness>,
}

/// Orchestration-level settings, loaded once at process start and
/// read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitnessConfig {
    /// Deepest accumulator path the proof circuit supports.
    pub tree_depth: usize,
}

impl Default for WitnessConfig {
    fn default() -> Self {
        Self { tree_depth: 20 }
    }
}
