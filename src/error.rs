use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Too much data to embed: {len} > {max}")]
    EncodingTooLarge { len: usize, max: usize },

    #[error("Ran out of embedding attempts: {0}")]
    EncodingExhausted(usize),

    #[error("Invalid point encoding: {0}")]
    InvalidPointEncoding(String),

    #[error("Modular inverse of zero")]
    DivisionByZero,

    #[error("Accumulator leaf not found")]
    AccumulatorLeafNotFound,

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Merkle tree error: {0}")]
    MerkleTree(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

pub type Result<T> = std::result::Result<T, Error>;
