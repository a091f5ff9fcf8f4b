//! The Poseidon hash primitive consumed by the accumulator.
//!
//! A thin, stateless boundary over the circom-parameterized permutation:
//! deterministic, no secret state, arity-bounded. Everything upstream of
//! the accumulator talks to this single entry point, so swapping the
//! underlying permutation implementation touches one module.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use light_poseidon::{Poseidon, PoseidonHasher};
use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Largest input width the permutation parameters cover.
pub const MAX_ARITY: usize = 12;

/// Hash a fixed-arity input tuple into a single field element.
pub fn poseidon(inputs: &[Fr]) -> Result<Fr> {
    if inputs.is_empty() || inputs.len() > MAX_ARITY {
        return Err(Error::Hash(format!(
            "poseidon arity {} outside 1..={MAX_ARITY}",
            inputs.len()
        )));
    }

    let mut hasher =
        Poseidon::<Fr>::new_circom(inputs.len()).map_err(|e| Error::Hash(e.to_string()))?;
    hasher.hash(inputs).map_err(|e| Error::Hash(e.to_string()))
}

/// Lift an 85-bit limb into the hash field.
pub fn limb_to_fr(limb: u128) -> Fr {
    Fr::from(limb)
}

/// Decimal rendering used by the witness bundle.
pub fn fr_to_decimal(value: &Fr) -> String {
    let as_int: BigUint = value.into_bigint().into();
    as_int.to_str_radix(10)
}

/// Parse the decimal rendering back into the hash field.
pub fn decimal_to_fr(s: &str) -> Result<Fr> {
    let as_int = BigUint::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| Error::MalformedInput(format!("not a decimal field element: {s}")))?;
    Ok(Fr::from_le_bytes_mod_order(&as_int.to_bytes_le()))
}
