//! Conversion between field elements and the fixed-width limb layout used
//! inside the arithmetic circuit.
//!
//! A field element below p = 2^255 - 19 splits into exactly three 85-bit
//! limbs in little-endian positional order, so
//! `limb0 + limb1 * 2^85 + limb2 * 2^170` reconstructs the value.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::crypto::edwards::ExtendedPoint;
use crate::field::P;

pub const LIMB_BITS: usize = 85;
pub const NUM_LIMBS: usize = 3;

/// Split a normalized field element into three 85-bit limbs.
///
/// The input must already be reduced into [0, p); chunking a larger value
/// is undefined and rejected in debug builds.
pub fn chunk(value: &BigUint) -> [u128; NUM_LIMBS] {
    debug_assert!(value < &*P, "chunk input must be normalized below p");

    let mask = (BigUint::one() << LIMB_BITS) - 1u32;
    let mut rest = value.clone();
    let mut limbs = [0u128; NUM_LIMBS];

    for limb in &mut limbs {
        let low = &rest & &mask;
        let mut digits = low.iter_u64_digits();
        let lo = digits.next().unwrap_or(0) as u128;
        let hi = digits.next().unwrap_or(0) as u128;
        *limb = lo | (hi << 64);
        rest >>= LIMB_BITS;
    }

    limbs
}

/// Reassemble limbs into an integer.
///
/// No modular reduction is applied: p is not a multiple of 2^85, so limbs
/// that did not come out of [`chunk`] can legitimately reconstruct a value
/// at or above p. Callers must re-normalize before further field
/// arithmetic.
pub fn dechunk(limbs: &[u128; NUM_LIMBS]) -> BigUint {
    let mut acc = BigUint::zero();
    for (i, &limb) in limbs.iter().enumerate() {
        acc += BigUint::from(limb) << (LIMB_BITS * i);
    }
    acc
}

/// Chunk all four extended coordinates, X, Y, Z, T in order.
pub fn chunk_point(point: &ExtendedPoint) -> [[u128; NUM_LIMBS]; 4] {
    [
        chunk(&point.x),
        chunk(&point.y),
        chunk(&point.z),
        chunk(&point.t),
    ]
}

/// Inverse of [`chunk_point`]. Coordinates are reconstructed verbatim;
/// see [`dechunk`] for the reduction caveat.
pub fn dechunk_point(chunked: &[[u128; NUM_LIMBS]; 4]) -> ExtendedPoint {
    ExtendedPoint {
        x: dechunk(&chunked[0]),
        y: dechunk(&chunked[1]),
        z: dechunk(&chunked[2]),
        t: dechunk(&chunked[3]),
    }
}
