//! Arithmetic in the curve25519 base field, p = 2^255 - 19.
//!
//! All functions return values normalized into [0, p). Binary operations
//! expect both operands already normalized; `normalize` is the entry point
//! for signed or oversized values.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use crate::error::{Error, Result};

/// p = 2^255 - 19
pub static P: Lazy<BigUint> = Lazy::new(|| (BigUint::one() << 255u32) - 19u32);

/// Reduce a signed integer to its non-negative representative mod p.
pub fn normalize(n: &BigInt) -> BigUint {
    let p = BigInt::from((*P).clone());
    let r = ((n % &p) + &p) % &p;
    r.magnitude().clone()
}

pub fn add(a: &BigUint, b: &BigUint) -> BigUint {
    debug_assert!(a < &*P && b < &*P);
    (a + b) % &*P
}

pub fn sub(a: &BigUint, b: &BigUint) -> BigUint {
    debug_assert!(a < &*P && b < &*P);
    ((a + &*P) - b) % &*P
}

pub fn mul(a: &BigUint, b: &BigUint) -> BigUint {
    debug_assert!(a < &*P && b < &*P);
    (a * b) % &*P
}

pub fn sqr(a: &BigUint) -> BigUint {
    mul(a, a)
}

pub fn neg(a: &BigUint) -> BigUint {
    debug_assert!(a < &*P);
    (&*P - a) % &*P
}

/// Square-and-multiply modular exponentiation, consuming the exponent from
/// its least-significant bit. `0^e = 0` for any nonzero exponent.
pub fn mod_exp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exponent.clone();

    while !exp.is_zero() {
        if exp.bit(0) {
            result = &result * &base % modulus;
        }
        base = &base * &base % modulus;
        exp >>= 1u32;
    }

    result
}

/// Modular inverse via Fermat's little theorem: a^(p-2) mod p.
///
/// Inverting zero signals an invariant violation upstream (a Z = 0
/// projective coordinate, for instance) and is reported as an error.
pub fn inverse(a: &BigUint) -> Result<BigUint> {
    if a.is_zero() {
        return Err(Error::DivisionByZero);
    }
    Ok(mod_exp(a, &(&*P - 2u32), &P))
}

/// Sign convention used by the compressed point format: a field element is
/// negative iff the low bit of its canonical representative is set.
pub fn is_negative(a: &BigUint) -> bool {
    a.bit(0)
}

/// The non-negative element of {a, -a}.
pub fn abs(a: &BigUint) -> BigUint {
    if is_negative(a) {
        neg(a)
    } else {
        a.clone()
    }
}

pub fn from_le_bytes(bytes: &[u8; 32]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

pub fn to_le_bytes32(a: &BigUint) -> [u8; 32] {
    let bytes = a.to_bytes_le();
    debug_assert!(bytes.len() <= 32);
    let mut out = [0u8; 32];
    out[..bytes.len()].copy_from_slice(&bytes);
    out
}
