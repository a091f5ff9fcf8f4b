//! The 32-byte compressed point format exchanged with other protocol
//! participants (ristretto255, RFC 9496).
//!
//! Decoding enforces a canonical, non-negative field element and rejects
//! off-curve values, so every published key, encoded vote, and ciphertext
//! string round-trips to exactly one extended-coordinate representation
//! with Z = 1 and T = X*Y. The accumulator hashes that canonical
//! representation, which is why compression/decompression lives here
//! rather than behind an external curve library's private internals.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use crate::crypto::edwards::{ExtendedPoint, D};
use crate::error::{Error, Result};
use crate::field::{self, P};

/// sqrt(-1) mod p, the non-negative root.
pub static SQRT_M1: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"19681161376707505956807079304988542015446066515923890162744021073123829784752",
        10,
    )
    .expect("Failed to parse sqrt(-1)")
});

/// 1/sqrt(a - d) mod p for a = -1, used by the encoding's rotation case.
static INVSQRT_A_MINUS_D: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"54469307008909316920995813868745141605393597292927456921205312896311721017578",
        10,
    )
    .expect("Failed to parse 1/sqrt(a-d)")
});

/// Compute sqrt(u/v) when it exists, per RFC 9496.
///
/// Returns `(true, sqrt(u/v))` when u/v is square, otherwise
/// `(false, sqrt(i*u/v))`. The returned root is always non-negative.
pub fn sqrt_ratio_m1(u: &BigUint, v: &BigUint) -> (bool, BigUint) {
    let v3 = field::mul(&field::sqr(v), v);
    let v7 = field::mul(&field::sqr(&v3), v);

    // (p - 5) / 8 = 2^252 - 3
    let exp = (&*P - 5u32) >> 3u32;
    let pow = field::mod_exp(&field::mul(u, &v7), &exp, &P);
    let mut r = field::mul(&field::mul(u, &v3), &pow);

    let check = field::mul(v, &field::sqr(&r));
    let neg_u = field::neg(u);
    let neg_u_i = field::mul(&neg_u, &SQRT_M1);

    let correct_sign = check == *u;
    let flipped_sign = check == neg_u;
    let flipped_sign_i = check == neg_u_i;

    if flipped_sign || flipped_sign_i {
        r = field::mul(&r, &SQRT_M1);
    }

    (correct_sign || flipped_sign, field::abs(&r))
}

/// Decode a 32-byte compressed point into extended coordinates.
///
/// Fails with `InvalidPointEncoding` on a non-canonical field element, a
/// negative s component, or a value with no corresponding curve point.
/// The decoded point has Z = 1 and T = X*Y.
pub fn decompress(bytes: &[u8; 32]) -> Result<ExtendedPoint> {
    let s = field::from_le_bytes(bytes);
    if s >= *P {
        return Err(Error::InvalidPointEncoding(
            "non-canonical field element".into(),
        ));
    }
    if field::is_negative(&s) {
        return Err(Error::InvalidPointEncoding("negative s component".into()));
    }

    let one = BigUint::one();
    let ss = field::sqr(&s);
    let u1 = field::sub(&one, &ss);
    let u2 = field::add(&one, &ss);
    let u2_sqr = field::sqr(&u2);

    // v = -(d * u1^2) - u2^2
    let v = field::sub(&field::neg(&field::mul(&D, &field::sqr(&u1))), &u2_sqr);

    let (was_square, invsqrt) = sqrt_ratio_m1(&one, &field::mul(&v, &u2_sqr));
    let den_x = field::mul(&invsqrt, &u2);
    let den_y = field::mul(&field::mul(&invsqrt, &den_x), &v);

    let x = field::abs(&field::mul(&field::add(&s, &s), &den_x));
    let y = field::mul(&u1, &den_y);
    let t = field::mul(&x, &y);

    if !was_square || field::is_negative(&t) || y.is_zero() {
        return Err(Error::InvalidPointEncoding(
            "not a valid point encoding".into(),
        ));
    }

    Ok(ExtendedPoint { x, y, z: one, t })
}

/// Encode a point to its canonical 32-byte compressed form.
///
/// Inverse of [`decompress`]: every valid encoding decodes and re-encodes
/// to the same bytes, regardless of which projective representative of the
/// point is passed in.
pub fn compress(point: &ExtendedPoint) -> [u8; 32] {
    let u1 = field::mul(
        &field::add(&point.z, &point.y),
        &field::sub(&point.z, &point.y),
    );
    let u2 = field::mul(&point.x, &point.y);

    let (_, invsqrt) = sqrt_ratio_m1(&BigUint::one(), &field::mul(&u1, &field::sqr(&u2)));
    let den1 = field::mul(&invsqrt, &u1);
    let den2 = field::mul(&invsqrt, &u2);
    let z_inv = field::mul(&field::mul(&den1, &den2), &point.t);

    let rotate = field::is_negative(&field::mul(&point.t, &z_inv));
    let (x, mut y, den_inv) = if rotate {
        (
            field::mul(&point.y, &SQRT_M1),
            field::mul(&point.x, &SQRT_M1),
            field::mul(&den1, &INVSQRT_A_MINUS_D),
        )
    } else {
        (point.x.clone(), point.y.clone(), den2)
    };

    if field::is_negative(&field::mul(&x, &z_inv)) {
        y = field::neg(&y);
    }

    let s = field::abs(&field::mul(&den_inv, &field::sub(&point.z, &y)));
    field::to_le_bytes32(&s)
}

/// Decode a hex string holding a 32-byte compressed point.
///
/// Malformed hex, a wrong length, and an invalid point are all hard
/// input-validation errors.
pub fn decompress_hex(hex_str: &str) -> Result<ExtendedPoint> {
    let bytes = hex::decode(hex_str)
        .map_err(|e| Error::InvalidPointEncoding(format!("malformed hex: {e}")))?;
    let bytes: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
        Error::InvalidPointEncoding(format!("expected 32 bytes, got {}", v.len()))
    })?;
    decompress(&bytes)
}

pub fn compress_hex(point: &ExtendedPoint) -> String {
    hex::encode(compress(point))
}
