//! Twisted Edwards curve arithmetic over the curve25519 base field in
//! extended coordinates (X:Y:Z:T), where the affine point is (X/Z, Y/Z)
//! and X*Y = Z*T mod p.
//!
//! The addition law is the unified extended-coordinate formula, valid for
//! doubling as well, so the scalar-multiplication ladder never branches
//! between an add and a dedicated doubling path. This mirrors the bit-level
//! loop the proof circuit runs, keeping host-side and circuit-side
//! intermediate points identical.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use crate::error::Result;
use crate::field;

/// Edwards curve parameter d = -121665/121666 mod p.
pub static D: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"37095705934669439343138083508754565189542113879843219016388785533085940283555",
        10,
    )
    .expect("Failed to parse d")
});

static BASE_X: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"15112221349535400772501151409588531511454012693041857206046113283949847762202",
        10,
    )
    .expect("Failed to parse base point x")
});

static BASE_Y: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(
        b"46316835694926478169428394003475163141307993866256225615783033603165251855960",
        10,
    )
    .expect("Failed to parse base point y")
});

/// A curve point in extended coordinates. Coordinates are always kept
/// normalized into [0, p).
///
/// `==` compares coordinate tuples, which distinguishes different
/// projective representatives of the same affine point; use
/// [`ExtendedPoint::points_equal`] for curve-level equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedPoint {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
    pub t: BigUint,
}

impl ExtendedPoint {
    /// The neutral element, (0:1:1:0).
    pub fn neutral() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::one(),
            z: BigUint::one(),
            t: BigUint::zero(),
        }
    }

    /// The ed25519 base point, with Z = 1 and T = X*Y.
    pub fn base() -> Self {
        Self {
            x: BASE_X.clone(),
            y: BASE_Y.clone(),
            z: BigUint::one(),
            t: field::mul(&BASE_X, &BASE_Y),
        }
    }

    /// Unified extended-coordinate addition. Valid for any pair of points
    /// satisfying the X*Y = Z*T invariant, including P = Q.
    pub fn add(&self, other: &Self) -> Self {
        let two = BigUint::from(2u32);

        let a = field::mul(
            &field::sub(&self.y, &self.x),
            &field::sub(&other.y, &other.x),
        );
        let b = field::mul(
            &field::add(&self.y, &self.x),
            &field::add(&other.y, &other.x),
        );
        let c = field::mul(&field::mul(&field::mul(&two, &self.t), &other.t), &D);
        let d = field::mul(&field::mul(&two, &self.z), &other.z);

        let e = field::sub(&b, &a);
        let f = field::sub(&d, &c);
        let g = field::add(&d, &c);
        let h = field::add(&b, &a);

        Self {
            x: field::mul(&e, &f),
            y: field::mul(&g, &h),
            z: field::mul(&f, &g),
            t: field::mul(&e, &h),
        }
    }

    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Binary double-and-add, consuming the scalar from its
    /// least-significant bit. A zero scalar yields the neutral element.
    ///
    /// This is the reference ladder the circuit replicates bit for bit.
    /// It branches on scalar bits and is not constant-time; contexts where
    /// the scalar must stay secret from a timing observer need a hardened
    /// ladder instead.
    pub fn scalar_mul(&self, scalar: &BigUint) -> Self {
        let mut acc = Self::neutral();
        let mut base = self.clone();
        let mut s = scalar.clone();

        while !s.is_zero() {
            if s.bit(0) {
                acc = acc.add(&base);
            }
            base = base.double();
            s >>= 1u32;
        }

        acc
    }

    /// Curve-level equality: compares affine quotients by
    /// cross-multiplication, without computing an inverse.
    pub fn points_equal(&self, other: &Self) -> bool {
        field::mul(&self.x, &other.z) == field::mul(&other.x, &self.z)
            && field::mul(&self.y, &other.z) == field::mul(&other.y, &self.z)
    }

    /// Affine coordinates (X/Z, Y/Z). Z = 0 never occurs for valid points
    /// (the neutral element carries Z = 1) and is surfaced as
    /// `DivisionByZero`.
    pub fn to_affine(&self) -> Result<(BigUint, BigUint)> {
        let z_inv = field::inverse(&self.z)?;
        Ok((field::mul(&self.x, &z_inv), field::mul(&self.y, &z_inv)))
    }

    /// Projective curve equation: -X^2 Z^2 + Y^2 Z^2 = Z^4 + d X^2 Y^2.
    pub fn is_on_curve(&self) -> bool {
        let x2 = field::sqr(&self.x);
        let y2 = field::sqr(&self.y);
        let z2 = field::sqr(&self.z);
        let z4 = field::sqr(&z2);

        let lhs = field::sub(&field::mul(&y2, &z2), &field::mul(&x2, &z2));
        let rhs = field::add(&z4, &field::mul(&D, &field::mul(&x2, &y2)));
        lhs == rhs
    }

    /// The extended-coordinate invariant X*Y = Z*T.
    pub fn has_valid_t(&self) -> bool {
        field::mul(&self.x, &self.y) == field::mul(&self.z, &self.t)
    }
}
