//! Additive ElGamal-style encryption of encoded votes.
//!
//! A ciphertext is `encoded + [randomizer]recipient`, computed with the
//! same extended-coordinate operations the proof circuit replays.
//! Decryption is the recipient's exclusive capability and has no
//! counterpart here.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::crypto::edwards::ExtendedPoint;

/// Encrypt an encoded vote to a recipient public key.
///
/// The randomizer scalar must be drawn fresh per vote and retained
/// privately: reusing one across ciphertexts to the same key leaks
/// equality of the underlying plaintexts, and the later cancellation proof
/// needs the scalar as witness material.
pub fn encrypt(
    encoded: &ExtendedPoint,
    recipient: &ExtendedPoint,
    randomizer: &BigUint,
) -> ExtendedPoint {
    encoded.add(&recipient.scalar_mul(randomizer))
}

/// Draw a fresh 255-bit randomizer scalar, matching the width of the
/// bit decomposition the circuit consumes.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> BigUint {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    bytes[31] &= 0x7f;
    BigUint::from_bytes_le(&bytes)
}
