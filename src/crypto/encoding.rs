//! Embedding vote plaintexts into curve points and extracting them back.
//!
//! A plaintext of up to 30 bytes is placed into a candidate 32-byte
//! compressed encoding: byte 0 carries the length shifted left by one (the
//! point format requires the low bit clear), bytes 1..=len carry the
//! plaintext, and the remaining bytes are fresh randomness. Candidates are
//! drawn until one decompresses to a valid point, so many distinct points
//! encode the same plaintext and all of them extract to the same bytes.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::crypto::edwards::ExtendedPoint;
use crate::crypto::ristretto;
use crate::error::{Error, Result};

/// 32-byte point budget, minus one byte for the length prefix and one byte
/// of randomness the rejection sampling needs to find a valid point.
pub const MAX_PLAINTEXT_LEN: usize = 30;

/// Upper bound on rejection-sampling attempts. A uniformly random
/// candidate decodes to a valid point with probability around 1/8 (half
/// the candidates already exceed the field modulus, and of the rest only
/// canonical encodings of group elements decode), so a successful embed
/// takes a handful of draws and a bound of 1000 fails only with
/// astronomically small probability.
pub const EMBED_ATTEMPT_BOUND: usize = 1000;

/// Embed arbitrary bytes into a valid curve point.
///
/// Non-deterministic: repeated calls return different points, all of which
/// [`extract`] back to the same plaintext.
pub fn embed<R: RngCore + CryptoRng>(data: &[u8], rng: &mut R) -> Result<ExtendedPoint> {
    if data.len() > MAX_PLAINTEXT_LEN {
        return Err(Error::EncodingTooLarge {
            len: data.len(),
            max: MAX_PLAINTEXT_LEN,
        });
    }

    for attempt in 0..EMBED_ATTEMPT_BOUND {
        let mut candidate = [0u8; 32];
        rng.fill_bytes(&mut candidate);

        candidate[0] = (data.len() as u8) << 1;
        candidate[1..1 + data.len()].copy_from_slice(data);

        if let Ok(point) = ristretto::decompress(&candidate) {
            log::debug!("embedded {} bytes after {} attempts", data.len(), attempt + 1);
            return Ok(point);
        }
    }

    Err(Error::EncodingExhausted(EMBED_ATTEMPT_BOUND))
}

/// Embed a UTF-8 string.
pub fn embed_str<R: RngCore + CryptoRng>(message: &str, rng: &mut R) -> Result<ExtendedPoint> {
    embed(message.as_bytes(), rng)
}

/// Recover the plaintext embedded in a point.
///
/// Reads the canonical compressed encoding: byte 0 shifted right by one is
/// the length, the following bytes are the plaintext.
pub fn extract(point: &ExtendedPoint) -> Result<Vec<u8>> {
    let bytes = ristretto::compress(point);
    let len = (bytes[0] >> 1) as usize;
    if len > MAX_PLAINTEXT_LEN {
        return Err(Error::MalformedInput(format!(
            "embedded length {len} exceeds {MAX_PLAINTEXT_LEN}"
        )));
    }
    Ok(bytes[1..1 + len].to_vec())
}

/// Byte extraction expressed over the encoding's 256-bit little-endian
/// integer, the way the proof circuit performs it: decompose into bits,
/// read the length from bits 1..8, then reassemble each plaintext byte
/// from its bit group. Must agree with [`extract`] bit for bit.
pub fn extract_from_le_value(value: &BigUint) -> Result<Vec<u8>> {
    let bits: Vec<u8> = (0..256).map(|i| value.bit(i) as u8).collect();

    let mut len = 0usize;
    for j in (0..7).rev() {
        len = (len << 1) | bits[1 + j] as usize;
    }
    if len > MAX_PLAINTEXT_LEN {
        return Err(Error::MalformedInput(format!(
            "embedded length {len} exceeds {MAX_PLAINTEXT_LEN}"
        )));
    }

    let mut out = Vec::with_capacity(len);
    for byte_idx in 1..=len {
        let mut b = 0u8;
        for bit in 0..8 {
            b |= bits[byte_idx * 8 + bit] << bit;
        }
        out.push(b);
    }
    Ok(out)
}
