//! 7-bit ASCII bit-stream codec.
//!
//! Converts a sentence to a flat stream of bits (7 per character, most
//! significant bit first) and back. Characters outside the 7-bit range
//! contribute no bits at all; they are reported as [`SkippedChar`]
//! diagnostics rather than aborting the encode, so the stream length is
//! `7 * encoded character count`, not `7 * sentence length`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::BITS_PER_CHAR;

/// Errors that can occur while decoding a bit-stream.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BitStreamError {
    #[error("Malformed bit-stream: length {len} is not a multiple of 7")]
    MalformedBitStream { len: usize },
}

/// An immutable sequence of bits, seven per encoded character.
///
/// Built by [`encode`] or recovered from a carrier; never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    bits: Vec<u8>,
}

impl BitStream {
    /// Creates a bit-stream from raw bits. Only the lowest bit of each
    /// value is kept.
    pub fn from_bits(bits: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bits: bits.into_iter().map(|b| b & 1).collect(),
        }
    }

    /// Number of bits in the stream.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the stream holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit (0 or 1) at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn bit(&self, index: usize) -> u8 {
        self.bits[index]
    }

    /// Iterates over the bits in stream order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits.iter().copied()
    }
}

impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// A character rejected during encoding because its code point is >= 128.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedChar {
    /// Character position in the original sentence (0-based).
    pub index: usize,
    /// The rejected character.
    pub ch: char,
}

/// Result of encoding a sentence.
#[derive(Debug, Clone)]
pub struct Encoding {
    /// The 7-bit ASCII bit-stream.
    pub bits: BitStream,
    /// Characters that were outside the 7-bit range and contributed no bits.
    pub skipped: Vec<SkippedChar>,
}

/// Encodes a sentence into a 7-bit ASCII bit-stream.
///
/// Each in-range character contributes exactly 7 bits, most significant
/// first, in original character order. Characters with code points >= 128
/// are skipped and recorded in the returned diagnostics.
pub fn encode(sentence: &str) -> Encoding {
    let mut bits = Vec::with_capacity(sentence.len() * BITS_PER_CHAR);
    let mut skipped = Vec::new();

    for (index, ch) in sentence.chars().enumerate() {
        if ch as u32 >= 128 {
            skipped.push(SkippedChar { index, ch });
            continue;
        }
        let code = (ch as u8) & 0x7F;
        for shift in (0..BITS_PER_CHAR).rev() {
            bits.push((code >> shift) & 1);
        }
    }

    Encoding {
        bits: BitStream { bits },
        skipped,
    }
}

/// Decodes a bit-stream back into a sentence.
///
/// The stream is read in consecutive 7-bit groups, most significant bit
/// first, each group mapping to one character.
pub fn decode(bits: &BitStream) -> Result<String, BitStreamError> {
    if bits.len() % BITS_PER_CHAR != 0 {
        return Err(BitStreamError::MalformedBitStream { len: bits.len() });
    }

    let mut sentence = String::with_capacity(bits.len() / BITS_PER_CHAR);
    for group in bits.bits.chunks(BITS_PER_CHAR) {
        let code = group.iter().fold(0u8, |acc, &bit| (acc << 1) | bit);
        sentence.push(code as char);
    }

    Ok(sentence)
}
