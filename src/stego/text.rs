//! Whitespace steganography for plain-text documents.
//!
//! Hides a bit-stream in the spacing of a document: the N-th space becomes
//! a double space for a 1-bit and stays single for a 0-bit, with the
//! payload cycling across all spaces. Extraction reads maximal space runs
//! back into bits (two or more spaces = 1, a single space = 0).
//!
//! Cyclic reuse means a document can hold a payload of any length, but
//! extraction is only lossless when the document's original space count is
//! at least the requested bit count and every pre-embed run was a single
//! space. Only U+0020 participates; tabs and other whitespace pass through
//! untouched.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::bitstream::BitStream;

/// Errors that can occur during text steganography.
#[derive(Error, Debug)]
pub enum TextStegoError {
    #[error("Cannot embed an empty bit-stream")]
    EmptyBitStream,

    #[error("Document ran out of spaces: need {needed} bits, found {available}")]
    InsufficientSpaces { needed: usize, available: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Text steganography handler.
pub struct TextStego {
    text: String,
}

impl TextStego {
    /// Creates a new TextStego from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextStegoError> {
        Ok(Self {
            text: fs::read_to_string(path)?,
        })
    }

    /// Creates a new TextStego from a document string.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// Returns the document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes self and returns the document text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Returns the capacity in bits: the number of space characters.
    ///
    /// A payload longer than this still embeds (it cycles), but can no
    /// longer be extracted losslessly from this document alone.
    pub fn capacity(&self) -> usize {
        self.text.chars().filter(|&ch| ch == ' ').count()
    }

    /// Embeds a bit-stream into the document spacing, returning the
    /// embedded copy. The original document is not modified.
    ///
    /// The N-th space (0-based) carries bit `N % bits.len()`: a 1-bit turns
    /// it into a double space, a 0-bit leaves it single. When the document
    /// has more spaces than the stream has bits, the payload repeats.
    pub fn embed(&self, bits: &BitStream) -> Result<TextStego, TextStegoError> {
        if bits.is_empty() {
            return Err(TextStegoError::EmptyBitStream);
        }

        let mut out = String::with_capacity(self.text.len() + self.capacity());
        let mut space_count = 0usize;

        for ch in self.text.chars() {
            if ch == ' ' {
                out.push(' ');
                if bits.bit(space_count % bits.len()) == 1 {
                    out.push(' ');
                }
                space_count += 1;
            } else {
                out.push(ch);
            }
        }

        Ok(TextStego { text: out })
    }

    /// Reads `bit_count` bits back out of the document spacing.
    ///
    /// A maximal run of consecutive spaces counts as one original space
    /// position: runs of two or more decode to 1, single spaces to 0.
    /// Scanning stops as soon as enough bits are collected.
    pub fn extract(&self, bit_count: usize) -> Result<BitStream, TextStegoError> {
        let mut bits = Vec::with_capacity(bit_count);
        let mut run = 0usize;

        for ch in self.text.chars() {
            if bits.len() == bit_count {
                break;
            }
            if ch == ' ' {
                run += 1;
            } else if run > 0 {
                bits.push(if run >= 2 { 1 } else { 0 });
                run = 0;
            }
        }

        // A run at end of document still decodes to one bit.
        if run > 0 && bits.len() < bit_count {
            bits.push(if run >= 2 { 1 } else { 0 });
        }

        if bits.len() < bit_count {
            return Err(TextStegoError::InsufficientSpaces {
                needed: bit_count,
                available: bits.len(),
            });
        }

        Ok(BitStream::from_bits(bits))
    }

    /// Saves the document to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TextStegoError> {
        fs::write(path, &self.text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream;

    #[test]
    fn test_capacity_counts_spaces() {
        let stego = TextStego::from_text("one two three\tfour\nfive six");
        assert_eq!(stego.capacity(), 3);
    }

    #[test]
    fn test_embed_doubles_spaces_for_one_bits() {
        let stego = TextStego::from_text("a b c d e");
        let bits = BitStream::from_bits(vec![1, 0]);

        let embedded = stego.embed(&bits).unwrap();
        // Spaces 0 and 2 carry the 1-bit (cycled), spaces 1 and 3 the 0-bit.
        assert_eq!(embedded.text(), "a  b c  d e");
    }

    #[test]
    fn test_roundtrip_when_spaces_match_bit_count() {
        let sentence = "hi";
        let encoding = bitstream::encode(sentence);

        // 14 spaces for 14 bits
        let words: Vec<String> = (0..15).map(|i| format!("w{}", i)).collect();
        let stego = TextStego::from_text(&words.join(" "));
        assert_eq!(stego.capacity(), encoding.bits.len());

        let embedded = stego.embed(&encoding.bits).unwrap();
        let extracted = embedded.extract(encoding.bits.len()).unwrap();
        assert_eq!(extracted, encoding.bits);
        assert_eq!(bitstream::decode(&extracted).unwrap(), sentence);
    }

    #[test]
    fn test_empty_bitstream_rejected() {
        let stego = TextStego::from_text("some document with spaces");
        let result = stego.embed(&BitStream::from_bits(Vec::new()));
        assert!(matches!(result, Err(TextStegoError::EmptyBitStream)));
    }

    #[test]
    fn test_non_space_characters_pass_through() {
        let stego = TextStego::from_text("tabs\tand\nnewlines stay");
        let bits = BitStream::from_bits(vec![1]);

        let embedded = stego.embed(&bits).unwrap();
        assert_eq!(embedded.text(), "tabs\tand\nnewlines  stay");
    }

    #[test]
    fn test_extract_too_few_spaces() {
        let stego = TextStego::from_text("only two gaps");
        let result = stego.extract(5);
        assert!(matches!(
            result,
            Err(TextStegoError::InsufficientSpaces {
                needed: 5,
                available: 2
            })
        ));
    }

    #[test]
    fn test_extract_run_at_end_of_document() {
        let stego = TextStego::from_text("trailing run  ");
        let extracted = stego.extract(2).unwrap();
        assert_eq!(extracted, BitStream::from_bits(vec![0, 1]));
    }

    #[test]
    fn test_extract_zero_bits() {
        let stego = TextStego::from_text("no spaces needed");
        let extracted = stego.extract(0).unwrap();
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_document_without_spaces_embeds_nothing() {
        let stego = TextStego::from_text("nospaceshere");
        let bits = BitStream::from_bits(vec![1, 0, 1]);

        let embedded = stego.embed(&bits).unwrap();
        assert_eq!(embedded.text(), "nospaceshere");
    }
}
