//! # Plainsight - hide a sentence in plain sight
//!
//! Plainsight is a steganography library that hides a short sentence inside
//! an innocuous carrier by perturbing data casual inspection ignores.
//!
//! ## Overview
//!
//! The sentence is first flattened into a bit-stream of 7-bit ASCII codes
//! (most significant bit first, one 7-bit group per character). The stream
//! then goes into one of two carriers:
//!
//! - **Image carrier**: each payload bit replaces the least significant bit
//!   of one color channel, walking pixels in raster order and the 3 RGB
//!   channels of each pixel in fixed order. Pixels past the end of the
//!   stream are left untouched.
//! - **Text carrier**: the N-th space of a document carries bit
//!   `N % stream length` - a 1-bit doubles the space, a 0-bit leaves it
//!   single. The payload cycles when the document has more spaces than the
//!   stream has bits.
//!
//! Both schemes are deterministic and reversible; extraction mirrors the
//! embedding traversal exactly. Alongside the carriers, an audit record
//! describes the encoding (integer and binary ASCII codes plus the final
//! stream) for independent verification.
//!
//! This is concealment, not encryption: anyone who suspects steganography
//! and knows the scheme can read the payload. Use a lossless image format
//! (PNG, BMP) for the embedded carrier - a lossy re-encode destroys the
//! hidden bits.
//!
//! ## Example Usage
//!
//! ```rust
//! use plainsight::{bitstream, ImageStego};
//! use image::RgbImage;
//!
//! // Flatten the sentence into a 7-bit ASCII bit-stream
//! let encoding = bitstream::encode("meet at dawn");
//! assert!(encoding.skipped.is_empty());
//!
//! // Hide it in the pixel LSBs of an image carrier
//! let mut carrier = ImageStego::from_image(RgbImage::new(32, 32));
//! carrier.embed(&encoding.bits).unwrap();
//!
//! // The carrier holds no length field: the extractor supplies the count
//! let recovered = carrier.extract(encoding.bits.len()).unwrap();
//! assert_eq!(bitstream::decode(&recovered).unwrap(), "meet at dawn");
//! ```
//!
//! ## Modules
//!
//! - [`bitstream`]: 7-bit ASCII bit-stream codec
//! - [`stego`]: image and text carriers (embedding, extraction, I/O)
//! - [`audit`]: audit record of an encoding

/// Bits contributed by each encoded character.
pub const BITS_PER_CHAR: usize = 7;

pub mod audit;
pub mod bitstream;
pub mod stego;

// Re-export commonly used types at the crate root
pub use audit::AuditRecord;
pub use bitstream::{decode, encode, BitStream, BitStreamError, Encoding, SkippedChar};
pub use stego::image::{check_capacity, ImageStego, ImageStegoError, StegoConfig};
pub use stego::text::{TextStego, TextStegoError};
