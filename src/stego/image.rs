//! LSB (Least Significant Bit) steganography for images.
//!
//! Hides a bit-stream in the least significant bits of pixel color values:
//! pixels are walked in raster order (row by row, left to right) and the 3
//! RGB channels of each pixel in fixed order, one payload bit per channel.
//! Supports PNG and BMP carriers (lossless formats only - a lossy re-encode
//! destroys the hidden bits).
//!
//! By default the image carries no length field, so extraction needs the
//! bit count from the caller. [`StegoConfig`] can switch both directions to
//! a `[32-bit length] + [payload]` layout instead.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use thiserror::Error;

use crate::bitstream::BitStream;

/// Number of bits in the optional length prefix.
const LENGTH_PREFIX_BITS: usize = 32;

/// Errors that can occur during image steganography.
#[derive(Error, Debug)]
pub enum ImageStegoError {
    #[error("Bit-stream too long for the image: need {needed} bits, have capacity for {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    #[error("Extraction needs a bit count when the carrier has no length prefix")]
    MissingBitCount,

    #[error("No hidden data found in image")]
    NoDataFound,

    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),
}

/// Number of payload bits a `width` x `height` RGB image can hold.
pub fn capacity_bits(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Checks that a bit-stream of `bit_len` bits fits an image of the given
/// dimensions. Pure predicate: no carrier is touched.
pub fn check_capacity(bit_len: usize, width: u32, height: u32) -> Result<(), ImageStegoError> {
    let capacity = capacity_bits(width, height);
    if bit_len > capacity {
        return Err(ImageStegoError::CapacityExceeded {
            needed: bit_len,
            capacity,
        });
    }
    Ok(())
}

/// Configuration for image embedding and extraction.
#[derive(Debug, Clone, Default)]
pub struct StegoConfig {
    /// Embed a 32-bit big-endian bit count ahead of the payload so that
    /// extraction does not need a caller-supplied length.
    pub length_prefixed: bool,
}

/// Image steganography handler.
///
/// Owns the 3-channel pixel buffer for the duration of an embedding.
/// Sources with other channel layouts are converted to RGB on load.
pub struct ImageStego {
    image: RgbImage,
}

impl ImageStego {
    /// Creates a new ImageStego from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImageStegoError> {
        let image = image::open(path).map_err(|e| ImageStegoError::ImageLoadError(e.to_string()))?;
        Ok(Self {
            image: image.to_rgb8(),
        })
    }

    /// Creates a new ImageStego from encoded image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageStegoError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ImageStegoError::ImageLoadError(e.to_string()))?;
        Ok(Self {
            image: image.to_rgb8(),
        })
    }

    /// Creates a new ImageStego from an RGB pixel buffer.
    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    /// Carrier width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Carrier height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns the capacity in bits that can be hidden in this image.
    pub fn capacity(&self) -> usize {
        capacity_bits(self.image.width(), self.image.height())
    }

    /// Embeds a bit-stream into the pixel buffer.
    ///
    /// Each visited channel has its least significant bit replaced by the
    /// next payload bit; once the stream is exhausted the traversal stops
    /// and all remaining pixels keep their original values.
    ///
    /// Fails with [`ImageStegoError::CapacityExceeded`] before any pixel is
    /// modified if the stream does not fit.
    pub fn embed(&mut self, bits: &BitStream) -> Result<(), ImageStegoError> {
        check_capacity(bits.len(), self.image.width(), self.image.height())?;

        let (width, height) = self.image.dimensions();
        let mut remaining = bits.iter();

        'outer: for y in 0..height {
            for x in 0..width {
                let pixel = self.image.get_pixel_mut(x, y);
                for channel in 0..3 {
                    match remaining.next() {
                        Some(bit) => pixel.0[channel] = (pixel.0[channel] & !1) | bit,
                        None => break 'outer,
                    }
                }
            }
        }

        Ok(())
    }

    /// Embeds a bit-stream honoring `config`.
    ///
    /// With [`StegoConfig::length_prefixed`] set, a 32-bit big-endian bit
    /// count goes in ahead of the payload; the capacity check covers prefix
    /// plus payload together, so failure still leaves the buffer untouched.
    pub fn embed_with_config(
        &mut self,
        bits: &BitStream,
        config: &StegoConfig,
    ) -> Result<(), ImageStegoError> {
        if !config.length_prefixed {
            return self.embed(bits);
        }

        check_capacity(
            LENGTH_PREFIX_BITS + bits.len(),
            self.image.width(),
            self.image.height(),
        )?;

        let count = bits.len() as u32;
        let mut prefixed = Vec::with_capacity(LENGTH_PREFIX_BITS + bits.len());
        for shift in (0..LENGTH_PREFIX_BITS).rev() {
            prefixed.push(((count >> shift) & 1) as u8);
        }
        prefixed.extend(bits.iter());

        self.embed(&BitStream::from_bits(prefixed))
    }

    /// Reads `bit_count` bits back out of the pixel buffer, mirroring the
    /// traversal order of [`embed`](Self::embed).
    pub fn extract(&self, bit_count: usize) -> Result<BitStream, ImageStegoError> {
        check_capacity(bit_count, self.image.width(), self.image.height())?;

        let (width, height) = self.image.dimensions();
        let mut bits = Vec::with_capacity(bit_count);

        'outer: for y in 0..height {
            for x in 0..width {
                let pixel = self.image.get_pixel(x, y);
                for channel in 0..3 {
                    if bits.len() == bit_count {
                        break 'outer;
                    }
                    bits.push(pixel.0[channel] & 1);
                }
            }
        }

        Ok(BitStream::from_bits(bits))
    }

    /// Extracts a bit-stream honoring `config`.
    ///
    /// Without a length prefix, `bit_count` must be supplied by the caller
    /// (the carrier holds no length field). With one, the count is read
    /// from the carrier and `bit_count` is ignored; a prefix larger than
    /// the remaining capacity cannot have been embedded by this codec and
    /// fails with [`ImageStegoError::NoDataFound`].
    pub fn extract_with_config(
        &self,
        bit_count: Option<usize>,
        config: &StegoConfig,
    ) -> Result<BitStream, ImageStegoError> {
        if !config.length_prefixed {
            return self.extract(bit_count.ok_or(ImageStegoError::MissingBitCount)?);
        }

        let prefix = self.extract(LENGTH_PREFIX_BITS)?;
        let count = prefix.iter().fold(0usize, |acc, bit| (acc << 1) | bit as usize);

        if count > self.capacity().saturating_sub(LENGTH_PREFIX_BITS) {
            return Err(ImageStegoError::NoDataFound);
        }

        let all = self.extract(LENGTH_PREFIX_BITS + count)?;
        Ok(BitStream::from_bits(all.iter().skip(LENGTH_PREFIX_BITS)))
    }

    /// Saves the pixel buffer to a file. The format follows the extension;
    /// use a lossless one (PNG, BMP) or the hidden bits will not survive.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageStegoError> {
        self.image
            .save(path)
            .map_err(|e| ImageStegoError::ImageSaveError(e.to_string()))
    }

    /// Returns the pixel buffer encoded as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ImageStegoError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ImageStegoError::ImageSaveError(e.to_string()))?;
        Ok(bytes)
    }

    /// Returns a reference to the underlying pixel buffer.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Consumes self and returns the underlying pixel buffer.
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
