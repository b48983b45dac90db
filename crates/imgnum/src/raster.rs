//! Raster glue: images on disk to RGB pixel streams and back.
//!
//! A pixel stream is the image flattened row-major from the top-left corner,
//! three bytes (R, G, B) per pixel. Alpha is discarded and deeper sample
//! formats are reduced to 8 bits per channel.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use imgnum_core::{expected_stream_len, FormatError, RGB_CHANNELS};
use imgnum_store::atomic_write;

use crate::error::{ImgnumError, Result};

/// An RGB8 image held as its flattened pixel stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelStream {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl PixelStream {
    pub fn from_rgb(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            bytes: image.into_raw(),
        }
    }

    /// Rebuild an image; the stream must hold exactly `width * height * 3` bytes.
    pub fn into_rgb(self) -> Result<RgbImage> {
        let expected = expected_stream_len(self.width, self.height, RGB_CHANNELS)?;
        let actual = self.bytes.len() as u64;
        RgbImage::from_raw(self.width, self.height, self.bytes)
            .ok_or(ImgnumError::Format(FormatError::StreamLength { expected, actual }))
    }
}

/// Decode an image file into its RGB pixel stream.
pub fn load_pixels(path: &Path) -> Result<PixelStream> {
    let image = image::open(path).map_err(|e| ImgnumError::image(path, e))?;
    Ok(PixelStream::from_rgb(image.to_rgb8()))
}

/// Encode a pixel stream in the format implied by `path`'s extension and
/// write it atomically.
pub fn save_pixels(path: &Path, pixels: PixelStream) -> Result<()> {
    let format = ImageFormat::from_path(path).map_err(|e| ImgnumError::image(path, e))?;
    let image = pixels.into_rgb()?;

    let mut encoded = Cursor::new(Vec::new());
    image
        .write_to(&mut encoded, format)
        .map_err(|e| ImgnumError::image(path, e))?;
    atomic_write(path, encoded.get_ref())?;
    Ok(())
}
