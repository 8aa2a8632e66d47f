//! Immutable pixel copies of a drawing surface.

use crate::error::ExtractionError;
use std::fmt;
use std::sync::Arc;
use turtle_check_canvas2d::{decode_png, encode_png, Canvas2dContext};

/// A captured RGBA raster: straight alpha, row-major, 4 bytes per pixel.
///
/// The buffer is a copy of the surface at capture time and is shared between
/// clones.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelSnapshot {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl fmt::Debug for PixelSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelSnapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Copy every pixel of `surface`.
pub fn capture(surface: &Canvas2dContext) -> Result<PixelSnapshot, ExtractionError> {
    let (width, height) = (surface.width(), surface.height());
    log::debug!(target: "turtle", "capture {width}x{height}");
    PixelSnapshot::from_rgba(width, height, surface.get_image_data(0, 0, width, height))
}

impl PixelSnapshot {
    /// Wrap straight-alpha RGBA bytes.
    ///
    /// `data` must hold exactly `width * height * 4` bytes and the area must be
    /// non-zero.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ExtractionError> {
        if width == 0 || height == 0 {
            return Err(ExtractionError::ZeroArea { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ExtractionError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: data.into(),
        })
    }

    /// Decode a PNG image. Non-RGBA layouts are expanded to RGBA8.
    pub fn from_png(bytes: &[u8]) -> Result<Self, ExtractionError> {
        let image = decode_png(bytes)?;
        Self::from_rgba(image.width, image.height, image.data)
    }

    /// Encode as a lossless RGBA8 PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, ExtractionError> {
        Ok(encode_png(&self.data, self.width, self.height, None)?)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a snapshot has at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The RGBA value at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[idx..idx + 4]);
        Some(px)
    }

    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|px| px[3])
    }

    /// Alpha bytes in row-major order.
    pub fn alphas(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.chunks_exact(4).map(|px| px[3])
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.alphas().filter(|&a| a > 0).count()
    }
}
