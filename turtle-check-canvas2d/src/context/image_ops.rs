//! Pixel data readback and PNG input/output for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::{Canvas2dError, Canvas2dResult};

impl Canvas2dContext {
    /// Read a `width` x `height` region at `(x, y)` as straight-alpha RGBA,
    /// row-major. Pixels outside the surface read as transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        log::debug!(target: "canvas", "getImageData {} {} {} {}", x, y, width, height);
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for row in 0..height as i64 {
            for col in 0..width as i64 {
                data.extend_from_slice(&self.straight_pixel(x as i64 + col, y as i64 + row));
            }
        }
        data
    }

    fn straight_pixel(&self, x: i64, y: i64) -> [u8; 4] {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return [0; 4];
        };
        match self.pixmap.pixel(x, y) {
            Some(p) => {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            }
            None => [0; 4],
        }
    }

    /// Encode the whole surface as PNG, tagged with `ppi` (72 by default).
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let data = self.get_image_data(0, 0, self.width, self.height);
        encode_png(&data, self.width, self.height, ppi)
    }
}

/// Encode straight-alpha RGBA8 pixels as a PNG image.
pub fn encode_png(data: &[u8], width: u32, height: u32, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(Canvas2dError::BufferSize {
            expected,
            actual: data.len(),
        });
    }
    // pHYs is stored in pixels per meter
    let per_meter = (ppi.unwrap_or(72.0).max(0.0) / 0.0254).round() as u32;

    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: per_meter,
        yppu: per_meter,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;
    writer.finish()?;
    Ok(buf)
}

/// A decoded PNG image as straight-alpha RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major.
    pub data: Vec<u8>,
}

/// Decode a PNG image into straight-alpha RGBA8 pixels.
///
/// Palette, grayscale and RGB images are expanded to RGBA. 16-bit images are
/// rejected.
pub fn decode_png(bytes: &[u8]) -> Canvas2dResult<DecodedImage> {
    let mut decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(Canvas2dError::PngError(format!(
            "unsupported bit depth {:?}",
            info.bit_depth
        )));
    }

    let data = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(Canvas2dError::PngError(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        data,
    })
}
