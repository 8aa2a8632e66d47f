use thiserror::Error;

pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

/// Errors raised by the drawing surface.
#[derive(Debug, Error)]
pub enum Canvas2dError {
    /// Width or height is zero or above the supported maximum.
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to parse color: {0}")]
    ColorParseError(String),

    #[error("PNG error: {0}")]
    PngError(String),

    /// An RGBA buffer whose length is not `width * height * 4`.
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

impl From<png::EncodingError> for Canvas2dError {
    fn from(err: png::EncodingError) -> Self {
        Self::PngError(err.to_string())
    }
}

impl From<png::DecodingError> for Canvas2dError {
    fn from(err: png::DecodingError) -> Self {
        Self::PngError(err.to_string())
    }
}
