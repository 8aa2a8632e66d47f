//! The drawing surface.

mod drawing;
pub(crate) mod image_ops;
mod path_ops;

use crate::drawing_state::{DrawingState, StrokeStyle};
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::CanvasColor;
use tiny_skia::{PathBuilder, Pixmap};

/// Largest accepted width or height, as in Chrome.
const MAX_DIMENSION: u32 = 32767;

/// A fixed-size RGBA surface with a current path and pen.
///
/// Pixels start fully transparent. Strokes outside the surface are clipped.
pub struct Canvas2dContext {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Premultiplied pixels.
    pub(crate) pixmap: Pixmap,
    pub(crate) state: DrawingState,
    pub(crate) path: PathBuilder,
    /// Last point of the current path.
    pub(crate) current: Option<(f32, f32)>,
    /// First point of the current subpath, restored by a close segment.
    pub(crate) subpath_start: (f32, f32),
}

impl std::fmt::Debug for Canvas2dContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas2dContext")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Canvas2dContext {
    /// Create a transparent surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        let invalid = || Canvas2dError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(invalid());
        }
        let pixmap = Pixmap::new(width, height).ok_or_else(invalid)?;
        log::debug!(target: "canvas", "new {}x{}", width, height);

        Ok(Self {
            width,
            height,
            pixmap,
            state: DrawingState::default(),
            path: PathBuilder::new(),
            current: None,
            subpath_start: (0.0, 0.0),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Clear every pixel and restore the default pen and an empty path.
    pub fn reset(&mut self) {
        log::debug!(target: "canvas", "reset");
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.state = DrawingState::default();
        self.path = PathBuilder::new();
        self.current = None;
        self.subpath_start = (0.0, 0.0);
    }

    /// Set the stroke color from CSS text.
    ///
    /// On a parse error the previous stroke style is kept.
    pub fn set_stroke_style(&mut self, style: &str) -> Canvas2dResult<()> {
        let color: CanvasColor = style.parse()?;
        self.set_stroke_style_color(color);
        Ok(())
    }

    pub fn set_stroke_style_color(&mut self, color: CanvasColor) {
        log::debug!(target: "canvas", "strokeStyle {}", color);
        self.state.stroke_style = StrokeStyle::from(color);
    }

    /// Set the stroke width. Non-finite values and values <= 0 are ignored,
    /// as in browsers.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }
}

impl std::str::FromStr for CanvasColor {
    type Err = Canvas2dError;

    /// Parse any CSS color (`"#ff0000"`, `"red"`, `"rgb(0 128 0)"`).
    fn from_str(s: &str) -> Canvas2dResult<Self> {
        let color = csscolorparser::parse(s)
            .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;
        let [r, g, b, a] = color.to_rgba8();
        Ok(CanvasColor::from_rgba8(r, g, b, a))
    }
}
