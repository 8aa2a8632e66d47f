//! Pen settings applied to strokes.

use crate::geometry::CanvasColor;

/// Paint used for strokes. Only solid colors are supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeStyle {
    Color(tiny_skia::Color),
}

impl Default for StrokeStyle {
    fn default() -> Self {
        StrokeStyle::Color(tiny_skia::Color::BLACK)
    }
}

impl From<CanvasColor> for StrokeStyle {
    fn from(color: CanvasColor) -> Self {
        StrokeStyle::Color(color.into())
    }
}

/// Stroke style and width of a context.
///
/// Caps are butt and joins are miter with a limit of 10, the canvas defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    pub stroke_style: StrokeStyle,
    pub line_width: f32,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            stroke_style: StrokeStyle::default(),
            line_width: 1.0,
        }
    }
}

impl DrawingState {
    pub(crate) fn to_stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.line_width,
            line_cap: tiny_skia::LineCap::Butt,
            line_join: tiny_skia::LineJoin::Miter,
            miter_limit: 10.0,
            dash: None,
        }
    }

    pub(crate) fn paint(&self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };
        match self.stroke_style {
            StrokeStyle::Color(color) => paint.set_color(color),
        }
        paint
    }
}
