//! Arc parameters and colors.

use std::fmt;

/// A circular arc around `(x, y)`. Angles are in radians, measured clockwise
/// from the positive x axis since y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub anticlockwise: bool,
}

impl ArcParams {
    /// A full circle (0 to 2π) around `(x, y)`.
    pub fn full_circle(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            radius,
            start_angle: 0.0,
            end_angle: 2.0 * std::f32::consts::PI,
            anticlockwise: false,
        }
    }
}

/// A straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    /// Opaque black, the default stroke style.
    pub const BLACK: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 255);

    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for CanvasColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for CanvasColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}
