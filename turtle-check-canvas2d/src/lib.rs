//! Raster drawing surface implementing the stroke subset of the Canvas 2D API.
//!
//! This crate provides the pixel target the turtle engine draws onto. It
//! mirrors the browser canvas semantics that matter for turtle drawings:
//! - `tiny-skia` for anti-aliased path stroking into a premultiplied pixmap
//! - straight-alpha RGBA readback through [`Canvas2dContext::get_image_data`]
//! - PNG import and export through the `png` crate
//!
//! # Example
//!
//! ```rust,ignore
//! use turtle_check_canvas2d::Canvas2dContext;
//!
//! let mut ctx = Canvas2dContext::new(400, 300)?;
//! ctx.set_stroke_style("#ff0000")?;
//! ctx.begin_path();
//! ctx.move_to(10.0, 10.0);
//! ctx.line_to(100.0, 50.0);
//! ctx.stroke();
//! let png_data = ctx.to_png(None)?;
//! ```

mod arc;
mod context;
mod drawing_state;
mod error;
mod geometry;

// Re-export public API
pub use context::image_ops::{decode_png, encode_png, DecodedImage};
pub use context::Canvas2dContext;
pub use drawing_state::{DrawingState, StrokeStyle};
pub use error::{Canvas2dError, Canvas2dResult};
pub use geometry::{ArcParams, CanvasColor};
