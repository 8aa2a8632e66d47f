//! Path building for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::ArcParams;
use tiny_skia::{PathBuilder, PathSegment};

impl Canvas2dContext {
    /// Discard the current path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "canvas", "beginPath");
        self.path = PathBuilder::new();
        self.current = None;
    }

    /// Start a new subpath at `(x, y)`.
    pub fn move_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        self.path.move_to(x, y);
        self.current = Some((x, y));
        self.subpath_start = (x, y);
    }

    /// Add a straight segment to `(x, y)`. Without a current point this
    /// behaves like `move_to`.
    pub fn line_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        if self.current.is_none() {
            self.move_to(x, y);
            return;
        }
        self.path.line_to(x, y);
        self.current = Some((x, y));
    }

    /// Add an arc. A straight segment joins the current point, if any, to the
    /// start of the arc.
    pub fn arc(&mut self, params: &ArcParams) {
        log::debug!(
            target: "canvas",
            "arc {} {} r={} {}..{}",
            params.x, params.y, params.radius, params.start_angle, params.end_angle
        );
        let mut builder = PathBuilder::new();
        crate::arc::arc(&mut builder, params);
        let Some(arc) = builder.finish() else {
            return;
        };

        let mut first = true;
        for segment in arc.segments() {
            match segment {
                PathSegment::MoveTo(p) if first && self.current.is_some() => {
                    self.path.line_to(p.x, p.y);
                }
                PathSegment::MoveTo(p) => {
                    self.path.move_to(p.x, p.y);
                    self.subpath_start = (p.x, p.y);
                }
                PathSegment::LineTo(p) => self.path.line_to(p.x, p.y),
                PathSegment::QuadTo(c, p) => self.path.quad_to(c.x, c.y, p.x, p.y),
                PathSegment::CubicTo(c1, c2, p) => {
                    self.path.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathSegment::Close => {
                    self.path.close();
                    self.current = Some(self.subpath_start);
                    continue;
                }
            }
            first = false;
            self.current = arc_end(segment);
        }
    }

    /// The last point of the current path, if any.
    pub fn current_point(&self) -> Option<(f32, f32)> {
        self.current
    }
}

fn arc_end(segment: PathSegment) -> Option<(f32, f32)> {
    match segment {
        PathSegment::MoveTo(p)
        | PathSegment::LineTo(p)
        | PathSegment::QuadTo(_, p)
        | PathSegment::CubicTo(_, _, p) => Some((p.x, p.y)),
        PathSegment::Close => None,
    }
}
