//! Stroking for Canvas2dContext.

use super::Canvas2dContext;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Stroke the current path with the current pen.
    ///
    /// The path is kept, so more segments may be added and stroked again.
    pub fn stroke(&mut self) {
        log::debug!(target: "canvas", "stroke");
        let Some(path) = self.path.clone().finish() else {
            return;
        };
        let stroke = self.state.to_stroke();
        let paint = self.state.paint();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use crate::Canvas2dContext;

    #[test]
    fn test_wide_stroke_is_opaque() {
        let mut ctx = Canvas2dContext::new(60, 60).unwrap();
        ctx.set_stroke_style("#0000ff").unwrap();
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.move_to(10.0, 30.0);
        ctx.line_to(50.0, 30.0);
        ctx.stroke();

        let data = ctx.get_image_data(0, 0, 60, 60);
        let idx = (30 * 60 + 30) * 4;
        assert_eq!(&data[idx..idx + 4], &[0, 0, 255, 255]);
        // Butt caps end the stroke at x = 50
        assert_eq!(data[(30 * 60 + 52) * 4 + 3], 0);
    }

    #[test]
    fn test_stroke_empty_path_is_noop() {
        let mut ctx = Canvas2dContext::new(20, 20).unwrap();
        ctx.begin_path();
        ctx.stroke();
        assert!(ctx.get_image_data(0, 0, 20, 20).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_stroke_twice_darkens_partial_coverage() {
        let mut ctx = Canvas2dContext::new(20, 20).unwrap();
        ctx.begin_path();
        ctx.move_to(0.0, 10.0);
        ctx.line_to(20.0, 10.0);
        ctx.stroke();
        let once = ctx.get_image_data(10, 9, 1, 1)[3];
        ctx.stroke();
        let twice = ctx.get_image_data(10, 9, 1, 1)[3];

        assert!(once > 0 && once < 255);
        assert!(twice > once);
    }
}
