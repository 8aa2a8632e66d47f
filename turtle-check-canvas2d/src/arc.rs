//! Circular arcs as cubic Béziers.
//!
//! tiny-skia has no arc primitive, so arcs are split into pieces of at most a
//! quarter turn and each piece is approximated by one cubic.

use crate::geometry::ArcParams;
use std::f32::consts::{FRAC_PI_2, TAU};
use tiny_skia::PathBuilder;

/// Append the arc described by `params` to `path` as a new subpath.
///
/// Nothing is added when the radius is not a positive finite number or an
/// angle is not finite.
pub fn arc(path: &mut PathBuilder, params: &ArcParams) {
    let ArcParams {
        x: cx,
        y: cy,
        radius,
        start_angle,
        end_angle,
        anticlockwise,
    } = *params;

    if !(radius.is_finite() && radius > 0.0) || !start_angle.is_finite() || !end_angle.is_finite()
    {
        return;
    }

    let sweep = sweep(start_angle, end_angle, anticlockwise);
    let pieces = ((sweep.abs() / FRAC_PI_2).ceil() as u32).max(1);
    let step = sweep / pieces as f32;

    let point = |angle: f32| {
        let (sin, cos) = angle.sin_cos();
        (cx + radius * cos, cy + radius * sin)
    };

    let (sx, sy) = point(start_angle);
    path.move_to(sx, sy);

    // Tangent length for a cubic spanning `step` radians of the unit circle
    let k = radius * 4.0 / 3.0 * (step / 4.0).tan();
    let mut from = start_angle;
    for i in 1..=pieces {
        let to = start_angle + step * i as f32;
        let (sin0, cos0) = from.sin_cos();
        let (sin1, cos1) = to.sin_cos();
        let (ex, ey) = point(to);
        path.cubic_to(
            cx + radius * cos0 - k * sin0,
            cy + radius * sin0 + k * cos0,
            ex + k * sin1,
            ey - k * cos1,
            ex,
            ey,
        );
        from = to;
    }
}

/// Signed sweep from `start` to `end`, clamped to one full turn. Positive is
/// clockwise on screen.
fn sweep(start: f32, end: f32, anticlockwise: bool) -> f32 {
    let delta = end - start;
    if anticlockwise {
        if delta <= -TAU {
            -TAU
        } else {
            -(-delta).rem_euclid(TAU)
        }
    } else if delta >= TAU {
        TAU
    } else {
        delta.rem_euclid(TAU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn bounds(params: ArcParams) -> tiny_skia::Rect {
        let mut builder = PathBuilder::new();
        arc(&mut builder, &params);
        builder.finish().unwrap().bounds()
    }

    #[test]
    fn test_full_circle_bounds() {
        let b = bounds(ArcParams::full_circle(50.0, 50.0, 50.0));
        for (got, want) in [(b.left(), 0.0), (b.right(), 100.0), (b.top(), 0.0), (b.bottom(), 100.0)] {
            assert!((got - want).abs() < 0.01, "{got} != {want}");
        }
    }

    #[test]
    fn test_quarter_turn_is_one_cubic() {
        let mut builder = PathBuilder::new();
        arc(
            &mut builder,
            &ArcParams {
                end_angle: PI / 2.0,
                ..ArcParams::full_circle(50.0, 50.0, 50.0)
            },
        );
        let path = builder.finish().unwrap();
        assert_eq!(path.segments().count(), 2);
        let last = path.points().last().copied().unwrap();
        assert!((last.x - 50.0).abs() < 1e-3);
        assert!((last.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_anticlockwise_half_turn_goes_over_the_top() {
        let b = bounds(ArcParams {
            end_angle: PI,
            anticlockwise: true,
            ..ArcParams::full_circle(50.0, 50.0, 10.0)
        });
        assert!((b.top() - 40.0).abs() < 0.01);
        assert!((b.bottom() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_sweep_normalization() {
        assert!((sweep(0.0, 3.0 * TAU, false) - TAU).abs() < 1e-6);
        assert!((sweep(0.0, -FRAC_PI_2, false) - 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert!((sweep(0.0, FRAC_PI_2, true) + 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert_eq!(sweep(1.0, 1.0, false), 0.0);
    }

    #[test]
    fn test_invalid_radius_adds_nothing() {
        for radius in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let mut builder = PathBuilder::new();
            arc(&mut builder, &ArcParams::full_circle(10.0, 10.0, radius));
            assert!(builder.finish().is_none());
        }
    }
}
