use rstest::rstest;
use turtle_check_rs::{
    parse_script, run_script, Canvas2dContext, PixelSnapshot, TurtleCommand, TurtleEngine,
    TurtleError,
};

fn attached(width: u32, height: u32) -> TurtleEngine {
    let mut engine = TurtleEngine::new();
    engine.attach(Canvas2dContext::new(width, height).unwrap());
    engine
}

fn painted(snapshot: &PixelSnapshot) -> Vec<(u32, u32)> {
    let mut points = Vec::new();
    for y in 0..snapshot.height() {
        for x in 0..snapshot.width() {
            if snapshot.alpha(x, y).unwrap() > 0 {
                points.push((x, y));
            }
        }
    }
    points
}

#[test]
fn test_forward_zero_changes_nothing() {
    let mut engine = attached(100, 100);
    engine.forward(20.0);
    let position = engine.position();
    let before = engine.capture().unwrap();

    engine.forward(0.0);

    assert_eq!(engine.position(), position);
    assert_eq!(engine.capture().unwrap(), before);
}

#[rstest]
#[case(0.0, 25.0)]
#[case(90.0, 25.0)]
#[case(37.5, 10.0)]
#[case(-120.0, 40.0)]
fn test_heading_round_trip(#[case] turn: f64, #[case] distance: f64) {
    let mut engine = attached(400, 400);
    engine.right(15.0);
    let heading = engine.heading();

    engine.forward(distance);
    engine.left(turn);
    engine.forward(distance);
    engine.right(turn);

    assert_eq!(engine.heading(), heading);
}

#[test]
fn test_straight_line_offsets_by_twice_distance() {
    let mut engine = attached(400, 400);
    let (x0, y0) = engine.position();

    engine.forward(30.0);
    engine.left(0.0);
    engine.forward(30.0);
    engine.right(0.0);

    assert_eq!(engine.position(), (x0 + 60.0, y0));
}

#[rstest]
#[case(0.0)]
#[case(45.0)]
#[case(200.0)]
fn test_pen_up_never_draws(#[case] heading: f64) {
    let mut engine = attached(100, 100);
    engine.pen_up();
    engine.right(heading);
    engine.forward(40.0);
    engine.forward(-80.0);

    assert!(painted(&engine.capture().unwrap()).is_empty());
}

#[test]
fn test_pen_down_draws_along_segment_only() {
    let mut engine = attached(100, 100);
    engine.pen_up();
    engine.forward(-30.0);
    engine.pen_down();
    engine.forward(60.0);

    let snapshot = engine.capture().unwrap();
    let points = painted(&snapshot);
    assert!(!points.is_empty());

    // Segment runs from (20, 50) to (80, 50)
    for &(x, y) in &points {
        assert!((18..=82).contains(&x), "stray pixel at ({x}, {y})");
        assert!((48..=51).contains(&y), "stray pixel at ({x}, {y})");
    }
    for x in 22..78 {
        let covered = snapshot.alpha(x, 49).unwrap() > 0 || snapshot.alpha(x, 50).unwrap() > 0;
        assert!(covered, "gap at x = {x}");
    }
}

#[test]
fn test_offscreen_movement_is_clipped() {
    let mut engine = attached(50, 50);
    engine.forward(500.0);
    engine.right(90.0);
    engine.forward(10.0);

    assert_eq!(engine.position(), (525.0, 35.0));
    let snapshot = engine.capture().unwrap();
    assert_eq!(snapshot.len(), 50 * 50 * 4);
    // Only the first segment crosses the surface
    assert!(painted(&snapshot).iter().all(|&(x, _)| x >= 24));
}

#[test]
fn test_reset_is_idempotent() {
    let mut engine = attached(80, 80);
    engine.set_color("green");
    engine.right(33.0);
    engine.forward(25.0);
    engine.circle(10.0);

    engine.reset();
    let once = (*engine.cursor(), engine.capture().unwrap());
    engine.reset();
    let twice = (*engine.cursor(), engine.capture().unwrap());

    assert_eq!(once, twice);
    assert!(painted(&twice.1).is_empty());
}

#[test]
fn test_circle_outline_keeps_cursor() {
    let mut engine = attached(100, 100);
    engine.circle(20.0);

    assert_eq!(engine.position(), (50.0, 50.0));
    let snapshot = engine.capture().unwrap();
    assert_eq!(snapshot.alpha(50, 50), Some(0));
    assert!(snapshot.alpha(70, 50).unwrap() > 0 || snapshot.alpha(69, 50).unwrap() > 0);
    assert!(snapshot.alpha(50, 30).unwrap() > 0 || snapshot.alpha(50, 29).unwrap() > 0);
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
#[case(f64::NAN)]
fn test_degenerate_circle_draws_nothing(#[case] radius: f64) {
    let mut engine = attached(40, 40);
    engine.circle(radius);
    assert!(painted(&engine.capture().unwrap()).is_empty());
}

#[test]
fn test_color_applies_to_later_strokes_only() {
    let mut engine = attached(100, 100);
    engine.forward(20.0);
    engine.set_color("#ff0000");
    engine.right(90.0);
    engine.forward(20.0);

    let snapshot = engine.capture().unwrap();
    // Middle of the first, black, segment
    let first = snapshot.pixel(60, 50).unwrap();
    assert_eq!(&first[..3], &[0, 0, 0]);
    // Middle of the second, red, segment
    let second = [snapshot.pixel(69, 60).unwrap(), snapshot.pixel(70, 60).unwrap()]
        .into_iter()
        .max_by_key(|px| px[3])
        .unwrap();
    assert!(second[3] > 0);
    assert!(second[0] > 200 && second[1] == 0 && second[2] == 0);
}

#[test]
fn test_apply_matches_direct_calls() {
    let mut direct = attached(60, 60);
    direct.set_color("blue");
    direct.forward(15.0);
    direct.left(90.0);
    direct.pen_up();
    direct.forward(5.0);
    direct.pen_down();
    direct.circle(4.0);

    let mut scripted = attached(60, 60);
    for command in [
        TurtleCommand::Color("blue".to_string()),
        TurtleCommand::Forward(15.0),
        TurtleCommand::Left(90.0),
        TurtleCommand::PenUp,
        TurtleCommand::Forward(5.0),
        TurtleCommand::PenDown,
        TurtleCommand::Circle(4.0),
    ] {
        scripted.apply(&command);
    }

    assert_eq!(direct.cursor(), scripted.cursor());
    assert_eq!(direct.capture().unwrap(), scripted.capture().unwrap());
}

#[test]
fn test_run_script_starts_clean() {
    let mut engine = attached(120, 120);
    let scribble = parse_script("color red\nright 45\nforward 40\ncircle 9").unwrap();
    let line = parse_script("forward 30").unwrap();

    run_script(&mut engine, &line).unwrap();
    let fresh = engine.capture().unwrap();

    run_script(&mut engine, &scribble).unwrap();
    run_script(&mut engine, &line).unwrap();

    assert_eq!(engine.capture().unwrap(), fresh);
}

#[test]
fn test_run_script_requires_surface() {
    let mut engine = TurtleEngine::new();
    let commands = parse_script("forward 10").unwrap();
    assert!(matches!(
        run_script(&mut engine, &commands),
        Err(TurtleError::UnattachedSurface)
    ));
    assert_eq!(engine.position(), (0.0, 0.0));
}

#[test]
fn test_reattach_clears_surface() {
    let mut engine = attached(30, 30);
    engine.forward(10.0);
    let mut surface = engine.detach().unwrap();
    surface.set_line_width(4.0);

    engine.attach(surface);
    assert!(painted(&engine.capture().unwrap()).is_empty());
    assert_eq!(engine.position(), (15.0, 15.0));
}
