//! The turtle: a cursor with a pen that strokes onto an attached surface.

use crate::command::TurtleCommand;
use crate::config::EngineConfig;
use crate::error::{ConfigError, ExtractionError, TurtleError, TurtleResult};
use crate::snapshot::{self, PixelSnapshot};
use turtle_check_canvas2d::{ArcParams, Canvas2dContext, CanvasColor};

/// Position, heading and pen of the turtle.
///
/// `heading` is in degrees, 0 along +x and growing clockwise since surface y
/// grows downward. It is never normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub pen_down: bool,
    pub color: CanvasColor,
}

impl CursorState {
    fn home(x: f64, y: f64, color: CanvasColor) -> Self {
        Self {
            x,
            y,
            heading: 0.0,
            pen_down: true,
            color,
        }
    }
}

/// A pen color given either as a typed color or as CSS text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenColor<'a> {
    Color(CanvasColor),
    Css(&'a str),
}

impl From<CanvasColor> for PenColor<'_> {
    fn from(color: CanvasColor) -> Self {
        PenColor::Color(color)
    }
}

impl<'a> From<&'a str> for PenColor<'a> {
    fn from(css: &'a str) -> Self {
        PenColor::Css(css)
    }
}

impl<'a> From<&'a String> for PenColor<'a> {
    fn from(css: &'a String) -> Self {
        PenColor::Css(css.as_str())
    }
}

/// Turtle graphics engine owning at most one drawing surface.
///
/// Primitives called while no surface is attached do nothing to the surface.
/// Movement and circles are skipped entirely; turns, pen and color changes
/// only touch cursor state and still apply. Use [`TurtleEngine::require_surface`]
/// where a missing surface must be an error.
#[derive(Debug)]
pub struct TurtleEngine {
    cursor: CursorState,
    default_color: CanvasColor,
    line_width: f32,
    surface: Option<Canvas2dContext>,
}

impl Default for TurtleEngine {
    fn default() -> Self {
        Self {
            cursor: CursorState::home(0.0, 0.0, CanvasColor::BLACK),
            default_color: CanvasColor::BLACK,
            line_width: 1.0,
            surface: None,
        }
    }
}

impl TurtleEngine {
    /// Create an engine with the default pen and no surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the pen settings of `config` and no surface.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let default_color = config.default_color()?;
        let line_width = if config.line_width.is_finite() && config.line_width > 0.0 {
            config.line_width
        } else {
            log::warn!(
                target: "turtle",
                "Ignoring invalid line width {}, using 1.0",
                config.line_width
            );
            1.0
        };
        Ok(Self {
            cursor: CursorState::home(0.0, 0.0, default_color),
            default_color,
            line_width,
            surface: None,
        })
    }

    /// Create an engine from `config` with a fresh surface of the configured size.
    pub fn with_surface(config: &EngineConfig) -> Result<Self, ConfigError> {
        let mut engine = Self::from_config(config)?;
        let surface = config.create_surface()?;
        engine.attach(surface);
        Ok(engine)
    }

    // --- Surface binding ---

    /// Bind `surface` as the raster target, returning the previous one.
    ///
    /// The surface is cleared and the cursor returns home to its center.
    pub fn attach(&mut self, mut surface: Canvas2dContext) -> Option<Canvas2dContext> {
        log::debug!(
            target: "turtle",
            "attach {}x{} surface",
            surface.width(),
            surface.height()
        );
        surface.reset();
        self.cursor = self.home_for(&surface);
        self.surface.replace(surface)
    }

    /// Unbind and return the raster target. Cursor state is kept.
    pub fn detach(&mut self) -> Option<Canvas2dContext> {
        log::debug!(target: "turtle", "detach");
        self.surface.take()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&Canvas2dContext> {
        self.surface.as_ref()
    }

    /// The attached surface, or [`TurtleError::UnattachedSurface`].
    pub fn require_surface(&self) -> TurtleResult<&Canvas2dContext> {
        self.surface.as_ref().ok_or(TurtleError::UnattachedSurface)
    }

    // --- Cursor inspection ---

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn position(&self) -> (f64, f64) {
        (self.cursor.x, self.cursor.y)
    }

    pub fn heading(&self) -> f64 {
        self.cursor.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.cursor.pen_down
    }

    pub fn color(&self) -> CanvasColor {
        self.cursor.color
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    // --- Primitives ---

    /// Move `distance` pixels along the heading, stroking the segment when the
    /// pen is down. Negative distances move backwards.
    pub fn forward(&mut self, distance: f64) {
        if !distance.is_finite() {
            log::warn!(target: "turtle", "Ignoring forward({distance}): distance is not finite");
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            log::debug!(target: "turtle", "forward({distance}) skipped: {}", TurtleError::UnattachedSurface);
            return;
        };

        let (x0, y0) = (self.cursor.x, self.cursor.y);
        let radians = self.cursor.heading.to_radians();
        let x1 = x0 + distance * radians.cos();
        let y1 = y0 + distance * radians.sin();
        log::debug!(target: "turtle", "forward {distance}: ({x0}, {y0}) -> ({x1}, {y1})");

        if self.cursor.pen_down && (x0, y0) != (x1, y1) {
            surface.set_stroke_style_color(self.cursor.color);
            surface.set_line_width(self.line_width);
            surface.begin_path();
            surface.move_to(x0 as f32, y0 as f32);
            surface.line_to(x1 as f32, y1 as f32);
            surface.stroke();
        }

        self.cursor.x = x1;
        self.cursor.y = y1;
    }

    /// Turn clockwise by `angle` degrees.
    pub fn right(&mut self, angle: f64) {
        if !angle.is_finite() {
            log::warn!(target: "turtle", "Ignoring right({angle}): angle is not finite");
            return;
        }
        self.cursor.heading += angle;
    }

    /// Turn counterclockwise by `angle` degrees.
    pub fn left(&mut self, angle: f64) {
        if !angle.is_finite() {
            log::warn!(target: "turtle", "Ignoring left({angle}): angle is not finite");
            return;
        }
        self.cursor.heading -= angle;
    }

    pub fn pen_up(&mut self) {
        self.cursor.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.cursor.pen_down = true;
    }

    /// Set the color of later strokes. Strokes already drawn keep their color.
    ///
    /// CSS text that does not parse is ignored and the previous color is kept.
    pub fn set_color<'a>(&mut self, color: impl Into<PenColor<'a>>) {
        match color.into() {
            PenColor::Color(color) => self.cursor.color = color,
            PenColor::Css(css) => match css.trim().parse::<CanvasColor>() {
                Ok(color) => self.cursor.color = color,
                Err(err) => {
                    log::warn!(target: "turtle", "Ignoring pen color: {err}");
                }
            },
        }
    }

    /// Stroke a circle outline of `radius` around the cursor. The cursor does
    /// not move, and a radius that is not positive draws nothing.
    ///
    /// The outline is drawn whatever the pen state.
    pub fn circle(&mut self, radius: f64) {
        if !radius.is_finite() || radius <= 0.0 {
            log::debug!(target: "turtle", "circle({radius}) draws nothing");
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            log::debug!(target: "turtle", "circle({radius}) skipped: {}", TurtleError::UnattachedSurface);
            return;
        };

        surface.set_stroke_style_color(self.cursor.color);
        surface.set_line_width(self.line_width);
        surface.begin_path();
        surface.arc(&ArcParams::full_circle(
            self.cursor.x as f32,
            self.cursor.y as f32,
            radius as f32,
        ));
        surface.stroke();
    }

    /// Clear the surface and send the cursor home with the default pen.
    pub fn reset(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            log::debug!(target: "turtle", "reset skipped: {}", TurtleError::UnattachedSurface);
            return;
        };
        log::debug!(target: "turtle", "reset");
        surface.reset();
        let (x, y) = center(surface);
        self.cursor = CursorState::home(x, y, self.default_color);
    }

    /// Perform a single command.
    pub fn apply(&mut self, command: &TurtleCommand) {
        match command {
            TurtleCommand::Forward(distance) => self.forward(*distance),
            TurtleCommand::Right(angle) => self.right(*angle),
            TurtleCommand::Left(angle) => self.left(*angle),
            TurtleCommand::PenUp => self.pen_up(),
            TurtleCommand::PenDown => self.pen_down(),
            TurtleCommand::Color(color) => self.set_color(color),
            TurtleCommand::Circle(radius) => self.circle(*radius),
            TurtleCommand::Reset => self.reset(),
        }
    }

    /// Copy the current pixels of the attached surface.
    pub fn capture(&self) -> Result<PixelSnapshot, ExtractionError> {
        let surface = self
            .surface
            .as_ref()
            .ok_or(ExtractionError::UnattachedSurface)?;
        snapshot::capture(surface)
    }

    fn home_for(&self, surface: &Canvas2dContext) -> CursorState {
        let (x, y) = center(surface);
        CursorState::home(x, y, self.default_color)
    }
}

fn center(surface: &Canvas2dContext) -> (f64, f64) {
    (surface.width() as f64 / 2.0, surface.height() as f64 / 2.0)
}
