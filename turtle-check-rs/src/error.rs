//! Error types for turtle-check-rs.

use thiserror::Error;
use turtle_check_canvas2d::Canvas2dError;

/// Result type alias using TurtleError.
pub type TurtleResult<T> = Result<T, TurtleError>;

/// Errors raised by the strict engine APIs.
///
/// Drawing primitives never return these; they degrade to no-ops instead.
#[derive(Debug, Error)]
pub enum TurtleError {
    /// A primitive needed a raster target but none is attached.
    #[error("no drawing surface is attached to the turtle")]
    UnattachedSurface,

    /// The drawing surface rejected an operation.
    #[error(transparent)]
    Canvas(#[from] Canvas2dError),
}

/// Errors raised while capturing or loading a pixel snapshot.
///
/// These are always surfaced to the caller, since an empty snapshot would
/// corrupt later comparisons.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Capture was attempted with no surface attached.
    #[error("no drawing surface is attached to capture from")]
    UnattachedSurface,

    /// The surface or image has no pixels.
    #[error("cannot capture a zero-area surface ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },

    /// The pixel buffer length does not match width * height * 4.
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// The snapshot could not be encoded or decoded as PNG.
    #[error("PNG error: {0}")]
    Png(String),
}

impl From<Canvas2dError> for ExtractionError {
    fn from(err: Canvas2dError) -> Self {
        match err {
            Canvas2dError::BufferSize { expected, actual } => {
                ExtractionError::BufferSize { expected, actual }
            }
            Canvas2dError::InvalidDimensions { width, height } => {
                ExtractionError::ZeroArea { width, height }
            }
            Canvas2dError::PngError(msg) => ExtractionError::Png(msg),
            other => ExtractionError::Png(other.to_string()),
        }
    }
}

/// A single command line that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{0}` expects an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` takes no argument")]
    UnexpectedArgument(&'static str),

    #[error("`{command}` expects a finite number, got `{value}`")]
    InvalidNumber { command: &'static str, value: String },

    #[error("unbalanced parentheses in `{0}`")]
    Unbalanced(String),
}

/// A command script that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    /// 1-based line number.
    pub line: usize,
    pub source: CommandError,
}

/// Errors loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid default color: {0}")]
    Color(#[from] Canvas2dError),

    #[error("invalid surface size {width}x{height}")]
    Dimensions { width: u32, height: u32 },
}

/// Errors from the task registry.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("unknown task `{0}`")]
    UnknownTask(String),

    #[error("only an administrator may change the solution of task `{0}`")]
    PermissionDenied(String),

    #[error("task file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid task data: {0}")]
    Json(#[from] serde_json::Error),
}
