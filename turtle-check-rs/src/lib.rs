#![doc = include_str!("../README.md")]

pub mod command;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod task;

pub use command::{parse_json_script, parse_script, run_script, TurtleCommand};
pub use compare::{compare, diff_alpha, AlphaDiff};
pub use config::EngineConfig;
pub use engine::{CursorState, PenColor, TurtleEngine};
pub use error::{
    CommandError, ConfigError, ExtractionError, ScriptError, TaskError, TurtleError, TurtleResult,
};
pub use snapshot::{capture, PixelSnapshot};
pub use task::{verify_run, CheckOutcome, Role, Task, TaskRegistry, Verdict, UNVERIFIABLE_MESSAGE};

// Surface types
pub use turtle_check_canvas2d;
pub use turtle_check_canvas2d::{Canvas2dContext, CanvasColor};
