//! Turtle commands and the line-oriented script format.
//!
//! A script holds one command per line:
//!
//! ```text
//! # a square
//! color "red"
//! forward(100)
//! right 90
//! fd 100   # aliases from Python's turtle module work too
//! ```
//!
//! Lines starting with `#` are comments, as is anything after a `#` that is
//! followed by whitespace. A `#` glued to text (`#ff0000`) is a color.

use crate::engine::TurtleEngine;
use crate::error::{CommandError, ScriptError, TurtleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One primitive call on a [`TurtleEngine`].
///
/// The JSON form is adjacently tagged: `{"op": "forward", "arg": 100.0}`,
/// `{"op": "pen_up"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "arg", rename_all = "snake_case")]
pub enum TurtleCommand {
    Forward(f64),
    Right(f64),
    Left(f64),
    PenUp,
    PenDown,
    Color(String),
    Circle(f64),
    Reset,
}

impl fmt::Display for TurtleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurtleCommand::Forward(d) => write!(f, "forward {d}"),
            TurtleCommand::Right(a) => write!(f, "right {a}"),
            TurtleCommand::Left(a) => write!(f, "left {a}"),
            TurtleCommand::PenUp => write!(f, "penup"),
            TurtleCommand::PenDown => write!(f, "pendown"),
            TurtleCommand::Color(c) => write!(f, "color {c}"),
            TurtleCommand::Circle(r) => write!(f, "circle {r}"),
            TurtleCommand::Reset => write!(f, "reset"),
        }
    }
}

impl FromStr for TurtleCommand {
    type Err = CommandError;

    /// Parse a single command, either `name arg` or `name(arg)`.
    fn from_str(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let (name, arg) = split_call(line)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "forward" | "fd" => TurtleCommand::Forward(number("forward", arg)?),
            "right" | "rt" => TurtleCommand::Right(number("right", arg)?),
            "left" | "lt" => TurtleCommand::Left(number("left", arg)?),
            "penup" | "pen_up" | "pu" | "up" => {
                no_argument("penup", arg)?;
                TurtleCommand::PenUp
            }
            "pendown" | "pen_down" | "pd" | "down" => {
                no_argument("pendown", arg)?;
                TurtleCommand::PenDown
            }
            "color" | "pencolor" => TurtleCommand::Color(text("color", arg)?),
            "circle" => TurtleCommand::Circle(number("circle", arg)?),
            "reset" => {
                no_argument("reset", arg)?;
                TurtleCommand::Reset
            }
            _ => return Err(CommandError::UnknownCommand(name.to_string())),
        };
        Ok(command)
    }
}

/// Split `name arg` / `name(arg)` into the name and the optional argument.
fn split_call(line: &str) -> Result<(&str, Option<&str>), CommandError> {
    let name_end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    let (name, rest) = line.split_at(name_end);
    if name.is_empty() {
        return Err(CommandError::UnknownCommand(line.to_string()));
    }

    let rest = rest.trim();
    let arg = match rest.strip_prefix('(') {
        Some(call) => {
            let inner = call
                .strip_suffix(')')
                .filter(|inner| is_balanced(inner))
                .ok_or_else(|| CommandError::Unbalanced(line.to_string()))?;
            inner.trim()
        }
        None => rest,
    };

    Ok((name, (!arg.is_empty()).then_some(arg)))
}

fn is_balanced(s: &str) -> bool {
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

fn number(command: &'static str, arg: Option<&str>) -> Result<f64, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(command))?;
    arg.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::InvalidNumber {
            command,
            value: arg.to_string(),
        })
}

fn text(command: &'static str, arg: Option<&str>) -> Result<String, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(command))?;
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|&q| arg.strip_prefix(q).and_then(|a| a.strip_suffix(q)))
        .unwrap_or(arg)
        .trim();
    if unquoted.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(unquoted.to_string())
}

fn no_argument(command: &'static str, arg: Option<&str>) -> Result<(), CommandError> {
    match arg {
        None => Ok(()),
        Some(_) => Err(CommandError::UnexpectedArgument(command)),
    }
}

/// Drop a trailing comment, respecting quotes.
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    let mut quote = None;
    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '#') => {
                let ends_word = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
                if ends_word {
                    return &line[..i];
                }
            }
            _ => {}
        }
    }
    line
}

/// Parse a text script into commands.
///
/// Blank lines and comments are skipped. The first bad line is reported with
/// its 1-based line number.
pub fn parse_script(script: &str) -> Result<Vec<TurtleCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let command = line.parse::<TurtleCommand>().map_err(|source| ScriptError {
            line: idx + 1,
            source,
        })?;
        commands.push(command);
    }
    log::debug!(target: "turtle", "parsed {} command(s)", commands.len());
    Ok(commands)
}

/// Parse a JSON array of commands.
pub fn parse_json_script(json: &str) -> Result<Vec<TurtleCommand>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Run `commands` in order on a freshly reset surface.
///
/// Fails with [`crate::TurtleError::UnattachedSurface`] when the engine has no
/// surface, since nothing could be drawn.
pub fn run_script(engine: &mut TurtleEngine, commands: &[TurtleCommand]) -> TurtleResult<()> {
    engine.require_surface()?;
    engine.reset();
    log::info!(target: "turtle", "running {} command(s)", commands.len());
    for command in commands {
        log::trace!(target: "turtle", "{command}");
        engine.apply(command);
    }
    Ok(())
}
