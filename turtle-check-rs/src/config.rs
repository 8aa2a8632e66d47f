//! Engine configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use turtle_check_canvas2d::{Canvas2dContext, CanvasColor};

/// Surface and pen settings for a turtle session.
///
/// Every field is optional in the JSON form; missing fields take the
/// defaults below.
///
/// ```json
/// { "width": 400, "height": 400, "line_width": 1.0, "default_color": "#000000" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Stroke width for lines and circles.
    pub line_width: f32,
    /// CSS color the pen starts with after every reset.
    pub default_color: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            line_width: 1.0,
            default_color: "#000000".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Loading engine config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.default_color()?;
        Ok(config)
    }

    /// The parsed default pen color.
    pub fn default_color(&self) -> Result<CanvasColor, ConfigError> {
        Ok(self.default_color.parse::<CanvasColor>()?)
    }

    /// A blank surface of the configured size.
    pub fn create_surface(&self) -> Result<Canvas2dContext, ConfigError> {
        Canvas2dContext::new(self.width, self.height).map_err(|_| ConfigError::Dimensions {
            width: self.width,
            height: self.height,
        })
    }
}
