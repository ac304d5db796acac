//! # Project Configuration
//!
//! Per-project settings read from the project file. Passed explicitly to the
//! generator context and the device helpers.

use crate::devices::GamepadPortConfig;
use crate::error::{CompileError, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Controller type per driver-station port.
    pub gamepads: GamepadPortConfig,
    /// One level of indentation in generated Python.
    pub indent: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            gamepads: GamepadPortConfig::default(),
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl ProjectConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ProjectConfig = serde_json::from_str(json)
            .map_err(|e| CompileError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        tracing::debug!(
            "[RBGC] Loaded project config ({} gamepad ports)",
            config.gamepads.ports_with_controllers().len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.indent.is_empty() || !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(CompileError::InvalidConfig(format!(
                "indent must be spaces or tabs, got {:?}",
                self.indent
            )));
        }
        self.gamepads.validate()
    }
}
