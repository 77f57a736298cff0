// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! TOML configuration for the Vipyr tools

use crate::error::{ToolError, ToolResult};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use vipyr_compiler::{DialectTables, Direction, MacroLibrary, ReverseMode, TranslationEngine};

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "VIPYR_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VipyrConfig {
    pub output: OutputConfig,
    pub translation: TranslationConfig,
    pub execution: ExecutionConfig,
    /// Extra macros merged over the builtin library
    pub macros: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub host_extension: String,
    pub dialect_extension: String,
    pub prefix: String,
    /// Where compiled files land; the working directory when unset
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub strict_reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub interpreter: String,
    pub args: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            host_extension: "py".to_string(),
            dialect_extension: "vp".to_string(),
            prefix: "compiled_".to_string(),
            directory: None,
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            args: Vec::new(),
        }
    }
}

impl OutputConfig {
    /// Extension of files produced in the given direction
    pub fn extension_for(&self, direction: Direction) -> &str {
        match direction {
            Direction::DialectToHost => &self.host_extension,
            Direction::HostToDialect => &self.dialect_extension,
        }
    }
}

impl VipyrConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> ToolResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
        toml::from_str(&content).map_err(|e| ToolError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> ToolResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml()?).map_err(|e| ToolError::io(path, e))
    }

    pub fn to_toml(&self) -> ToolResult<String> {
        toml::to_string_pretty(self).map_err(|e| ToolError::config(e.to_string()))
    }

    /// `vipyr.toml` in the user configuration directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vipyr").join("vipyr.toml"))
    }

    /// Resolve the effective configuration
    ///
    /// The `--config` flag wins over `VIPYR_CONFIG`, which wins over the
    /// user configuration file. Defaults apply when none is present.
    pub fn resolve_config(cli_config: Option<PathBuf>) -> ToolResult<Self> {
        Self::resolve_from(cli_config, std::env::var(CONFIG_ENV).ok().map(PathBuf::from), Self::default_path())
    }

    fn resolve_from(cli_config: Option<PathBuf>, env_config: Option<PathBuf>, user_config: Option<PathBuf>) -> ToolResult<Self> {
        if let Some(config_path) = cli_config.or(env_config) {
            return Self::load_from_file(config_path);
        }

        match user_config {
            Some(path) if path.is_file() => Self::load_from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Builtin tables with the configured macros merged in
    pub fn dialect_tables(&self) -> ToolResult<DialectTables> {
        let mut macros = MacroLibrary::builtin();
        for (name, body) in &self.macros {
            macros.define(name.as_str(), body.as_str())?;
        }
        Ok(DialectTables::builtin().with_macros(macros))
    }

    /// Engine honouring the configured macros and reverse policy
    pub fn engine(&self) -> ToolResult<TranslationEngine> {
        let mode = if self.translation.strict_reverse { ReverseMode::Strict } else { ReverseMode::BestEffort };
        Ok(TranslationEngine::vipyr_with(&self.dialect_tables()?)?.reverse_mode(mode))
    }
}
