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

//! Errors raised while driving translations from the command line

use std::{path::PathBuf, process::ExitStatus};
use thiserror::Error;
use vipyr_compiler::TranslationError;

/// Errors produced by the Vipyr tools
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{interpreter} exited with {status}")]
    Execution { interpreter: String, status: ExitStatus },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ToolError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result type for tool operations
pub type ToolResult<T> = Result<T, ToolError>;
