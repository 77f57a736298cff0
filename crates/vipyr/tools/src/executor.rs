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

//! Execution port for translated programs

use crate::{
    config::ExecutionConfig,
    error::{ToolError, ToolResult},
};
use std::{
    io::Write,
    process::{Command, Stdio},
};
use tempfile::NamedTempFile;
use tracing::debug;

/// Runs host-language source
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    fn execute(&self, source: &str) -> ToolResult<()>;
}

/// Runs source as a script file under an interpreter subprocess
///
/// The program is written to a temporary `.py` file whose path follows the
/// configured arguments. The child inherits stdin, stdout and stderr, so it
/// can prompt the user and its tracebacks reach the user unchanged. There is
/// no sandbox and no timeout.
#[derive(Debug, Clone)]
pub struct InterpreterProcess {
    interpreter: String,
    args: Vec<String>,
}

impl InterpreterProcess {
    pub fn new(interpreter: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            args,
        }
    }

    pub fn from_config(config: &ExecutionConfig) -> Self {
        Self::new(config.interpreter.clone(), config.args.clone())
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    fn run_script(&self, source: &str, stdin: Stdio) -> ToolResult<()> {
        let mut script = tempfile::Builder::new()
            .prefix("vipyr_")
            .suffix(".py")
            .tempfile()
            .map_err(|e| ToolError::io(std::env::temp_dir(), e))?;
        write_script(&mut script, source)?;

        debug!(interpreter = %self.interpreter, args = ?self.args, script = %script.path().display(), "starting interpreter");

        let status = Command::new(&self.interpreter)
            .args(&self.args)
            .arg(script.path())
            .stdin(stdin)
            .status()
            .map_err(|e| ToolError::io(&self.interpreter, e))?;

        if !status.success() {
            return Err(ToolError::Execution {
                interpreter: self.interpreter.clone(),
                status,
            });
        }

        Ok(())
    }
}

fn write_script(script: &mut NamedTempFile, source: &str) -> ToolResult<()> {
    script.write_all(source.as_bytes()).map_err(|e| ToolError::io(script.path(), e))?;
    script.flush().map_err(|e| ToolError::io(script.path(), e))
}

impl Executor for InterpreterProcess {
    fn execute(&self, source: &str) -> ToolResult<()> {
        self.run_script(source, Stdio::inherit())
    }
}
