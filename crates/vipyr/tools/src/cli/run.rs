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

//! Translate a Vipyr program and execute it

use super::CommandContext;
use crate::{
    error::{ToolError, ToolResult},
    executor::{Executor, InterpreterProcess},
};
use clap::Args;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;
use vipyr_compiler::{Direction, TranslationEngine};

/// Arguments for `vipyr run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Vipyr source file to execute
    pub file: PathBuf,
}

/// Read, translate to Python and hand the result to the executor
///
/// Failures raised by the executed program are returned as they are.
pub fn translate_and_run(engine: &TranslationEngine, source: &Path, executor: &dyn Executor) -> ToolResult<()> {
    let text = fs::read_to_string(source).map_err(|e| ToolError::io(source, e))?;
    let python = engine.translate(&text, Direction::DialectToHost)?;

    info!(source = %source.display(), "running");
    executor.execute(&python)
}

pub fn run(ctx: &CommandContext, args: RunArgs) -> ToolResult<()> {
    let executor = InterpreterProcess::from_config(&ctx.config.execution);
    translate_and_run(ctx.engine(), &args.file, &executor)
}
