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

//! Print a translation to stdout

use super::{CommandContext, DirectionArg};
use crate::error::{ToolError, ToolResult};
use clap::Args;
use std::{
    fs,
    path::{Path, PathBuf},
};
use vipyr_compiler::{Direction, Translation, TranslationEngine};

/// Arguments for `vipyr translate`
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Source file to translate
    pub file: PathBuf,

    /// Translation direction
    #[arg(short, long, value_enum, default_value = "vp-py")]
    pub direction: DirectionArg,

    /// Fail instead of skipping stages that cannot run in reverse
    #[arg(long)]
    pub strict: bool,

    /// Print the per-stage report to stderr
    #[arg(long)]
    pub report: bool,
}

/// Read and translate one file without writing anything
pub fn translate_file(engine: &TranslationEngine, source: &Path, direction: Direction) -> ToolResult<Translation> {
    let text = fs::read_to_string(source).map_err(|e| ToolError::io(source, e))?;
    Ok(engine.translate_with_report(&text, direction)?)
}

pub fn translate(ctx: &CommandContext, args: TranslateArgs) -> ToolResult<()> {
    let engine = ctx.engine_for(args.strict);
    let translation = translate_file(&engine, &args.file, args.direction.into())?;

    print!("{}", translation.text);
    if !translation.text.ends_with('\n') {
        println!();
    }

    if args.report {
        eprint!("{}", translation.report.summary());
    }

    Ok(())
}
