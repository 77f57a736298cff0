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

//! Translate files to disk
//!
//! Output files are named `<prefix><stem>.<ext>` and written atomically into
//! the output directory. Several inputs are translated in parallel against
//! the same read-only table.

use super::{CommandContext, DirectionArg};
use crate::{
    config::OutputConfig,
    error::{ToolError, ToolResult},
};
use clap::Args;
use rayon::prelude::*;
use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::info;
use vipyr_compiler::{Direction, TranslationEngine};

/// Arguments for `vipyr compile`
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Source files to translate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Translation direction
    #[arg(short, long, value_enum, default_value = "vp-py")]
    pub direction: DirectionArg,

    /// Fail instead of skipping stages that cannot run in reverse
    #[arg(long)]
    pub strict: bool,

    /// Directory for compiled files (defaults to the configured directory, then the working directory)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

/// Name of the file produced from `source`
pub fn output_file_name(source: &Path, direction: Direction, output: &OutputConfig) -> ToolResult<String> {
    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| ToolError::invalid_input(format!("cannot derive an output name from {}", source.display())))?;

    Ok(format!("{}{}.{}", output.prefix, stem, output.extension_for(direction)))
}

/// Read, translate and write one file, returning the output path
///
/// Writing into the directory the source already lives in is fine; the
/// source is never overwritten unless it has the output name itself.
pub fn translate_to_file(engine: &TranslationEngine, source: &Path, direction: Direction, output: &OutputConfig, out_dir: &Path) -> ToolResult<PathBuf> {
    let text = fs::read_to_string(source).map_err(|e| ToolError::io(source, e))?;
    let translated = engine.translate(&text, direction)?;

    let target = out_dir.join(output_file_name(source, direction, output)?);
    write_atomically(&target, out_dir, &translated)?;

    info!(source = %source.display(), output = %target.display(), %direction, "compiled");
    Ok(target)
}

fn write_atomically(target: &Path, dir: &Path, contents: &str) -> ToolResult<()> {
    let mut file = NamedTempFile::new_in(dir).map_err(|e| ToolError::io(dir, e))?;
    file.write_all(contents.as_bytes()).map_err(|e| ToolError::io(file.path(), e))?;
    file.persist(target).map_err(|e| ToolError::io(target, e.error))?;
    Ok(())
}

/// Resolve and create the output directory
pub fn output_directory(out_dir: Option<&Path>, output: &OutputConfig) -> ToolResult<PathBuf> {
    let dir = match out_dir.or(output.directory.as_deref()) {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|e| ToolError::io(".", e))?,
    };

    fs::create_dir_all(&dir).map_err(|e| ToolError::io(&dir, e))?;
    Ok(dir)
}

/// Translate every input, in parallel
///
/// Inputs that would produce the same output name are rejected before
/// anything is written.
pub fn compile_files(engine: &TranslationEngine, files: &[PathBuf], direction: Direction, output: &OutputConfig, out_dir: &Path) -> ToolResult<Vec<PathBuf>> {
    let mut claimed: HashMap<String, &Path> = HashMap::new();
    for file in files {
        let name = output_file_name(file, direction, output)?;
        if let Some(previous) = claimed.insert(name.clone(), file) {
            return Err(ToolError::invalid_input(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                file.display(),
                out_dir.join(name).display()
            )));
        }
    }

    files.par_iter().map(|file| translate_to_file(engine, file, direction, output, out_dir)).collect()
}

pub fn compile(ctx: &CommandContext, args: CompileArgs) -> ToolResult<()> {
    let engine = ctx.engine_for(args.strict);
    let out_dir = output_directory(args.out_dir.as_deref(), &ctx.config.output)?;

    let outputs = compile_files(&engine, &args.files, args.direction.into(), &ctx.config.output, &out_dir)?;
    for output in outputs {
        println!("{}", output.display());
    }

    Ok(())
}
