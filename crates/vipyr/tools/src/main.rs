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

//! Vipyr CLI Tool
//!
//! Main entry point for the Vipyr command-line interface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use vipyr_tools::{
    CommandContext, VipyrConfig,
    cli::{self as commands, compile::CompileArgs, config::ConfigCommands, run::RunArgs, stages::StagesArgs, translate::TranslateArgs},
};

#[derive(Parser)]
#[command(name = "vipyr")]
#[command(about = "Vipyr - a Python dialect translator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every stage that fires
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate files and write the results to disk
    Compile(CompileArgs),
    /// Translate a Vipyr program to Python and execute it
    Run(RunArgs),
    /// Translate a file and print the result
    Translate(TranslateArgs),
    /// List the active rule table
    Stages(StagesArgs),
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let config = VipyrConfig::resolve_config(cli.config).context("failed to load configuration")?;
    let ctx = CommandContext::new(config).context("failed to build the rule table")?;

    match cli.command {
        Commands::Compile(args) => commands::compile::compile(&ctx, args).context("compile failed")?,
        Commands::Run(args) => {
            let file = args.file.clone();
            commands::run::run(&ctx, args).with_context(|| format!("failed to run {}", file.display()))?
        }
        Commands::Translate(args) => commands::translate::translate(&ctx, args).context("translate failed")?,
        Commands::Stages(args) => commands::stages::stages(&ctx, args)?,
        Commands::Config { command } => commands::config::handle(&ctx, command)?,
    }

    Ok(())
}
