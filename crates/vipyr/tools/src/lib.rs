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

//! Vipyr Tools Library
//!
//! Command-line driving for the Vipyr compiler: configuration, file
//! translation, execution of translated programs and table inspection.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;

pub use cli::{
    CommandContext,
    compile::{output_file_name, translate_to_file},
    run::translate_and_run,
};
pub use config::VipyrConfig;
pub use error::{ToolError, ToolResult};
pub use executor::{Executor, InterpreterProcess};
