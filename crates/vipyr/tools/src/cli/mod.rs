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

//! Command implementations for the `vipyr` binary

pub mod compile;
pub mod config;
pub mod run;
pub mod stages;
pub mod translate;

use crate::{config::VipyrConfig, error::ToolResult};
use clap::ValueEnum;
use vipyr_compiler::{Direction, ReverseMode, TranslationEngine};

/// Translation direction on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Vipyr to Python
    #[value(name = "vp-py")]
    VpPy,
    /// Python to Vipyr, best-effort
    #[value(name = "py-vp")]
    PyVp,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::VpPy => Direction::DialectToHost,
            DirectionArg::PyVp => Direction::HostToDialect,
        }
    }
}

/// Shared state for every command
pub struct CommandContext {
    pub config: VipyrConfig,
    engine: TranslationEngine,
}

impl CommandContext {
    pub fn new(config: VipyrConfig) -> ToolResult<Self> {
        let engine = config.engine()?;
        Ok(Self { config, engine })
    }

    pub fn engine(&self) -> &TranslationEngine {
        &self.engine
    }

    /// The configured engine, forced into strict reverse mode when asked
    pub fn engine_for(&self, strict: bool) -> TranslationEngine {
        if strict {
            self.engine.clone().reverse_mode(ReverseMode::Strict)
        } else {
            self.engine.clone()
        }
    }
}
