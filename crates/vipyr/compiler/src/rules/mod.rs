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

//! Rule table for the Vipyr dialect
//!
//! This module contains the stage type, the ordered table, the auxiliary
//! lookup tables and the Vipyr catalogue built from them.

pub mod catalogue;
pub mod stage;
pub mod table;
pub mod tables;

pub use catalogue::{EQUALITY_SENTINEL, vipyr_table};
pub use stage::{Inverse, Producer, Replacement, Reversal, Rewrite, Stage, StageInfo, StageRole};
pub use table::{RuleTable, RuleTableBuilder};
pub use tables::{DialectTables, MAP_TO_LIST_BODY, MacroLibrary, SuperscriptMap};

use crate::error::TranslationResult;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Vipyr to Python
    #[serde(rename = "vp->py")]
    DialectToHost,
    /// Python to Vipyr, best-effort
    #[serde(rename = "py->vp")]
    HostToDialect,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DialectToHost => "vp->py",
            Self::HostToDialect => "py->vp",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Self::DialectToHost => Self::HostToDialect,
            Self::HostToDialect => Self::DialectToHost,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vp->py" | "vp-py" => Ok(Self::DialectToHost),
            "py->vp" | "py-vp" => Ok(Self::HostToDialect),
            other => Err(format!("unknown direction '{other}' (expected vp->py or py->vp)")),
        }
    }
}

impl RuleTable {
    /// The Vipyr table with the builtin macros
    pub fn vipyr() -> TranslationResult<Self> {
        vipyr_table(&DialectTables::builtin())
    }

    /// The Vipyr table over custom auxiliary tables
    pub fn vipyr_with(tables: &DialectTables) -> TranslationResult<Self> {
        vipyr_table(tables)
    }
}
