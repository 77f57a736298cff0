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

//! Vipyr compiler
//!
//! Rewrites Vipyr source into Python through an ordered table of regex
//! stages, and back again on a best-effort basis.
//!
//! ```
//! use vipyr_compiler::{Direction, TranslationEngine};
//!
//! let engine = TranslationEngine::vipyr().unwrap();
//! let python = engine.translate("int count = 5", Direction::DialectToHost).unwrap();
//! assert_eq!(python, "count: int = 5");
//! ```

pub mod engine;
pub mod error;
pub mod rules;

pub use engine::{ReverseMode, Translation, TranslationEngine, TranslationReport};
pub use error::{ErrorCategory, TranslationError, TranslationResult};
pub use rules::{DialectTables, Direction, MacroLibrary, RuleTable, Stage, SuperscriptMap};
