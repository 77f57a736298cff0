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

//! Rewrite engine
//!
//! Walks a [`RuleTable`] once over the whole buffer. Every stage rewrites all
//! of its matches before the next stage sees the result. The table is shared
//! read-only, so one engine can serve concurrent translations.

pub mod report;

pub use report::{SkipReason, StageRecord, TranslationReport};

use crate::{
    error::{TranslationError, TranslationResult},
    rules::{DialectTables, Direction, RuleTable},
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, warn};

/// What to do when a stage cannot run host-to-dialect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReverseMode {
    /// Skip the stage and record a warning
    #[default]
    BestEffort,
    /// Fail with [`TranslationError::IrreversibleStage`]
    Strict,
}

/// Translated text and its report
#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub report: TranslationReport,
}

/// Applies a rule table to source text in either direction
#[derive(Debug, Clone)]
pub struct TranslationEngine {
    table: Arc<RuleTable>,
    reverse_mode: ReverseMode,
}

impl TranslationEngine {
    /// Create an engine over the given table
    pub fn new(table: RuleTable) -> Self {
        Self::with_table(Arc::new(table))
    }

    /// Create an engine sharing an existing table
    pub fn with_table(table: Arc<RuleTable>) -> Self {
        Self {
            table,
            reverse_mode: ReverseMode::default(),
        }
    }

    /// Engine for the Vipyr dialect with builtin macros
    pub fn vipyr() -> TranslationResult<Self> {
        Ok(Self::new(RuleTable::vipyr()?))
    }

    /// Engine for the Vipyr dialect over custom tables
    pub fn vipyr_with(tables: &DialectTables) -> TranslationResult<Self> {
        Ok(Self::new(RuleTable::vipyr_with(tables)?))
    }

    /// Set the reverse mode
    pub fn reverse_mode(mut self, mode: ReverseMode) -> Self {
        self.reverse_mode = mode;
        self
    }

    pub fn mode(&self) -> ReverseMode {
        self.reverse_mode
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Translate text, discarding the report
    pub fn translate(&self, source: &str, direction: Direction) -> TranslationResult<String> {
        self.translate_with_report(source, direction).map(|translation| translation.text)
    }

    /// Translate text and report what every stage did
    pub fn translate_with_report(&self, source: &str, direction: Direction) -> TranslationResult<Translation> {
        let started = Instant::now();
        let mut report = TranslationReport::new(direction);
        let mut buffer = source.to_owned();

        for stage in self.table.iter() {
            let stage_start = Instant::now();

            let rewrite = match stage.apply_in(&buffer, direction) {
                Ok(rewrite) => rewrite,
                Err(error @ TranslationError::IrreversibleStage { .. }) if self.reverse_mode == ReverseMode::BestEffort => {
                    warn!(stage = stage.name(), "skipping stage in {direction} translation: {error}");
                    report.add_warning(format!("{}: output may still contain its {} form", stage.name(), target_label(direction)));
                    report.record_skipped(stage.name(), SkipReason::Irreversible, stage_start.elapsed());
                    continue;
                }
                Err(error) => return Err(error),
            };

            match rewrite {
                Some(rewrite) => {
                    if rewrite.replacements > 0 {
                        debug!(stage = stage.name(), replacements = rewrite.replacements, "stage applied");
                    }
                    report.record_applied(stage.name(), rewrite.replacements, stage_start.elapsed());
                    buffer = rewrite.text;
                }
                None => report.record_skipped(stage.name(), SkipReason::Alias, stage_start.elapsed()),
            }
        }

        report.finish(started.elapsed());
        debug!(%direction, replacements = report.total_replacements(), "translation finished");

        Ok(Translation { text: buffer, report })
    }
}

fn target_label(direction: Direction) -> &'static str {
    match direction {
        Direction::DialectToHost => "Vipyr",
        Direction::HostToDialect => "Python",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation() {
        let engine = TranslationEngine::vipyr().unwrap();
        assert_eq!(engine.mode(), ReverseMode::BestEffort);
        assert_eq!(engine.table().name(), "vipyr");
    }

    #[test]
    fn test_forward_walks_every_stage() {
        let engine = TranslationEngine::vipyr().unwrap();
        let translation = engine.translate_with_report("int count = 5", Direction::DialectToHost).unwrap();

        assert_eq!(translation.text, "count: int = 5");
        assert_eq!(translation.report.stages.len(), engine.table().len());
        assert_eq!(translation.report.replacements_for("typed-declaration"), Some(1));
        assert!(translation.report.warnings.is_empty());
    }

    #[test]
    fn test_reverse_best_effort_records_skips() {
        let engine = TranslationEngine::vipyr().unwrap();
        let translation = engine.translate_with_report("x = True", Direction::HostToDialect).unwrap();

        assert_eq!(translation.text, "x = true");
        let skipped: Vec<&str> = translation.report.irreversible_stages().collect();
        assert!(skipped.contains(&"macro-call"));
        assert!(skipped.contains(&"exponent-glyph"));
        assert_eq!(translation.report.warnings.len(), skipped.len());
    }

    #[test]
    fn test_reverse_strict_fails_on_first_callable() {
        let engine = TranslationEngine::vipyr().unwrap().reverse_mode(ReverseMode::Strict);
        let error = engine.translate("x = True", Direction::HostToDialect).unwrap_err();
        assert!(matches!(error, TranslationError::IrreversibleStage { ref stage, .. } if stage == "macro-call"));
    }

    #[test]
    fn test_strict_mode_does_not_affect_forward() {
        let engine = TranslationEngine::vipyr().unwrap().reverse_mode(ReverseMode::Strict);
        assert_eq!(engine.translate("this.x", Direction::DialectToHost).unwrap(), "self.x");
    }

    #[test]
    fn test_source_is_not_mutated() {
        let engine = TranslationEngine::vipyr().unwrap();
        let source = String::from("a == b");
        let out = engine.translate(&source, Direction::DialectToHost).unwrap();
        assert_eq!(source, "a == b");
        assert_eq!(out, "a == b");
    }
}
