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

//! Per-translation diagnostics: what each stage did and what it skipped

use crate::rules::Direction;
use serde::Serialize;
use std::time::Duration;

/// Why a stage did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Verbose synonym with nothing to undo
    Alias,
    /// Computed replacement that cannot run host-to-dialect
    Irreversible,
}

/// Outcome of a single stage
#[derive(Debug, Clone, Serialize)]
pub struct StageRecord {
    pub stage: String,
    pub replacements: usize,
    pub duration: Duration,
    pub skipped: Option<SkipReason>,
}

/// Report produced alongside every translation
#[derive(Debug, Clone, Serialize)]
pub struct TranslationReport {
    pub direction: Direction,
    pub stages: Vec<StageRecord>,
    pub warnings: Vec<String>,
    pub total: Duration,
}

impl TranslationReport {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            stages: Vec::new(),
            warnings: Vec::new(),
            total: Duration::ZERO,
        }
    }

    /// Record a stage that rewrote the buffer
    pub fn record_applied(&mut self, stage: &str, replacements: usize, duration: Duration) {
        self.stages.push(StageRecord {
            stage: stage.to_string(),
            replacements,
            duration,
            skipped: None,
        });
    }

    /// Record a stage that was walked past
    pub fn record_skipped(&mut self, stage: &str, reason: SkipReason, duration: Duration) {
        self.stages.push(StageRecord {
            stage: stage.to_string(),
            replacements: 0,
            duration,
            skipped: Some(reason),
        });
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn finish(&mut self, total: Duration) {
        self.total = total;
    }

    /// Sum of replacements over all stages
    pub fn total_replacements(&self) -> usize {
        self.stages.iter().map(|record| record.replacements).sum()
    }

    /// Replacements made by one stage
    pub fn replacements_for(&self, stage: &str) -> Option<usize> {
        self.stages.iter().find(|record| record.stage == stage).map(|record| record.replacements)
    }

    /// Stages skipped because they cannot run in reverse
    pub fn irreversible_stages(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().filter(|record| record.skipped == Some(SkipReason::Irreversible)).map(|record| record.stage.as_str())
    }

    /// True when no computed stage was skipped
    ///
    /// A faithful reverse translation is still not guaranteed.
    pub fn is_complete(&self) -> bool {
        self.irreversible_stages().next().is_none()
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Translation Report ({}) ===\n\n", self.direction));

        report.push_str("Stages:\n");
        for record in &self.stages {
            match record.skipped {
                Some(reason) => report.push_str(&format!("  {:<22} skipped ({})\n", record.stage, skip_label(reason))),
                None if record.replacements > 0 => {
                    report.push_str(&format!("  {:<22} {} replacement(s) in {}us\n", record.stage, record.replacements, record.duration.as_micros()))
                }
                None => {}
            }
        }

        report.push_str(&format!("\nTotal: {} replacement(s) in {:.2}ms\n", self.total_replacements(), self.total.as_secs_f64() * 1000.0));

        if !self.warnings.is_empty() {
            report.push_str("\nWarnings:\n");
            for warning in &self.warnings {
                report.push_str(&format!("  - {}\n", warning));
            }
        }

        report
    }
}

fn skip_label(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::Alias => "alias",
        SkipReason::Irreversible => "irreversible",
    }
}
