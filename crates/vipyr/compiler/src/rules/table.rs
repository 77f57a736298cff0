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

//! Ordered rule table and its builder

use super::stage::{Stage, StageInfo, StageRole};
use crate::error::{TranslationError, TranslationResult};
use std::collections::HashSet;

/// Immutable, ordered collection of rewrite stages
///
/// Order is precedence: every stage sees the output of the stages before it.
#[derive(Debug, Clone)]
pub struct RuleTable {
    name: String,
    stages: Vec<Stage>,
}

impl RuleTable {
    /// Start building a table
    pub fn builder(name: impl Into<String>) -> RuleTableBuilder {
        RuleTableBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Look up a stage by name
    pub fn get(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.name() == name)
    }

    /// Index of a stage by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.stages.iter().position(|stage| stage.name() == name)
    }

    /// Describe every stage in order
    pub fn describe(&self) -> Vec<StageInfo> {
        self.stages.iter().enumerate().map(|(position, stage)| stage.info(position + 1)).collect()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

/// Builder validating stage names and guard placement
pub struct RuleTableBuilder {
    name: String,
    stages: Vec<Stage>,
}

impl RuleTableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), stages: Vec::new() }
    }

    /// Append a stage
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append several stages
    pub fn stages(mut self, stages: impl IntoIterator<Item = Stage>) -> Self {
        self.stages.extend(stages);
        self
    }

    /// Validate and freeze the table
    pub fn build(self) -> TranslationResult<RuleTable> {
        let mut seen = HashSet::new();
        for stage in &self.stages {
            if !seen.insert(stage.name()) {
                return Err(TranslationError::DuplicateStage(stage.name().to_string()));
            }
        }

        validate_guards(&self.stages)?;

        Ok(RuleTable {
            name: self.name,
            stages: self.stages,
        })
    }
}

/// Guards must come before every assignment stage, and the single restore must be last
fn validate_guards(stages: &[Stage]) -> TranslationResult<()> {
    let positions = |role: StageRole| stages.iter().enumerate().filter(move |(_, stage)| stage.role() == role).map(|(index, stage)| (index, stage.name()));

    let guards: Vec<_> = positions(StageRole::Guard).collect();
    let restores: Vec<_> = positions(StageRole::Restore).collect();
    let assignments: Vec<_> = positions(StageRole::Assignment).collect();

    if guards.is_empty() && restores.is_empty() {
        return match assignments.first() {
            Some((_, name)) => Err(TranslationError::ordering(format!("assignment stage {name} has no equality guard before it"))),
            None => Ok(()),
        };
    }

    let restore = match restores.as_slice() {
        [] => return Err(TranslationError::ordering("equality guard has no restore stage")),
        [single] => *single,
        [_, (_, extra), ..] => return Err(TranslationError::ordering(format!("second restore stage {extra}"))),
    };

    if restore.0 + 1 != stages.len() {
        return Err(TranslationError::ordering(format!("restore stage {} must be the final stage", restore.1)));
    }

    let Some(last_guard) = guards.last() else {
        return Err(TranslationError::ordering(format!("restore stage {} has no guard", restore.1)));
    };

    if let Some((_, name)) = assignments.iter().find(|(index, _)| *index < last_guard.0) {
        return Err(TranslationError::ordering(format!("assignment stage {name} runs before guard {}", last_guard.1)));
    }

    Ok(())
}
