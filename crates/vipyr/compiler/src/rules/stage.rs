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

//! A single rewrite stage
//!
//! A stage pairs a matcher with a producer. The producer is either a template
//! that references capture groups (`${1}`) or a pure function of the match.
//! Templates always carry an inverse so the stage can run host-to-dialect;
//! callables never do.

use super::Direction;
use crate::error::{TranslationError, TranslationResult};
use regex::{Captures, Regex};
use serde::Serialize;
use std::{fmt, sync::Arc};

/// Pure function computing a replacement from a match
pub type Producer = Arc<dyn Fn(&Captures<'_>) -> String + Send + Sync>;

/// How a stage builds its replacement text
#[derive(Clone)]
pub enum Replacement {
    /// Fixed template with positional capture references
    Template(String),
    /// Replacement computed from the match
    Callable(Producer),
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

/// Inverse declared for a template stage
#[derive(Debug, Clone, Copy)]
pub enum Inverse<'a> {
    /// Host-side pattern and the dialect-side template that replaces it
    Rewrite(&'a str, &'a str),
    /// The forward rewrite is applied unchanged in both directions
    Symmetric,
    /// Verbose synonym; another stage already restores the canonical spelling
    Alias,
}

/// Compiled reverse behaviour of a stage
#[derive(Debug, Clone)]
pub enum Reversal {
    Rewrite { pattern: Regex, template: String },
    Symmetric,
    Alias,
    Unsupported,
}

impl Reversal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rewrite { .. } => "rewrite",
            Self::Symmetric => "symmetric",
            Self::Alias => "alias",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Position of a stage relative to the equality guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageRole {
    Plain,
    /// Shields `==` behind the sentinel
    Guard,
    /// Rewrites text containing `=`; must sit between the guards and the restore
    Assignment,
    /// Turns the sentinel back into `==`; must be the final stage
    Restore,
}

impl StageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Guard => "guard",
            Self::Assignment => "assignment",
            Self::Restore => "restore",
        }
    }
}

/// Text produced by one stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub replacements: usize,
}

/// Serializable description of a stage
#[derive(Debug, Clone, Serialize)]
pub struct StageInfo {
    pub position: usize,
    pub name: String,
    pub kind: &'static str,
    pub reversal: &'static str,
    pub role: StageRole,
    pub pattern: String,
}

/// One ordered rewrite rule
#[derive(Debug, Clone)]
pub struct Stage {
    name: String,
    pattern: Regex,
    replacement: Replacement,
    reversal: Reversal,
    role: StageRole,
}

impl Stage {
    /// Create a template stage with its declared inverse
    pub fn template(name: impl Into<String>, pattern: &str, template: impl Into<String>, inverse: Inverse<'_>) -> TranslationResult<Self> {
        let name = name.into();
        let reversal = match inverse {
            Inverse::Rewrite(host_pattern, dialect_template) => Reversal::Rewrite {
                pattern: compile(&name, host_pattern)?,
                template: dialect_template.to_string(),
            },
            Inverse::Symmetric => Reversal::Symmetric,
            Inverse::Alias => Reversal::Alias,
        };

        Ok(Self {
            pattern: compile(&name, pattern)?,
            replacement: Replacement::Template(template.into()),
            reversal,
            role: StageRole::Plain,
            name,
        })
    }

    /// Create a literal swap; the inverse swaps the literals back
    pub fn keyword(name: impl Into<String>, word: &str, replacement: &str) -> TranslationResult<Self> {
        let forward = bounded(word);
        let reverse = bounded(replacement);
        Self::template(name, &forward, escape_template(replacement), Inverse::Rewrite(&reverse, &escape_template(word)))
    }

    /// Create a stage whose replacement is computed from the match
    pub fn callable<F>(name: impl Into<String>, pattern: &str, producer: F) -> TranslationResult<Self>
    where
        F: Fn(&Captures<'_>) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        Ok(Self {
            pattern: compile(&name, pattern)?,
            replacement: Replacement::Callable(Arc::new(producer)),
            reversal: Reversal::Unsupported,
            role: StageRole::Plain,
            name,
        })
    }

    /// Set the stage role
    pub fn with_role(mut self, role: StageRole) -> Self {
        self.role = role;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    pub fn reversal(&self) -> &Reversal {
        &self.reversal
    }

    pub fn role(&self) -> StageRole {
        self.role
    }

    /// Whether this stage does anything on the way back
    pub fn is_reversible(&self) -> bool {
        matches!(self.reversal, Reversal::Rewrite { .. } | Reversal::Symmetric)
    }

    /// Rewrite every match in the buffer, dialect to host
    pub fn apply(&self, buffer: &str) -> Rewrite {
        match &self.replacement {
            Replacement::Template(template) => substitute(&self.pattern, buffer, |caps| expand(caps, template)),
            Replacement::Callable(producer) => substitute(&self.pattern, buffer, |caps| producer(caps)),
        }
    }

    /// Rewrite every match in the buffer, host to dialect
    ///
    /// Returns `Ok(None)` for alias stages, which have nothing to undo.
    pub fn apply_reverse(&self, buffer: &str) -> TranslationResult<Option<Rewrite>> {
        match &self.reversal {
            Reversal::Rewrite { pattern, template } => Ok(Some(substitute(pattern, buffer, |caps| expand(caps, template)))),
            Reversal::Symmetric => Ok(Some(self.apply(buffer))),
            Reversal::Alias => Ok(None),
            Reversal::Unsupported => Err(TranslationError::irreversible(&self.name, "its replacement is computed and has no textual inverse")),
        }
    }

    /// Apply the stage in the given direction
    pub fn apply_in(&self, buffer: &str, direction: Direction) -> TranslationResult<Option<Rewrite>> {
        match direction {
            Direction::DialectToHost => Ok(Some(self.apply(buffer))),
            Direction::HostToDialect => self.apply_reverse(buffer),
        }
    }

    pub fn info(&self, position: usize) -> StageInfo {
        StageInfo {
            position,
            name: self.name.clone(),
            kind: match self.replacement {
                Replacement::Template(_) => "template",
                Replacement::Callable(_) => "callable",
            },
            reversal: self.reversal.as_str(),
            role: self.role,
            pattern: self.pattern.as_str().to_string(),
        }
    }
}

fn compile(stage: &str, pattern: &str) -> TranslationResult<Regex> {
    Regex::new(pattern).map_err(|source| TranslationError::InvalidPattern {
        stage: stage.to_string(),
        source,
    })
}

fn substitute<F>(pattern: &Regex, buffer: &str, mut produce: F) -> Rewrite
where
    F: FnMut(&Captures<'_>) -> String,
{
    let mut replacements = 0;
    let text = pattern
        .replace_all(buffer, |caps: &Captures<'_>| {
            replacements += 1;
            produce(caps)
        })
        .into_owned();

    Rewrite { text, replacements }
}

fn expand(caps: &Captures<'_>, template: &str) -> String {
    let mut out = String::new();
    caps.expand(template, &mut out);
    out
}

/// Escape a literal and add word boundaries on the sides that start or end with a word character
fn bounded(literal: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = String::new();
    if literal.chars().next().is_some_and(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(literal));
    if literal.chars().last().is_some_and(is_word) {
        pattern.push_str(r"\b");
    }
    pattern
}

fn escape_template(literal: &str) -> String {
    literal.replace('$', "$$")
}
