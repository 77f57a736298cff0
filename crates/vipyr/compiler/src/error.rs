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

//! Error handling for the rewrite engine

use thiserror::Error;

/// Errors that can occur while building a rule table or translating text
#[derive(Error, Debug)]
pub enum TranslationError {
    // Pattern Errors
    #[error("Invalid pattern for stage {stage}: {source}")]
    InvalidPattern {
        stage: String,
        #[source]
        source: regex::Error,
    },

    // Reversal Errors
    #[error("Stage {stage} cannot be applied in reverse: {reason}")]
    IrreversibleStage { stage: String, reason: String },

    // Table Construction Errors
    #[error("Stage ordering violated: {0}")]
    StageOrdering(String),

    #[error("Duplicate stage name: {0}")]
    DuplicateStage(String),

    #[error("Invalid macro {name}: {details}")]
    InvalidMacro { name: String, details: String },
}

impl TranslationError {
    /// Create an irreversible stage error
    pub fn irreversible(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::IrreversibleStage {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create a stage ordering error
    pub fn ordering(message: impl Into<String>) -> Self {
        Self::StageOrdering(message.into())
    }

    /// Create an invalid macro error
    pub fn invalid_macro(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidMacro {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Only a reverse translation refused by a stage can be retried, in best-effort mode.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IrreversibleStage { .. })
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPattern { .. } => ErrorCategory::Pattern,
            Self::IrreversibleStage { .. } => ErrorCategory::Reversal,
            Self::StageOrdering(_) | Self::DuplicateStage(_) => ErrorCategory::Ordering,
            Self::InvalidMacro { .. } => ErrorCategory::Configuration,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self.category() {
            ErrorCategory::Pattern => "A rewrite rule has a malformed pattern. This is a bug in the rule table.".to_string(),
            ErrorCategory::Reversal => {
                "The source uses constructs that cannot be translated back to Vipyr. Retry without --strict for a best-effort result.".to_string()
            }
            ErrorCategory::Ordering => "The rule table is inconsistent: stages are duplicated or out of order.".to_string(),
            ErrorCategory::Configuration => "A macro definition in the configuration is invalid.".to_string(),
        }
    }
}

/// Error categories for better error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Pattern,
    Reversal,
    Ordering,
    Configuration,
}

impl ErrorCategory {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Reversal => "reversal",
            Self::Ordering => "ordering",
            Self::Configuration => "configuration",
        }
    }
}

/// Result type alias for translation operations
pub type TranslationResult<T> = Result<T, TranslationError>;
