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

//! Auxiliary lookup tables consulted by callable stages

use crate::error::{TranslationError, TranslationResult};
use std::collections::BTreeMap;

/// Inline body of the list-mapping helper, shared with the legacy `mapToList` stage
pub const MAP_TO_LIST_BODY: &str = "lambda lst, func: [func(x) for x in lst]";

/// Qualified macro names mapped to inline lambda expressions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroLibrary {
    entries: BTreeMap<String, String>,
}

impl MacroLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// The macros shipped with the dialect
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("vp.mapToList".to_string(), MAP_TO_LIST_BODY.to_string());
        entries.insert("vp.average".to_string(), "lambda lst: sum(lst) / len(lst) if lst else 0".to_string());
        entries.insert("vp.even".to_string(), "lambda x: x % 2 == 0".to_string());
        Self { entries }
    }

    /// Register a macro, replacing any existing body under the same name
    pub fn define(&mut self, name: impl Into<String>, body: impl Into<String>) -> TranslationResult<()> {
        let name = name.into();
        let body = body.into();

        if !is_qualified_name(&name) {
            return Err(TranslationError::invalid_macro(name, "name must be dot-separated identifiers"));
        }
        if body.trim().is_empty() {
            return Err(TranslationError::invalid_macro(name, "body is empty"));
        }

        self.entries.insert(name, body);
        Ok(())
    }

    /// Builder-style variant of [`MacroLibrary::define`]
    pub fn with(mut self, name: impl Into<String>, body: impl Into<String>) -> TranslationResult<Self> {
        self.define(name, body)?;
        Ok(self)
    }

    /// Merge another library over this one
    pub fn merge(&mut self, other: &MacroLibrary) {
        for (name, body) in &other.entries {
            self.entries.insert(name.clone(), body.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, body)| (name.as_str(), body.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Escaped names joined into one alternation, longest first
    pub fn alternation(&self) -> String {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.iter().map(|name| regex::escape(name)).collect::<Vec<_>>().join("|")
    }
}

/// Dot-separated identifiers such as `vp.average`
fn is_qualified_name(name: &str) -> bool {
    name.split('.').all(|part| {
        let mut chars = part.chars();
        chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_') && chars.all(|c| c.is_alphanumeric() || c == '_')
    })
}

/// Superscript digit glyphs mapped to decimal digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperscriptMap {
    glyphs: BTreeMap<char, char>,
}

impl Default for SuperscriptMap {
    fn default() -> Self {
        let glyphs = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'].into_iter().zip('0'..='9').collect();
        Self { glyphs }
    }
}

impl SuperscriptMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn digit(&self, glyph: char) -> Option<char> {
        self.glyphs.get(&glyph).copied()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Character class matching any known glyph
    pub fn glyph_class(&self) -> String {
        let glyphs: String = self.glyphs.keys().collect();
        format!("[{glyphs}]")
    }
}

/// The immutable tables a dialect is built from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialectTables {
    pub macros: MacroLibrary,
    pub superscripts: SuperscriptMap,
}

impl DialectTables {
    /// Builtin macros and the full superscript range
    pub fn builtin() -> Self {
        Self {
            macros: MacroLibrary::builtin(),
            superscripts: SuperscriptMap::default(),
        }
    }

    /// Replace the macro library
    pub fn with_macros(mut self, macros: MacroLibrary) -> Self {
        self.macros = macros;
        self
    }
}
