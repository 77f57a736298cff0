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

//! The Vipyr dialect rule table
//!
//! Stages are listed in precedence order. The equality guard shields `==`
//! from every stage that rewrites `=`; the restore stage must stay last.

use super::{
    stage::{Inverse, Stage, StageRole},
    table::RuleTable,
    tables::{DialectTables, MAP_TO_LIST_BODY},
};
use crate::error::{TranslationError, TranslationResult};
use regex::Regex;

/// Placeholder standing in for `==` while assignment stages run
pub const EQUALITY_SENTINEL: &str = " @EQUALS@ ";

/// Build the Vipyr table from the given auxiliary tables
pub fn vipyr_table(tables: &DialectTables) -> TranslationResult<RuleTable> {
    let mut stages = Vec::new();

    // Builtins
    if !tables.macros.is_empty() {
        stages.push(macro_call(tables)?);
    }
    stages.push(legacy_map_to_list()?);

    // Equality guard
    stages.push(Stage::template("equality-guard", r"\s*==\s*", EQUALITY_SENTINEL, Inverse::Symmetric)?.with_role(StageRole::Guard));
    stages.push(Stage::template("verbose-equality", r"\s*\bsame as\b\s*", EQUALITY_SENTINEL, Inverse::Alias)?.with_role(StageRole::Guard));
    stages.push(Stage::template("verbose-assignment", r"\bequals\b", "=", Inverse::Alias)?.with_role(StageRole::Assignment));

    // Classes
    stages.push(Stage::keyword("self-reference", "this", "self")?);

    // Dictionaries
    stages.push(dictionary_subscript()?);
    stages.push(
        Stage::template("map-entry", r#"(".*?")\s*=>\s*"#, "${1}: ", Inverse::Rewrite(r#"(".*?"): "#, "${1} => "))?.with_role(StageRole::Assignment),
    );

    // Variables
    stages.push(
        Stage::template(
            "typed-declaration",
            r"\b(\w+)[ \t]+(\w+)[ \t]*=[ \t]*(.+)",
            "${2}: ${1} = ${3}",
            Inverse::Rewrite(r"\b(\w+): (\w+) = (.+)", "${2} ${1} = ${3}"),
        )?
        .with_role(StageRole::Assignment),
    );
    stages.push(
        Stage::template(
            "array-declaration",
            r"\b(\w+)\[\][ \t]+(\w+)[ \t]*=[ \t]*(.+)",
            "${2}: list[${1}] = ${3}",
            Inverse::Rewrite(r"\b(\w+): list\[(\w+)\] = (.+)", "${2}[] ${1} = ${3}"),
        )?
        .with_role(StageRole::Assignment),
    );

    // Parameters
    stages.push(Stage::template(
        "array-parameter",
        r"\b(\w+)\s+as\s+(\w+)\[\]",
        "${1}: list[${2}]",
        Inverse::Rewrite(r"\b(\w+): list\[(\w+)\](\s*[,)])", "${1} as ${2}[]${3}"),
    )?);
    stages.push(Stage::template(
        "typed-parameter",
        r"\b(\w+)\s+as\s+(\w+)",
        "${1}: ${2}",
        Inverse::Rewrite(r"\b(\w+): (\w+)(\s*[,)])", "${1} as ${2}${3}"),
    )?);
    stages.push(union_parameter()?);

    // Loops
    stages.push(Stage::template(
        "range-loop",
        r"\bfor\s+(\w+)\s+up to\s+(.+):",
        "for ${1} in range(${2}):",
        Inverse::Rewrite(r"\bfor (\w+) in range\((.+)\):", "for ${1} up to ${2}:"),
    )?);

    // Functions
    stages.push(Stage::keyword("import", "get", "import")?);
    // `import` is already back to `get` when this runs host-to-dialect
    stages.push(Stage::template("import-alias", r"\bnamed\b", "as", Inverse::Rewrite(r"\b(get\s+[\w.]+\s+)as\b", "${1}named"))?);
    stages.push(Stage::template(
        "function-definition",
        r"\bfunction (\w+)\((.*?)\)",
        "def ${1}(${2})",
        Inverse::Rewrite(r"\bdef (\w+)\((.*?)\)", "function ${1}(${2})"),
    )?);
    stages.push(Stage::keyword("raise", "throw", "raise")?);
    stages.push(Stage::template("length", r"\b(\w+)\.length\b", "len(${1})", Inverse::Rewrite(r"\blen\((\w+)\)", "${1}.length"))?);
    stages.push(typed_function()?);

    // Conditions
    stages.push(Stage::keyword("switch", "switch", "match")?);
    stages.push(Stage::template("case-pattern", r"\bis\s+(\w+):", "case ${1}():", Inverse::Rewrite(r"\bcase (\w+)\(\):", "is ${1}:"))?);
    stages.push(Stage::template("case-default", r"\bdefault:", "case _:", Inverse::Rewrite(r"\bcase _:", "default:"))?);
    stages.push(Stage::keyword("elsif", "elsif", "elif")?);
    stages.push(Stage::keyword("unless", "unless", "if not")?);

    // Operations
    stages.push(
        Stage::template("increment", r"\b(\w+)\s*\+\+", "${1} += 1", Inverse::Rewrite(r"\b(\w+) \+= 1\b", "${1}++"))?.with_role(StageRole::Assignment),
    );
    stages.push(Stage::template("verbose-increment", r"\b(\w+)[ \t]+add\b", "${1} += 1", Inverse::Alias)?.with_role(StageRole::Assignment));
    stages.push(
        Stage::template("decrement", r"\b(\w+)\s*--", "${1} -= 1", Inverse::Rewrite(r"\b(\w+) -= 1\b", "${1}--"))?.with_role(StageRole::Assignment),
    );
    stages.push(Stage::template("verbose-decrement", r"\b(\w+)[ \t]+sub\b", "${1} -= 1", Inverse::Alias)?.with_role(StageRole::Assignment));
    stages.push(Stage::template("verbose-multiply", r"\bmultiply\b", "*", Inverse::Alias)?);
    stages.push(exponent_glyph(tables)?);

    // Types
    stages.push(Stage::keyword("type-string", "string", "str")?);
    stages.push(Stage::keyword("type-boolean", "boolean", "bool")?);
    stages.push(Stage::keyword("type-double", "double", "float")?);

    // Literals
    stages.push(Stage::keyword("literal-true", "true", "True")?);
    stages.push(Stage::keyword("literal-false", "false", "False")?);
    stages.push(Stage::keyword("literal-null", "null", "None")?);

    // Terminal
    // `str` has already become `string` when this runs host-to-dialect
    stages.push(Stage::template(
        "logger-call",
        r"\bprint\.(log|warn|debug)\s*\((.*?)\)",
        r#"print("${1} : " + str(${2}))"#,
        Inverse::Rewrite(r#"\bprint\("(log|warn|debug) : " \+ (?:str|string)\((.*?)\)\)"#, "print.${1}(${2})"),
    )?);

    // Comments
    stages.push(Stage::template("line-comment", r"//(.*)", "# ${1}", Inverse::Rewrite(r"# (.*)", "//${1}"))?);
    stages.push(Stage::template(
        "block-comment",
        r"(?s)/\*\s*(.*?)\s*\*/",
        r#""""${1}""""#,
        Inverse::Rewrite(r#"(?s)"""(.*?)""""#, "/* ${1} */"),
    )?);

    stages.push(Stage::template("equality-restore", &regex::escape(EQUALITY_SENTINEL), " == ", Inverse::Symmetric)?.with_role(StageRole::Restore));

    RuleTable::builder("vipyr").stages(stages).build()
}

/// `vp.average(xs)` becomes `(lambda lst: ...)(xs)`
fn macro_call(tables: &DialectTables) -> TranslationResult<Stage> {
    let macros = tables.macros.clone();
    let pattern = format!(r"\b({})\((.*?)\)", macros.alternation());

    Stage::callable("macro-call", &pattern, move |caps| match macros.get(&caps[1]) {
        Some(body) => format!("({body})({})", &caps[2]),
        None => caps[0].to_string(),
    })
}

/// Bare `mapToList(xs, f)` predating the macro library
fn legacy_map_to_list() -> TranslationResult<Stage> {
    let application = format!("({MAP_TO_LIST_BODY})");
    let inverse = format!(r"{}\((.*?), (.*?)\)", regex::escape(&application));

    Stage::template(
        "legacy-map-to-list",
        r"\bmapToList\((.*?)\s*,\s*(.*?)\)",
        format!("{}(${{1}}, ${{2}})", application.replace('$', "$$")),
        Inverse::Rewrite(&inverse, "mapToList(${1}, ${2})"),
    )
}

/// `name{a}{ b }` becomes `name[a][b]`
fn dictionary_subscript() -> TranslationResult<Stage> {
    let group = bracket_group()?;
    Stage::callable("dictionary-subscript", r"(\w+(?:\{.*?\})+)", move |caps| group.replace_all(&caps[1], "[${1}]").into_owned())
}

fn bracket_group() -> TranslationResult<Regex> {
    Regex::new(r"\{\s*(.*?)\s*\}").map_err(|source| TranslationError::InvalidPattern {
        stage: "dictionary-subscript".to_string(),
        source,
    })
}

/// `x either int or string` becomes `x: int | string`
fn union_parameter() -> TranslationResult<Stage> {
    Stage::callable("union-parameter", r"\b(\w+)[ \t]+either[ \t]+(\w+(?:[ \t]+or[ \t]+\w+)*)", |caps| {
        let members: Vec<&str> = caps[2].split_whitespace().filter(|word| *word != "or").collect();
        format!("{}: {}", &caps[1], members.join(" | "))
    })
}

/// `function Type[] name(args):` becomes `def name(args) -> list[type]:`
fn typed_function() -> TranslationResult<Stage> {
    Stage::callable("typed-function", r"\bfunction\s+(\w+)(\[\])?\s+(\w+)\((.*?)\):", |caps| {
        let return_type = caps[1].to_lowercase();
        let annotation = if caps.get(2).is_some() { format!("list[{return_type}]") } else { return_type };
        format!("def {}({}) -> {annotation}:", &caps[3], &caps[4])
    })
}

/// `x²` becomes `x**2`
fn exponent_glyph(tables: &DialectTables) -> TranslationResult<Stage> {
    let superscripts = tables.superscripts.clone();
    let pattern = format!(r"(\w|\))({})", superscripts.glyph_class());

    Stage::callable("exponent-glyph", &pattern, move |caps| {
        match caps[2].chars().next().and_then(|glyph| superscripts.digit(glyph)) {
            Some(digit) => format!("{}**{digit}", &caps[1]),
            None => caps[0].to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Direction, stage::Reversal};

    fn forward(source: &str) -> String {
        let table = vipyr_table(&DialectTables::builtin()).unwrap();
        table.iter().fold(source.to_string(), |buffer, stage| stage.apply(&buffer).text)
    }

    #[test]
    fn test_table_builds_in_catalogue_order() {
        let table = vipyr_table(&DialectTables::builtin()).unwrap();
        let names: Vec<&str> = table.iter().map(|stage| stage.name()).collect();
        assert_eq!(names.first(), Some(&"macro-call"));
        assert_eq!(names.last(), Some(&"equality-restore"));

        let position = |name: &str| table.position(name).unwrap();
        assert!(position("legacy-map-to-list") < position("equality-guard"));
        assert!(position("typed-declaration") < position("array-declaration"));
        assert!(position("array-parameter") < position("typed-parameter"));
        assert!(position("typed-parameter") < position("import-alias"));
        assert!(position("function-definition") < position("typed-function"));
        assert!(position("exponent-glyph") < position("type-string"));
        assert!(position("line-comment") < position("block-comment"));
    }

    #[test]
    fn test_guard_brackets_assignment_stages() {
        let table = vipyr_table(&DialectTables::builtin()).unwrap();
        let guard = table.position("equality-guard").unwrap();
        let restore = table.position("equality-restore").unwrap();

        for (index, stage) in table.iter().enumerate() {
            if stage.role() == StageRole::Assignment {
                assert!(guard < index && index < restore, "{} escapes the equality guard", stage.name());
            }
        }
        assert_eq!(restore, table.len() - 1);
    }

    #[test]
    fn test_every_template_has_an_inverse() {
        let table = vipyr_table(&DialectTables::builtin()).unwrap();
        for stage in &table {
            match (stage.replacement(), stage.reversal()) {
                (crate::rules::Replacement::Template(_), Reversal::Unsupported) => panic!("{} has no inverse", stage.name()),
                (crate::rules::Replacement::Callable(_), reversal) => assert!(matches!(reversal, Reversal::Unsupported)),
                _ => {}
            }
        }
    }

    #[test]
    fn test_empty_macro_library_drops_macro_stage() {
        let tables = DialectTables::builtin().with_macros(crate::rules::MacroLibrary::new());
        let table = vipyr_table(&tables).unwrap();
        assert!(table.get("macro-call").is_none());
        assert_eq!(table.stages()[0].name(), "legacy-map-to-list");
    }

    #[test]
    fn test_union_parameter() {
        assert_eq!(forward("function f(x either int or string or double):"), "def f(x: int | str | float):");
    }

    #[test]
    fn test_typed_parameters() {
        assert_eq!(forward("function total(values as int[], scale as double):"), "def total(values: list[int], scale: float):");
    }

    #[test]
    fn test_import_alias() {
        assert_eq!(forward("get numpy named np"), "import numpy as np");
    }

    #[test]
    fn test_conditions() {
        let source = "if a same as b:\n    pass\nelsif c:\n    pass\nunless d:\n    pass";
        assert_eq!(forward(source), "if a == b:\n    pass\nelif c:\n    pass\nif not d:\n    pass");
    }

    #[test]
    fn test_operations() {
        assert_eq!(forward("i++\nj--\nk add\nm sub\ny = a multiply b"), "i += 1\nj -= 1\nk += 1\nm -= 1\ny = a * b");
    }

    #[test]
    fn test_verbose_assignment() {
        assert_eq!(forward("x equals 5"), "x = 5");
        assert_eq!(forward("int total equals 0"), "total: int = 0");
    }

    #[test]
    fn test_verbose_increment_needs_word_end() {
        assert_eq!(forward("padding"), "padding");
    }

    #[test]
    fn test_verbose_operations_leave_identifiers_alone() {
        let source = "r = operator.iadd(a, b)\ns = operator.isub(a, b)\ny = is_sub\nz = pre_add";
        assert_eq!(forward(source), source);
    }

    #[test]
    fn test_logger_call() {
        assert_eq!(forward("print.warn(total)"), r#"print("warn : " + str(total))"#);
    }

    #[test]
    fn test_comments() {
        assert_eq!(forward("x = 1 // one"), "x = 1 #  one");
        assert_eq!(forward("/* a\n   b */"), "\"\"\"a\n   b\"\"\"");
    }

    #[test]
    fn test_literals_and_types() {
        assert_eq!(forward("flag = true or false or null"), "flag = True or False or None");
        assert_eq!(forward("x as boolean"), "x: bool");
    }

    #[test]
    fn test_length_and_raise() {
        assert_eq!(forward("n = items.length\nthrow ValueError()"), "n = len(items)\nraise ValueError()");
    }

    #[test]
    fn test_range_loop() {
        assert_eq!(forward("for i up to count:"), "for i in range(count):");
    }

    #[test]
    fn test_map_entry() {
        assert_eq!(forward(r#"ages = {"ann" => 31, "bob" => 27}"#), r#"ages = {"ann": 31, "bob": 27}"#);
    }

    #[test]
    fn test_user_macro() {
        let macros = crate::rules::MacroLibrary::builtin().with("vp.square", "lambda x: x * x").unwrap();
        let table = vipyr_table(&DialectTables::builtin().with_macros(macros)).unwrap();
        let out = table.iter().fold("vp.square(4)".to_string(), |buffer, stage| stage.apply(&buffer).text);
        assert_eq!(out, "(lambda x: x * x)(4)");
    }

    #[test]
    fn test_reverse_keywords() {
        let table = vipyr_table(&DialectTables::builtin()).unwrap();
        let mut buffer = "x = True if self.ok else None".to_string();
        for stage in &table {
            if let Ok(Some(rewrite)) = stage.apply_in(&buffer, Direction::HostToDialect) {
                buffer = rewrite.text;
            }
        }
        assert_eq!(buffer, "x = true if this.ok else null");
    }
}
