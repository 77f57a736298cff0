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

//! List the active rule table

use super::CommandContext;
use crate::error::{ToolError, ToolResult};
use clap::Args;
use vipyr_compiler::RuleTable;

/// Arguments for `vipyr stages`
#[derive(Args, Debug)]
pub struct StagesArgs {
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Render the table in order, one stage per line or as a JSON array
pub fn render_stages(table: &RuleTable, json: bool) -> ToolResult<String> {
    let stages = table.describe();

    if json {
        return serde_json::to_string_pretty(&stages).map_err(|e| ToolError::invalid_input(format!("cannot encode stage list: {e}")));
    }

    let mut out = format!("{:>3}  {:<22} {:<9} {:<11} {}\n", "#", "stage", "kind", "reverse", "role");
    for stage in &stages {
        out.push_str(&format!("{:>3}  {:<22} {:<9} {:<11} {}\n", stage.position, stage.name, stage.kind, stage.reversal, stage.role.as_str()));
    }
    Ok(out)
}

pub fn stages(ctx: &CommandContext, args: StagesArgs) -> ToolResult<()> {
    print!("{}", render_stages(ctx.engine().table(), args.json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_listing() {
        let table = RuleTable::vipyr().unwrap();
        let listing = render_stages(&table, false).unwrap();
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), table.len() + 1);
        assert!(lines[1].contains("macro-call"));
        assert!(lines[1].contains("unsupported"));
        assert!(lines.last().unwrap().contains("equality-restore"));
    }

    #[test]
    fn test_json_listing() {
        let table = RuleTable::vipyr().unwrap();
        let listing = render_stages(&table, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&listing).unwrap();
        let stages = value.as_array().unwrap();

        assert_eq!(stages.len(), table.len());
        assert_eq!(stages[0]["position"], 1);
        assert_eq!(stages[0]["kind"], "callable");
        assert_eq!(stages.last().unwrap()["role"], "restore");
    }
}
