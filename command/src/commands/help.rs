//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! The help index and per-command help.

use crate::catalog::{catalog_entries, find_entry};
use crate::{Command, CommandContext, CommandError, CommandResult};
use std::fmt::Write as _;

#[derive(Debug)]
pub struct HelpCommand {
    args: Vec<String>,
}

impl HelpCommand {
    pub(crate) fn construct(args: Vec<String>) -> Box<dyn Command> {
        Box::new(HelpCommand { args })
    }
}

impl Command for HelpCommand {
    fn execute(
        &mut self,
        _context: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        match self.args.len() {
            0 => Ok(CommandResult::with_output(render_index())),
            1 => {
                let entry = find_entry(&self.args[0])
                    .ok_or_else(|| CommandError::new("There is no such command."))?;
                if entry.long_desc.is_empty() {
                    return Err(CommandError::new("The command has no long description."));
                }
                Ok(CommandResult::with_output(format!("{}\n", entry.long_desc)))
            }
            _ => Err(CommandError::new("Huh?")),
        }
    }
}

/// All commands sorted by name and grouped by category. The sort is by name
/// first, then stable by category, so names stay ordered inside each group.
fn render_index() -> String {
    let mut entries: Vec<_> = catalog_entries().iter().collect();
    entries.sort_by_key(|entry| entry.name);
    entries.sort_by_key(|entry| entry.category);

    let mut out = String::new();
    let mut last_category = "";
    for entry in entries {
        if entry.category != last_category {
            let _ = writeln!(out, "$fg(#33)..:: {} ::..$fg(#37)", entry.category);
            last_category = entry.category;
        }
        let _ = write!(out, "{:<15}", entry.name);
        if !entry.short_desc.is_empty() {
            let _ = write!(out, " {}", entry.short_desc);
        }
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use runemud_world::{PlayerId, World};

    fn help(world: &mut World, input_args: Vec<String>) -> Result<CommandResult, CommandError> {
        let player = PlayerId::new(1);
        if !world.contains_player(player) {
            world.create_player(player).unwrap();
        }
        let mut command = HelpCommand::construct(input_args);
        let mut context = CommandContext {
            world,
            player,
            input: "help",
        };
        command.execute(&mut context)
    }

    #[test]
    fn index_lists_every_command_grouped_by_category() {
        let mut world = World::new();
        let output = help(&mut world, vec![]).unwrap().output;
        for entry in catalog_entries() {
            assert!(output.contains(entry.name), "missing {}", entry.name);
            assert!(output.contains(entry.category), "missing {}", entry.category);
        }
        // Each category header appears exactly once.
        assert_eq!(output.matches("..:: Movement ::..").count(), 1);
    }

    #[test]
    fn single_command_help_shows_long_description() {
        let mut world = World::new();
        let output = help(&mut world, vec![String::from("quit")]).unwrap().output;
        assert!(output.contains("confirmation"));
    }

    #[test]
    fn unknown_command_help_is_an_error() {
        let mut world = World::new();
        let err = help(&mut world, vec![String::from("xyzzy")]).unwrap_err();
        assert_eq!(err, CommandError::new("There is no such command."));
    }

    #[test]
    fn too_many_arguments_is_huh() {
        let mut world = World::new();
        let err = help(
            &mut world,
            vec![String::from("a"), String::from("b")],
        )
        .unwrap_err();
        assert_eq!(err, CommandError::new("Huh?"));
    }
}
