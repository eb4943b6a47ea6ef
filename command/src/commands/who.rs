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

//! List who is online.

use crate::{Command, CommandContext, CommandError, CommandResult};
use std::fmt::Write as _;

const SEPARATOR: &str = "-------------------------------";

#[derive(Debug)]
pub struct WhoCommand;

impl WhoCommand {
    pub(crate) fn construct(_args: Vec<String>) -> Box<dyn Command> {
        Box::new(WhoCommand)
    }
}

impl Command for WhoCommand {
    fn execute(
        &mut self,
        context: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        let mut listing = String::new();
        let _ = writeln!(listing, "Players On-line");
        let _ = writeln!(listing, "{SEPARATOR}");
        for id in context.world.rostered_players() {
            if let Some(player) = context.world.player(*id) {
                let suffix = if *id == context.player { " (You!)" } else { "" };
                let _ = writeln!(listing, "[{}] {}{}", player.level, player.name, suffix);
            }
        }
        let _ = writeln!(listing, "{SEPARATOR}");
        Ok(CommandResult::with_output(listing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runemud_world::{PlayerFlags, PlayerId, World};

    #[test]
    fn lists_players_in_login_order_and_marks_the_invoker() {
        let mut world = World::new();
        for (n, name) in [(1, "alice"), (2, "bob")] {
            let id = PlayerId::new(n);
            let player = world.create_player(id).unwrap();
            player.name = String::from(name);
            player.flags.set(PlayerFlags::LOGGED_IN);
            world.add_player(id).unwrap();
        }

        let mut who = WhoCommand::construct(vec![]);
        let mut context = CommandContext {
            world: &mut world,
            player: PlayerId::new(1),
            input: "who",
        };
        let result = who.execute(&mut context).unwrap();

        let lines: Vec<&str> = result.output.lines().collect();
        assert_eq!(
            lines,
            [
                "Players On-line",
                SEPARATOR,
                "[0] alice (You!)",
                "[0] bob",
                SEPARATOR,
            ]
        );
    }
}
