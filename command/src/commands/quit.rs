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

//! Quit, with confirmation unless invoked as `quit now`.

use crate::{Command, CommandContext, CommandError, CommandResult};

const CONFIRMATION_PROMPT: &str = "Are you sure (y/n)?: ";
const FAREWELL: &str = "Ok, sorry to see you go!";

#[derive(Debug)]
pub struct QuitCommand {
    skip_confirmation: bool,
    handling_prompt: bool,
}

impl QuitCommand {
    pub(crate) fn construct(args: Vec<String>) -> Box<dyn Command> {
        Box::new(QuitCommand {
            skip_confirmation: args.first().is_some_and(|arg| arg.as_str() == "now"),
            handling_prompt: false,
        })
    }
}

impl Command for QuitCommand {
    fn execute(
        &mut self,
        context: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        if !self.handling_prompt {
            if self.skip_confirmation {
                return Ok(CommandResult {
                    output: FAREWELL.to_string(),
                    termination_requested: true,
                    ..CommandResult::default()
                });
            }
            self.handling_prompt = true;
            return Ok(CommandResult::continue_with_prompt(CONFIRMATION_PROMPT));
        }

        // Any prefix of yes/no is accepted; yes is checked first, so an
        // empty reply quits.
        let reply = context.input.to_ascii_lowercase();
        if "yes".starts_with(&reply) {
            Ok(CommandResult {
                output: FAREWELL.to_string(),
                termination_requested: true,
                ..CommandResult::default()
            })
        } else if "no".starts_with(&reply) {
            Ok(CommandResult::finished())
        } else {
            Ok(CommandResult {
                output: String::from("Invalid input."),
                prompt: CONFIRMATION_PROMPT.to_string(),
                ..CommandResult::default()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runemud_world::{PlayerId, World};

    fn run(command: &mut Box<dyn Command>, input: &str) -> CommandResult {
        let mut world = World::new();
        let player = PlayerId::new(1);
        world.create_player(player).unwrap();
        let mut context = CommandContext {
            world: &mut world,
            player,
            input,
        };
        command.execute(&mut context).unwrap()
    }

    #[test]
    fn quit_prompts_then_terminates_on_yes() {
        let mut quit = QuitCommand::construct(vec![]);

        let result = run(&mut quit, "");
        assert_eq!(result.prompt, CONFIRMATION_PROMPT);
        assert!(!result.termination_requested);

        let result = run(&mut quit, "y");
        assert!(result.termination_requested);
        assert_eq!(result.output, FAREWELL);
    }

    #[test]
    fn quit_aborts_on_no_prefix() {
        let mut quit = QuitCommand::construct(vec![]);
        run(&mut quit, "");
        let result = run(&mut quit, "n");
        assert!(!result.termination_requested);
        assert!(result.prompt.is_empty());
    }

    #[test]
    fn quit_reprompts_on_garbage() {
        let mut quit = QuitCommand::construct(vec![]);
        run(&mut quit, "");
        let result = run(&mut quit, "maybe");
        assert_eq!(result.prompt, CONFIRMATION_PROMPT);
        assert_eq!(result.output, "Invalid input.");
        assert!(!result.termination_requested);

        // Still the same continuation: yes now quits.
        let result = run(&mut quit, "yes");
        assert!(result.termination_requested);
    }

    #[test]
    fn quit_now_skips_confirmation() {
        let mut quit = QuitCommand::construct(vec![String::from("now")]);
        let result = run(&mut quit, "");
        assert!(result.termination_requested);
        assert_eq!(result.output, FAREWELL);
    }
}
