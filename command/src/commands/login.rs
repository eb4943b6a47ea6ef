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

//! The login continuation, seeded into the dispatcher by every session.

use crate::commands::look::describe_room;
use crate::{Command, CommandContext, CommandError, CommandResult};
use runemud_world::PlayerFlags;
use tracing::info;

const WELCOME_BANNER: &str = "$fg(#93)Welcome to RuneMUD!$fg(#37)\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoginState {
    Initial,
    WantUsername,
    WantPassword,
}

/// Multi-step login: banner and username prompt, then password prompt with
/// echo turned off, then validation and placement in the world.
///
/// Passwords are accepted unchecked; real authentication is a hook for
/// later. Duplicate logins (a `LOGGED_IN` player already holds the name)
/// are rejected with session termination.
#[derive(Debug)]
pub struct LoginCommand {
    state: LoginState,
    username: String,
}

impl LoginCommand {
    /// Create the seed command for a fresh session.
    pub fn new() -> Box<dyn Command> {
        Box::new(LoginCommand {
            state: LoginState::Initial,
            username: String::new(),
        })
    }
}

impl Command for LoginCommand {
    fn execute(
        &mut self,
        context: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        match self.state {
            LoginState::Initial => {
                self.state = LoginState::WantUsername;
                Ok(CommandResult {
                    output: WELCOME_BANNER.to_string(),
                    prompt: String::from("Username: "),
                    ..CommandResult::default()
                })
            }
            LoginState::WantUsername => {
                if context.input.is_empty() {
                    return Ok(CommandResult::continue_with_prompt("Username: "));
                }
                self.username = context.input.to_string();
                self.state = LoginState::WantPassword;
                Ok(CommandResult {
                    prompt: String::from("Password: "),
                    turn_off_echo: true,
                    ..CommandResult::default()
                })
            }
            LoginState::WantPassword => {
                // Echo off ate the client's newline, so every branch leads
                // its output with one.
                if context
                    .world
                    .find_logged_in_player(&self.username)
                    .is_some()
                {
                    return Ok(CommandResult {
                        output: format!(
                            "\n{} is already logged in. Goodbye!",
                            self.username
                        ),
                        termination_requested: true,
                        ..CommandResult::default()
                    });
                }

                let player = context
                    .world
                    .player_mut(context.player)
                    .ok_or_else(login_failure)?;
                player.name = self.username.clone();
                player.flags.set(PlayerFlags::LOGGED_IN);
                context
                    .world
                    .add_player(context.player)
                    .map_err(|_| login_failure())?;
                if let Some(start_room) = context.world.start_room() {
                    context
                        .world
                        .relocate_player(context.player, start_room)
                        .map_err(|_| login_failure())?;
                }

                info!(player = %context.player, name = %self.username, "player logged in");

                Ok(CommandResult {
                    output: format!("\n{}", describe_room(context.world, context.player)),
                    turn_on_echo: true,
                    ..CommandResult::default()
                })
            }
        }
    }
}

fn login_failure() -> CommandError {
    CommandError::new("Unknown error occurred, preventing you from logging in.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use runemud_world::{PlayerId, World};

    fn step(
        command: &mut Box<dyn Command>,
        world: &mut World,
        player: PlayerId,
        input: &str,
    ) -> CommandResult {
        let mut context = CommandContext {
            world,
            player,
            input,
        };
        command.execute(&mut context).unwrap()
    }

    #[test]
    fn full_login_flow() {
        let mut world = World::new();
        let start = world.add_room("The Landing", "A quiet stone platform.");
        let id = PlayerId::new(1);
        world.create_player(id).unwrap();

        let mut login = LoginCommand::new();

        let result = step(&mut login, &mut world, id, "");
        assert!(result.output.contains("Welcome"));
        assert_eq!(result.prompt, "Username: ");

        let result = step(&mut login, &mut world, id, "alice");
        assert_eq!(result.prompt, "Password: ");
        assert!(result.turn_off_echo);

        let result = step(&mut login, &mut world, id, "hunter2");
        assert!(result.prompt.is_empty());
        assert!(result.turn_on_echo);
        assert!(!result.termination_requested);
        assert!(result.output.contains("The Landing"));

        let player = world.player(id).unwrap();
        assert_eq!(player.name, "alice");
        assert!(player.flags.has(PlayerFlags::LOGGED_IN));
        assert_eq!(player.room(), Some(start));
        assert_eq!(world.rostered_players(), &[id]);
    }

    #[test]
    fn empty_username_reprompts() {
        let mut world = World::new();
        let id = PlayerId::new(1);
        world.create_player(id).unwrap();

        let mut login = LoginCommand::new();
        step(&mut login, &mut world, id, "");
        let result = step(&mut login, &mut world, id, "");
        assert_eq!(result.prompt, "Username: ");
        assert!(!result.turn_off_echo);
    }

    #[test]
    fn duplicate_login_terminates() {
        let mut world = World::new();
        world.add_room("Somewhere", "");

        let alice = PlayerId::new(1);
        world.create_player(alice).unwrap();
        let mut first = LoginCommand::new();
        step(&mut first, &mut world, alice, "");
        step(&mut first, &mut world, alice, "alice");
        step(&mut first, &mut world, alice, "pw");

        let impostor = PlayerId::new(2);
        world.create_player(impostor).unwrap();
        let mut second = LoginCommand::new();
        step(&mut second, &mut world, impostor, "");
        step(&mut second, &mut world, impostor, "Alice");
        let result = step(&mut second, &mut world, impostor, "pw");

        assert!(result.termination_requested);
        assert!(result.output.contains("already logged in"));
        assert_eq!(world.rostered_players(), &[alice]);
    }
}
