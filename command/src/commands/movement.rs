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

//! Walking between rooms.

use crate::{Command, CommandContext, CommandError, CommandResult};
use runemud_world::{Direction, WorldError};
use tracing::warn;

#[derive(Debug)]
pub struct MoveCommand {
    direction: Direction,
}

pub(crate) fn north(_args: Vec<String>) -> Box<dyn Command> {
    Box::new(MoveCommand {
        direction: Direction::North,
    })
}

pub(crate) fn south(_args: Vec<String>) -> Box<dyn Command> {
    Box::new(MoveCommand {
        direction: Direction::South,
    })
}

pub(crate) fn east(_args: Vec<String>) -> Box<dyn Command> {
    Box::new(MoveCommand {
        direction: Direction::East,
    })
}

pub(crate) fn west(_args: Vec<String>) -> Box<dyn Command> {
    Box::new(MoveCommand {
        direction: Direction::West,
    })
}

pub(crate) fn up(_args: Vec<String>) -> Box<dyn Command> {
    Box::new(MoveCommand {
        direction: Direction::Up,
    })
}

pub(crate) fn down(_args: Vec<String>) -> Box<dyn Command> {
    Box::new(MoveCommand {
        direction: Direction::Down,
    })
}

impl Command for MoveCommand {
    fn execute(
        &mut self,
        context: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        let in_a_room = context
            .world
            .player(context.player)
            .and_then(|player| player.room())
            .is_some();
        if !in_a_room {
            return Err(CommandError::new(
                "It would seem you're not in a room, but in a void. What happened!?",
            ));
        }

        match context.world.move_player(context.player, self.direction) {
            Ok(()) => Ok(CommandResult::finished()),
            Err(WorldError::InvalidDirection) => {
                Err(CommandError::new("You can't go that way."))
            }
            Err(err) => {
                warn!(player = %context.player, direction = %self.direction, %err,
                    "movement failed");
                Err(CommandError::new("You can't go that way."))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runemud_world::{PlayerId, World};

    #[test]
    fn moves_through_an_exit() {
        let mut world = World::new();
        let a = world.add_room("A", "");
        let b = world.add_room("B", "");
        world.connect_duplex(a, b, Direction::North).unwrap();
        let id = PlayerId::new(1);
        world.create_player(id).unwrap();
        world.relocate_player(id, a).unwrap();

        let mut command = north(vec![]);
        let mut context = CommandContext {
            world: &mut world,
            player: id,
            input: "north",
        };
        command.execute(&mut context).unwrap();
        assert_eq!(world.player(id).unwrap().room(), Some(b));
    }

    #[test]
    fn missing_exit_is_a_narrative_error() {
        let mut world = World::new();
        let a = world.add_room("A", "");
        let id = PlayerId::new(1);
        world.create_player(id).unwrap();
        world.relocate_player(id, a).unwrap();

        let mut command = down(vec![]);
        let mut context = CommandContext {
            world: &mut world,
            player: id,
            input: "down",
        };
        let err = command.execute(&mut context).unwrap_err();
        assert_eq!(err, CommandError::new("You can't go that way."));
    }

    #[test]
    fn roomless_player_gets_the_void_message() {
        let mut world = World::new();
        let id = PlayerId::new(1);
        world.create_player(id).unwrap();

        let mut command = north(vec![]);
        let mut context = CommandContext {
            world: &mut world,
            player: id,
            input: "north",
        };
        let err = command.execute(&mut context).unwrap_err();
        assert!(err.0.contains("void"));
    }
}
