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

//! Looking at the room and at things in it.

use crate::{Command, CommandContext, CommandError, CommandResult};
use runemud_world::{Direction, PlayerId, World};
use std::fmt::Write as _;

const VOID_MESSAGE: &str =
    "It would seem you're not in a room, but in a void. What happened!?\n";

#[derive(Debug)]
pub struct LookCommand {
    args: Vec<String>,
}

impl LookCommand {
    pub(crate) fn construct(args: Vec<String>) -> Box<dyn Command> {
        Box::new(LookCommand { args })
    }
}

impl Command for LookCommand {
    fn execute(
        &mut self,
        context: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        match self.args.first() {
            None => Ok(CommandResult::with_output(describe_room(
                context.world,
                context.player,
            ))),
            Some(target) => look_at_target(context, target),
        }
    }
}

/// Render a room the way its occupant sees it. Shared by `look` and the
/// tail end of login.
pub(crate) fn describe_room(world: &World, player_id: PlayerId) -> String {
    let room_id = world.player(player_id).and_then(|player| player.room());
    let Some(room) = room_id.and_then(|id| world.room(id)) else {
        return VOID_MESSAGE.to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", room.title);
    let _ = writeln!(out, "   {}", room.description);

    for id in room.players() {
        if *id != player_id {
            if let Some(player) = world.player(*id) {
                let _ = writeln!(out, "{} is standing here", player.name);
            }
        }
    }

    for id in room.mobs() {
        if let Some(mob) = world.mob(*id) {
            if mob.room_description.is_empty() {
                let _ = writeln!(
                    out,
                    "{} {} is here.",
                    indefinite_article_for(&mob.name),
                    mob.name
                );
            } else {
                let _ = writeln!(out, "{}", mob.room_description);
            }
        }
    }

    for id in room.objects() {
        if let Some(object) = world.object(*id) {
            if object.room_description.is_empty() {
                let _ = writeln!(
                    out,
                    "{} {} is lying on the ground.",
                    indefinite_article_for(&object.name),
                    object.name
                );
            } else {
                let _ = writeln!(out, "{}", object.room_description);
            }
        }
    }

    let _ = writeln!(out, "Obvious exits:");
    let mut has_exit = false;
    for direction in Direction::ALL {
        if let Some(adjacent) = room.adjacent(direction) {
            if let Some(next_room) = world.room(adjacent) {
                let _ = writeln!(out, "{:<10} - {}", direction.to_string(), next_room.title);
                has_exit = true;
            }
        }
    }
    if !has_exit {
        let _ = writeln!(out, "NONE - YOU ARE TRAPPED!");
    }

    out
}

fn look_at_target(
    context: &mut CommandContext<'_>,
    target: &str,
) -> Result<CommandResult, CommandError> {
    let room_id = context
        .world
        .player(context.player)
        .and_then(|player| player.room());
    let Some(room) = room_id.and_then(|id| context.world.room(id)) else {
        return Ok(CommandResult::with_output(VOID_MESSAGE));
    };

    let needle = target.to_ascii_lowercase();

    let mob = room
        .mobs()
        .iter()
        .find(|id| {
            context.world.mob(**id).is_some_and(|mob| {
                mob.name.to_ascii_lowercase().starts_with(&needle)
            })
        })
        .copied();
    let object = room
        .objects()
        .iter()
        .find(|id| {
            context.world.object(**id).is_some_and(|object| {
                object.name.to_ascii_lowercase().starts_with(&needle)
            })
        })
        .copied();
    let player = room
        .players()
        .iter()
        .find(|id| {
            context.world.player(**id).is_some_and(|player| {
                player.name.to_ascii_lowercase().starts_with(&needle)
            })
        })
        .copied();

    let matches =
        usize::from(mob.is_some()) + usize::from(object.is_some()) + usize::from(player.is_some());
    match matches {
        0 => Err(CommandError::new(format!(
            "Can't find {target} in the room..."
        ))),
        1 => {
            let description = if let Some(id) = mob {
                context.world.mob(id).map(|mob| mob.description.clone())
            } else if let Some(id) = object {
                context
                    .world
                    .object(id)
                    .map(|object| object.description.clone())
            } else {
                player.and_then(|id| {
                    context
                        .world
                        .player(id)
                        .map(|player| player.description.clone())
                })
            };
            Ok(CommandResult::with_output(description.unwrap_or_default()))
        }
        _ => Err(CommandError::new(format!(
            "There are more than one thing in the room called {target}..."
        ))),
    }
}

fn indefinite_article_for(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U') => "An",
        _ => "A",
    }
}
