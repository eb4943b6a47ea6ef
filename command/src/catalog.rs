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

//! The ordered command catalogue and verb resolution.

use crate::commands::help::HelpCommand;
use crate::commands::look::LookCommand;
use crate::commands::movement;
use crate::commands::quit::QuitCommand;
use crate::commands::tell::TellCommand;
use crate::commands::who::WhoCommand;
use crate::line::{ParseError, parse_command_line};
use crate::{Command, CommandLine};
use runemud_world::{Player, PlayerFlags};
use thiserror::Error;

/// Builds a command from the already tokenized arguments.
pub(crate) type Constructor = fn(Vec<String>) -> Box<dyn Command>;

/// Decides whether a player may use a command at all.
pub(crate) type Requirements = fn(&Player) -> bool;

/// One verb in the catalogue.
pub struct CatalogEntry {
    /// The full verb; typed input matches any prefix of it.
    pub name: &'static str,
    /// Help category.
    pub category: &'static str,
    /// One-line help text.
    pub short_desc: &'static str,
    /// Long help text, shown by `help <command>`.
    pub long_desc: &'static str,
    pub(crate) requirements: Option<Requirements>,
    pub(crate) construct: Constructor,
}

/// Verb resolution error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    /// No catalogue verb starts with the typed word.
    #[error("unknown command")]
    UnknownCommand,

    /// Verbs matched, but none is available to this player right now.
    #[error("you cannot do that right now")]
    UnavailableCommand,

    /// The line itself would not tokenize.
    #[error(transparent)]
    InvalidCommandLine(#[from] ParseError),
}

fn requires_login(player: &Player) -> bool {
    player.flags.has(PlayerFlags::LOGGED_IN)
}

// Ordering is semantically significant and part of the contract: input is
// prefix-matched top to bottom, so the directions must come before any other
// verb sharing their first letters ("n" is north, not some emote).
static CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "north",
        category: "Movement",
        short_desc: "Walk north.",
        long_desc: "Walk through the northern exit of the room, if there is one.",
        requirements: Some(requires_login),
        construct: movement::north,
    },
    CatalogEntry {
        name: "south",
        category: "Movement",
        short_desc: "Walk south.",
        long_desc: "Walk through the southern exit of the room, if there is one.",
        requirements: Some(requires_login),
        construct: movement::south,
    },
    CatalogEntry {
        name: "east",
        category: "Movement",
        short_desc: "Walk east.",
        long_desc: "Walk through the eastern exit of the room, if there is one.",
        requirements: Some(requires_login),
        construct: movement::east,
    },
    CatalogEntry {
        name: "west",
        category: "Movement",
        short_desc: "Walk west.",
        long_desc: "Walk through the western exit of the room, if there is one.",
        requirements: Some(requires_login),
        construct: movement::west,
    },
    CatalogEntry {
        name: "up",
        category: "Movement",
        short_desc: "Climb up.",
        long_desc: "Climb through the upward exit of the room, if there is one.",
        requirements: Some(requires_login),
        construct: movement::up,
    },
    CatalogEntry {
        name: "down",
        category: "Movement",
        short_desc: "Climb down.",
        long_desc: "Climb through the downward exit of the room, if there is one.",
        requirements: Some(requires_login),
        construct: movement::down,
    },
    CatalogEntry {
        name: "look",
        category: "Actions",
        short_desc: "Look at the room or at something in it.",
        long_desc: "Without arguments, show the room you are in. With an \
                    argument, look at the mob, object or player whose name \
                    starts with it.",
        requirements: Some(requires_login),
        construct: LookCommand::construct,
    },
    CatalogEntry {
        name: "who",
        category: "Information",
        short_desc: "List who is online.",
        long_desc: "List every player currently logged in to the world.",
        requirements: Some(requires_login),
        construct: WhoCommand::construct,
    },
    CatalogEntry {
        name: "tell",
        category: "Communication",
        short_desc: "Send a private message.",
        long_desc: "tell <player> <message> sends the message, whitespace \
                    and all, to the named player.",
        requirements: Some(requires_login),
        construct: TellCommand::construct,
    },
    CatalogEntry {
        name: "help",
        category: "Information",
        short_desc: "Show this index, or help on one command.",
        long_desc: "Without arguments, list every command grouped by \
                    category. With a command name, show its long description.",
        requirements: None,
        construct: HelpCommand::construct,
    },
    CatalogEntry {
        name: "quit",
        category: "System",
        short_desc: "Leave the game.",
        long_desc: "Leave the game after a confirmation. \"quit now\" skips \
                    the confirmation.",
        requirements: Some(requires_login),
        construct: QuitCommand::construct,
    },
];

/// The catalogue, in matching order.
pub fn catalog_entries() -> &'static [CatalogEntry] {
    CATALOG
}

/// Find the first entry whose verb starts with `name` (case-insensitive),
/// ignoring requirements. Used by help.
pub fn find_entry(name: &str) -> Option<&'static CatalogEntry> {
    let typed = name.to_ascii_lowercase();
    if typed.is_empty() {
        return None;
    }
    CATALOG.iter().find(|entry| entry.name.starts_with(&typed))
}

/// Resolve a typed line to a runnable command.
///
/// The verb is matched case-insensitively as a prefix against the catalogue,
/// in order; the first entry whose requirements accept the player wins.
pub fn parse_command(
    text: &str,
    player: &Player,
) -> Result<Box<dyn Command>, CommandParseError> {
    let CommandLine { name, args } = parse_command_line(text)?;
    let typed = name.to_ascii_lowercase();
    if typed.is_empty() {
        return Err(CommandParseError::UnknownCommand);
    }

    let mut saw_match = false;
    for entry in CATALOG {
        if !entry.name.starts_with(&typed) {
            continue;
        }
        match entry.requirements {
            Some(requirements) if !requirements(player) => {
                saw_match = true;
            }
            _ => return Ok((entry.construct)(args)),
        }
    }

    if saw_match {
        Err(CommandParseError::UnavailableCommand)
    } else {
        Err(CommandParseError::UnknownCommand)
    }
}
