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

//! Private messages between players.

use crate::line::parse_arguments;
use crate::{Command, CommandContext, CommandError, CommandResult, TextMessage};
use runemud_world::PlayerFlags;

#[derive(Debug)]
pub struct TellCommand {
    args: Vec<String>,
}

impl TellCommand {
    pub(crate) fn construct(args: Vec<String>) -> Box<dyn Command> {
        Box::new(TellCommand { args })
    }
}

impl Command for TellCommand {
    fn execute(
        &mut self,
        context: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        let Some(target_name) = self.args.first() else {
            return Err(CommandError::new("Who are you talking to?"));
        };

        let Some(recipient) = context.world.find_logged_in_player(target_name) else {
            return Err(CommandError::new(format!(
                "Nobody with the name {target_name} is online right now..."
            )));
        };
        if recipient == context.player {
            return Err(CommandError::new("Talking to yourself??"));
        }

        let recipient_player = context
            .world
            .player(recipient)
            .ok_or_else(|| CommandError::new("Something went wrong here..."))?;
        if recipient_player.flags.has(PlayerFlags::BUSY) {
            return Err(CommandError::new(format!(
                "{} is busy.",
                recipient_player.name
            )));
        }

        if self.args.len() == 1 {
            return Err(CommandError::new(format!(
                "Tell {} what?",
                recipient_player.name
            )));
        }

        // The catalogue handed us tokenized args, but the recipient should
        // see the payload exactly as typed. Re-split the raw input keeping
        // everything after the verb and the name verbatim.
        let raw = parse_arguments(context.input, 2)
            .map_err(|_| CommandError::new("Something went wrong here..."))?;
        let Some(payload) = raw.get(2) else {
            return Err(CommandError::new("Something went wrong here..."));
        };

        let sender_name = context
            .world
            .player(context.player)
            .map(|player| player.name.clone())
            .unwrap_or_default();

        Ok(CommandResult {
            text_messages: vec![TextMessage {
                recipient,
                text: format!("{sender_name} tells you: {payload}"),
            }],
            ..CommandResult::default()
        })
    }
}
