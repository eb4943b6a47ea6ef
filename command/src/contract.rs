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

//! The uniform command contract driven by the tick dispatcher.

use runemud_world::{PlayerId, World};
use thiserror::Error;

/// Everything a command gets to work with for one execution.
pub struct CommandContext<'a> {
    /// The world, exclusively borrowed for the duration of the call.
    pub world: &'a mut World,
    /// The invoking player.
    pub player: PlayerId,
    /// The raw input line that reached the command. For a continuation this
    /// is the line answering the command's prompt; for a seeded command it
    /// is empty.
    pub input: &'a str,
}

/// An out-of-band line for another player, routed by the dispatcher to the
/// recipient's session.
#[derive(Debug, PartialEq, Eq)]
pub struct TextMessage {
    /// Who receives the line.
    pub recipient: PlayerId,
    /// The line itself, without trailing newline.
    pub text: String,
}

/// What a command execution produced. Every field is defaulted; a zero
/// result simply returns the player to their normal prompt.
#[derive(Debug, Default)]
pub struct CommandResult {
    /// Text to show the invoking player.
    pub output: String,
    /// Sub-prompt text. Non-empty means the command wants the player's next
    /// input routed back to this same instance.
    pub prompt: String,
    /// The player's session should end.
    pub termination_requested: bool,
    /// Out-of-band messages to other players.
    pub text_messages: Vec<TextMessage>,
    /// Ask the client to resume local echo.
    pub turn_on_echo: bool,
    /// Ask the client to stop local echo (password entry).
    pub turn_off_echo: bool,
}

impl CommandResult {
    /// A command that completed with nothing to say.
    pub fn finished() -> Self {
        Self::default()
    }

    /// A command that completed with output for the invoker.
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    /// A command that wants to continue: show `prompt` and route the next
    /// input back here.
    pub fn continue_with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// A command failure, shown to the player in a highlighted color. Never
/// fatal: the session and the tick both continue.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CommandError(pub String);

impl CommandError {
    /// Create an error carrying a message for the player.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A game command, possibly stateful across invocations.
///
/// The dispatcher guarantees that a command returning a non-empty prompt
/// sees the same instance on the player's next input, until it returns
/// without a prompt, requests termination, or errors.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Run one step. Must run to completion; continuations are expressed
    /// through [`CommandResult::prompt`], never by suspending.
    fn execute(&mut self, context: &mut CommandContext<'_>)
    -> Result<CommandResult, CommandError>;
}
