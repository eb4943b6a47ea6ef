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

//! Message types between sessions and the tick dispatcher.

use crate::SessionError;
use runemud_command::Command;
use runemud_world::PlayerId;
use std::fmt;
use tokio::sync::mpsc;

/// Session lifecycle events carried inside a [`PlayerInput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Not an event; the input carries text or a command.
    Nothing,
    /// The session ended; tear down the player's world entry and queue.
    Exited,
}

/// Requested TELNET echo state change, carried on a [`PlayerOutput`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EchoState {
    /// Leave echo alone.
    #[default]
    None,
    /// Resume client-side echo.
    On,
    /// Suppress client-side echo (password entry).
    Off,
}

/// One unit of output for a session to write to its client.
#[derive(Debug, Default)]
pub struct PlayerOutput {
    /// Text to write, possibly containing color tokens.
    pub text: String,
    /// Pass the text through untouched: no token transform, no newline
    /// normalization.
    pub raw: bool,
    /// Skip the color reset normally emitted after the text.
    pub keep_color_state: bool,
    /// Echo state change to apply after writing.
    pub echo_state: EchoState,
}

impl PlayerOutput {
    /// Text without a trailing newline (prompts).
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Text with a trailing newline appended.
    pub fn line(text: impl Into<String>) -> Self {
        let mut text = text.into();
        text.push('\n');
        Self {
            text,
            ..Self::default()
        }
    }

    /// An empty line, used to clear a partial prompt on the recipient's
    /// screen before an out-of-band message.
    pub fn blank_line() -> Self {
        Self::line("")
    }

    /// Untransformed pass-through text.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw: true,
            ..Self::default()
        }
    }

    /// Only an echo-on request, no text.
    pub fn echo_on() -> Self {
        Self {
            echo_state: EchoState::On,
            ..Self::default()
        }
    }

    /// Only an echo-off request, no text.
    pub fn echo_off() -> Self {
        Self {
            echo_state: EchoState::Off,
            ..Self::default()
        }
    }
}

/// The scheduler's message type: one item of player input on its way to the
/// tick dispatcher.
///
/// Always carries the originating player and the session's output and
/// error-return senders — the senders are not optional, so an input that
/// could not be answered cannot be constructed in the first place.
pub struct PlayerInput {
    /// The originating player.
    pub player: PlayerId,
    /// A typed line, already trimmed. Empty for command and event inputs.
    pub text: String,
    /// A preconstructed command, used to seed the first login step.
    pub command: Option<Box<dyn Command>>,
    /// An event code, or [`PlayerEvent::Nothing`] for ordinary input.
    pub event: PlayerEvent,
    /// Sink for output addressed to this player.
    pub output: mpsc::Sender<PlayerOutput>,
    /// Sink for [`SessionError`] signals addressed to this player's session.
    pub error_return: mpsc::Sender<SessionError>,
}

impl PlayerInput {
    /// An input carrying a typed line.
    pub fn from_text(
        text: impl Into<String>,
        player: PlayerId,
        output: mpsc::Sender<PlayerOutput>,
        error_return: mpsc::Sender<SessionError>,
    ) -> Self {
        Self {
            player,
            text: text.into(),
            command: None,
            event: PlayerEvent::Nothing,
            output,
            error_return,
        }
    }

    /// An input carrying a preconstructed command (the login seed).
    pub fn from_command(
        command: Box<dyn Command>,
        player: PlayerId,
        output: mpsc::Sender<PlayerOutput>,
        error_return: mpsc::Sender<SessionError>,
    ) -> Self {
        Self {
            player,
            text: String::new(),
            command: Some(command),
            event: PlayerEvent::Nothing,
            output,
            error_return,
        }
    }

    /// An input carrying a lifecycle event.
    pub fn from_event(
        event: PlayerEvent,
        player: PlayerId,
        output: mpsc::Sender<PlayerOutput>,
        error_return: mpsc::Sender<SessionError>,
    ) -> Self {
        Self {
            player,
            text: String::new(),
            command: None,
            event,
            output,
            error_return,
        }
    }
}

impl fmt::Debug for PlayerInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerInput")
            .field("player", &self.player)
            .field("text", &self.text)
            .field("has_command", &self.command.is_some())
            .field("event", &self.event)
            .finish()
    }
}
