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

//! Error types surfaced on a session's error-return channel.

use thiserror::Error;

/// Signals the dispatcher sends a session through its error channel.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A command requested termination. The session closes the connection
    /// gracefully; this is the normal way out.
    #[error("player quit")]
    PlayerQuit,

    /// Admission control refused the session's first input. The session
    /// sends a polite refusal line and closes.
    #[error("too many players connected")]
    TooManyPlayers,

    /// The per-player input queue is full. The offending input was dropped;
    /// the session stays alive and warns the player.
    #[error("too much input")]
    TooMuchInput,
}

impl SessionError {
    /// Whether the session should close after delivering this signal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SessionError::TooMuchInput)
    }
}
