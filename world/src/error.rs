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

//! Error types for world operations.

use thiserror::Error;

/// World model error types.
///
/// These are preconditions reported to the caller, not fatal conditions:
/// commands narrate them to the player and the tick goes on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// A structural precondition does not hold (entity in two containers,
    /// duplicate roster entry, occupied adjacency slot, unknown id).
    #[error("{0}")]
    Inconsistent(&'static str),

    /// There is no exit in the requested direction.
    #[error("cannot move in that direction")]
    InvalidDirection,
}

impl WorldError {
    /// Check whether the error is a movement failure rather than a
    /// structural one.
    pub fn is_invalid_direction(&self) -> bool {
        matches!(self, WorldError::InvalidDirection)
    }
}
