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

/// Bitset of player state flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerFlags(u32);

impl PlayerFlags {
    /// The player is on their feet.
    pub const STANDING: PlayerFlags = PlayerFlags(1);
    /// The player has completed login and is part of the world.
    pub const LOGGED_IN: PlayerFlags = PlayerFlags(1 << 1);
    /// A multi-step command holds the player's input stream.
    pub const BUSY: PlayerFlags = PlayerFlags(1 << 2);

    /// No flags set.
    pub fn empty() -> PlayerFlags {
        PlayerFlags(0)
    }

    /// Set a flag.
    pub fn set(&mut self, flag: PlayerFlags) {
        self.0 |= flag.0;
    }

    /// Clear a flag.
    pub fn clear(&mut self, flag: PlayerFlags) {
        self.0 &= !flag.0;
    }

    /// Check whether every bit of `flag` is set.
    pub fn has(self, flag: PlayerFlags) -> bool {
        self.0 & flag.0 == flag.0
    }
}
