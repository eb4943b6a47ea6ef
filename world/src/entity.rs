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

//! World entities and their ids.

use crate::{Direction, PlayerFlags};
use std::fmt;
use std::time::{Duration, Instant};

/// Unique identifier for a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub(crate) u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room-{}", self.0)
    }
}

/// Unique identifier for a player.
///
/// Unlike the other ids, player ids are allocated by the server when a
/// connection is accepted (one id per session, never reused), so the id
/// exists before the world entity does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Create a player id from the server's connection counter.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

/// Unique identifier for a mob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MobId(pub(crate) u32);

impl fmt::Display for MobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mob-{}", self.0)
    }
}

/// Unique identifier for an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object-{}", self.0)
    }
}

/// An online participant in the world, owned by exactly one session.
///
/// Created when a TCP connection is accepted, mutated only by the tick
/// dispatcher, destroyed when the session ends.
#[derive(Debug)]
pub struct Player {
    /// Player name, set at login.
    pub name: String,
    /// What others see when they look at the player.
    pub description: String,
    /// Current health.
    pub health: i32,
    /// Current mana.
    pub mana: i32,
    /// Experience level.
    pub level: u32,
    /// Character class.
    pub class: String,
    /// State flags.
    pub flags: PlayerFlags,
    pub(crate) room: Option<RoomId>,
}

impl Player {
    pub(crate) fn new() -> Self {
        let mut flags = PlayerFlags::empty();
        flags.set(PlayerFlags::STANDING);
        Self {
            name: String::new(),
            description: String::new(),
            health: 100,
            mana: 100,
            level: 0,
            class: String::from("adventurer"),
            flags,
            room: None,
        }
    }

    /// The room the player is in, if any. Kept consistent with the room's
    /// player list by the world's relocation operations.
    pub fn room(&self) -> Option<RoomId> {
        self.room
    }
}

/// A non-player character placed in rooms.
#[derive(Debug)]
pub struct Mob {
    /// Mob name.
    pub name: String,
    /// What a player sees when looking at the mob.
    pub description: String,
    /// Line shown in the room rendering instead of the generic one.
    pub room_description: String,
    /// Scheduled ambient behaviors.
    pub behaviors: Vec<MobBehavior>,
    pub(crate) room: Option<RoomId>,
}

impl Mob {
    /// The room the mob is in, if any.
    pub fn room(&self) -> Option<RoomId> {
        self.room
    }
}

/// A scheduled ambient action: a verb/preposition pair that fires with some
/// probability once its period has elapsed.
#[derive(Debug)]
pub struct MobBehavior {
    /// The action verb, e.g. "growls" or "sniffing".
    pub verb: String,
    /// Optional trailing preposition phrase, e.g. "at the air".
    pub preposition: Option<String>,
    /// Minimum time between firings.
    pub period: Duration,
    /// Chance of firing once due, in `0.0..=1.0`.
    pub probability: f64,
    /// When the behavior last fired.
    pub last_acted: Option<Instant>,
}

impl MobBehavior {
    /// Create a behavior that has never fired.
    pub fn new(
        verb: impl Into<String>,
        preposition: Option<&str>,
        period: Duration,
        probability: f64,
    ) -> Self {
        Self {
            verb: verb.into(),
            preposition: preposition.map(String::from),
            period,
            probability,
            last_acted: None,
        }
    }

    /// Whether the period has elapsed since the behavior last fired.
    pub fn due(&self, now: Instant) -> bool {
        match self.last_acted {
            Some(last) => now.duration_since(last) >= self.period,
            None => true,
        }
    }

    /// Render the action as room narration. Progressive verbs get an "is":
    /// "The wolf is sniffing at the air."
    pub fn narrate(&self, mob_name: &str) -> String {
        let mut out = String::with_capacity(mob_name.len() + self.verb.len() + 16);
        out.push_str(mob_name);
        out.push(' ');
        if self.verb.ends_with("ing") {
            out.push_str("is ");
        }
        out.push_str(&self.verb);
        if let Some(preposition) = &self.preposition {
            out.push(' ');
            out.push_str(preposition);
        }
        out.push('.');
        out
    }
}

/// An inanimate item placed in rooms.
#[derive(Debug)]
pub struct Object {
    /// Object name.
    pub name: String,
    /// What a player sees when looking at the object.
    pub description: String,
    /// Line shown in the room rendering instead of the generic one.
    pub room_description: String,
    pub(crate) room: Option<RoomId>,
}

impl Object {
    /// The room the object is in, if any.
    pub fn room(&self) -> Option<RoomId> {
        self.room
    }
}

/// A node in the world graph with typed exits to up to six other rooms.
#[derive(Debug)]
pub struct Room {
    /// Room title, the headline of the room rendering.
    pub title: String,
    /// Room body text.
    pub description: String,
    pub(crate) adjacent: [Option<RoomId>; Direction::COUNT],
    pub(crate) players: Vec<PlayerId>,
    pub(crate) mobs: Vec<MobId>,
    pub(crate) objects: Vec<ObjectId>,
}

impl Room {
    pub(crate) fn new(title: String, description: String) -> Self {
        Self {
            title,
            description,
            adjacent: [None; Direction::COUNT],
            players: Vec::new(),
            mobs: Vec::new(),
            objects: Vec::new(),
        }
    }

    /// The room connected in the given direction, if any. Adjacency is
    /// mutated only through the world's connect operations.
    pub fn adjacent(&self, direction: Direction) -> Option<RoomId> {
        self.adjacent[direction.index()]
    }

    /// Players currently present.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// Mobs currently present.
    pub fn mobs(&self) -> &[MobId] {
        &self.mobs
    }

    /// Objects currently present.
    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }
}
