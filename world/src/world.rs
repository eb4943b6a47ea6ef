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

//! The world: arena-owned entities plus the operations that keep the
//! containment and adjacency invariants true.

use crate::entity::{Mob, Object, Player, Room};
use crate::{Direction, MobId, ObjectId, PlayerFlags, PlayerId, RoomId, WorldError};
use std::collections::HashMap;

/// The shared game world.
///
/// Owns every entity. The tick dispatcher is the sole owner at runtime, so
/// all mutation is single-writer by construction.
#[derive(Debug, Default)]
pub struct World {
    rooms: HashMap<RoomId, Room>,
    players: HashMap<PlayerId, Player>,
    mobs: HashMap<MobId, Mob>,
    objects: HashMap<ObjectId, Object>,
    /// Players added to the world, in login order.
    roster: Vec<PlayerId>,
    start_room: Option<RoomId>,
    next_room_id: u32,
    next_mob_id: u32,
    next_object_id: u32,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------------

    /// Add a room. The first room added becomes the start room until
    /// [`World::set_start_room`] says otherwise.
    pub fn add_room(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> RoomId {
        let id = RoomId(self.next_room_id);
        self.next_room_id += 1;
        self.rooms
            .insert(id, Room::new(title.into(), description.into()));
        if self.start_room.is_none() {
            self.start_room = Some(id);
        }
        id
    }

    /// Get a room.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Where new players appear.
    pub fn start_room(&self) -> Option<RoomId> {
        self.start_room
    }

    /// Designate the room new players appear in.
    pub fn set_start_room(&mut self, id: RoomId) -> Result<(), WorldError> {
        if !self.rooms.contains_key(&id) {
            return Err(WorldError::Inconsistent("no such room"));
        }
        self.start_room = Some(id);
        Ok(())
    }

    /// Connect `from` to `to` in `direction`, one-way.
    ///
    /// Fails if the slot is already occupied. The reverse direction is not
    /// touched; see [`World::connect_duplex`].
    pub fn connect(
        &mut self,
        from: RoomId,
        to: RoomId,
        direction: Direction,
    ) -> Result<(), WorldError> {
        if !self.rooms.contains_key(&to) {
            return Err(WorldError::Inconsistent("no such room"));
        }
        let room = self
            .rooms
            .get_mut(&from)
            .ok_or(WorldError::Inconsistent("no such room"))?;
        if room.adjacent[direction.index()].is_some() {
            return Err(WorldError::Inconsistent(
                "room is already connected to another room in that direction",
            ));
        }
        room.adjacent[direction.index()] = Some(to);
        Ok(())
    }

    /// Connect two rooms in both directions using the opposite-direction
    /// table. Fails without touching anything if either side is occupied.
    pub fn connect_duplex(
        &mut self,
        from: RoomId,
        to: RoomId,
        direction: Direction,
    ) -> Result<(), WorldError> {
        let forward_free = self
            .rooms
            .get(&from)
            .ok_or(WorldError::Inconsistent("no such room"))?
            .adjacent[direction.index()]
            .is_none();
        let reverse_free = self
            .rooms
            .get(&to)
            .ok_or(WorldError::Inconsistent("no such room"))?
            .adjacent[direction.opposite().index()]
            .is_none();
        if !forward_free || !reverse_free {
            return Err(WorldError::Inconsistent(
                "room is already connected to another room in that direction",
            ));
        }
        self.connect(from, to, direction)?;
        self.connect(to, from, direction.opposite())
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    /// Create the player entity for a freshly accepted session. The player
    /// starts outside the world roster and outside any room; login rosters
    /// and places it.
    pub fn create_player(&mut self, id: PlayerId) -> Result<&mut Player, WorldError> {
        if self.players.contains_key(&id) {
            return Err(WorldError::Inconsistent("player id already exists"));
        }
        Ok(self.players.entry(id).or_insert_with(Player::new))
    }

    /// Roster a player into the world. Fails if the player is already
    /// rostered; a player belongs to the world at most once.
    pub fn add_player(&mut self, id: PlayerId) -> Result<(), WorldError> {
        if !self.players.contains_key(&id) {
            return Err(WorldError::Inconsistent("no such player"));
        }
        if self.roster.contains(&id) {
            return Err(WorldError::Inconsistent("player is already in the world"));
        }
        self.roster.push(id);
        Ok(())
    }

    /// Remove a player entirely: room list, roster and arena. Safe to call
    /// for a player that was never rostered (a session that died before
    /// login). Unknown ids are a no-op.
    pub fn destroy_player(&mut self, id: PlayerId) {
        if let Some(player) = self.players.remove(&id) {
            if let Some(room_id) = player.room {
                if let Some(room) = self.rooms.get_mut(&room_id) {
                    room.players.retain(|present| *present != id);
                }
            }
            self.roster.retain(|rostered| *rostered != id);
        }
    }

    /// Get a player.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Get a player mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// Whether an entity exists for the id.
    pub fn contains_player(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Players rostered into the world, in login order.
    pub fn rostered_players(&self) -> &[PlayerId] {
        &self.roster
    }

    /// Find a logged-in player by name, ASCII-case-insensitively. Name
    /// uniqueness among logged-in players makes the first hit the only hit.
    pub fn find_logged_in_player(&self, name: &str) -> Option<PlayerId> {
        self.roster.iter().copied().find(|id| {
            self.players.get(id).is_some_and(|player| {
                player.flags.has(PlayerFlags::LOGGED_IN)
                    && player.name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Move a player to a room. No-op if already there.
    pub fn relocate_player(&mut self, id: PlayerId, to: RoomId) -> Result<(), WorldError> {
        if !self.rooms.contains_key(&to) {
            return Err(WorldError::Inconsistent("no such room"));
        }
        let previous = match self.players.get(&id) {
            Some(player) => player.room,
            None => return Err(WorldError::Inconsistent("no such player")),
        };
        if previous == Some(to) {
            return Ok(());
        }
        if let Some(previous) = previous {
            self.remove_player_from_room(previous, id)?;
        }
        // Unwraps above proved both exist; re-borrow to commit.
        let room = self.rooms.get_mut(&to).expect("room checked above");
        room.players.push(id);
        self.players.get_mut(&id).expect("player checked above").room = Some(to);
        Ok(())
    }

    /// Move a player one step in a direction.
    pub fn move_player(&mut self, id: PlayerId, direction: Direction) -> Result<(), WorldError> {
        let room_id = self
            .players
            .get(&id)
            .ok_or(WorldError::Inconsistent("no such player"))?
            .room
            .ok_or(WorldError::Inconsistent("player is not in any room"))?;
        let room = self
            .rooms
            .get(&room_id)
            .ok_or(WorldError::Inconsistent("player's room does not exist"))?;
        let target = room.adjacent[direction.index()].ok_or(WorldError::InvalidDirection)?;
        self.relocate_player(id, target)
    }

    fn remove_player_from_room(&mut self, room_id: RoomId, id: PlayerId) -> Result<(), WorldError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(WorldError::Inconsistent("player's room does not exist"))?;
        let index = room
            .players
            .iter()
            .position(|present| *present == id)
            .ok_or(WorldError::Inconsistent(
                "player was not in its room's list of players",
            ))?;
        room.players.remove(index);
        if let Some(player) = self.players.get_mut(&id) {
            player.room = None;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mobs and objects
    // ------------------------------------------------------------------

    /// Add a mob to the world, outside any room.
    pub fn add_mob(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        room_description: impl Into<String>,
    ) -> MobId {
        let id = MobId(self.next_mob_id);
        self.next_mob_id += 1;
        self.mobs.insert(
            id,
            Mob {
                name: name.into(),
                description: description.into(),
                room_description: room_description.into(),
                behaviors: Vec::new(),
                room: None,
            },
        );
        id
    }

    /// Get a mob.
    pub fn mob(&self, id: MobId) -> Option<&Mob> {
        self.mobs.get(&id)
    }

    /// Get a mob mutably.
    pub fn mob_mut(&mut self, id: MobId) -> Option<&mut Mob> {
        self.mobs.get_mut(&id)
    }

    /// Every mob id. Order is unspecified.
    pub fn mob_ids(&self) -> Vec<MobId> {
        self.mobs.keys().copied().collect()
    }

    /// Move a mob to a room. No-op if already there.
    pub fn relocate_mob(&mut self, id: MobId, to: RoomId) -> Result<(), WorldError> {
        if !self.rooms.contains_key(&to) {
            return Err(WorldError::Inconsistent("no such room"));
        }
        let previous = match self.mobs.get(&id) {
            Some(mob) => mob.room,
            None => return Err(WorldError::Inconsistent("no such mob")),
        };
        if previous == Some(to) {
            return Ok(());
        }
        if let Some(previous) = previous {
            if let Some(room) = self.rooms.get_mut(&previous) {
                room.mobs.retain(|present| *present != id);
            }
        }
        let room = self.rooms.get_mut(&to).expect("room checked above");
        room.mobs.push(id);
        self.mobs.get_mut(&id).expect("mob checked above").room = Some(to);
        Ok(())
    }

    /// Add an object to the world, outside any room.
    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        room_description: impl Into<String>,
    ) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        self.objects.insert(
            id,
            Object {
                name: name.into(),
                description: description.into(),
                room_description: room_description.into(),
                room: None,
            },
        );
        id
    }

    /// Get an object.
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    /// Move an object to a room. No-op if already there.
    pub fn relocate_object(&mut self, id: ObjectId, to: RoomId) -> Result<(), WorldError> {
        if !self.rooms.contains_key(&to) {
            return Err(WorldError::Inconsistent("no such room"));
        }
        let previous = match self.objects.get(&id) {
            Some(object) => object.room,
            None => return Err(WorldError::Inconsistent("no such object")),
        };
        if previous == Some(to) {
            return Ok(());
        }
        if let Some(previous) = previous {
            if let Some(room) = self.rooms.get_mut(&previous) {
                room.objects.retain(|present| *present != id);
            }
        }
        let room = self.rooms.get_mut(&to).expect("room checked above");
        room.objects.push(id);
        self.objects.get_mut(&id).expect("object checked above").room = Some(to);
        Ok(())
    }
}
