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

//! # RuneMUD World Model
//!
//! Rooms, players, mobs and objects with ownership and adjacency. Entities
//! live in arena maps owned by the [`World`] and refer to each other through
//! copyable ids, never through owned pointers, so the cyclic
//! world/room/player shape of a MUD needs no shared references.
//!
//! Every relocation is a transactional two-step (remove from the previous
//! container, append to the new one, update the entity's room id), and the
//! public operations keep these invariants:
//!
//! - an entity is present in at most one room's list, and its room id
//!   matches exactly that list (or is `None`);
//! - a player is rostered into the world at most once;
//! - adjacency is directional; [`World::connect_duplex`] is the only
//!   operation that establishes symmetry.
//!
//! The `World` deliberately has no interior mutability and no lock: the tick
//! dispatcher owns it, and single-writer discipline falls out of ownership.

mod direction;
mod entity;
mod error;
mod flags;
mod world;

pub use direction::Direction;
pub use entity::{Mob, MobBehavior, MobId, Object, ObjectId, Player, PlayerId, Room, RoomId};
pub use error::WorldError;
pub use flags::PlayerFlags;
pub use world::World;
