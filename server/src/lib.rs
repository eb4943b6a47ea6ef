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

//! # RuneMUD Server
//!
//! The concurrency core that mediates between many independent TELNET
//! sessions and a single-threaded game-state processor:
//!
//! - one **session task** per accepted connection, with a line-reader
//!   sub-task, an output writer, an error channel and cooperative shutdown;
//! - a per-player **input queue** with admission control (global player cap,
//!   per-player depth cap) and stateful command continuations
//!   ([`InputQueue`]);
//! - a **tick dispatcher** that, once per tick, drains at most one input per
//!   player against the world — the fairness guarantee that no player can
//!   preempt another's turn by flooding (internal, driven by
//!   [`MudServer::run`]).
//!
//! Every session funnels [`PlayerInput`]s into one inbound channel; the
//! dispatcher owns the [`World`](runemud_world::World) outright, so world
//! mutation needs no locking — ownership is the single-writer rule.

mod config;
mod dispatcher;
mod error;
mod queue;
mod server;
mod session;
mod types;

pub use config::ServerConfig;
pub use error::SessionError;
pub use queue::{InputQueue, normal_prompt};
pub use server::{MudServer, ShutdownHandle};
pub use types::{EchoState, PlayerEvent, PlayerInput, PlayerOutput};
