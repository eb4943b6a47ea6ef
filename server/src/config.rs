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

//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration.
///
/// # Example
///
/// ```
/// use runemud_server::ServerConfig;
/// use std::time::Duration;
///
/// let config = ServerConfig::default()
///     .with_max_players(200)
///     .with_tick(Duration::from_millis(50));
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    pub bind_address: SocketAddr,

    /// Maximum number of simultaneous players. Admission control refuses
    /// the connection beyond this.
    pub max_players: usize,

    /// Maximum pending inputs per player. Inputs beyond this are dropped
    /// with a warning to the player.
    pub max_player_input_queue: usize,

    /// The scheduler quantum: each player advances at most one input per
    /// tick.
    pub tick: Duration,

    /// How long a graceful shutdown waits for sessions to finish.
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".parse().expect("static address parses"),
            max_players: 100,
            max_player_input_queue: 20,
            tick: Duration::from_millis(100),
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Create a configuration with the given bind address and default
    /// limits.
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            ..Default::default()
        }
    }

    /// Set the maximum number of simultaneous players.
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Set the per-player pending input cap.
    pub fn with_max_player_input_queue(mut self, max: usize) -> Self {
        self.max_player_input_queue = max;
        self
    }

    /// Set the tick duration.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set the graceful shutdown timeout.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}
