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

//! The tick dispatcher: the cooperative scheduler that advances the world.
//!
//! One logical tick is `execute` on the input queue (at most one input per
//! player), then the mob behavior pass, then a sleep for whatever remains of
//! the tick. During the sleep the dispatcher stays responsive: inbound
//! inputs are appended as they arrive, and shutdown requests (signal,
//! handle, listener failure) interrupt it. The dispatcher owns the world;
//! nothing else ever touches it.

use crate::config::ServerConfig;
use crate::queue::InputQueue;
use crate::types::PlayerInput;
use runemud_world::{RoomId, World};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

pub(crate) struct TickDispatcher {
    world: World,
    queue: InputQueue,
    inbound: mpsc::Receiver<PlayerInput>,
    tick: Duration,
    shutdown_timeout: Duration,
}

impl TickDispatcher {
    pub(crate) fn new(
        world: World,
        config: &ServerConfig,
        inbound: mpsc::Receiver<PlayerInput>,
    ) -> Self {
        Self {
            world,
            queue: InputQueue::new(config.max_players, config.max_player_input_queue),
            inbound,
            tick: config.tick,
            shutdown_timeout: config.shutdown_timeout,
        }
    }

    /// Run ticks until a shutdown cause fires, then drain and join.
    ///
    /// `shutdown` is notified by the OS signal listener and by
    /// [`ShutdownHandle`](crate::ShutdownHandle); `listener_error` reports a
    /// failed accept loop; `stop` broadcasts the stop request to every
    /// session; `sessions_done` closes once every session task has dropped
    /// its guard.
    pub(crate) async fn run(
        mut self,
        shutdown: Arc<Notify>,
        mut listener_error: mpsc::Receiver<std::io::Error>,
        stop: watch::Sender<bool>,
        mut sessions_done: mpsc::Receiver<()>,
    ) {
        info!(tick = ?self.tick, "tick dispatcher running");
        loop {
            let tick_started = Instant::now();
            self.queue.execute(&mut self.world).await;
            self.run_mob_behaviors().await;

            // Sleep out the remainder of the tick; an overrun tick advances
            // immediately after a zero-length sleep.
            let remainder = self.tick.saturating_sub(tick_started.elapsed());
            let sleep = tokio::time::sleep(remainder);
            tokio::pin!(sleep);

            let finished = loop {
                tokio::select! {
                    _ = &mut sleep => break false,
                    maybe_input = self.inbound.recv() => match maybe_input {
                        Some(input) => self.queue.append(input, &mut self.world).await,
                        None => {
                            debug!("inbound channel closed");
                            break true;
                        }
                    },
                    _ = shutdown.notified() => {
                        info!("shutdown requested");
                        break true;
                    }
                    maybe_error = listener_error.recv() => {
                        if let Some(err) = maybe_error {
                            error!(%err, "listener failed");
                        }
                        break true;
                    }
                }
            };

            if finished {
                self.shutdown(stop, &mut sessions_done).await;
                return;
            }
        }
    }

    /// Graceful shutdown: broadcast the stop signal, keep servicing inbound
    /// `Exited` events, and wait (bounded) for every session to finish.
    async fn shutdown(&mut self, stop: watch::Sender<bool>, sessions_done: &mut mpsc::Receiver<()>) {
        info!("stopping sessions");
        let _ = stop.send(true);

        let deadline = tokio::time::sleep(self.shutdown_timeout);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                _ = &mut deadline => {
                    warn!("shutdown timed out waiting for sessions");
                    break;
                }
                maybe_done = sessions_done.recv() => {
                    if maybe_done.is_none() {
                        break;
                    }
                }
                maybe_input = self.inbound.recv() => match maybe_input {
                    Some(input) => self.queue.append(input, &mut self.world).await,
                    // Closed means the accept loop and every session are
                    // gone; nothing further can arrive.
                    None => break,
                }
            }
        }

        // Drain stragglers so every Exited event tears its player down.
        while let Ok(input) = self.inbound.try_recv() {
            self.queue.append(input, &mut self.world).await;
        }
        while self.queue.pending_inputs() > 0 {
            self.queue.execute(&mut self.world).await;
        }
        info!(
            remaining_players = self.queue.player_count(),
            "dispatcher stopped"
        );
        // Persistence would hook in here, once there is state worth saving.
    }

    /// Fire due mob behaviors and narrate them to the mob's room.
    async fn run_mob_behaviors(&mut self) {
        let now = std::time::Instant::now();
        for mob_id in self.world.mob_ids() {
            let mut narrations: Vec<(RoomId, String)> = Vec::new();
            if let Some(mob) = self.world.mob_mut(mob_id) {
                let Some(room) = mob.room() else { continue };
                let name = mob.name.clone();
                for behavior in &mut mob.behaviors {
                    if !behavior.due(now) {
                        continue;
                    }
                    behavior.last_acted = Some(now);
                    if rand::random::<f64>() < behavior.probability {
                        narrations.push((room, behavior.narrate(&name)));
                    }
                }
            }
            for (room, text) in narrations {
                self.queue.notify_room(&self.world, room, &text).await;
            }
        }
    }
}
