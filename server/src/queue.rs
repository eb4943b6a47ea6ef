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

//! Per-player input queues: admission control, fair draining and command
//! continuations.

use crate::types::{PlayerEvent, PlayerInput, PlayerOutput};
use crate::SessionError;
use runemud_command::{Command, CommandContext, CommandResult, parse_command};
use runemud_world::{PlayerFlags, PlayerId, RoomId, World};
use std::collections::{HashMap, VecDeque};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// One player's pending inputs plus continuation state.
struct PlayerQueue {
    inputs: VecDeque<PlayerInput>,
    /// The active multi-step command, re-entered on the player's next input.
    current_command: Option<Box<dyn Command>>,
    /// Latest known sinks for this player, refreshed on every append so
    /// cross-player messages always target the live session.
    output: mpsc::Sender<PlayerOutput>,
    error_return: mpsc::Sender<SessionError>,
}

impl PlayerQueue {
    fn new(output: mpsc::Sender<PlayerOutput>, error_return: mpsc::Sender<SessionError>) -> Self {
        Self {
            inputs: VecDeque::new(),
            current_command: None,
            output,
            error_return,
        }
    }
}

/// The dispatcher's view of every player's pending input.
pub struct InputQueue {
    queues: HashMap<PlayerId, PlayerQueue>,
    max_players: usize,
    max_player_input_queue: usize,
}

impl InputQueue {
    /// Create a queue with the given admission limits.
    pub fn new(max_players: usize, max_player_input_queue: usize) -> Self {
        Self {
            queues: HashMap::new(),
            max_players,
            max_player_input_queue,
        }
    }

    /// Number of player queues currently alive.
    pub fn player_count(&self) -> usize {
        self.queues.len()
    }

    /// Number of inputs pending for one player.
    pub fn queue_depth(&self, player: PlayerId) -> usize {
        self.queues
            .get(&player)
            .map_or(0, |queue| queue.inputs.len())
    }

    /// Total inputs pending across all players.
    pub fn pending_inputs(&self) -> usize {
        self.queues.values().map(|queue| queue.inputs.len()).sum()
    }

    /// Whether a continuation is waiting for this player's next input.
    pub fn has_current_command(&self, player: PlayerId) -> bool {
        self.queues
            .get(&player)
            .is_some_and(|queue| queue.current_command.is_some())
    }

    /// Admit an input to its player's queue.
    ///
    /// Admission rules, in order: a new queue is refused with
    /// [`SessionError::TooManyPlayers`] when the global cap is reached; an
    /// input that would overflow the per-player depth cap is refused with
    /// [`SessionError::TooMuchInput`] (the queue stays alive). Lifecycle
    /// events are exempt from the depth cap so teardown can never be
    /// dropped. Admitting the first input also creates the player's world
    /// entity.
    pub async fn append(&mut self, input: PlayerInput, world: &mut World) {
        if !self.queues.contains_key(&input.player) {
            if self.queues.len() + 1 > self.max_players {
                let _ = input.error_return.send(SessionError::TooManyPlayers).await;
                return;
            }
            if !world.contains_player(input.player) {
                // Cannot fail: contains_player was just checked.
                let _ = world.create_player(input.player);
            }
            self.queues.insert(
                input.player,
                PlayerQueue::new(input.output.clone(), input.error_return.clone()),
            );
        }

        let queue = match self.queues.get_mut(&input.player) {
            Some(queue) => queue,
            None => return,
        };
        if input.event == PlayerEvent::Nothing
            && queue.inputs.len() + 1 > self.max_player_input_queue
        {
            let _ = input.error_return.send(SessionError::TooMuchInput).await;
            return;
        }

        queue.output = input.output.clone();
        queue.error_return = input.error_return.clone();
        queue.inputs.push_back(input);
    }

    /// Process at most one input from every player queue.
    ///
    /// This is the fairness core: within one call, no queue advances more
    /// than one slot, so a flooding player cannot preempt anyone's turn.
    /// Iteration order across players is unspecified.
    pub async fn execute(&mut self, world: &mut World) {
        let players: Vec<PlayerId> = self.queues.keys().copied().collect();
        for player in players {
            let Some(queue) = self.queues.get_mut(&player) else {
                continue;
            };
            let Some(input) = queue.inputs.pop_front() else {
                continue;
            };

            if input.event != PlayerEvent::Nothing {
                self.handle_event(input, world);
                continue;
            }

            let output = queue.output.clone();
            let error_return = queue.error_return.clone();
            let current = queue.current_command.take();
            let PlayerInput {
                text,
                command: embedded,
                ..
            } = input;

            // Continuation first, then the seed command, then the parser.
            let mut command = match current.or(embedded) {
                Some(command) => command,
                None => {
                    if text.is_empty() {
                        let _ = output
                            .send(PlayerOutput::text(normal_prompt(world, player)))
                            .await;
                        continue;
                    }
                    let Some(player_state) = world.player(player) else {
                        warn!(%player, "input from a player with no world entity");
                        continue;
                    };
                    match parse_command(&text, player_state) {
                        Ok(parsed) => parsed,
                        Err(err) => {
                            let _ = output
                                .send(PlayerOutput::line(format!("$fg(#31)Error: {err}")))
                                .await;
                            let _ = output
                                .send(PlayerOutput::text(normal_prompt(world, player)))
                                .await;
                            continue;
                        }
                    }
                }
            };

            let result = {
                let mut context = CommandContext {
                    world: &mut *world,
                    player,
                    input: &text,
                };
                command.execute(&mut context)
            };
            let result = match result {
                Ok(result) => result,
                Err(err) => {
                    let _ = output
                        .send(PlayerOutput::line(format!("$fg(#31){err}")))
                        .await;
                    CommandResult::default()
                }
            };

            if !result.output.is_empty() {
                if result.output.ends_with('\n') {
                    let _ = output.send(PlayerOutput::text(result.output)).await;
                } else {
                    let _ = output.send(PlayerOutput::line(result.output)).await;
                }
            }

            if result.termination_requested {
                let _ = error_return.send(SessionError::PlayerQuit).await;
                if let Some(queue) = self.queues.get_mut(&player) {
                    queue.current_command = None;
                }
                continue;
            }

            if !result.prompt.is_empty() {
                // The command continues; its next input comes back here.
                let _ = output.send(PlayerOutput::text(result.prompt)).await;
                if let Some(queue) = self.queues.get_mut(&player) {
                    queue.current_command = Some(command);
                }
                if let Some(state) = world.player_mut(player) {
                    state.flags.set(PlayerFlags::BUSY);
                }
            } else {
                let _ = output
                    .send(PlayerOutput::text(normal_prompt(world, player)))
                    .await;
                if let Some(state) = world.player_mut(player) {
                    state.flags.clear(PlayerFlags::BUSY);
                }
            }

            for message in result.text_messages {
                match self.queues.get(&message.recipient) {
                    None => warn!(
                        recipient = %message.recipient,
                        sender = %player,
                        "dropping text message: recipient has no queue"
                    ),
                    Some(recipient_queue) => {
                        let recipient_output = recipient_queue.output.clone();
                        // Blank line to clear any partial prompt, the text,
                        // then the recipient's prompt again.
                        let _ = recipient_output.send(PlayerOutput::blank_line()).await;
                        let _ = recipient_output.send(PlayerOutput::line(message.text)).await;
                        let _ = recipient_output
                            .send(PlayerOutput::text(normal_prompt(world, message.recipient)))
                            .await;
                    }
                }
            }

            if result.turn_off_echo {
                let _ = output.send(PlayerOutput::echo_off()).await;
            } else if result.turn_on_echo {
                let _ = output.send(PlayerOutput::echo_on()).await;
            }
        }
    }

    /// Deliver a narration line to every player in a room, prompt refresh
    /// included. Used for mob behaviors.
    pub async fn notify_room(&self, world: &World, room: RoomId, text: &str) {
        let Some(room) = world.room(room) else {
            return;
        };
        for player in room.players() {
            if let Some(queue) = self.queues.get(player) {
                let _ = queue.output.send(PlayerOutput::blank_line()).await;
                let _ = queue.output.send(PlayerOutput::line(text)).await;
                let _ = queue
                    .output
                    .send(PlayerOutput::text(normal_prompt(world, *player)))
                    .await;
            }
        }
    }

    fn handle_event(&mut self, input: PlayerInput, world: &mut World) {
        match input.event {
            PlayerEvent::Exited => {
                debug!(player = %input.player, "player exited, removing from the world");
                world.destroy_player(input.player);
                self.queues.remove(&input.player);
            }
            PlayerEvent::Nothing => {}
        }
    }
}

/// The normal prompt: `[H:health] [M:mana] > ` in bright cyan, with the
/// foreground handed back to white for the player's own typing.
pub fn normal_prompt(world: &World, player: PlayerId) -> String {
    let (health, mana) = world
        .player(player)
        .map_or((0, 0), |state| (state.health, state.mana));
    format!("$fg(#96)[H:{health}] [M:{mana}] > $fg(#37)")
}
