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

//! Input queue behavior: admission control, fairness, continuations,
//! termination and message routing.

use runemud_command::{Command, CommandContext, CommandError, CommandResult, TextMessage};
use runemud_server::{
    EchoState, InputQueue, PlayerEvent, PlayerInput, PlayerOutput, SessionError, normal_prompt,
};
use runemud_world::{PlayerId, World};
use std::collections::VecDeque;
use tokio::sync::mpsc;

/// A command whose results are scripted in advance, one per execution.
#[derive(Debug)]
struct ScriptedCommand {
    results: VecDeque<CommandResult>,
}

impl ScriptedCommand {
    fn new(results: Vec<CommandResult>) -> Box<dyn Command> {
        Box::new(ScriptedCommand {
            results: results.into(),
        })
    }
}

impl Command for ScriptedCommand {
    fn execute(
        &mut self,
        _context: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        Ok(self.results.pop_front().unwrap_or_default())
    }
}

struct Sinks {
    output_tx: mpsc::Sender<PlayerOutput>,
    output_rx: mpsc::Receiver<PlayerOutput>,
    error_tx: mpsc::Sender<SessionError>,
    error_rx: mpsc::Receiver<SessionError>,
}

fn sinks() -> Sinks {
    let (output_tx, output_rx) = mpsc::channel(64);
    let (error_tx, error_rx) = mpsc::channel(64);
    Sinks {
        output_tx,
        output_rx,
        error_tx,
        error_rx,
    }
}

fn text_input(player: PlayerId, text: &str, sinks: &Sinks) -> PlayerInput {
    PlayerInput::from_text(text, player, sinks.output_tx.clone(), sinks.error_tx.clone())
}

fn drain_outputs(rx: &mut mpsc::Receiver<PlayerOutput>) -> Vec<PlayerOutput> {
    let mut outputs = Vec::new();
    while let Ok(output) = rx.try_recv() {
        outputs.push(output);
    }
    outputs
}

fn drain_errors(rx: &mut mpsc::Receiver<SessionError>) -> Vec<SessionError> {
    let mut errors = Vec::new();
    while let Ok(error) = rx.try_recv() {
        errors.push(error);
    }
    errors
}

#[test]
fn normal_prompt_shows_vitals() {
    let mut world = World::new();
    let player = PlayerId::new(1);
    {
        let state = world.create_player(player).unwrap();
        state.health = 103;
        state.mana = 43;
    }
    assert_eq!(
        normal_prompt(&world, player),
        "$fg(#96)[H:103] [M:43] > $fg(#37)"
    );
}

#[tokio::test]
async fn player_limit_is_respected() {
    let mut world = World::new();
    let mut queue = InputQueue::new(1, 1);
    let first = sinks();
    let mut second = sinks();

    queue
        .append(text_input(PlayerId::new(1), "cmd", &first), &mut world)
        .await;
    queue
        .append(text_input(PlayerId::new(2), "cmd", &second), &mut world)
        .await;

    assert_eq!(queue.player_count(), 1);
    assert_eq!(drain_errors(&mut second.error_rx), [SessionError::TooManyPlayers]);
    // The refused player never got a world entity either.
    assert!(!world.contains_player(PlayerId::new(2)));
}

#[tokio::test]
async fn player_input_limit_is_respected() {
    let mut world = World::new();
    let mut queue = InputQueue::new(1, 1);
    let mut s = sinks();
    let player = PlayerId::new(1);

    queue.append(text_input(player, "cmd 1", &s), &mut world).await;
    queue.append(text_input(player, "cmd 2", &s), &mut world).await;

    assert_eq!(queue.queue_depth(player), 1);
    assert_eq!(drain_errors(&mut s.error_rx), [SessionError::TooMuchInput]);
}

#[tokio::test]
async fn flood_of_25_inputs_rejects_5() {
    let mut world = World::new();
    let mut queue = InputQueue::new(100, 20);
    let mut s = sinks();
    let player = PlayerId::new(1);

    for n in 0..25 {
        queue
            .append(text_input(player, &format!("cmd {n}"), &s), &mut world)
            .await;
    }

    assert_eq!(queue.queue_depth(player), 20);
    let errors = drain_errors(&mut s.error_rx);
    assert_eq!(errors.len(), 5);
    assert!(errors.iter().all(|e| *e == SessionError::TooMuchInput));
}

#[tokio::test]
async fn exited_event_is_admitted_even_when_the_queue_is_full() {
    let mut world = World::new();
    let mut queue = InputQueue::new(1, 1);
    let s = sinks();
    let player = PlayerId::new(1);

    queue.append(text_input(player, "cmd", &s), &mut world).await;
    let exit = PlayerInput::from_event(
        PlayerEvent::Exited,
        player,
        s.output_tx.clone(),
        s.error_tx.clone(),
    );
    queue.append(exit, &mut world).await;

    assert_eq!(queue.queue_depth(player), 2);
}

#[tokio::test]
async fn one_input_per_player_per_tick() {
    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let mut all_sinks = Vec::new();

    for n in 1..=3u64 {
        let s = sinks();
        let player = PlayerId::new(n);
        for i in 0..3 {
            queue
                .append(text_input(player, &format!("line {i}"), &s), &mut world)
                .await;
        }
        all_sinks.push(s);
    }

    for expected_depth in [2usize, 1, 0] {
        queue.execute(&mut world).await;
        for n in 1..=3u64 {
            assert_eq!(
                queue.queue_depth(PlayerId::new(n)),
                expected_depth,
                "after draining to {expected_depth}"
            );
        }
    }
}

#[tokio::test]
async fn seed_command_executes_and_prompts() {
    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let mut s = sinks();
    let player = PlayerId::new(1);

    let command = ScriptedCommand::new(vec![CommandResult::with_output("hello")]);
    let input =
        PlayerInput::from_command(command, player, s.output_tx.clone(), s.error_tx.clone());
    queue.append(input, &mut world).await;
    queue.execute(&mut world).await;

    let outputs = drain_outputs(&mut s.output_rx);
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].text, "hello\n");
    assert_eq!(outputs[1].text, normal_prompt(&world, player));
}

#[tokio::test]
async fn continuation_receives_following_inputs() {
    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let mut s = sinks();
    let player = PlayerId::new(1);

    let command = ScriptedCommand::new(vec![
        CommandResult::continue_with_prompt("More? "),
        CommandResult::with_output("done"),
    ]);
    let input =
        PlayerInput::from_command(command, player, s.output_tx.clone(), s.error_tx.clone());
    queue.append(input, &mut world).await;
    queue.execute(&mut world).await;

    assert!(queue.has_current_command(player));
    let outputs = drain_outputs(&mut s.output_rx);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].text, "More? ");

    // The next input goes to the same instance. The text would parse as no
    // known command; reaching the scripted result proves the continuation
    // was preferred over the parser.
    queue.append(text_input(player, "anything", &s), &mut world).await;
    queue.execute(&mut world).await;

    assert!(!queue.has_current_command(player));
    let outputs = drain_outputs(&mut s.output_rx);
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].text, "done\n");
    assert_eq!(outputs[1].text, normal_prompt(&world, player));
}

#[tokio::test]
async fn termination_sends_exactly_one_player_quit() {
    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let mut s = sinks();
    let player = PlayerId::new(1);

    let command = ScriptedCommand::new(vec![CommandResult {
        output: String::from("Bye!"),
        termination_requested: true,
        ..CommandResult::default()
    }]);
    let input =
        PlayerInput::from_command(command, player, s.output_tx.clone(), s.error_tx.clone());
    queue.append(input, &mut world).await;
    queue.execute(&mut world).await;

    assert_eq!(drain_errors(&mut s.error_rx), [SessionError::PlayerQuit]);
    assert!(!queue.has_current_command(player));
    // Output was written, but no prompt follows a termination.
    let outputs = drain_outputs(&mut s.output_rx);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].text, "Bye!\n");
}

#[tokio::test]
async fn text_message_routes_blank_line_text_prompt() {
    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let sender_sinks = sinks();
    let mut recipient_sinks = sinks();
    let sender = PlayerId::new(1);
    let recipient = PlayerId::new(2);

    // The recipient needs a live queue to be reachable.
    queue
        .append(text_input(recipient, "", &recipient_sinks), &mut world)
        .await;
    queue.execute(&mut world).await;
    let _ = drain_outputs(&mut recipient_sinks.output_rx);

    let command = ScriptedCommand::new(vec![CommandResult {
        text_messages: vec![TextMessage {
            recipient,
            text: String::from("alice tells you: hi"),
        }],
        ..CommandResult::default()
    }]);
    let input = PlayerInput::from_command(
        command,
        sender,
        sender_sinks.output_tx.clone(),
        sender_sinks.error_tx.clone(),
    );
    queue.append(input, &mut world).await;
    queue.execute(&mut world).await;

    let outputs = drain_outputs(&mut recipient_sinks.output_rx);
    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs[0].text, "\n");
    assert_eq!(outputs[1].text, "alice tells you: hi\n");
    assert_eq!(outputs[2].text, normal_prompt(&world, recipient));
}

#[tokio::test]
async fn text_message_to_unknown_recipient_is_dropped() {
    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let mut s = sinks();
    let sender = PlayerId::new(1);

    let command = ScriptedCommand::new(vec![CommandResult {
        text_messages: vec![TextMessage {
            recipient: PlayerId::new(99),
            text: String::from("into the void"),
        }],
        ..CommandResult::default()
    }]);
    let input =
        PlayerInput::from_command(command, sender, s.output_tx.clone(), s.error_tx.clone());
    queue.append(input, &mut world).await;
    queue.execute(&mut world).await;

    // Not an error; the sender still gets their prompt.
    assert!(drain_errors(&mut s.error_rx).is_empty());
    let outputs = drain_outputs(&mut s.output_rx);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].text, normal_prompt(&world, sender));
}

#[tokio::test]
async fn exited_event_removes_player_and_queue() {
    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let s = sinks();
    let player = PlayerId::new(1);

    queue.append(text_input(player, "", &s), &mut world).await;
    assert!(world.contains_player(player));
    assert_eq!(queue.player_count(), 1);

    let exit = PlayerInput::from_event(
        PlayerEvent::Exited,
        player,
        s.output_tx.clone(),
        s.error_tx.clone(),
    );
    queue.append(exit, &mut world).await;
    queue.execute(&mut world).await; // consumes the pending blank input
    queue.execute(&mut world).await; // consumes the exit event

    assert_eq!(queue.player_count(), 0);
    assert!(!world.contains_player(player));
}

#[tokio::test]
async fn parse_failure_reports_error_then_prompt() {
    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let mut s = sinks();
    let player = PlayerId::new(1);

    queue.append(text_input(player, "xyzzy", &s), &mut world).await;
    queue.execute(&mut world).await;

    let outputs = drain_outputs(&mut s.output_rx);
    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].text.starts_with("$fg(#31)Error: "));
    assert!(outputs[0].text.ends_with('\n'));
    assert_eq!(outputs[1].text, normal_prompt(&world, player));
}

#[tokio::test]
async fn command_error_is_shown_then_prompt_rules_apply() {
    #[derive(Debug)]
    struct FailingCommand;
    impl Command for FailingCommand {
        fn execute(
            &mut self,
            _context: &mut CommandContext<'_>,
        ) -> Result<CommandResult, CommandError> {
            Err(CommandError::new("You can't do that."))
        }
    }

    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let mut s = sinks();
    let player = PlayerId::new(1);

    let input = PlayerInput::from_command(
        Box::new(FailingCommand),
        player,
        s.output_tx.clone(),
        s.error_tx.clone(),
    );
    queue.append(input, &mut world).await;
    queue.execute(&mut world).await;

    let outputs = drain_outputs(&mut s.output_rx);
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].text, "$fg(#31)You can't do that.\n");
    assert_eq!(outputs[1].text, normal_prompt(&world, player));
    assert!(!queue.has_current_command(player));
}

#[tokio::test]
async fn echo_changes_follow_the_prompt() {
    let mut world = World::new();
    let mut queue = InputQueue::new(10, 10);
    let mut s = sinks();
    let player = PlayerId::new(1);

    let command = ScriptedCommand::new(vec![CommandResult {
        prompt: String::from("Password: "),
        turn_off_echo: true,
        ..CommandResult::default()
    }]);
    let input =
        PlayerInput::from_command(command, player, s.output_tx.clone(), s.error_tx.clone());
    queue.append(input, &mut world).await;
    queue.execute(&mut world).await;

    let outputs = drain_outputs(&mut s.output_rx);
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].text, "Password: ");
    assert!(outputs[1].text.is_empty());
    assert_eq!(outputs[1].echo_state, EchoState::Off);
}
