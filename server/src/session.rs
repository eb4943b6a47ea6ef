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

//! The per-connection session runtime.
//!
//! Each session isolates the dispatcher from every blocking network call: a
//! line-reader task sits in `read_line`, the session's select loop forwards
//! lines inbound and writes dispatcher output back out, and teardown always
//! ends with an `Exited` event so the world entry is reclaimed.

use crate::types::{EchoState, PlayerEvent, PlayerInput, PlayerOutput};
use crate::SessionError;
use runemud_command::commands::LoginCommand;
use runemud_telnetcodec::{
    CodecResult, TelnetConnection, TelnetConnectionObserver, TelnetWriter, consts,
};
use runemud_world::PlayerId;
use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

const OUTPUT_CHANNEL_CAPACITY: usize = 10;

/// Observer that watches TERMINAL-TYPE answers to learn whether the client
/// can render ANSI color.
pub(crate) struct SessionObserver {
    ansi_capable: AtomicBool,
}

impl SessionObserver {
    fn new() -> Self {
        Self {
            ansi_capable: AtomicBool::new(false),
        }
    }

    fn is_ansi_capable(&self) -> bool {
        self.ansi_capable.load(Ordering::Relaxed)
    }
}

impl TelnetConnectionObserver for SessionObserver {
    fn command_received(&self, command: &[u8]) {
        // IAC SB TERMINAL-TYPE IS <name...> <terminator>: the name sits
        // between the fixed header and the final two bytes.
        if command.len() > 4
            && command[0] == consts::IAC
            && command[1] == consts::SB
            && command[2] == consts::option::TERMINAL_TYPE
            && command[3] == consts::termtype::IS
        {
            let name = String::from_utf8_lossy(&command[4..command.len() - 2]).to_lowercase();
            debug!(terminal = %name, "terminal type received");
            if name.contains("xterm") || name.contains("ansi") {
                self.ansi_capable.store(true, Ordering::Relaxed);
            }
        }
    }

    fn invalid_command(&self, data: &[u8]) {
        warn!(?data, "invalid TELNET command received");
    }
}

/// Run one connection to completion.
pub(crate) async fn handle_connection(
    socket: TcpStream,
    player: PlayerId,
    inbound: mpsc::Sender<PlayerInput>,
    mut stop: watch::Receiver<bool>,
) {
    let (output_tx, mut output_rx) = mpsc::channel::<PlayerOutput>(OUTPUT_CHANNEL_CAPACITY);
    let (error_tx, mut error_rx) = mpsc::channel::<SessionError>(1);
    let (line_tx, mut line_rx) = mpsc::channel::<CodecResult<String>>(1);

    let observer = Arc::new(SessionObserver::new());
    let (mut reader, mut writer) = TelnetConnection::wrap(socket, observer.clone()).split();

    // Learn the terminal capability before the first prompt goes out.
    if let Err(err) = writer.query_terminal().await {
        warn!(%err, "failed to query terminal type");
        return;
    }

    // The bootstrapping command: login.
    let seed = PlayerInput::from_command(
        LoginCommand::new(),
        player,
        output_tx.clone(),
        error_tx.clone(),
    );
    if inbound.send(seed).await.is_err() {
        return;
    }

    // The line reader is the only task that ever reads this connection.
    let reader_task = tokio::spawn(async move {
        loop {
            let result = reader.read_line().await;
            let failed = result.is_err();
            if line_tx.send(result).await.is_err() || failed {
                return;
            }
        }
    });

    let mut finished = false;
    let mut stopped = false;
    while !finished && !stopped {
        tokio::select! {
            maybe_line = line_rx.recv() => match maybe_line {
                None => finished = true,
                Some(Ok(line)) => {
                    let input = PlayerInput::from_text(
                        line.trim(),
                        player,
                        output_tx.clone(),
                        error_tx.clone(),
                    );
                    if inbound.send(input).await.is_err() {
                        finished = true;
                    }
                }
                Some(Err(err)) => {
                    if err.is_disconnect() {
                        info!("disconnecting client");
                    } else {
                        warn!(%err, "error reading from player connection");
                    }
                    finished = true;
                }
            },
            maybe_output = output_rx.recv() => {
                if let Some(output) = maybe_output {
                    if write_output(&mut writer, &observer, &output).await.is_err() {
                        finished = true;
                    }
                }
            },
            maybe_error = error_rx.recv() => {
                if let Some(error) = maybe_error {
                    match error {
                        SessionError::PlayerQuit => {}
                        SessionError::TooManyPlayers => {
                            let _ = writer
                                .write_line("Too many players connected, please try again later.")
                                .await;
                        }
                        SessionError::TooMuchInput => {
                            let _ = writer
                                .write_line(
                                    "Input limit reached, please back off with commands for a while.",
                                )
                                .await;
                        }
                    }
                    if error.is_fatal() {
                        finished = true;
                    }
                }
            },
            _ = stop.changed() => {
                let _ = writer.write_line("Shutting down server...").await;
                stopped = true;
            }
        }
    }

    // Deliver whatever the dispatcher already produced (a quit farewell, for
    // instance) before the connection goes away.
    while let Ok(output) = output_rx.try_recv() {
        if write_output(&mut writer, &observer, &output).await.is_err() {
            break;
        }
    }

    let exit = PlayerInput::from_event(
        PlayerEvent::Exited,
        player,
        output_tx.clone(),
        error_tx.clone(),
    );
    let _ = inbound.send(exit).await;

    // Close the connection first; the reader wakes with an error and ends.
    reader_task.abort();
    let _ = reader_task.await;
    let _ = writer.close().await;
    debug!("session finished");
}

/// Apply the output transform chain and put the result on the wire.
///
/// Three fixed transforms, in order: raw output passes untouched; without
/// ANSI capability the color tokens are stripped; otherwise they are
/// encoded. Non-raw text gets LF normalized to CR LF, and a color reset
/// follows unless the output asked to keep its state.
async fn write_output(
    writer: &mut TelnetWriter,
    observer: &SessionObserver,
    output: &PlayerOutput,
) -> CodecResult<()> {
    if !output.text.is_empty() {
        if output.raw {
            writer.write_string(&output.text).await?;
        } else {
            let rendered: Cow<'_, str> = if observer.is_ansi_capable() {
                runemud_ansicodec::encode(&output.text)
            } else {
                runemud_ansicodec::strip(&output.text)
            };
            writer.write_string(&normalize_newlines(&rendered)).await?;
        }
        if !output.keep_color_state {
            writer
                .write_string(&runemud_ansicodec::encode("$fg(#37)$bg(#40)"))
                .await?;
        }
    }

    match output.echo_state {
        EchoState::On => writer.echo_on().await?,
        EchoState::Off => writer.echo_off().await?,
        EchoState::None => {}
    }
    Ok(())
}

/// The dispatcher emits bare LF; the wire speaks CR LF.
fn normalize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\n' {
            out.push('\r');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_normalization() {
        assert_eq!(normalize_newlines("a\nb\n"), "a\r\nb\r\n");
        assert_eq!(normalize_newlines("no newline"), "no newline");
        assert_eq!(normalize_newlines(""), "");
    }

    #[test]
    fn observer_detects_ansi_terminals() {
        let observer = SessionObserver::new();
        let mut command = vec![
            consts::IAC,
            consts::SB,
            consts::option::TERMINAL_TYPE,
            consts::termtype::IS,
        ];
        command.extend_from_slice(b"XTERM-256color");
        command.extend_from_slice(&[consts::IAC, consts::SE]);

        observer.command_received(&command);
        assert!(observer.is_ansi_capable());
    }

    #[test]
    fn observer_ignores_dumb_terminals() {
        let observer = SessionObserver::new();
        let mut command = vec![
            consts::IAC,
            consts::SB,
            consts::option::TERMINAL_TYPE,
            consts::termtype::IS,
        ];
        command.extend_from_slice(b"vt52");
        command.extend_from_slice(&[consts::IAC, consts::SE]);

        observer.command_received(&command);
        assert!(!observer.is_ansi_capable());
    }

    #[test]
    fn observer_ignores_unrelated_commands() {
        let observer = SessionObserver::new();
        observer.command_received(&[consts::IAC, consts::WILL, consts::option::ECHO]);
        assert!(!observer.is_ansi_capable());
    }
}
