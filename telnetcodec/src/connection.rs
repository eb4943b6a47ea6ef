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

//! Line-oriented TELNET connection on top of [`TelnetCodec`].
//!
//! A wrapped connection splits into a [`TelnetReader`] and a
//! [`TelnetWriter`] so that one task can sit in `read_line` while another
//! writes. Protocol sequences encountered while reading are delivered to the
//! observer as they are scanned, before the line they interrupt completes.

use crate::{CodecError, CodecResult, TelnetCodec, TelnetEvent, TelnetFrame, consts};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::trace;

/// Observer for in-band protocol traffic.
///
/// The reader owns the decoder, so observer callbacks run on the reader's
/// task. Implementations that share state with other tasks (the usual case:
/// a terminal-capability flag read by the writer side) should keep it in
/// atomics.
pub trait TelnetConnectionObserver: Send + Sync {
    /// A complete, valid protocol sequence was received.
    fn command_received(&self, command: &[u8]);

    /// `IAC` followed by a byte that is not a recognized command.
    fn invalid_command(&self, data: &[u8]);
}

/// An observer that ignores everything. Handy for tests and probes.
pub struct NullTelnetObserver;

impl TelnetConnectionObserver for NullTelnetObserver {
    fn command_received(&self, _command: &[u8]) {}
    fn invalid_command(&self, _data: &[u8]) {}
}

/// A TELNET connection over an accepted TCP stream.
pub struct TelnetConnection {
    reader: TelnetReader,
    writer: TelnetWriter,
}

impl TelnetConnection {
    /// Wrap a TCP stream, attaching the observer to the read side.
    pub fn wrap(socket: TcpStream, observer: Arc<dyn TelnetConnectionObserver>) -> Self {
        let (read_half, write_half) = socket.into_split();
        Self {
            reader: TelnetReader {
                framed: FramedRead::new(read_half, TelnetCodec::new()),
                observer,
            },
            writer: TelnetWriter {
                framed: FramedWrite::new(write_half, TelnetCodec::new()),
            },
        }
    }

    /// Split into independently owned read and write sides.
    pub fn split(self) -> (TelnetReader, TelnetWriter) {
        (self.reader, self.writer)
    }
}

/// Read side of a [`TelnetConnection`].
pub struct TelnetReader {
    framed: FramedRead<OwnedReadHalf, TelnetCodec>,
    observer: Arc<dyn TelnetConnectionObserver>,
}

impl TelnetReader {
    /// Read one logical line.
    ///
    /// Consumes data bytes until `\n`, discarding `\r`, so CR LF, LF CR and
    /// bare LF line endings all work. Protocol sequences encountered along
    /// the way go to the observer and do not appear in the line. Fails with
    /// [`CodecError::ConnectionClosed`] on EOF.
    pub async fn read_line(&mut self) -> CodecResult<String> {
        let mut line: Vec<u8> = Vec::with_capacity(50);
        loop {
            match self.framed.next().await {
                None => return Err(CodecError::ConnectionClosed),
                Some(Err(err)) => return Err(err),
                Some(Ok(TelnetEvent::Data(b'\r'))) => continue,
                Some(Ok(TelnetEvent::Data(b'\n'))) => {
                    return Ok(String::from_utf8_lossy(&line).into_owned());
                }
                Some(Ok(TelnetEvent::Data(byte))) => line.push(byte),
                Some(Ok(TelnetEvent::Command(command))) => {
                    trace!(?command, "protocol sequence received");
                    self.observer.command_received(&command);
                }
                Some(Ok(TelnetEvent::InvalidCommand(data))) => {
                    self.observer.invalid_command(&data);
                }
            }
        }
    }
}

/// Write side of a [`TelnetConnection`]. Every write flushes.
pub struct TelnetWriter {
    framed: FramedWrite<OwnedWriteHalf, TelnetCodec>,
}

impl TelnetWriter {
    /// Write text followed by CR LF.
    pub async fn write_line(&mut self, line: &str) -> CodecResult<()> {
        self.framed.send(line).await?;
        self.framed.send("\r\n").await
    }

    /// Write text exactly as given, with IAC escaping only.
    pub async fn write_string(&mut self, text: &str) -> CodecResult<()> {
        self.framed.send(text).await
    }

    /// Write raw bytes, with IAC escaping only.
    pub async fn write_bytes(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.framed.send(bytes).await
    }

    /// Tell the client to resume local echo: `IAC WONT ECHO 0`.
    pub async fn echo_on(&mut self) -> CodecResult<()> {
        self.framed.send(TelnetFrame::Wont(consts::option::ECHO)).await?;
        self.framed.send(TelnetFrame::Data(0)).await
    }

    /// Tell the client to stop local echo: `IAC WILL ECHO 0`. Used while a
    /// player types a password.
    pub async fn echo_off(&mut self) -> CodecResult<()> {
        self.framed.send(TelnetFrame::Will(consts::option::ECHO)).await?;
        self.framed.send(TelnetFrame::Data(0)).await
    }

    /// Ask the client for its terminal type so capability is known before
    /// the first prompt: `IAC DO TERMINAL-TYPE`, then
    /// `IAC SB TERMINAL-TYPE SEND IAC SE`.
    pub async fn query_terminal(&mut self) -> CodecResult<()> {
        self.framed
            .send(TelnetFrame::Do(consts::option::TERMINAL_TYPE))
            .await?;
        self.framed
            .send(TelnetFrame::Subnegotiate(
                consts::option::TERMINAL_TYPE,
                vec![consts::termtype::SEND],
            ))
            .await
    }

    /// Shut down the write side. Everything already sent has been flushed,
    /// since every write flushes.
    pub async fn close(&mut self) -> CodecResult<()> {
        self.framed.get_mut().shutdown().await?;
        Ok(())
    }
}
