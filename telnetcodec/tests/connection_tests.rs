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

//! Connection-level tests over real loopback sockets.

use runemud_telnetcodec::{
    CodecError, NullTelnetObserver, TelnetConnection, TelnetConnectionObserver, consts,
};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Record every observer callback for later inspection.
struct RecordingObserver {
    commands: Mutex<Vec<Vec<u8>>>,
    invalid: Mutex<Vec<Vec<u8>>>,
}

impl RecordingObserver {
    fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            invalid: Mutex::new(Vec::new()),
        }
    }
}

impl TelnetConnectionObserver for RecordingObserver {
    fn command_received(&self, command: &[u8]) {
        self.commands.lock().unwrap().push(command.to_vec());
    }

    fn invalid_command(&self, data: &[u8]) {
        self.invalid.lock().unwrap().push(data.to_vec());
    }
}

/// An accepted server-side stream plus the client end that dialed it.
async fn socket_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accept = tokio::spawn(async move { listener.accept().await.unwrap().0 });
    let client = TcpStream::connect(addr).await.unwrap();
    let server = accept.await.unwrap();
    (server, client)
}

#[tokio::test]
async fn read_line_strips_line_endings() {
    let (server, mut client) = socket_pair().await;
    let (mut reader, _writer) = TelnetConnection::wrap(server, Arc::new(NullTelnetObserver)).split();

    client.write_all(b"first\r\nsecond\n").await.unwrap();

    assert_eq!(reader.read_line().await.unwrap(), "first");
    assert_eq!(reader.read_line().await.unwrap(), "second");
}

#[tokio::test]
async fn read_line_fails_on_eof() {
    let (server, client) = socket_pair().await;
    let (mut reader, _writer) = TelnetConnection::wrap(server, Arc::new(NullTelnetObserver)).split();

    drop(client);

    let err = reader.read_line().await.unwrap_err();
    assert!(err.is_disconnect(), "unexpected error: {err}");
}

#[tokio::test]
async fn protocol_sequences_route_to_observer() {
    let (server, mut client) = socket_pair().await;
    let observer = Arc::new(RecordingObserver::new());
    let (mut reader, _writer) = TelnetConnection::wrap(server, observer.clone()).split();

    // Negotiation and subnegotiation interleaved with a line of text.
    let mut bytes = vec![consts::IAC, consts::WILL, consts::option::TERMINAL_TYPE];
    bytes.extend_from_slice(b"he");
    bytes.extend_from_slice(&[
        consts::IAC,
        consts::SB,
        consts::option::TERMINAL_TYPE,
        consts::termtype::IS,
        b'a',
        consts::IAC,
        consts::SE,
    ]);
    bytes.extend_from_slice(b"llo\r\n");
    client.write_all(&bytes).await.unwrap();

    assert_eq!(reader.read_line().await.unwrap(), "hello");

    let commands = observer.commands.lock().unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands[0],
        vec![consts::IAC, consts::WILL, consts::option::TERMINAL_TYPE]
    );
    assert_eq!(
        commands[1],
        vec![
            consts::IAC,
            consts::SB,
            consts::option::TERMINAL_TYPE,
            consts::termtype::IS,
            b'a',
            consts::IAC,
            consts::SE,
        ]
    );
    assert!(observer.invalid.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_sequence_routes_to_observer() {
    let (server, mut client) = socket_pair().await;
    let observer = Arc::new(RecordingObserver::new());
    let (mut reader, _writer) = TelnetConnection::wrap(server, observer.clone()).split();

    client
        .write_all(&[consts::IAC, 0x02, b'o', b'k', b'\n'])
        .await
        .unwrap();

    assert_eq!(reader.read_line().await.unwrap(), "ok");
    assert_eq!(
        observer.invalid.lock().unwrap().as_slice(),
        &[vec![consts::IAC, 0x02]]
    );
}

#[tokio::test]
async fn escaped_iac_is_data() {
    let (server, mut client) = socket_pair().await;
    let (mut reader, _writer) = TelnetConnection::wrap(server, Arc::new(NullTelnetObserver)).split();

    client
        .write_all(&[b'a', consts::IAC, consts::IAC, b'b', b'\n'])
        .await
        .unwrap();

    // 0xFF is not valid UTF-8 on its own, so the lossy conversion shows the
    // replacement character; the surrounding bytes must be intact.
    let line = reader.read_line().await.unwrap();
    assert!(line.starts_with('a') && line.ends_with('b'));
}

#[tokio::test]
async fn write_line_appends_crlf() {
    let (server, mut client) = socket_pair().await;
    let (_reader, mut writer) = TelnetConnection::wrap(server, Arc::new(NullTelnetObserver)).split();

    writer.write_line("Hi").await.unwrap();

    let mut buf = [0u8; 4];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"Hi\r\n");
}

#[tokio::test]
async fn echo_sequences_on_the_wire() {
    let (server, mut client) = socket_pair().await;
    let (_reader, mut writer) = TelnetConnection::wrap(server, Arc::new(NullTelnetObserver)).split();

    writer.echo_off().await.unwrap();
    writer.echo_on().await.unwrap();

    let mut buf = [0u8; 8];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(
        buf,
        [
            consts::IAC,
            consts::WILL,
            consts::option::ECHO,
            0,
            consts::IAC,
            consts::WONT,
            consts::option::ECHO,
            0,
        ]
    );
}

#[tokio::test]
async fn terminal_query_on_the_wire() {
    let (server, mut client) = socket_pair().await;
    let (_reader, mut writer) = TelnetConnection::wrap(server, Arc::new(NullTelnetObserver)).split();

    writer.query_terminal().await.unwrap();

    let mut buf = [0u8; 9];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(
        buf,
        [
            consts::IAC,
            consts::DO,
            consts::option::TERMINAL_TYPE,
            consts::IAC,
            consts::SB,
            consts::option::TERMINAL_TYPE,
            consts::termtype::SEND,
            consts::IAC,
            consts::SE,
        ]
    );
}

#[tokio::test]
async fn write_transparency_round_trip() {
    let (server, mut client) = socket_pair().await;
    let (_reader, mut writer) = TelnetConnection::wrap(server, Arc::new(NullTelnetObserver)).split();

    let payload = [0x00, 0x7F, consts::IAC, b'x', consts::IAC, 0x10];
    writer.write_bytes(&payload).await.unwrap();

    // Two IACs in the payload means two extra escape bytes on the wire.
    let mut wire = vec![0u8; payload.len() + 2];
    client.read_exact(&mut wire).await.unwrap();

    let mut unescaped = Vec::new();
    let mut iter = wire.iter().copied();
    while let Some(byte) = iter.next() {
        if byte == consts::IAC {
            assert_eq!(iter.next(), Some(consts::IAC), "IAC must be doubled");
        }
        unescaped.push(byte);
    }
    assert_eq!(unescaped, payload);
}

#[tokio::test]
async fn closed_error_reports_io_kind() {
    let (server, _client) = socket_pair().await;
    let (_reader, mut writer) = TelnetConnection::wrap(server, Arc::new(NullTelnetObserver)).split();

    writer.close().await.unwrap();
    let err = writer.write_line("late").await.unwrap_err();
    assert!(matches!(err, CodecError::Io(_)));
}
