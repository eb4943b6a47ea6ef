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

//! # RuneMUD Telnet Codec
//!
//! TELNET (RFC 854) wire layer for the RuneMUD server. The crate separates
//! in-band protocol escapes from user data while preserving stream semantics
//! across reads, and provides the line-oriented connection type the session
//! runtime is built on.
//!
//! ## Core Components
//!
//! ### [`TelnetCodec`]
//!
//! A stateful codec implementing the [`Decoder`] and [`Encoder`] traits from
//! `tokio_util::codec`. Decoding produces [`TelnetEvent`]s: user data bytes
//! and complete protocol sequences (commands, option negotiations and
//! subnegotiations, each delivered whole). Encoding doubles any outgoing
//! `IAC` (0xFF) byte so arbitrary data survives the wire.
//!
//! ### [`TelnetConnection`]
//!
//! Wraps an accepted [`TcpStream`](tokio::net::TcpStream) and splits it into
//! a [`TelnetReader`] (line-assembling `read_line`) and a [`TelnetWriter`]
//! (`write_line`/`write_string`, echo control, terminal-type query).
//! Protocol sequences scanned while reading are handed to a
//! [`TelnetConnectionObserver`] supplied at construction.
//!
//! The server side is deliberately passive: it never requires the peer to
//! negotiate anything, and the only sequences it emits on its own are the
//! terminal-type query and the `ECHO` toggles used during password entry.
//!
//! [`Decoder`]: tokio_util::codec::Decoder
//! [`Encoder`]: tokio_util::codec::Encoder

pub mod consts;

mod codec;
mod connection;
mod event;
mod result;

pub use codec::{TelnetCodec, TelnetFrame};
pub use connection::{
    NullTelnetObserver, TelnetConnection, TelnetConnectionObserver, TelnetReader, TelnetWriter,
};
pub use event::TelnetEvent;
pub use result::{CodecError, CodecResult};
