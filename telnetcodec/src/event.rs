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

//! Events produced by the TELNET decoder.

///
/// `TelnetEvent` is what [`TelnetCodec`](crate::TelnetCodec) hands upward:
/// either one byte of user data, or one complete protocol sequence. Protocol
/// sequences are never split: a negotiation arrives as `[IAC, verb, option]`
/// and a subnegotiation arrives as the whole `[IAC, SB, .., SE]` run.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetEvent {
    /// One byte of user data. An escaped `IAC IAC` pair decodes to a single
    /// `Data(0xFF)`.
    Data(u8),
    /// A complete protocol sequence: `[IAC, cmd]` for basic commands,
    /// `[IAC, verb, option]` for WILL/WONT/DO/DONT, or the accumulated
    /// subnegotiation bytes including the leading `IAC SB` and trailing `SE`.
    Command(Vec<u8>),
    /// `[IAC, byte]` where `byte` is not a recognized command. No further
    /// bytes are consumed on behalf of the invalid sequence.
    InvalidCommand(Vec<u8>),
}
