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

//! TELNET protocol constants (RFC 854 and friends).

/// Subnegotiation end.
pub const SE: u8 = 240;
/// No operation.
pub const NOP: u8 = 241;
/// Data mark, end of urgent data stream.
pub const DM: u8 = 242;
/// Break.
pub const BRK: u8 = 243;
/// Interrupt process.
pub const IP: u8 = 244;
/// Abort output.
pub const AO: u8 = 245;
/// Are you there.
pub const AYT: u8 = 246;
/// Erase character.
pub const EC: u8 = 247;
/// Erase line.
pub const EL: u8 = 248;
/// Go ahead.
pub const GA: u8 = 249;
/// Subnegotiation begin.
pub const SB: u8 = 250;

/// Option negotiation: sender wants to enable an option on its side.
pub const WILL: u8 = 251;
/// Option negotiation: sender refuses an option on its side.
pub const WONT: u8 = 252;
/// Option negotiation: sender asks the peer to enable an option.
pub const DO: u8 = 253;
/// Option negotiation: sender asks the peer to disable an option.
pub const DONT: u8 = 254;

/// Interpret As Command, the escape byte for everything above.
pub const IAC: u8 = 255;

/// First basic (two-byte) command code.
pub const FIRST_COMMAND: u8 = SE;
/// Last basic (two-byte) command code. `SB` itself opens a subnegotiation
/// and is handled before this range is consulted.
pub const LAST_COMMAND: u8 = SB;

/// First option-negotiation verb.
pub const FIRST_OPTION_VERB: u8 = WILL;
/// Last option-negotiation verb.
pub const LAST_OPTION_VERB: u8 = DONT;

/// TELNET option codes the server knows about.
pub mod option {
    /// Binary transmission (RFC 856).
    pub const TRANSMIT_BINARY: u8 = 0;
    /// Echo (RFC 857).
    pub const ECHO: u8 = 1;
    /// Suppress go-ahead (RFC 858).
    pub const SUPPRESS_GO_AHEAD: u8 = 3;
    /// Terminal type (RFC 1091).
    pub const TERMINAL_TYPE: u8 = 24;
    /// Negotiate about window size (RFC 1073).
    pub const NAWS: u8 = 31;
}

/// TERMINAL-TYPE subnegotiation sub-commands (RFC 1091).
pub mod termtype {
    /// The payload carries the terminal name.
    pub const IS: u8 = 0;
    /// Request that the peer send its terminal name.
    pub const SEND: u8 = 1;
}
