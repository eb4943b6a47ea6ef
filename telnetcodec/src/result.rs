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

//! Error types for the TELNET wire layer.

use thiserror::Error;

/// Result type for codec and connection operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// TELNET wire layer error types.
#[derive(Debug, Error)]
pub enum CodecError {
    /// I/O error from the underlying TCP stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the connection.
    #[error("connection closed")]
    ConnectionClosed,
}

impl CodecError {
    /// Check whether the error means the peer went away rather than that
    /// something on our side misbehaved.
    pub fn is_disconnect(&self) -> bool {
        match self {
            CodecError::ConnectionClosed => true,
            CodecError::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
        }
    }
}
