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

//! Command-line tokenization.

use thiserror::Error;

/// A tokenized input line: the verb and its arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// The verb, everything before the first whitespace.
    pub name: String,
    /// The arguments, with quoted segments kept whole.
    pub args: Vec<String>,
}

/// Tokenization error types.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A double-quoted segment was never closed.
    #[error("invalid command line")]
    InvalidCommandLine,
}

/// Split a line into verb and arguments.
///
/// The verb ends at the first space or tab. Arguments honor double-quoted
/// segments; a backslash-escaped quote stays inside its argument, escape
/// byte included.
pub fn parse_command_line(text: &str) -> Result<CommandLine, ParseError> {
    match text.find([' ', '\t']) {
        None => Ok(CommandLine {
            name: text.to_string(),
            args: Vec::new(),
        }),
        Some(end) => Ok(CommandLine {
            name: text[..end].to_string(),
            args: parse_args(text[end + 1..].trim())?,
        }),
    }
}

/// Split off the first `n` whitespace-delimited tokens and keep whatever
/// follows as one verbatim trailing element (leading whitespace removed,
/// interior whitespace intact). Commands like *tell* use this to forward a
/// payload exactly as the player typed it.
pub fn parse_arguments(text: &str, n: usize) -> Result<Vec<String>, ParseError> {
    let mut args = Vec::with_capacity(n + 1);
    let mut rest = text;
    for _ in 0..n {
        rest = rest.trim_start_matches([' ', '\t']);
        if rest.is_empty() {
            return Err(ParseError::InvalidCommandLine);
        }
        let end = rest.find([' ', '\t']).unwrap_or(rest.len());
        args.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    let tail = rest.trim_start_matches([' ', '\t']);
    if !tail.is_empty() {
        args.push(tail.to_string());
    }
    Ok(args)
}

fn parse_args(text: &str) -> Result<Vec<String>, ParseError> {
    let bytes = text.as_bytes();
    let mut args: Vec<String> = Vec::new();
    let mut start = 0usize;
    let mut inside_quotes = false;

    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' if !inside_quotes => {
                if i > start {
                    args.push(text[start..i].to_string());
                }
                start = i + 1;
            }
            b'"' => {
                if inside_quotes {
                    if bytes[i - 1] == b'\\' {
                        // Escaped quote, part of the argument.
                    } else {
                        args.push(text[start + 1..i].to_string());
                        start = i + 1;
                        inside_quotes = false;
                    }
                } else {
                    inside_quotes = true;
                    start = i;
                }
            }
            _ => {}
        }
        i += 1;
    }

    if i > start {
        if inside_quotes {
            return Err(ParseError::InvalidCommandLine);
        }
        args.push(text[start..i].to_string());
    }

    Ok(args)
}
