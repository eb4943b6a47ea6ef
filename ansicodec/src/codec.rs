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

use std::borrow::Cow;

/// A token recognized in the input stream.
enum Token {
    /// `$$`, the escape for a literal dollar.
    Escaped,
    /// `$name(#code)` with a 2-3 digit code.
    Function { fg: bool, code: u16 },
}

/// Replaces color tokens with ECMA-48 SGR escape sequences.
///
/// Valid tokens become `ESC [ <code> m`; tokens with an unknown function
/// name or an out-of-range code are deleted; `$$` becomes `$`. Returns the
/// input unchanged (and unallocated) when it contains no `$`.
pub fn encode(text: &str) -> Cow<'_, str> {
    if !text.contains('$') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(transform(text, true))
}

/// Removes every color token, `$$` escapes included.
///
/// Returns the input unchanged (and unallocated) when it contains no `$`.
pub fn strip(text: &str) -> Cow<'_, str> {
    if !text.contains('$') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(transform(text, false))
}

/// Doubles every `$` so arbitrary text can be embedded in tokenized output.
/// `encode(&escape(s)) == s` holds for any `s`.
pub fn escape(text: &str) -> String {
    text.replace('$', "$$")
}

fn transform(text: &str, emit: bool) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        match parse_token(&bytes[i..]) {
            Some((token, len)) => {
                // Token boundaries are ASCII, so slicing here is safe.
                out.push_str(&text[plain_start..i]);
                if emit {
                    match token {
                        Token::Escaped => out.push('$'),
                        Token::Function { fg, code } => {
                            if is_valid_color(fg, code) {
                                out.push_str(&format!("\x1b[{code}m"));
                            }
                        }
                    }
                }
                i += len;
                plain_start = i;
            }
            // A bare '$' that opens no token stays in the text.
            None => i += 1,
        }
    }

    out.push_str(&text[plain_start..]);
    out
}

/// Parses a token at the start of `bytes` (which begins with `$`), returning
/// the token and its total byte length.
fn parse_token(bytes: &[u8]) -> Option<(Token, usize)> {
    if bytes.get(1) == Some(&b'$') {
        return Some((Token::Escaped, 2));
    }

    let mut i = 1;
    while i < bytes.len() && bytes[i].is_ascii_lowercase() {
        i += 1;
    }
    if i == 1 || bytes.get(i) != Some(&b'(') {
        return None;
    }
    let name = &bytes[1..i];
    i += 1;
    if bytes.get(i) != Some(&b'#') {
        return None;
    }
    i += 1;

    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let digits = i - digits_start;
    if !(2..=3).contains(&digits) || bytes.get(i) != Some(&b')') {
        return None;
    }

    let mut code: u16 = 0;
    for &digit in &bytes[digits_start..i] {
        code = code * 10 + u16::from(digit - b'0');
    }

    Some((
        Token::Function {
            fg: name == b"fg",
            code: if name == b"fg" || name == b"bg" {
                code
            } else {
                // Unknown function names are deleted on encode; an
                // impossible code keeps them out of the valid ranges.
                u16::MAX
            },
        },
        i + 1,
    ))
}

fn is_valid_color(fg: bool, code: u16) -> bool {
    if fg {
        matches!(code, 30..=37 | 90..=97)
    } else {
        matches!(code, 40..=47 | 100..=107)
    }
}
