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

//! # RuneMUD ANSI Token Codec
//!
//! Server-generated text embeds color tokens rather than raw escape
//! sequences, so output can be rendered or stripped per client capability at
//! the last moment:
//!
//! - `$fg(#NN)` — foreground color, valid for 30–37 and 90–97
//! - `$bg(#NNN)` — background color, valid for 40–47 and 100–107
//! - `$$` — a literal dollar sign
//!
//! [`encode`] replaces valid tokens with ECMA-48 SGR escapes and deletes
//! unknown ones; [`strip`] deletes every token including `$$` escapes;
//! [`escape`] makes arbitrary text safe for embedding. A `$` that does not
//! open a recognizable token passes through untouched.
//!
//! Both transforms short-circuit to a borrowed [`Cow`](std::borrow::Cow)
//! when the input contains no `$` at all, which is the overwhelmingly common
//! case for room text.

mod codec;

pub use codec::{encode, escape, strip};
