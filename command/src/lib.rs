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

//! # RuneMUD Commands
//!
//! Everything between a typed line and a world mutation:
//!
//! - [`parse_command_line`] / [`parse_arguments`] tokenize input, honoring
//!   double-quoted segments;
//! - [`parse_command`] prefix-matches the verb against an *ordered*
//!   catalogue — ordering is part of the contract, so `n` walks north even
//!   if a later verb shares the prefix;
//! - the [`Command`] trait and [`CommandResult`] form the uniform contract
//!   the tick dispatcher drives. A command that returns a non-empty prompt
//!   is a continuation: the dispatcher feeds it the player's next input
//!   until it completes, asks for termination, or errors. One `execute`
//!   call always runs to completion; there is no implicit suspension.
//!
//! The command set itself (login, quit, who, tell, movement, look, help)
//! lives in [`commands`].

mod catalog;
mod contract;
mod line;

pub mod commands;

pub use catalog::{CatalogEntry, CommandParseError, catalog_entries, find_entry, parse_command};
pub use contract::{Command, CommandContext, CommandError, CommandResult, TextMessage};
pub use line::{CommandLine, ParseError, parse_arguments, parse_command_line};
