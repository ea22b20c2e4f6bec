/*
 *  Calipers, a legality engine for four-player chess.
 *  Copyright (C) 2024 ToTheAnd
 *
 *  Calipers is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  Calipers is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with Calipers. If not, see <https://www.gnu.org/licenses/>.
 */
//! [`calipers`](crate) is a legality engine for four-player chess on a 14x14 board with the corners cut off.
//!
//! Given a board, the set of eliminated players, which kings and rooks have moved, and the live en passant targets,
//! it answers which moves are legal, whether a king is in check, and whether a player is checkmated or stalemated.
//! All engine functions are pure. [`Position`](games::four_player::Position) is a small game driver on top of them.
//!
//! The library emits [`tracing`] events but never installs a subscriber, that's up to the binary.

use clap::Parser;

use crate::cli::{CommandLineArgs, run};
use crate::general::common::Res;

/// The command line interface of the binary.
pub mod cli;
/// Anything related to the specific games, for now only four-player chess.
pub mod games;
/// Anything that doesn't fit into the other modules, such as low-level helper functions.
pub mod general;
/// Colored printing of boards and positions.
pub mod output;

pub use games::four_player;

pub fn run_program() -> Res<()> {
    let args = CommandLineArgs::parse();
    run(&args)
}
