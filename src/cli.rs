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
use anyhow::{bail, ensure};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng, rng};
use std::str::FromStr;
use tracing::debug;

use crate::games::four_player::oracle::TurnOrder;
use crate::games::four_player::position::Position;
use crate::games::four_player::rules::Rules;
use crate::general::common::Res;
use crate::general::perft::{perft, split_perft};
use crate::general::squares::Square;
use crate::output::{pretty_board, pretty_position};

/// Legal moves, checks and eliminations for four-player chess.
#[derive(Parser, Debug)]
#[command(name = "Calipers", author = "ToTheAnd", version, about, long_about = None)]
pub struct CommandLineArgs {
    #[arg(value_enum, default_value_t = Mode::Show)]
    pub mode: Mode,
    /// Board in the text format: 14 rows separated by '/', cells separated by ','.
    /// Defaults to the start position.
    #[arg(short, long)]
    pub board: Option<String>,
    /// Like `rbyg` or `red,blue,yellow,green`.
    #[arg(short, long)]
    pub turn_order: Option<String>,
    /// Moves to play before anything else, such as "h2-h4 b7-d7".
    #[arg(short, long, default_value = "")]
    pub moves: String,
    #[arg(short, long, default_value_t = 3)]
    pub depth: usize,
    /// Only show the moves of the piece on this square.
    #[arg(short, long)]
    pub square: Option<String>,
    /// Seed for random games, chosen randomly if not set.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Maximum length of a random game.
    #[arg(long, default_value_t = 200)]
    pub plies: usize,
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, ValueEnum, Default, Debug)]
pub enum Mode {
    /// Print the position.
    #[default]
    Show,
    /// Count the leaves of the game tree.
    Perft,
    /// Perft, with the count for each move.
    SplitPerft,
    /// List the legal moves of the player to move, or of a single piece.
    Moves,
    /// Play random legal moves until the game ends.
    Random,
}

impl CommandLineArgs {
    pub fn rules(&self) -> Res<Rules> {
        let mut rules = Rules::default();
        if let Some(order) = &self.turn_order {
            rules = rules.with_turn_order(TurnOrder::from_text(order)?);
        }
        if let Some(board) = &self.board {
            rules = rules.with_startpos_text(board);
        }
        Ok(rules)
    }

    pub fn position(&self) -> Res<Position> {
        let rules = self.rules()?;
        debug!("using rules {rules}");
        Position::from_rules(&rules)?.play_moves(&self.moves)
    }
}

pub fn run(args: &CommandLineArgs) -> Res<()> {
    if args.no_color {
        colored::control::set_override(false);
    }
    let pos = args.position()?;
    match args.mode {
        Mode::Show => println!("{}", pretty_position(&pos, &[])),
        Mode::Perft => println!("{}", perft(args.depth, &pos)),
        Mode::SplitPerft => {
            ensure!(args.depth > 0, "Split perft needs a depth of at least 1");
            println!("{}", split_perft(args.depth, &pos));
        }
        Mode::Moves => show_moves(&pos, args.square.as_deref())?,
        Mode::Random => play_random(pos, args.seed, args.plies),
    }
    Ok(())
}

fn show_moves(pos: &Position, square: Option<&str>) -> Res<()> {
    let moves = match square {
        Some(square) => {
            let square = Square::from_str(square)?;
            if pos.board().get(square).is_none() {
                bail!("There is no piece on {}", square.to_string().red());
            }
            pos.legal_moves_from(square).to_vec()
        }
        None => pos.legal_moves(),
    };
    let targets = moves.iter().map(|m| m.to).collect_vec();
    println!("{}", pretty_board(pos.board(), &targets));
    println!("{} legal moves: {}", moves.len(), moves.iter().join(" "));
    Ok(())
}

fn play_random(mut pos: Position, seed: Option<u64>, plies: usize) {
    let seed = seed.unwrap_or_else(|| rng().random());
    println!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = vec![];
    for _ in 0..plies {
        let Some(mov) = pos.legal_moves().choose(&mut rng).copied() else {
            break;
        };
        played.push(mov);
        pos = pos.make_move_unverified(mov);
    }
    println!("{}", played.iter().join(" "));
    println!("{}", pretty_position(&pos, &[]));
    println!("{}", pos.board().as_text());
}
