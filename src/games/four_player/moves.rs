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
use arbitrary::Arbitrary;
use arrayvec::ArrayVec;
use colored::Colorize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::games::four_player::castling::CastleSide;
use crate::general::common::Res;
use crate::general::squares::Square;

/// No queen has more than 50 moves on this board, a king has at most 10.
pub const MAX_PIECE_MOVES: usize = 64;

pub type PieceMoveList = ArrayVec<Move, MAX_PIECE_MOVES>;

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[must_use]
pub enum MoveKind {
    #[default]
    Normal,
    /// Creates an en passant target on the skipped square.
    DoublePawnPush,
    /// Stores the square of the captured pawn, which is not the target square.
    EnPassant(Square),
    Castle(CastleSide),
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[must_use]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub is_capture: bool,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(from: Square, to: Square, is_capture: bool) -> Self {
        Self {
            from,
            to,
            is_capture,
            kind: MoveKind::Normal,
        }
    }

    pub fn with_kind(mut self, kind: MoveKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture { 'x' } else { '-' };
        write!(f, "{0}{sep}{1}", self.from, self.to)
    }
}

/// The pair of squares a move text refers to. Turning this into a [`Move`] requires a position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MoveText {
    pub from: Square,
    pub to: Square,
}

impl FromStr for MoveText {
    type Err = anyhow::Error;

    /// Accepts `h1-h3`, `h1xh3` and `h1h3`.
    fn from_str(s: &str) -> Res<Self> {
        let s = s.trim();
        ensure!(s.is_ascii(), "Move '{}' contains non-ascii characters", s.red());
        let split = s
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_alphabetic() && *c != 'x')
            .map(|(i, _)| i);
        let Some(split) = split else {
            bail!("Move '{}' must contain two squares, such as 'h2-h4'", s.red())
        };
        let from = s[..split].trim_end_matches(['-', 'x']);
        let to = &s[split..];
        Ok(Self {
            from: Square::from_str(from)?,
            to: Square::from_str(to)?,
        })
    }
}
