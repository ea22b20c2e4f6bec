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
use anyhow::{anyhow, ensure};
use arbitrary::Arbitrary;
use colored::Colorize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::games::four_player::pieces::PieceType::*;
use crate::games::four_player::pieces::PlayerColor::*;
use crate::general::squares::{BOARD_SIZE, DimT, Square};

pub const NUM_COLORS: usize = 4;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, EnumIter, strum_macros::Display, Arbitrary,
)]
#[strum(serialize_all = "lowercase")]
#[must_use]
pub enum PlayerColor {
    Red,
    Blue,
    Yellow,
    Green,
}

impl PlayerColor {
    pub fn to_char(self) -> char {
        match self {
            Red => 'r',
            Blue => 'b',
            Yellow => 'y',
            Green => 'g',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::iter().find(|color| color.to_char() == c)
    }

    /// `(row, column)` step of a pawn push. Each color pushes toward the opposite arm of the cross.
    pub fn pawn_forward(self) -> (isize, isize) {
        match self {
            Red => (-1, 0),
            Blue => (0, 1),
            Yellow => (1, 0),
            Green => (0, -1),
        }
    }

    /// Pawns start on the second line from their edge and may double push from there.
    pub fn is_pawn_start(self, square: Square) -> bool {
        let last = (BOARD_SIZE - 2) as DimT;
        match self {
            Red => square.row == last,
            Blue => square.column == 1,
            Yellow => square.row == 1,
            Green => square.column == last,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, Arbitrary)]
#[must_use]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn to_char(self) -> char {
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::iter().find(|typ| typ.to_char() == c)
    }

    pub fn name(self) -> &'static str {
        match self {
            Pawn => "pawn",
            Knight => "knight",
            Bishop => "bishop",
            Rook => "rook",
            Queen => "queen",
            King => "king",
        }
    }

    pub fn to_utf8_char(self) -> char {
        match self {
            Pawn => '\u{265F}',
            Knight => '♞',
            Bishop => '♝',
            Rook => '♜',
            Queen => '♛',
            King => '♚',
        }
    }
}

/// A piece code consists of the color letter followed by the piece letter, e.g. `rK` for the red king.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[must_use]
pub struct Piece {
    pub color: PlayerColor,
    pub typ: PieceType,
}

impl Piece {
    pub const fn new(color: PlayerColor, typ: PieceType) -> Self {
        Self { color, typ }
    }

    /// Lenient parsing: anything that isn't exactly a color letter followed by a piece letter gives `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let color = PlayerColor::from_char(chars.next()?)?;
        let typ = PieceType::from_char(chars.next()?)?;
        chars.next().is_none().then_some(Self::new(color, typ))
    }

    pub fn is_king(self) -> bool {
        self.typ == King
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{0}{1}", self.color.to_char(), self.typ.to_char())
    }
}

impl FromStr for Piece {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ensure!(
            s.chars().count() == 2,
            "A piece code must consist of exactly 2 characters, not '{}'",
            s.red()
        );
        Self::from_code(s).ok_or_else(|| {
            anyhow!(
                "Invalid piece code '{}': expected one of 'r', 'b', 'y', 'g' followed by one of 'P', 'N', 'B', 'R', 'Q', 'K'",
                s.red()
            )
        })
    }
}

/// A set of colors, used to keep track of eliminated players.
/// There is no way to remove a color, so a set that only ever gets built up by `insert` grows monotonically.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[must_use]
pub struct ColorSet(u8);

impl ColorSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn contains(self, color: PlayerColor) -> bool {
        self.0 & (1 << color as u8) != 0
    }

    pub fn insert(&mut self, color: PlayerColor) {
        self.0 |= 1 << color as u8;
    }

    pub fn with(mut self, color: PlayerColor) -> Self {
        self.insert(color);
        self
    }

    pub fn len(self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(self) -> bool {
        self.0 & 0xf == 0
    }

    pub fn iter(self) -> impl Iterator<Item = PlayerColor> {
        PlayerColor::iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<PlayerColor> for ColorSet {
    fn from_iter<T: IntoIterator<Item = PlayerColor>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl Display for ColorSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for color in self.iter() {
            write!(f, "{}", color.to_char())?;
        }
        Ok(())
    }
}
