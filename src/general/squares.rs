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
use colored::Colorize;
use std::cmp::max;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::general::common::{Res, parse_int_from_str};

pub type DimT = u8;

/// The board is a 14x14 grid, of which the four 3x3 corners can't be used.
pub const BOARD_SIZE: usize = 14;
pub const CORNER_SIZE: usize = 3;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
pub const NUM_PLAYABLE_SQUARES: usize = NUM_SQUARES - 4 * CORNER_SIZE * CORNER_SIZE;

pub fn file_to_char(file: DimT) -> char {
    debug_assert!((file as usize) < BOARD_SIZE);
    (file + b'a') as char
}

pub fn char_to_file(file: char) -> DimT {
    debug_assert!(file.is_ascii_lowercase());
    (file as u8).wrapping_sub(b'a')
}

/// Takes signed values so that the result of adding an offset can be tested before creating a [`Square`].
pub fn in_bounds(row: isize, column: isize) -> bool {
    (0..BOARD_SIZE as isize).contains(&row) && (0..BOARD_SIZE as isize).contains(&column)
}

fn in_corner_band(x: DimT) -> bool {
    (x as usize) < CORNER_SIZE || (x as usize) >= BOARD_SIZE - CORNER_SIZE
}

/// The corners are excluded iff both the row and the column are within 3 squares of an edge.
pub fn is_corner_excluded(square: Square) -> bool {
    in_corner_band(square.row) && in_corner_band(square.column)
}

// Compute the supremum norm of a - b
pub fn sup_distance(a: Square, b: Square) -> usize {
    max(a.row.abs_diff(b.row), a.column.abs_diff(b.column)) as usize
}

/// Row 0 is the top edge (yellow's back rank) and row 13 the bottom edge (red's back rank).
/// Algebraic notation counts ranks from the bottom, so `Square::new(13, 7)` is `h1`.
///
/// The fields are public and therefore not guaranteed to be on the board; every consumer checks
/// [`Square::is_valid`] or goes through [`Square::offset`].
#[derive(Clone, Copy, Eq, PartialOrd, Ord, PartialEq, Debug, Default, Hash, Arbitrary)]
#[must_use]
pub struct Square {
    pub row: DimT,
    pub column: DimT,
}

impl Square {
    pub const fn new(row: DimT, column: DimT) -> Self {
        Self { row, column }
    }

    pub fn checked(row: isize, column: isize) -> Option<Self> {
        in_bounds(row, column).then(|| Self::new(row as DimT, column as DimT))
    }

    pub fn from_idx(idx: usize) -> Self {
        debug_assert!(idx < NUM_SQUARES);
        Self::new((idx / BOARD_SIZE) as DimT, (idx % BOARD_SIZE) as DimT)
    }

    /// Only meaningful for squares on the grid, see [`Self::on_grid`].
    pub fn idx(self) -> usize {
        self.row as usize * BOARD_SIZE + self.column as usize
    }

    pub fn on_grid(self) -> bool {
        in_bounds(self.row as isize, self.column as isize)
    }

    /// On the grid and not in one of the corners.
    pub fn is_valid(self) -> bool {
        self.on_grid() && !is_corner_excluded(self)
    }

    /// The square `(row + dr, column + dc)`, or `None` if that is off the grid or in an excluded corner.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        Self::checked(self.row as isize + dr, self.column as isize + dc).filter(|s| !is_corner_excluded(*s))
    }

    pub fn rank(self) -> usize {
        BOARD_SIZE - self.row as usize
    }

    pub fn file(self) -> DimT {
        self.column
    }

    /// All 196 squares of the grid, including the excluded corners.
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(Self::from_idx)
    }

    pub fn playable() -> impl Iterator<Item = Square> {
        Self::iter().filter(|s| !is_corner_excluded(*s))
    }

    pub fn algebraic(file: char, rank: usize) -> Res<Self> {
        if !file.is_ascii_alphabetic() {
            bail!("file (column) '{}' must be a valid ascii letter", file.to_string().red());
        }
        let column = char_to_file(file.to_ascii_lowercase());
        ensure!(
            (column as usize) < BOARD_SIZE,
            "file '{}' is outside of the board, the last file is 'n'",
            file.to_string().red()
        );
        ensure!(
            (1..=BOARD_SIZE).contains(&rank),
            "rank {} is outside of the board, ranks go from 1 to {BOARD_SIZE}",
            rank.to_string().red()
        );
        Ok(Self::new((BOARD_SIZE - rank) as DimT, column))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.on_grid() {
            write!(f, "{0}{1}", file_to_char(self.column), self.rank())
        } else {
            write!(f, "<invalid>")
        }
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            bail!("Empty input")
        };
        let rank = parse_int_from_str(chars.as_str(), "rank (row)")?;
        Self::algebraic(file, rank)
    }
}
