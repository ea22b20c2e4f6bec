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
use anyhow::ensure;
use colored::Colorize;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::games::four_player::castling::rook_castling_coords;
use crate::games::four_player::moves::{Move, MoveKind};
use crate::games::four_player::pieces::PieceType::*;
use crate::games::four_player::pieces::PlayerColor::*;
use crate::games::four_player::pieces::{Piece, PieceType, PlayerColor};
use crate::general::common::Res;
use crate::general::squares::{BOARD_SIZE, CORNER_SIZE, DimT, NUM_SQUARES, Square, file_to_char, is_corner_excluded};

/// Back rank of red and blue, in increasing column (red) or row (blue) order.
/// Yellow and green use the same pieces with king and queen swapped.
const BACK_RANK: [PieceType; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

/// A 14x14 mailbox. Squares in the excluded corners are always empty.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; NUM_SQUARES],
        }
    }

    pub fn startpos() -> Self {
        let mut res = Self::empty();
        let last = (BOARD_SIZE - 1) as DimT;
        for (i, typ) in BACK_RANK.into_iter().enumerate() {
            let i = (i + CORNER_SIZE) as DimT;
            let mirrored = match typ {
                King => Queen,
                Queen => King,
                other => other,
            };
            res.put(Square::new(last, i), Some(Piece::new(Red, typ)));
            res.put(Square::new(last - 1, i), Some(Piece::new(Red, Pawn)));
            res.put(Square::new(i, 0), Some(Piece::new(Blue, typ)));
            res.put(Square::new(i, 1), Some(Piece::new(Blue, Pawn)));
            res.put(Square::new(0, i), Some(Piece::new(Yellow, mirrored)));
            res.put(Square::new(1, i), Some(Piece::new(Yellow, Pawn)));
            res.put(Square::new(i, last), Some(Piece::new(Green, mirrored)));
            res.put(Square::new(i, last - 1), Some(Piece::new(Green, Pawn)));
        }
        res
    }

    /// `None` for empty squares as well as for squares that aren't on the board.
    pub fn get(&self, square: Square) -> Option<Piece> {
        if square.is_valid() { self.squares[square.idx()] } else { None }
    }

    /// Corners read as empty, but are never a move target.
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn is_opponent(&self, square: Square, color: PlayerColor) -> bool {
        self.get(square).is_some_and(|p| p.color != color)
    }

    pub fn is_own(&self, square: Square, color: PlayerColor) -> bool {
        self.get(square).is_some_and(|p| p.color == color)
    }

    pub fn place(&mut self, square: Square, piece: Piece) -> Res<()> {
        ensure!(
            square.is_valid(),
            "Can't place a piece on {square} ({0}, {1}), which is not a playable square",
            square.row,
            square.column
        );
        self.put(square, Some(piece));
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let res = self.get(square);
        self.put(square, None);
        res
    }

    pub(super) fn put(&mut self, square: Square, piece: Option<Piece>) {
        debug_assert!(square.is_valid() || piece.is_none());
        if square.is_valid() {
            self.squares[square.idx()] = piece;
        }
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, p)| p.map(|p| (Square::from_idx(idx), p)))
    }

    pub fn pieces_of(&self, color: PlayerColor) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn num_pieces(&self) -> usize {
        self.pieces().count()
    }

    /// The first king of that color in row-major order.
    pub fn king_square(&self, color: PlayerColor) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.is_king())
            .map(|(sq, _)| sq)
    }

    /// Plays `mov` with `piece` without any legality checks, including the rook relocation of castling moves
    /// and the removal of the pawn captured en passant. Returns the captured piece.
    pub fn apply_move(&mut self, piece: Piece, mov: Move) -> Option<Piece> {
        let mut captured = self.get(mov.to);
        self.put(mov.from, None);
        self.put(mov.to, Some(piece));
        match mov.kind {
            MoveKind::EnPassant(pawn_square) => {
                captured = self.remove(pawn_square);
            }
            MoveKind::Castle(_) => {
                if let Some(coords) = rook_castling_coords(piece.color, mov.to) {
                    let rook = self.remove(coords.rook_from);
                    self.put(coords.rook_to, rook);
                }
            }
            MoveKind::Normal | MoveKind::DoublePawnPush => {}
        }
        captured
    }
}

fn write_cell(f: &mut Formatter<'_>, square: Square, board: &Board) -> fmt::Result {
    if is_corner_excluded(square) {
        write!(f, "   ")
    } else if let Some(piece) = board.get(square) {
        write!(f, " {piece}")
    } else {
        write!(f, "  .")
    }
}

/// ASCII diagram, use [`crate::output::pretty_board`] for a colored version.
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE as DimT {
            write!(f, "{:>2}", Square::new(row, 0).rank())?;
            for column in 0..BOARD_SIZE as DimT {
                write_cell(f, Square::new(row, column), self)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for column in 0..BOARD_SIZE as DimT {
            write!(f, "  {}", file_to_char(column))?;
        }
        Ok(())
    }
}

/// Used by error messages to point at a square of a board.
pub fn describe_square(board: &Board, square: Square) -> String {
    match board.get(square) {
        None => format!("{} (empty)", square.to_string().bold()),
        Some(piece) => format!("{} ({} {})", square.to_string().bold(), piece.color, piece.typ.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::four_player::castling::CastleSide;
    use strum::IntoEnumIterator;

    #[test]
    fn startpos_test() {
        let board = Board::startpos();
        assert_eq!(board.num_pieces(), 64);
        for color in PlayerColor::iter() {
            assert_eq!(board.pieces_of(color).count(), 16);
            assert_eq!(board.pieces_of(color).filter(|(_, p)| p.typ == Pawn).count(), 8);
        }
        assert_eq!(board.get(Square::new(13, 7)), Some(Piece::new(Red, King)));
        assert_eq!(board.get(Square::new(13, 6)), Some(Piece::new(Red, Queen)));
        assert_eq!(board.get(Square::new(7, 0)), Some(Piece::new(Blue, King)));
        assert_eq!(board.get(Square::new(6, 0)), Some(Piece::new(Blue, Queen)));
        assert_eq!(board.get(Square::new(0, 6)), Some(Piece::new(Yellow, King)));
        assert_eq!(board.get(Square::new(0, 7)), Some(Piece::new(Yellow, Queen)));
        assert_eq!(board.get(Square::new(6, 13)), Some(Piece::new(Green, King)));
        assert_eq!(board.get(Square::new(7, 13)), Some(Piece::new(Green, Queen)));
        assert_eq!(board.king_square(Green), Some(Square::new(6, 13)));
        assert!(board.pieces().all(|(sq, _)| sq.is_valid()));
    }

    #[test]
    fn occupancy_test() {
        let board = Board::startpos();
        let red_king = Square::new(13, 7);
        assert!(!board.is_empty(red_king));
        assert!(board.is_own(red_king, Red));
        assert!(board.is_opponent(red_king, Blue));
        assert!(!board.is_opponent(red_king, Red));
        assert!(board.is_empty(Square::new(7, 7)));
        assert!(board.is_empty(Square::new(0, 0)));
        assert!(!board.is_opponent(Square::new(0, 0), Red));
        assert!(board.is_empty(Square::new(30, 3)));
        let mut board = board;
        assert!(board.place(Square::new(1, 1), Piece::new(Red, Rook)).is_err());
        assert!(board.place(Square::new(14, 5), Piece::new(Red, Rook)).is_err());
        board.place(Square::new(7, 7), Piece::new(Red, Rook)).unwrap();
        assert_eq!(board.remove(Square::new(7, 7)), Some(Piece::new(Red, Rook)));
        assert_eq!(board.remove(Square::new(7, 7)), None);
    }

    #[test]
    fn apply_castle_and_ep_test() {
        let mut board = Board::empty();
        let king = Piece::new(Red, King);
        board.place(Square::new(13, 7), king).unwrap();
        board.place(Square::new(13, 10), Piece::new(Red, Rook)).unwrap();
        let mov = Move::new(Square::new(13, 7), Square::new(13, 9), false).with_kind(MoveKind::Castle(CastleSide::Kingside));
        assert_eq!(board.apply_move(king, mov), None);
        assert_eq!(board.get(Square::new(13, 9)), Some(king));
        assert_eq!(board.get(Square::new(13, 8)), Some(Piece::new(Red, Rook)));
        assert!(board.is_empty(Square::new(13, 10)));
        assert!(board.is_empty(Square::new(13, 7)));

        let mut board = Board::empty();
        let blue_pawn = Piece::new(Blue, Pawn);
        board.place(Square::new(10, 4), blue_pawn).unwrap();
        board.place(Square::new(10, 5), Piece::new(Red, Pawn)).unwrap();
        let mov = Move::new(Square::new(10, 4), Square::new(11, 5), true).with_kind(MoveKind::EnPassant(Square::new(10, 5)));
        assert_eq!(board.apply_move(blue_pawn, mov), Some(Piece::new(Red, Pawn)));
        assert_eq!(board.num_pieces(), 1);
        assert_eq!(board.get(Square::new(11, 5)), Some(blue_pawn));
    }

    #[test]
    fn display_test() {
        let text = Board::startpos().to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), BOARD_SIZE + 1);
        assert!(lines[0].starts_with("14"));
        assert!(lines[0].contains("yR yN yB yK yQ yB yN yR"));
        assert!(lines[13].contains("rR rN rB rQ rK rB rN rR"));
        assert!(lines[14].trim_start().starts_with('a'));
        assert!(lines[14].trim_end().ends_with('n'));
    }
}
