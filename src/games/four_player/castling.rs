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
use arbitrary::Arbitrary;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tracing::trace;

use crate::games::four_player::attacks::is_square_attacked;
use crate::games::four_player::board::Board;
use crate::games::four_player::castling::CastleSide::*;
use crate::games::four_player::history::{CastlingPiece, MovementHistory};
use crate::games::four_player::moves::{Move, MoveKind, PieceMoveList};
use crate::games::four_player::pieces::PieceType::{King, Rook};
use crate::games::four_player::pieces::PlayerColor::*;
use crate::games::four_player::pieces::{ColorSet, Piece, PlayerColor};
use crate::general::squares::Square;

/// Every color has the same layout, rotated onto its own arm of the cross: the queen stands to the
/// left of the king (as seen by that player), so the queenside rook is the one on the left.
#[derive(EnumIter, Copy, Clone, Eq, PartialEq, Debug, Hash, derive_more::Display, Arbitrary)]
#[must_use]
pub enum CastleSide {
    Queenside,
    Kingside,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct RookCastling {
    pub rook_from: Square,
    pub rook_to: Square,
}

pub fn king_home(color: PlayerColor) -> Square {
    match color {
        Red => Square::new(13, 7),
        Blue => Square::new(7, 0),
        Yellow => Square::new(0, 6),
        Green => Square::new(6, 13),
    }
}

pub fn rook_home(color: PlayerColor, side: CastleSide) -> Square {
    match (color, side) {
        (Red, Queenside) => Square::new(13, 3),
        (Red, Kingside) => Square::new(13, 10),
        (Blue, Queenside) => Square::new(3, 0),
        (Blue, Kingside) => Square::new(10, 0),
        (Yellow, Queenside) => Square::new(0, 10),
        (Yellow, Kingside) => Square::new(0, 3),
        (Green, Queenside) => Square::new(10, 13),
        (Green, Kingside) => Square::new(3, 13),
    }
}

/// Unit step from the king's home square toward the rook of that side.
fn step(color: PlayerColor, side: CastleSide) -> (isize, isize) {
    let king = king_home(color);
    let rook = rook_home(color, side);
    (
        (rook.row as isize - king.row as isize).signum(),
        (rook.column as isize - king.column as isize).signum(),
    )
}

fn walk(from: Square, (dr, dc): (isize, isize), n: isize) -> Option<Square> {
    from.offset(dr * n, dc * n)
}

/// The king always moves two squares toward the rook.
pub fn king_destination(color: PlayerColor, side: CastleSide) -> Square {
    let king = king_home(color);
    let (dr, dc) = step(color, side);
    Square::new((king.row as isize + 2 * dr) as u8, (king.column as isize + 2 * dc) as u8)
}

/// The rook lands on the square the king crossed.
fn rook_destination(color: PlayerColor, side: CastleSide) -> Square {
    let king = king_home(color);
    let (dr, dc) = step(color, side);
    Square::new((king.row as isize + dr) as u8, (king.column as isize + dc) as u8)
}

pub fn side_of_destination(color: PlayerColor, king_destination_square: Square) -> Option<CastleSide> {
    CastleSide::iter().find(|&side| king_destination(color, side) == king_destination_square)
}

/// Only checks the geometry: a king that moves exactly two squares along a row or a column.
pub fn is_castling_move(piece: Piece, from: Square, to: Square) -> bool {
    if piece.typ != King {
        return false;
    }
    let rows = from.row.abs_diff(to.row);
    let columns = from.column.abs_diff(to.column);
    (rows == 2 && columns == 0) || (rows == 0 && columns == 2)
}

pub fn rook_castling_coords(color: PlayerColor, king_destination_square: Square) -> Option<RookCastling> {
    let side = side_of_destination(color, king_destination_square)?;
    Some(RookCastling {
        rook_from: rook_home(color, side),
        rook_to: rook_destination(color, side),
    })
}

/// Appends all castling moves that are currently legal.
/// The attack tests don't generate castling moves, which is what prevents the check <-> castling recursion.
pub(super) fn gen_castling_moves(
    king: Piece,
    from: Square,
    board: &Board,
    eliminated: ColorSet,
    history: &MovementHistory,
    list: &mut PieceMoveList,
) {
    let color = king.color;
    if king.typ != King || from != king_home(color) || history.has_moved(color, CastlingPiece::King) {
        return;
    }
    for side in CastleSide::iter() {
        if can_castle(color, side, board, eliminated, history) {
            let to = king_destination(color, side);
            list.push(Move::new(from, to, false).with_kind(MoveKind::Castle(side)));
        }
    }
}

fn can_castle(
    color: PlayerColor,
    side: CastleSide,
    board: &Board,
    eliminated: ColorSet,
    history: &MovementHistory,
) -> bool {
    let king = king_home(color);
    let rook = rook_home(color, side);
    if history.has_moved(color, CastlingPiece::rook(side)) {
        return false;
    }
    // a rook that got captured on its home square never moved
    if board.get(rook) != Some(Piece::new(color, Rook)) {
        return false;
    }
    let dir = step(color, side);
    let mut n = 1;
    while let Some(sq) = walk(king, dir, n) {
        if sq == rook {
            break;
        }
        if !board.is_empty(sq) {
            trace!("{color} can't castle {side}: {sq} is occupied");
            return false;
        }
        n += 1;
    }
    let king_path = [Some(king), walk(king, dir, 1), walk(king, dir, 2)];
    for sq in king_path.into_iter().flatten() {
        if is_square_attacked(board, sq, color, eliminated) {
            trace!("{color} can't castle {side}: {sq} is attacked");
            return false;
        }
    }
    true
}
