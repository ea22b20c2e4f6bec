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
use tracing::warn;

use crate::games::four_player::board::Board;
use crate::games::four_player::movegen::{CastlingGen, pawn_capture_squares, pseudolegal_moves};
use crate::games::four_player::pieces::PieceType::Pawn;
use crate::games::four_player::pieces::{ColorSet, PlayerColor};
use crate::general::squares::Square;

/// Is `square` attacked by any piece that belongs neither to `defender` nor to an eliminated color?
///
/// Pawns attack their two forward diagonals whether or not anything stands there, and a pawn push is never an attack.
/// Castling is never considered, which is what allows the castling generator to call this function.
pub fn is_square_attacked(board: &Board, square: Square, defender: PlayerColor, eliminated: ColorSet) -> bool {
    if !square.is_valid() {
        return false;
    }
    board
        .pieces()
        .filter(|(_, piece)| piece.color != defender && !eliminated.contains(piece.color))
        .any(|(from, piece)| {
            if piece.typ == Pawn {
                pawn_capture_squares(piece.color, from).any(|target| target == square)
            } else {
                pseudolegal_moves(piece, from, board, eliminated, &[], CastlingGen::Exclude)
                    .iter()
                    .any(|mov| mov.to == square)
            }
        })
}

/// Eliminated colors are never in check. A board without a king for `color` also counts as "not in check",
/// see [`verify_kings`](crate::games::four_player::oracle::verify_kings) for detecting such boards.
pub fn is_king_in_check(color: PlayerColor, board: &Board, eliminated: ColorSet) -> bool {
    if eliminated.contains(color) {
        return false;
    }
    let Some(king) = board.king_square(color) else {
        warn!("no {color} king on the board, treating {color} as not in check");
        return false;
    };
    is_square_attacked(board, king, color, eliminated)
}
