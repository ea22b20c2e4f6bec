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
use tracing::{debug, trace};

use crate::games::four_player::attacks::is_king_in_check;
use crate::games::four_player::board::Board;
use crate::games::four_player::en_passant::EnPassantTarget;
use crate::games::four_player::history::MovementHistory;
use crate::games::four_player::movegen::{CastlingGen, pseudolegal_moves};
use crate::games::four_player::moves::{Move, PieceMoveList};
use crate::games::four_player::pieces::{ColorSet, Piece, PlayerColor};
use crate::general::squares::Square;

/// All moves of `piece` on `square` that don't leave its own king in check.
///
/// Every candidate is played on a copy of the board, so `board` is never modified.
/// Pieces of eliminated colors have no legal moves.
pub fn legal_moves(
    piece: Piece,
    square: Square,
    board: &Board,
    eliminated: ColorSet,
    history: &MovementHistory,
    en_passant: &[EnPassantTarget],
) -> PieceMoveList {
    if eliminated.contains(piece.color) {
        return PieceMoveList::new();
    }
    let mut moves = pseudolegal_moves(piece, square, board, eliminated, en_passant, CastlingGen::Include(history));
    let num_candidates = moves.len();
    moves.retain(|mov| {
        let mut copy = board.clone();
        _ = copy.apply_move(piece, *mov);
        let legal = !is_king_in_check(piece.color, &copy, eliminated);
        if !legal {
            trace!("{mov} by {piece} would leave the {} king in check", piece.color);
        }
        legal
    });
    debug!(
        "{piece} on {square}: {0} of {num_candidates} candidate moves are legal",
        moves.len()
    );
    moves
}

/// Like [`legal_moves`], but takes a textual piece code such as `rK`.
/// A code that can't be parsed has no moves.
pub fn legal_moves_for_code(
    code: &str,
    square: Square,
    board: &Board,
    eliminated: ColorSet,
    history: &MovementHistory,
    en_passant: &[EnPassantTarget],
) -> PieceMoveList {
    match Piece::from_code(code) {
        Some(piece) => legal_moves(piece, square, board, eliminated, history, en_passant),
        None => {
            debug!("'{code}' is not a piece code, there are no moves");
            PieceMoveList::new()
        }
    }
}

/// Every legal move of every piece of `color`, in row-major order of the moving pieces.
pub fn all_legal_moves(
    color: PlayerColor,
    board: &Board,
    eliminated: ColorSet,
    history: &MovementHistory,
    en_passant: &[EnPassantTarget],
) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|(square, piece)| legal_moves(piece, square, board, eliminated, history, en_passant))
        .collect()
}
