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
#![no_main]

use arbitrary::Arbitrary;
use calipers::four_player::{
    Board, CastlingGen, ColorSet, EnPassantTarget, MovementHistory, Piece, is_king_in_check, legal_moves,
    pseudolegal_moves,
};
use calipers::general::squares::Square;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    pieces: Vec<(Square, Piece)>,
    eliminated: ColorSet,
    history: MovementHistory,
    en_passant: Option<EnPassantTarget>,
    piece: Piece,
    square: Square,
}

fuzz_target!(|input: Input| {
    let mut board = Board::empty();
    for (square, piece) in input.pieces {
        _ = board.place(square, piece);
    }
    let ep = input.en_passant.into_iter().collect::<Vec<_>>();
    let copy = board.clone();
    let moves = legal_moves(input.piece, input.square, &board, input.eliminated, &input.history, &ep);
    assert_eq!(board, copy);
    if input.eliminated.contains(input.piece.color) {
        assert!(moves.is_empty());
    }
    for mov in moves {
        assert!(mov.to.is_valid());
        let mut after = board.clone();
        _ = after.apply_move(input.piece, mov);
        assert!(!is_king_in_check(input.piece.color, &after, input.eliminated));
    }
    let pseudo = pseudolegal_moves(input.piece, input.square, &board, input.eliminated, &ep, CastlingGen::Exclude);
    assert!(pseudo.iter().all(|m| m.to.is_valid() && !m.is_castle()));
});
