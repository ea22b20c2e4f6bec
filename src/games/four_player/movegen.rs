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
use crate::games::four_player::board::Board;
use crate::games::four_player::castling::gen_castling_moves;
use crate::games::four_player::en_passant::EnPassantTarget;
use crate::games::four_player::history::MovementHistory;
use crate::games::four_player::moves::{Move, MoveKind, PieceMoveList};
use crate::games::four_player::pieces::PieceType::*;
use crate::games::four_player::pieces::{ColorSet, Piece, PlayerColor};
use crate::general::squares::Square;

pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];
pub const KING_OFFSETS: [(isize, isize); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
pub const ROOK_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Whether king moves include castling.
/// Castling needs to know if squares are attacked, so attack detection must always use [`CastlingGen::Exclude`].
#[derive(Debug, Copy, Clone)]
pub enum CastlingGen<'a> {
    Include(&'a MovementHistory),
    Exclude,
}

/// Generates moves that follow the movement rules of the piece, but may leave the mover in check.
/// Pieces of eliminated colors don't have any moves.
pub fn pseudolegal_moves(
    piece: Piece,
    square: Square,
    board: &Board,
    eliminated: ColorSet,
    en_passant: &[EnPassantTarget],
    castling: CastlingGen,
) -> PieceMoveList {
    let mut list = PieceMoveList::new();
    if eliminated.contains(piece.color) || !square.is_valid() {
        return list;
    }
    match piece.typ {
        Pawn => gen_pawn_moves(piece.color, square, board, en_passant, &mut list),
        Knight => gen_leaper_moves(piece.color, square, board, &KNIGHT_OFFSETS, &mut list),
        Bishop => gen_slider_moves(piece.color, square, board, &BISHOP_DIRECTIONS, &mut list),
        Rook => gen_slider_moves(piece.color, square, board, &ROOK_DIRECTIONS, &mut list),
        Queen => {
            gen_slider_moves(piece.color, square, board, &ROOK_DIRECTIONS, &mut list);
            gen_slider_moves(piece.color, square, board, &BISHOP_DIRECTIONS, &mut list);
        }
        King => {
            gen_leaper_moves(piece.color, square, board, &KING_OFFSETS, &mut list);
            if let CastlingGen::Include(history) = castling {
                gen_castling_moves(piece, square, board, eliminated, history, &mut list);
            }
        }
    }
    list
}

/// The two squares a pawn attacks, no matter what stands there.
pub fn pawn_capture_squares(color: PlayerColor, square: Square) -> impl Iterator<Item = Square> {
    let (dr, dc) = color.pawn_forward();
    // the sideways direction is perpendicular to forward
    let (sr, sc) = (dc, dr);
    [square.offset(dr + sr, dc + sc), square.offset(dr - sr, dc - sc)]
        .into_iter()
        .flatten()
}

fn gen_pawn_moves(
    color: PlayerColor,
    square: Square,
    board: &Board,
    en_passant: &[EnPassantTarget],
    list: &mut PieceMoveList,
) {
    let pawn = Piece::new(color, Pawn);
    let (dr, dc) = color.pawn_forward();
    if let Some(single) = square.offset(dr, dc).filter(|sq| board.is_empty(*sq)) {
        list.push(Move::new(square, single, false));
        if color.is_pawn_start(square) {
            if let Some(double) = single.offset(dr, dc).filter(|sq| board.is_empty(*sq)) {
                list.push(Move::new(square, double, false).with_kind(MoveKind::DoublePawnPush));
            }
        }
    }
    for target in pawn_capture_squares(color, square) {
        if board.is_opponent(target, color) {
            list.push(Move::new(square, target, true));
        } else if let Some(ep) = en_passant
            .iter()
            .find(|ep| ep.square == target && ep.capturable_by(pawn, square, board))
        {
            // `capturable_by` has already checked that the pawn square is on the board
            if let Some(pawn_square) = ep.pawn_square() {
                list.push(Move::new(square, target, true).with_kind(MoveKind::EnPassant(pawn_square)));
            }
        }
    }
}

fn gen_leaper_moves(
    color: PlayerColor,
    square: Square,
    board: &Board,
    offsets: &[(isize, isize)],
    list: &mut PieceMoveList,
) {
    for &(dr, dc) in offsets {
        let Some(target) = square.offset(dr, dc) else {
            continue;
        };
        if !board.is_own(target, color) {
            list.push(Move::new(square, target, board.is_opponent(target, color)));
        }
    }
}

fn gen_slider_moves(
    color: PlayerColor,
    square: Square,
    board: &Board,
    directions: &[(isize, isize)],
    list: &mut PieceMoveList,
) {
    for &(dr, dc) in directions {
        let mut current = square;
        while let Some(target) = current.offset(dr, dc) {
            if board.is_own(target, color) {
                break;
            }
            let is_capture = board.is_opponent(target, color);
            list.push(Move::new(square, target, is_capture));
            if is_capture {
                break;
            }
            current = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::four_player::pieces::PlayerColor::*;
    use itertools::Itertools;
    use std::str::FromStr;

    fn targets(list: &PieceMoveList) -> Vec<String> {
        list.iter().map(|m| m.to.to_string()).sorted().collect_vec()
    }

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn startpos_pawn_test() {
        let board = Board::startpos();
        let moves = pseudolegal_moves(Piece::new(Red, Pawn), sq("e2"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["e3", "e4"]);
        assert_eq!(moves[1].kind, MoveKind::DoublePawnPush);
        // blue pushes toward higher files
        let moves = pseudolegal_moves(Piece::new(Blue, Pawn), sq("b5"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["c5", "d5"]);
        let moves = pseudolegal_moves(Piece::new(Yellow, Pawn), sq("f13"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["f11", "f12"]);
        let moves = pseudolegal_moves(Piece::new(Green, Pawn), sq("m9"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["k9", "l9"]);
    }

    #[test]
    fn pawn_capture_test() {
        let mut board = Board::empty();
        let pawn = Piece::new(Red, Pawn);
        board.place(sq("g5"), pawn).unwrap();
        board.place(sq("g6"), Piece::new(Yellow, Knight)).unwrap();
        board.place(sq("f6"), Piece::new(Blue, Knight)).unwrap();
        board.place(sq("h6"), Piece::new(Red, Knight)).unwrap();
        let moves = pseudolegal_moves(pawn, sq("g5"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["f6"]);
        assert!(moves[0].is_capture);
        // not on the start line, so no double push even with free squares
        board.remove(sq("g6"));
        let moves = pseudolegal_moves(pawn, sq("g5"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["f6", "g6"]);
        assert_eq!(pawn_capture_squares(Blue, sq("d7")).map(|s| s.to_string()).sorted().collect_vec(), vec!["e6", "e8"]);
        assert_eq!(pawn_capture_squares(Green, sq("k7")).map(|s| s.to_string()).sorted().collect_vec(), vec!["j6", "j8"]);
        assert_eq!(pawn_capture_squares(Yellow, sq("e13")).map(|s| s.to_string()).sorted().collect_vec(), vec!["d12", "f12"]);
        // c12 is in the corner
        assert_eq!(pawn_capture_squares(Yellow, sq("d13")).map(|s| s.to_string()).collect_vec(), vec!["e12"]);
    }

    #[test]
    fn blocked_double_push_test() {
        let mut board = Board::startpos();
        board.place(sq("e4"), Piece::new(Blue, Knight)).unwrap();
        let moves = pseudolegal_moves(Piece::new(Red, Pawn), sq("e2"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["e3"]);
        board.place(sq("e3"), Piece::new(Blue, Knight)).unwrap();
        board.remove(sq("e4"));
        let moves = pseudolegal_moves(Piece::new(Red, Pawn), sq("e2"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert!(moves.is_empty());
    }

    #[test]
    fn knight_test() {
        let board = Board::startpos();
        let moves = pseudolegal_moves(Piece::new(Red, Knight), sq("e1"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["d3", "f3"]);
        let moves = pseudolegal_moves(Piece::new(Blue, Knight), sq("a10"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["c11", "c9"]);
        let mut board = Board::empty();
        board.place(sq("d4"), Piece::new(Green, Knight)).unwrap();
        // b3 and c2 are in the corner
        let moves = pseudolegal_moves(Piece::new(Green, Knight), sq("d4"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert_eq!(targets(&moves), vec!["b5", "c6", "e2", "e6", "f3", "f5"]);
    }

    #[test]
    fn slider_test() {
        let mut board = Board::empty();
        let rook = Piece::new(Yellow, Rook);
        board.place(sq("d7"), rook).unwrap();
        board.place(sq("d9"), Piece::new(Yellow, Pawn)).unwrap();
        board.place(sq("g7"), Piece::new(Green, Pawn)).unwrap();
        let moves = pseudolegal_moves(rook, sq("d7"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        let expected = ["a7", "b7", "c7", "e7", "f7", "g7", "d8", "d6", "d5", "d4", "d3", "d2", "d1"];
        assert_eq!(targets(&moves), expected.iter().map(|s| s.to_string()).sorted().collect_vec());
        assert_eq!(moves.iter().filter(|m| m.is_capture).count(), 1);

        let queen = Piece::new(Red, Queen);
        let mut board = Board::empty();
        board.place(sq("g7"), queen).unwrap();
        let moves = pseudolegal_moves(queen, sq("g7"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert!(moves.iter().all(|m| m.to.is_valid()));
        // 13 squares on the row and column each, the diagonals end at the corners
        assert_eq!(moves.len(), 13 + 13 + 15);
        // bishops don't slide into the corners
        let bishop = Piece::new(Red, Bishop);
        let mut board = Board::empty();
        board.place(sq("d4"), bishop).unwrap();
        let moves = pseudolegal_moves(bishop, sq("d4"), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert!(!targets(&moves).contains(&"c3".to_string()));
        assert_eq!(moves.len(), 13);
    }

    #[test]
    fn eliminated_and_invalid_test() {
        let board = Board::startpos();
        let moves = pseudolegal_moves(Piece::new(Red, Knight), sq("e1"), &board, ColorSet::empty().with(Red), &[], CastlingGen::Exclude);
        assert!(moves.is_empty());
        let moves = pseudolegal_moves(Piece::new(Red, Queen), Square::new(1, 1), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert!(moves.is_empty());
        let moves = pseudolegal_moves(Piece::new(Red, Queen), Square::new(99, 1), &board, ColorSet::empty(), &[], CastlingGen::Exclude);
        assert!(moves.is_empty());
    }
}
