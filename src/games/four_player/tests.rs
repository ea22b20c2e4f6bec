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
use itertools::Itertools;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::games::four_player::PieceType::*;
use crate::games::four_player::PlayerColor::*;
use crate::games::four_player::*;
use crate::general::squares::Square;

fn sq(s: &str) -> Square {
    Square::from_str(s).unwrap()
}

fn board_with(pieces: &[(&str, &str)]) -> Board {
    let mut board = Board::empty();
    for (square, code) in pieces {
        board.place(sq(square), Piece::from_str(code).unwrap()).unwrap();
    }
    board
}

fn targets(moves: &[Move]) -> Vec<String> {
    moves.iter().map(|m| m.to.to_string()).sorted().collect_vec()
}

fn none() -> ColorSet {
    ColorSet::empty()
}

#[test]
fn startpos_not_in_check_test() {
    let board = Board::startpos();
    assert!(!is_king_in_check(Red, &board, none()));
    for color in PlayerColor::iter() {
        assert_eq!(classify(color, &board, none(), &MovementHistory::default(), &[]), ColorStatus::Active);
    }
}

#[test]
fn rook_check_test() {
    let board = board_with(&[("h1", "rK"), ("h10", "yR")]);
    assert!(is_king_in_check(Red, &board, none()));
    assert!(!is_king_in_check(Yellow, &board, none()));
}

#[test]
fn blocking_piece_test() {
    let board = board_with(&[("h1", "rK"), ("h10", "yR"), ("f4", "rN")]);
    let history = MovementHistory::default();
    assert!(has_any_legal_moves(Red, &board, none(), &history, &[]));
    assert!(!is_checkmate(Red, &board, none(), &history, &[]));
    // the knight may only move into the rook's line
    let moves = legal_moves(Piece::new(Red, Knight), sq("f4"), &board, none(), &history, &[]);
    assert_eq!(targets(&moves), vec!["h3", "h5"]);
}

#[test]
fn checkmate_test() {
    // d1 checks along the first rank and covers i1 behind the king, k2 covers the second rank
    let board = board_with(&[("h1", "rK"), ("d1", "yR"), ("k2", "gR")]);
    let history = MovementHistory::default();
    assert!(is_king_in_check(Red, &board, none()));
    assert!(!has_any_legal_moves(Red, &board, none(), &history, &[]));
    assert_eq!(classify(Red, &board, none(), &history, &[]), ColorStatus::Checkmate);
    // without green, the king escapes to the second rank
    assert_eq!(classify(Red, &board, none().with(Green), &history, &[]), ColorStatus::Active);
}

#[test]
fn stalemate_test() {
    let board = board_with(&[
        ("h1", "rK"),
        ("d2", "yR"),
        ("g14", "yR"),
        ("i14", "gR"),
        ("e5", "rP"),
        ("e6", "yP"),
    ]);
    let history = MovementHistory::default();
    assert!(!is_king_in_check(Red, &board, none()));
    assert!(!has_any_legal_moves(Red, &board, none(), &history, &[]));
    assert!(!is_checkmate(Red, &board, none(), &history, &[]));
    assert!(is_stalemate(Red, &board, none(), &history, &[]));
    assert!(classify(Red, &board, none(), &history, &[]).eliminates());
}

fn red_castling_board() -> Board {
    board_with(&[("h1", "rK"), ("k1", "rR"), ("d1", "rR")])
}

fn castle_targets(board: &Board, history: &MovementHistory) -> Vec<String> {
    let moves = legal_moves(Piece::new(Red, King), sq("h1"), board, none(), history, &[]);
    targets(&moves.into_iter().filter(|m| m.is_castle()).collect_vec())
}

#[test]
fn castling_test() {
    let board = red_castling_board();
    let history = MovementHistory::default();
    assert_eq!(castle_targets(&board, &history), vec!["f1", "j1"]);
    let moves = legal_moves(Piece::new(Red, King), sq("h1"), &board, none(), &history, &[]);
    let castle = moves.iter().find(|m| m.to == sq("j1")).unwrap();
    assert!(is_castling_move(Piece::new(Red, King), castle.from, castle.to));
    assert_eq!(castle.kind, MoveKind::Castle(CastleSide::Kingside));

    // an attacked transit square
    let mut attacked = board.clone();
    attacked.place(sq("i10"), Piece::new(Blue, Rook)).unwrap();
    assert_eq!(castle_targets(&attacked, &history), vec!["f1"]);
    // unless blue is out of the game
    let moves = legal_moves(Piece::new(Red, King), sq("h1"), &attacked, none().with(Blue), &history, &[]);
    assert_eq!(moves.iter().filter(|m| m.is_castle()).count(), 2);
}

#[test]
fn castling_gating_test() {
    let board = red_castling_board();
    let history = MovementHistory::default();

    let mut moved = history;
    moved.mark_moved(Red, CastlingPiece::KingsideRook);
    assert_eq!(castle_targets(&board, &moved), vec!["f1"]);
    moved.mark_moved(Red, CastlingPiece::King);
    assert!(castle_targets(&board, &moved).is_empty());

    let mut blocked = board.clone();
    blocked.place(sq("e1"), Piece::new(Red, Knight)).unwrap();
    assert_eq!(castle_targets(&blocked, &history), vec!["j1"]);
    // an opposing piece blocks as well
    blocked.place(sq("i1"), Piece::new(Green, Knight)).unwrap();
    assert!(castle_targets(&blocked, &history).is_empty());

    let mut attacked_destination = board.clone();
    attacked_destination.place(sq("f8"), Piece::new(Yellow, Rook)).unwrap();
    assert_eq!(castle_targets(&attacked_destination, &history), vec!["j1"]);

    let mut in_check = board.clone();
    in_check.place(sq("h9"), Piece::new(Yellow, Rook)).unwrap();
    assert!(castle_targets(&in_check, &history).is_empty());

    // the rook has to be there
    let mut no_rook = board.clone();
    no_rook.remove(sq("k1"));
    assert_eq!(castle_targets(&no_rook, &history), vec!["f1"]);
    let mut wrong_piece = no_rook.clone();
    wrong_piece.place(sq("k1"), Piece::new(Red, Knight)).unwrap();
    assert_eq!(castle_targets(&wrong_piece, &history), vec!["f1"]);
}

#[test]
fn castling_for_every_color_test() {
    let mut board = Board::startpos();
    for (square, _) in Board::startpos().pieces().filter(|(_, p)| !matches!(p.typ, King | Rook)) {
        board.remove(square);
    }
    let history = MovementHistory::default();
    for color in PlayerColor::iter() {
        let (king_square, king) = board.pieces_of(color).find(|(_, p)| p.is_king()).unwrap();
        let moves = legal_moves(king, king_square, &board, none(), &history, &[]);
        let castles = moves.iter().filter(|m| m.is_castle()).collect_vec();
        assert_eq!(castles.len(), 2, "{color}");
        for castle in castles {
            let mut copy = board.clone();
            _ = copy.apply_move(king, *castle);
            let coords = rook_castling_coords(color, castle.to).unwrap();
            assert_eq!(copy.get(coords.rook_to), Some(Piece::new(color, Rook)));
            assert!(copy.is_empty(coords.rook_from));
        }
    }
}

#[test]
fn en_passant_expiry_test() {
    let pos = Position::startpos().play_moves("h2-h3 b4-c4 g13-g12 m5-l5 d2-d4").unwrap();
    assert_eq!(pos.active(), Blue);
    let moves = pos.legal_moves_from(sq("c4"));
    let ep = moves.iter().find(|m| matches!(m.kind, MoveKind::EnPassant(_))).unwrap();
    assert_eq!(ep.to, sq("d3"));
    assert_eq!(ep.kind, MoveKind::EnPassant(sq("d4")));
    let taken = pos.make_move(*ep).unwrap();
    assert_eq!(taken.piece_on(sq("d4")), None);
    assert_eq!(taken.piece_on(sq("d3")), Some(Piece::new(Blue, Pawn)));

    // one ply later, the target is gone
    let later = pos.play_moves("b5-c5").unwrap();
    assert_eq!(later.ply(), 6);
    assert!(later.en_passant_targets().is_empty());
    assert!(later.legal_moves_from(sq("c4")).iter().all(|m| m.kind == MoveKind::Normal));
    let later = later.play_moves("f13-f12 m8-l8 e2-e3").unwrap();
    assert_eq!(later.active(), Blue);
    assert!(later.move_from_text("c4xd3").is_err());
}

#[test]
fn eliminated_pieces_block_test() {
    let board = board_with(&[("h1", "rK"), ("h10", "yR"), ("h5", "gN")]);
    let eliminated = none().with(Green);
    assert!(!is_king_in_check(Red, &board, eliminated));
    // the rook can take the eliminated knight, but not move through it
    let rook_moves = legal_moves(Piece::new(Yellow, Rook), sq("h10"), &board, eliminated, &MovementHistory::default(), &[]);
    assert!(rook_moves.iter().any(|m| m.to == sq("h5") && m.is_capture));
    assert!(rook_moves.iter().all(|m| m.to != sq("h4")));
    assert!(legal_moves_for_code("gN", sq("h5"), &board, eliminated, &MovementHistory::default(), &[]).is_empty());
}

fn random_playout(seed: u64, plies: usize) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Position::startpos();
    let mut res = vec![pos.clone()];
    for _ in 0..plies {
        let moves = pos.legal_moves();
        let Some(mov) = moves.choose(&mut rng) else {
            break;
        };
        pos = pos.make_move(*mov).unwrap();
        res.push(pos.clone());
    }
    res
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn bounds_and_self_check_test(seed in any::<u64>(), plies in 0_usize..48) {
        for pos in random_playout(seed, plies) {
            let board = pos.board();
            let ep = pos.en_passant_targets();
            for (square, piece) in board.pieces() {
                let pseudo = pseudolegal_moves(piece, square, board, pos.eliminated(), &ep, CastlingGen::Include(pos.history()));
                prop_assert!(pseudo.iter().all(|m| m.to.is_valid() && m.from == square));
                let legal = legal_moves(piece, square, board, pos.eliminated(), pos.history(), &ep);
                prop_assert!(legal.len() <= pseudo.len());
                for mov in legal {
                    prop_assert!(mov.to.is_valid());
                    let mut copy = board.clone();
                    _ = copy.apply_move(piece, mov);
                    prop_assert!(!is_king_in_check(piece.color, &copy, pos.eliminated()));
                }
            }
        }
    }

    #[test]
    fn eliminated_and_purity_test(seed in any::<u64>(), plies in 0_usize..48, color_idx in 0_usize..4) {
        let color = PlayerColor::iter().nth(color_idx).unwrap();
        for pos in random_playout(seed, plies) {
            let board = pos.board().clone();
            let eliminated = pos.eliminated().with(color);
            let ep = pos.en_passant_targets();
            for (square, piece) in board.pieces_of(color) {
                prop_assert!(legal_moves(piece, square, &board, eliminated, pos.history(), &ep).is_empty());
            }
            prop_assert!(!is_king_in_check(color, &board, eliminated));
            prop_assert_eq!(classify(color, &board, eliminated, pos.history(), &ep), ColorStatus::Eliminated);

            let first = all_legal_moves(pos.active(), &board, pos.eliminated(), pos.history(), &ep);
            let second = all_legal_moves(pos.active(), &board, pos.eliminated(), pos.history(), &ep);
            prop_assert_eq!(first, second);
            prop_assert_eq!(&board, pos.board());
        }
    }

    #[test]
    fn classification_test(seed in any::<u64>(), plies in 0_usize..48) {
        let positions = random_playout(seed, plies);
        for pos in &positions {
            prop_assert!(verify_kings(pos.board(), pos.eliminated()).is_ok());
            let ep = pos.en_passant_targets();
            for color in PlayerColor::iter() {
                let status = classify(color, pos.board(), pos.eliminated(), pos.history(), &ep);
                let has_moves = has_any_legal_moves(color, pos.board(), pos.eliminated(), pos.history(), &ep);
                let in_check = is_king_in_check(color, pos.board(), pos.eliminated());
                let expected = if pos.eliminated().contains(color) {
                    ColorStatus::Eliminated
                } else {
                    match (has_moves, in_check) {
                        (true, _) => ColorStatus::Active,
                        (false, true) => ColorStatus::Checkmate,
                        (false, false) => ColorStatus::Stalemate,
                    }
                };
                prop_assert_eq!(status, expected);
            }
            if !pos.is_game_over() {
                prop_assert!(!pos.eliminated().contains(pos.active()));
                prop_assert!(!pos.legal_moves().is_empty());
            }
        }
        // eliminations are never undone
        for (before, after) in positions.iter().tuple_windows() {
            prop_assert!(before.eliminated().iter().all(|c| after.eliminated().contains(c)));
        }
    }
}

#[test]
fn random_games_terminate_test() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..3 {
        let seed = rng.random();
        let positions = random_playout(seed, 200);
        let last = positions.last().unwrap();
        assert!(last.is_game_over() || positions.len() == 201);
        assert_eq!(last.board().as_text().parse::<Board>().unwrap(), *last.board());
    }
}
