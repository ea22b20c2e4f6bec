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
//! Four-player chess on a 14x14 board with the 3x3 corners cut off.
//!
//! Red, blue, yellow and green sit on the four arms of the cross. Everything in this module is a pure function of
//! its arguments: a [`Board`], the set of eliminated colors, the [`MovementHistory`] of kings and rooks, and the
//! live en passant targets. [`Position`] bundles all of that into a playable game.

pub mod attacks;
pub mod board;
pub mod castling;
pub mod en_passant;
pub mod history;
pub mod legality;
mod movegen;
pub mod moves;
pub mod notation;
pub mod oracle;
pub mod pieces;
pub mod position;
pub mod rules;
#[cfg(test)]
mod tests;

pub use attacks::{is_king_in_check, is_square_attacked};
pub use board::Board;
pub use castling::{CastleSide, RookCastling, is_castling_move, rook_castling_coords};
pub use en_passant::EnPassantTarget;
pub use history::{CastlingPiece, MovementHistory};
pub use legality::{all_legal_moves, legal_moves, legal_moves_for_code};
pub use movegen::{CastlingGen, pawn_capture_squares, pseudolegal_moves};
pub use moves::{Move, MoveKind, PieceMoveList};
pub use oracle::{
    ColorStatus, KingInvariantError, TurnOrder, classify, has_any_legal_moves, is_checkmate, is_stalemate, verify_kings,
};
pub use pieces::{ColorSet, Piece, PieceType, PlayerColor};
pub use position::Position;
pub use rules::Rules;
