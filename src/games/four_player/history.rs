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

use crate::games::four_player::board::Board;
use crate::games::four_player::castling::{CastleSide, king_home, rook_castling_coords, rook_home};
use crate::games::four_player::moves::{Move, MoveKind};
use crate::games::four_player::pieces::{NUM_COLORS, Piece, PieceType, PlayerColor};
use crate::general::squares::Square;

pub const NUM_CASTLING_PIECES: usize = 3;

/// The pieces whose movement matters for castling rights.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, derive_more::Display, Arbitrary)]
#[must_use]
pub enum CastlingPiece {
    King,
    QueensideRook,
    KingsideRook,
}

impl CastlingPiece {
    pub fn rook(side: CastleSide) -> Self {
        match side {
            CastleSide::Queenside => CastlingPiece::QueensideRook,
            CastleSide::Kingside => CastlingPiece::KingsideRook,
        }
    }

    pub fn home_square(self, color: PlayerColor) -> Square {
        match self {
            CastlingPiece::King => king_home(color),
            CastlingPiece::QueensideRook => rook_home(color, CastleSide::Queenside),
            CastlingPiece::KingsideRook => rook_home(color, CastleSide::Kingside),
        }
    }
}

/// Remembers which kings and castling rooks have ever moved. Entries never get reset.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[must_use]
pub struct MovementHistory {
    moved: [[bool; NUM_CASTLING_PIECES]; NUM_COLORS],
}

impl MovementHistory {
    pub fn has_moved(&self, color: PlayerColor, piece: CastlingPiece) -> bool {
        self.moved[color as usize][piece as usize]
    }

    pub fn mark_moved(&mut self, color: PlayerColor, piece: CastlingPiece) {
        self.moved[color as usize][piece as usize] = true;
    }

    /// Updates the history after `piece` moved from `from` to `to`.
    /// Anything arriving on a home square means that the original piece is gone, so that entry gets set as well.
    pub fn record_move(&mut self, piece: Piece, from: Square, to: Square) {
        for (color, castling_piece) in Self::keys() {
            let home = castling_piece.home_square(color);
            let moves_it = from == home
                && piece.color == color
                && match castling_piece {
                    CastlingPiece::King => piece.is_king(),
                    _ => piece.typ == PieceType::Rook,
                };
            if moves_it || to == home {
                self.mark_moved(color, castling_piece);
            }
        }
    }

    /// Like [`Self::record_move`], but castling moves also count as a move of the rook.
    pub fn record_played_move(&mut self, piece: Piece, mov: Move) {
        self.record_move(piece, mov.from, mov.to);
        if let MoveKind::Castle(_) = mov.kind {
            if let Some(coords) = rook_castling_coords(piece.color, mov.to) {
                let rook = Piece::new(piece.color, PieceType::Rook);
                self.record_move(rook, coords.rook_from, coords.rook_to);
            }
        }
    }

    /// For boards of unknown history: every castling piece that isn't on its home square counts as moved.
    pub fn from_board(board: &Board) -> Self {
        let mut res = Self::default();
        for (color, castling_piece) in Self::keys() {
            let typ = match castling_piece {
                CastlingPiece::King => PieceType::King,
                _ => PieceType::Rook,
            };
            if board.get(castling_piece.home_square(color)) != Some(Piece::new(color, typ)) {
                res.mark_moved(color, castling_piece);
            }
        }
        res
    }

    /// All 12 keys, in a fixed order.
    pub fn keys() -> impl Iterator<Item = (PlayerColor, CastlingPiece)> {
        PlayerColor::iter().flat_map(|color| CastlingPiece::iter().map(move |piece| (color, piece)))
    }

    pub fn entries(&self) -> impl Iterator<Item = ((PlayerColor, CastlingPiece), bool)> + '_ {
        Self::keys().map(|(color, piece)| ((color, piece), self.has_moved(color, piece)))
    }
}
