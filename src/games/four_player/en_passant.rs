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
use arrayvec::ArrayVec;

use crate::games::four_player::board::Board;
use crate::games::four_player::moves::{Move, MoveKind};
use crate::games::four_player::pieces::PieceType::Pawn;
use crate::games::four_player::pieces::{NUM_COLORS, Piece};
use crate::general::squares::{Square, sup_distance};

/// The square skipped by a double pawn push, together with the pawn that skipped it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[must_use]
pub struct EnPassantTarget {
    pub square: Square,
    pub creator: Piece,
}

impl EnPassantTarget {
    pub fn new(square: Square, creator: Piece) -> Self {
        Self { square, creator }
    }

    pub fn from_double_push(piece: Piece, mov: Move) -> Option<Self> {
        if piece.typ != Pawn || mov.kind != MoveKind::DoublePawnPush {
            return None;
        }
        let (dr, dc) = piece.color.pawn_forward();
        Some(Self::new(mov.from.offset(dr, dc)?, piece))
    }

    /// Where the pawn that created this target stands.
    pub fn pawn_square(self) -> Option<Square> {
        let (dr, dc) = self.creator.color.pawn_forward();
        self.square.offset(dr, dc)
    }

    /// Doesn't check that `target` is one of the pawn's capture squares, that's up to the caller.
    pub fn capturable_by(self, pawn: Piece, from: Square, board: &Board) -> bool {
        let Some(pawn_square) = self.pawn_square() else {
            return false;
        };
        pawn.typ == Pawn
            && self.creator.typ == Pawn
            && pawn.color != self.creator.color
            && board.is_empty(self.square)
            && board.get(pawn_square) == Some(self.creator)
            && sup_distance(pawn_square, from) == 1
    }
}

/// En passant targets stamped with the ply on which they were created.
/// A target created on ply `n` can only be used on ply `n + 1`.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct EnPassantTargets {
    entries: ArrayVec<(EnPassantTarget, usize), NUM_COLORS>,
}

impl EnPassantTargets {
    /// Drops everything that can't be used anymore after `ply`, so the list never fills up.
    pub fn record(&mut self, target: EnPassantTarget, ply: usize) {
        self.entries.retain(|(_, created)| *created >= ply);
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push((target, ply));
    }

    pub fn live_at(&self, ply: usize) -> ArrayVec<EnPassantTarget, NUM_COLORS> {
        self.entries
            .iter()
            .filter(|(_, created)| created + 1 == ply)
            .map(|(target, _)| *target)
            .collect()
    }

    pub fn expire(&mut self, ply: usize) {
        self.entries.retain(|(_, created)| *created + 1 >= ply);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
