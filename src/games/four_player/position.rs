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
use anyhow::{bail, ensure};
use arrayvec::ArrayVec;
use colored::Colorize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::games::four_player::board::{Board, describe_square};
use crate::games::four_player::en_passant::{EnPassantTarget, EnPassantTargets};
use crate::games::four_player::history::MovementHistory;
use crate::games::four_player::legality::{all_legal_moves, legal_moves};
use crate::games::four_player::moves::{Move, MoveText, PieceMoveList};
use crate::games::four_player::oracle::{ColorStatus, TurnOrder, classify, verify_kings};
use crate::games::four_player::pieces::{ColorSet, NUM_COLORS, Piece, PlayerColor};
use crate::games::four_player::rules::Rules;
use crate::general::common::Res;
use crate::general::squares::Square;

/// A game in progress: everything the legality engine needs to answer queries for the player to move.
///
/// Positions are immutable, [`Position::make_move`] returns a new one.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct Position {
    board: Board,
    eliminated: ColorSet,
    history: MovementHistory,
    en_passant: EnPassantTargets,
    turn_order: TurnOrder,
    active: PlayerColor,
    ply: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self::new_unchecked(Board::startpos(), TurnOrder::default())
    }

    pub fn from_rules(rules: &Rules) -> Res<Self> {
        Self::from_board(rules.start_board()?, rules.turn_order)
    }

    /// Colors without any pieces are eliminated right away. Every other color needs exactly one king.
    /// The history is reconstructed from the board: castling pieces on their home squares haven't moved.
    pub fn from_board(board: Board, turn_order: TurnOrder) -> Res<Self> {
        let eliminated: ColorSet = PlayerColor::iter()
            .filter(|color| board.pieces_of(*color).next().is_none())
            .collect();
        verify_kings(&board, eliminated)?;
        ensure!(
            eliminated.len() < NUM_COLORS,
            "There must be at least one player with pieces on the board"
        );
        let mut res = Self::new_unchecked(board, turn_order);
        res.eliminated = eliminated;
        res.history = MovementHistory::from_board(&res.board);
        res.start_turn(turn_order.first());
        Ok(res)
    }

    pub fn from_text(text: &str) -> Res<Self> {
        Self::from_board(Board::from_text(text)?, TurnOrder::default())
    }

    fn new_unchecked(board: Board, turn_order: TurnOrder) -> Self {
        Self {
            board,
            eliminated: ColorSet::empty(),
            history: MovementHistory::default(),
            en_passant: EnPassantTargets::default(),
            turn_order,
            active: turn_order.first(),
            ply: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn eliminated(&self) -> ColorSet {
        self.eliminated
    }

    pub fn history(&self) -> &MovementHistory {
        &self.history
    }

    pub fn turn_order(&self) -> TurnOrder {
        self.turn_order
    }

    /// The player to move. Meaningless once the game is over.
    pub fn active(&self) -> PlayerColor {
        self.active
    }

    /// Number of moves played since the start position.
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// The en passant targets that the player to move may use.
    pub fn en_passant_targets(&self) -> ArrayVec<EnPassantTarget, NUM_COLORS> {
        self.en_passant.live_at(self.ply)
    }

    pub fn status(&self, color: PlayerColor) -> ColorStatus {
        classify(color, &self.board, self.eliminated, &self.history, &self.en_passant_targets())
    }

    /// The game ends once at most one player is left.
    pub fn is_game_over(&self) -> bool {
        self.eliminated.len() + 1 >= NUM_COLORS
    }

    pub fn winner(&self) -> Option<PlayerColor> {
        if !self.is_game_over() {
            return None;
        }
        self.turn_order.colors().into_iter().find(|c| !self.eliminated.contains(*c))
    }

    /// All legal moves of the player to move, or nothing if the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return vec![];
        }
        all_legal_moves(self.active, &self.board, self.eliminated, &self.history, &self.en_passant_targets())
    }

    /// Legal moves of the piece on `square`, which doesn't have to belong to the player to move.
    pub fn legal_moves_from(&self, square: Square) -> PieceMoveList {
        match self.board.get(square) {
            None => PieceMoveList::new(),
            Some(piece) => legal_moves(
                piece,
                square,
                &self.board,
                self.eliminated,
                &self.history,
                &self.en_passant_targets(),
            ),
        }
    }

    /// Finds the legal move of the player to move that goes from `from` to `to`.
    pub fn find_move(&self, from: Square, to: Square) -> Res<Move> {
        ensure!(!self.is_game_over(), "The game is already over");
        let Some(piece) = self.board.get(from) else {
            bail!("There is no piece on {}", from.to_string().red());
        };
        ensure!(
            piece.color == self.active,
            "It's {0}'s turn, but {1} doesn't belong to {0}",
            self.active.to_string().bold(),
            describe_square(&self.board, from)
        );
        let Some(mov) = self.legal_moves_from(from).into_iter().find(|m| m.from == from && m.to == to) else {
            bail!(
                "Moving from {0} to {1} is not legal",
                describe_square(&self.board, from),
                describe_square(&self.board, to)
            );
        };
        Ok(mov)
    }

    /// Parses moves like `h2-h4` or `e5xd6` and checks that they are legal.
    pub fn move_from_text(&self, text: &str) -> Res<Move> {
        let parsed = MoveText::from_str(text)?;
        self.find_move(parsed.from, parsed.to)
    }

    /// Plays `mov` if it's legal for the player to move.
    pub fn make_move(&self, mov: Move) -> Res<Self> {
        let generated = self.find_move(mov.from, mov.to)?;
        ensure!(
            generated == mov,
            "The move {0} doesn't match the legal move {1}",
            mov.to_string().red(),
            generated
        );
        Ok(self.make_move_unverified(generated))
    }

    pub fn make_move_from_text(&self, text: &str) -> Res<Self> {
        let mov = self.move_from_text(text)?;
        Ok(self.make_move_unverified(mov))
    }

    /// Plays a move that must have been generated for this position.
    ///
    /// Updates the movement history and the en passant targets, removes colors whose king got captured,
    /// and then passes the turn to the next player that still has legal moves.
    /// Players without legal moves get eliminated on the way.
    pub fn make_move_unverified(&self, mov: Move) -> Self {
        let mut res = self.clone();
        let Some(piece) = res.board.get(mov.from) else {
            debug!("there is no piece on {0}, ignoring the move {mov}", mov.from);
            return res;
        };
        let captured = res.board.apply_move(piece, mov);
        res.history.record_played_move(piece, mov);
        if let Some(target) = EnPassantTarget::from_double_push(piece, mov) {
            res.en_passant.record(target, res.ply);
        }
        res.ply += 1;
        res.en_passant.expire(res.ply);
        if let Some(captured) = captured.filter(|p| p.is_king()) {
            res.eliminate(captured.color, "lost its king");
        }
        if let Some(next) = res.turn_order.next_active(self.active, res.eliminated) {
            res.start_turn(next);
        }
        res
    }

    /// Gives the turn to `color` or, if it can't move, to the next player that can.
    fn start_turn(&mut self, mut color: PlayerColor) {
        loop {
            if self.is_game_over() {
                if let Some(winner) = self.winner() {
                    self.active = winner;
                    info!("{winner} wins after {} plies", self.ply);
                }
                return;
            }
            match self.status(color) {
                ColorStatus::Active => {
                    self.active = color;
                    return;
                }
                ColorStatus::Eliminated => {}
                status => self.eliminate(color, &status.to_string()),
            }
            let Some(next) = self.turn_order.next_active(color, self.eliminated) else {
                return;
            };
            color = next;
        }
    }

    fn eliminate(&mut self, color: PlayerColor, reason: &str) {
        if !self.eliminated.contains(color) {
            info!("{color} is eliminated: {reason}");
            self.eliminated.insert(color);
        }
    }

    /// Plays moves from text, like `h2-h4 b7-d7`, separated by whitespace.
    pub fn play_moves(&self, moves: &str) -> Res<Self> {
        let mut res = self.clone();
        for text in moves.split_whitespace() {
            res = res.make_move_from_text(text)?;
        }
        Ok(res)
    }

    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        if let Some(winner) = self.winner() {
            write!(f, "Game over, {winner} wins")
        } else {
            write!(
                f,
                "{0} to move, ply {1}, eliminated: {2}",
                self.active, self.ply, self.eliminated
            )
        }
    }
}
