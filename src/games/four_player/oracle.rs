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
use anyhow::{anyhow, bail, ensure};
use colored::Colorize;
use derive_more::Display;
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

use crate::games::four_player::attacks::is_king_in_check;
use crate::games::four_player::board::Board;
use crate::games::four_player::en_passant::EnPassantTarget;
use crate::games::four_player::history::MovementHistory;
use crate::games::four_player::legality::legal_moves;
use crate::games::four_player::pieces::PlayerColor::*;
use crate::games::four_player::pieces::{ColorSet, NUM_COLORS, PlayerColor};
use crate::general::common::Res;

/// The fixed cyclic order in which the colors move. Never changes during a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[must_use]
pub struct TurnOrder([PlayerColor; NUM_COLORS]);

impl Default for TurnOrder {
    fn default() -> Self {
        Self([Red, Blue, Yellow, Green])
    }
}

impl TurnOrder {
    pub fn new(order: [PlayerColor; NUM_COLORS]) -> Res<Self> {
        for color in PlayerColor::iter() {
            let count = order.iter().filter(|c| **c == color).count();
            ensure!(
                count == 1,
                "Each color must appear exactly once in the turn order, but {} appears {count} times",
                color.to_string().red()
            );
        }
        Ok(Self(order))
    }

    /// Parses something like `rbyg` or `red,blue,yellow,green`.
    pub fn from_text(text: &str) -> Res<Self> {
        let text = text.trim();
        let colors: Vec<PlayerColor> = if text.contains(',') {
            text.split(',')
                .map(|name| {
                    let name = name.trim();
                    PlayerColor::iter()
                        .find(|c| c.to_string().eq_ignore_ascii_case(name))
                        .ok_or_else(|| anyhow!("Unknown color '{}'", name.red()))
                })
                .collect::<Res<_>>()?
        } else {
            text.chars()
                .map(|c| PlayerColor::from_char(c).ok_or_else(|| anyhow!("Unknown color '{}'", c.to_string().red())))
                .collect::<Res<_>>()?
        };
        let Ok(order) = <[PlayerColor; NUM_COLORS]>::try_from(colors.as_slice()) else {
            bail!("The turn order must contain exactly {NUM_COLORS} colors, not {}", colors.len());
        };
        Self::new(order)
    }

    pub fn colors(&self) -> [PlayerColor; NUM_COLORS] {
        self.0
    }

    pub fn first(&self) -> PlayerColor {
        self.0[0]
    }

    /// The color after `color`, ignoring eliminations.
    pub fn next(&self, color: PlayerColor) -> PlayerColor {
        let idx = self.0.iter().position(|c| *c == color).unwrap_or_default();
        self.0[(idx + 1) % NUM_COLORS]
    }

    /// The first color after `after` that hasn't been eliminated. This can be `after` itself if all other
    /// colors are out, and it's `None` if every color has been eliminated.
    pub fn next_active(&self, after: PlayerColor, eliminated: ColorSet) -> Option<PlayerColor> {
        let mut color = after;
        for _ in 0..NUM_COLORS {
            color = self.next(color);
            if !eliminated.contains(color) {
                return Some(color);
            }
        }
        None
    }
}

impl fmt::Display for TurnOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().map(|c| c.to_char()).join(""))
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Display)]
#[must_use]
pub enum ColorStatus {
    #[default]
    #[display("active")]
    Active,
    #[display("checkmated")]
    Checkmate,
    #[display("stalemated")]
    Stalemate,
    #[display("eliminated")]
    Eliminated,
}

impl ColorStatus {
    /// Checkmate and stalemate both knock a color out of the game.
    pub fn eliminates(self) -> bool {
        self != ColorStatus::Active
    }
}

pub fn has_any_legal_moves(
    color: PlayerColor,
    board: &Board,
    eliminated: ColorSet,
    history: &MovementHistory,
    en_passant: &[EnPassantTarget],
) -> bool {
    !eliminated.contains(color)
        && board
            .pieces_of(color)
            .any(|(square, piece)| !legal_moves(piece, square, board, eliminated, history, en_passant).is_empty())
}

pub fn classify(
    color: PlayerColor,
    board: &Board,
    eliminated: ColorSet,
    history: &MovementHistory,
    en_passant: &[EnPassantTarget],
) -> ColorStatus {
    if eliminated.contains(color) {
        return ColorStatus::Eliminated;
    }
    if has_any_legal_moves(color, board, eliminated, history, en_passant) {
        return ColorStatus::Active;
    }
    let res = if is_king_in_check(color, board, eliminated) {
        ColorStatus::Checkmate
    } else {
        ColorStatus::Stalemate
    };
    debug!("{color} has no legal moves and is {res}");
    res
}

pub fn is_checkmate(
    color: PlayerColor,
    board: &Board,
    eliminated: ColorSet,
    history: &MovementHistory,
    en_passant: &[EnPassantTarget],
) -> bool {
    classify(color, board, eliminated, history, en_passant) == ColorStatus::Checkmate
}

pub fn is_stalemate(
    color: PlayerColor,
    board: &Board,
    eliminated: ColorSet,
    history: &MovementHistory,
    en_passant: &[EnPassantTarget],
) -> bool {
    classify(color, board, eliminated, history, en_passant) == ColorStatus::Stalemate
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum KingInvariantError {
    MissingKing(PlayerColor),
    TooManyKings { color: PlayerColor, count: usize },
}

impl fmt::Display for KingInvariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KingInvariantError::MissingKing(color) => {
                write!(f, "The {} player is still in the game, but has no king", color.to_string().bold())
            }
            KingInvariantError::TooManyKings { color, count } => write!(
                f,
                "The {0} player has {1} kings, but there must be exactly one",
                color.to_string().bold(),
                count.to_string().red()
            ),
        }
    }
}

/// Every color that is still in the game must have exactly one king.
/// Boards that violate this make [`is_king_in_check`] fall back to "not in check".
pub fn verify_kings(board: &Board, eliminated: ColorSet) -> Result<(), KingInvariantError> {
    for color in PlayerColor::iter().filter(|c| !eliminated.contains(*c)) {
        let count = board.pieces_of(color).filter(|(_, p)| p.is_king()).count();
        match count {
            1 => {}
            0 => return Err(KingInvariantError::MissingKing(color)),
            count => return Err(KingInvariantError::TooManyKings { color, count }),
        }
    }
    Ok(())
}
