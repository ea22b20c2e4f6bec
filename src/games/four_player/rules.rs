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
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::games::four_player::board::Board;
use crate::games::four_player::notation::START_TEXT;
use crate::games::four_player::oracle::TurnOrder;
use crate::general::common::Res;

/// The configuration of a game. Rules don't change while a game is running,
/// so a [`Position`](crate::games::four_player::position::Position) only copies what it needs out of them.
#[derive(Debug, Clone, Eq, PartialEq)]
#[must_use]
pub struct Rules {
    pub name: String,
    pub turn_order: TurnOrder,
    pub startpos_text: String,
}

impl Default for Rules {
    fn default() -> Self {
        Self::four_player()
    }
}

impl Rules {
    pub fn four_player() -> Self {
        Self {
            name: "four-player".to_string(),
            turn_order: TurnOrder::default(),
            startpos_text: START_TEXT.to_string(),
        }
    }

    pub fn with_turn_order(mut self, turn_order: TurnOrder) -> Self {
        self.turn_order = turn_order;
        self
    }

    pub fn with_startpos_text(mut self, text: &str) -> Self {
        self.startpos_text = text.to_string();
        self
    }

    pub fn start_board(&self) -> Res<Board> {
        Board::from_text(&self.startpos_text)
    }
}

impl Display for Rules {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{0} (turn order {1})", self.name, self.turn_order)
    }
}
