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
use colored::{Color, Colorize};
use std::fmt::Write;

use crate::games::four_player::board::Board;
use crate::games::four_player::pieces::{Piece, PlayerColor};
use crate::games::four_player::position::Position;
use crate::general::squares::{BOARD_SIZE, DimT, Square, file_to_char, is_corner_excluded};

pub fn player_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Red => Color::Red,
        PlayerColor::Blue => Color::Blue,
        PlayerColor::Yellow => Color::Yellow,
        PlayerColor::Green => Color::Green,
    }
}

fn pretty_piece(piece: Piece, highlighted: bool) -> String {
    let res = format!("{}", piece.typ.to_utf8_char()).color(player_color(piece.color)).bold();
    if highlighted { res.reversed().to_string() } else { res.to_string() }
}

/// Like the [`Display`](std::fmt::Display) implementation of [`Board`], but with one color per player
/// and unicode pieces. Squares in `highlight` are inverted.
pub fn pretty_board(board: &Board, highlight: &[Square]) -> String {
    let mut res = String::new();
    for row in 0..BOARD_SIZE as DimT {
        _ = write!(res, "{:>2} ", Square::new(row, 0).rank());
        for column in 0..BOARD_SIZE as DimT {
            let square = Square::new(row, column);
            let highlighted = highlight.contains(&square);
            let cell = if is_corner_excluded(square) {
                "  ".to_string()
            } else if let Some(piece) = board.get(square) {
                format!("{} ", pretty_piece(piece, highlighted))
            } else if highlighted {
                format!("{} ", "*".bold())
            } else {
                format!("{} ", ".".dimmed())
            };
            res.push_str(&cell);
        }
        res.push('\n');
    }
    res.push_str("   ");
    for column in 0..BOARD_SIZE as DimT {
        _ = write!(res, "{} ", file_to_char(column));
    }
    res
}

pub fn pretty_position(pos: &Position, highlight: &[Square]) -> String {
    let mut res = pretty_board(pos.board(), highlight);
    res.push('\n');
    if let Some(winner) = pos.winner() {
        _ = write!(res, "Game over, {} wins", winner.to_string().color(player_color(winner)).bold());
    } else {
        let active = pos.active();
        _ = write!(
            res,
            "{0} to move (ply {1}), eliminated: {2}",
            active.to_string().color(player_color(active)).bold(),
            pos.ply(),
            pos.eliminated()
        );
    }
    res
}
