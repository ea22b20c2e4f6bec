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
use colored::Colorize;
use std::str::FromStr;

use crate::games::four_player::board::Board;
use crate::games::four_player::pieces::Piece;
use crate::general::common::{Res, parse_int_from_str};
use crate::general::squares::{BOARD_SIZE, DimT, Square, is_corner_excluded};

/// The text format lists the rows from the top (row 0, yellow's side) to the bottom, separated by `/`.
/// Each row is a comma separated list of cells: Either a piece code like `rK` or the number of consecutive empty squares.
/// Corner squares count as empty squares.
pub const START_TEXT: &str = "3,yR,yN,yB,yK,yQ,yB,yN,yR,3/3,yP,yP,yP,yP,yP,yP,yP,yP,3/14/\
bR,bP,10,gP,gR/bN,bP,10,gP,gN/bB,bP,10,gP,gB/bQ,bP,10,gP,gK/\
bK,bP,10,gP,gQ/bB,bP,10,gP,gB/bN,bP,10,gP,gN/bR,bP,10,gP,gR/\
14/3,rP,rP,rP,rP,rP,rP,rP,rP,3/3,rR,rN,rB,rQ,rK,rB,rN,rR,3";

impl Board {
    pub fn from_text(text: &str) -> Res<Self> {
        let mut board = Board::empty();
        let rows = text.trim().split('/').collect::<Vec<_>>();
        ensure!(
            rows.len() == BOARD_SIZE,
            "The board must consist of {BOARD_SIZE} rows separated by '/', but there are {}",
            rows.len().to_string().red()
        );
        for (row, line) in rows.into_iter().enumerate() {
            let mut column = 0;
            for cell in line.split(',').map(str::trim) {
                if cell.is_empty() {
                    bail!("Empty cell in row {row} ('{}')", line.red());
                } else if cell.starts_with(|c: char| c.is_ascii_digit()) {
                    let num_empty: usize = parse_int_from_str(cell, "number of empty squares")?;
                    ensure!(num_empty > 0, "Empty square runs can't have length 0 (row {row})");
                    ensure!(
                        num_empty <= BOARD_SIZE - column,
                        "Row {row} ('{}') is longer than {BOARD_SIZE} squares",
                        line.red()
                    );
                    column += num_empty;
                } else {
                    let piece = Piece::from_str(cell)?;
                    ensure!(column < BOARD_SIZE, "Row {row} ('{}') is too long", line.red());
                    let square = Square::new(row as DimT, column as DimT);
                    ensure!(
                        !is_corner_excluded(square),
                        "Pieces can't be placed in the corners, but '{piece}' is on {}",
                        square.to_string().red()
                    );
                    board.place(square, piece)?;
                    column += 1;
                }
                ensure!(
                    column <= BOARD_SIZE,
                    "Row {row} ('{}') is longer than {BOARD_SIZE} squares",
                    line.red()
                );
            }
            ensure!(
                column == BOARD_SIZE,
                "Row {row} ('{}') only describes {column} of {BOARD_SIZE} squares",
                line.red()
            );
        }
        Ok(board)
    }

    pub fn as_text(&self) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);
        for row in 0..BOARD_SIZE as DimT {
            let mut cells = vec![];
            let mut num_empty = 0;
            for column in 0..BOARD_SIZE as DimT {
                match self.get(Square::new(row, column)) {
                    None => num_empty += 1,
                    Some(piece) => {
                        if num_empty > 0 {
                            cells.push(num_empty.to_string());
                            num_empty = 0;
                        }
                        cells.push(piece.to_string());
                    }
                }
            }
            if num_empty > 0 {
                cells.push(num_empty.to_string());
            }
            rows.push(cells.join(","));
        }
        rows.join("/")
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Res<Self> {
        Self::from_text(s)
    }
}
