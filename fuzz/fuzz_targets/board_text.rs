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
#![no_main]

use calipers::four_player::Board;
use libfuzzer_sys::fuzz_target;
use std::str::from_utf8;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = from_utf8(data) {
        if let Ok(board) = Board::from_text(text) {
            assert_eq!(Board::from_text(&board.as_text()).unwrap(), board);
        }
    }
});
