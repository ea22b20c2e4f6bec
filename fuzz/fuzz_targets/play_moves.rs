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

use calipers::four_player::Position;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|choices: Vec<u8>| {
    let mut pos = Position::startpos();
    for choice in choices {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            assert!(pos.is_game_over());
            break;
        }
        let mov = moves[choice as usize % moves.len()];
        pos = pos.make_move(mov).unwrap();
        assert!(!pos.eliminated().contains(pos.active()) || pos.is_game_over());
    }
});
