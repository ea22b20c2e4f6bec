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
use std::time::{Duration, Instant};

use crate::games::four_player::moves::Move;
use crate::games::four_player::position::Position;

#[derive(Copy, Clone, Debug)]
pub struct PerftRes {
    pub time: Duration,
    pub nodes: u64,
    pub depth: usize,
}

fn nps(nodes: u64, time: Duration) -> u64 {
    nodes * 1_000_000 / (time.as_micros() as u64).max(1)
}

impl Display for PerftRes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "info depth {depth} nodes {nodes} time {time} nps {nps}",
            depth = self.depth,
            nodes = self.nodes,
            time = self.time.as_millis(),
            nps = nps(self.nodes, self.time)
        )
    }
}

#[derive(Debug)]
pub struct SplitPerftRes {
    pub perft_res: PerftRes,
    pub children: Vec<(Move, u64)>,
}

impl Display for SplitPerftRes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.perft_res)?;
        for (mov, nodes) in &self.children {
            write!(f, "\n{mov}\t{nodes}")?;
        }
        Ok(())
    }
}

fn do_perft(depth: usize, pos: &Position) -> u64 {
    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    // a finished game has no moves, so it doesn't contribute any leaves
    moves
        .into_iter()
        .map(|mov| do_perft(depth - 1, &pos.make_move_unverified(mov)))
        .sum()
}

/// Counts the leaf nodes of the game tree `depth` plies below `pos`, where each ply is a move by one player.
pub fn perft(depth: usize, pos: &Position) -> PerftRes {
    let start = Instant::now();
    let nodes = if depth == 0 { 1 } else { do_perft(depth, pos) };
    let time = start.elapsed();
    PerftRes { time, nodes, depth }
}

/// Like [`perft`], but also reports the number of leaves below each move.
/// A depth of 0 is treated as 1.
pub fn split_perft(depth: usize, pos: &Position) -> SplitPerftRes {
    let depth = depth.max(1);
    let start = Instant::now();
    let mut children = vec![];
    for mov in pos.legal_moves() {
        let child_nodes = if depth == 1 {
            1
        } else {
            do_perft(depth - 1, &pos.make_move_unverified(mov))
        };
        children.push((mov, child_nodes));
    }
    let time = start.elapsed();
    children.sort_by(|a, b| a.0.to_string().cmp(&b.0.to_string()));
    let nodes = children.iter().map(|(_, n)| n).sum();
    SplitPerftRes {
        perft_res: PerftRes { time, nodes, depth },
        children,
    }
}
