// Copyright 2026 Gomoku Project Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Enumerates legal, empty, proximity-filtered positions for a given step.
//! Every one of the 225 cells is checked by an independent task; results
//! stream into a bounded channel of exactly that capacity, so producers
//! never block on the output side.

use crossbeam_channel::{bounded, Receiver};
use rand::Rng;

use gmk_board::{is_legal, Board, Piece, Position, Rule, BOARD_SIZE, CENTER_POSITION, NUM_POSITIONS};

use crate::lookup::PieceLookup;
use crate::pool::{TaskGroup, WorkerPools};

/// Streams candidate positions for `step` under `rule`, as seen through
/// `lookup`, into a freshly created bounded channel. The channel is closed
/// (via the wait-and-close pool) once every one of the 225 per-cell checks
/// completes.
pub fn generate_candidates<L>(
    pools: &WorkerPools,
    lookup: &L,
    rule: Rule,
    step: u32,
    mut dist_thold: u8,
) -> Receiver<Position>
where
    L: PieceLookup + Clone + 'static,
{
    assert!(step > 0, "generate_candidates called with step == 0");

    if step == 3 && rule == Rule::GomokuPro && dist_thold < 2 {
        dist_thold = 2;
    }

    let (tx, rx) = bounded(NUM_POSITIONS as usize);
    let group = TaskGroup::new();
    group.add(NUM_POSITIONS as usize);

    for pos in Board::all_positions() {
        let lookup = lookup.clone();
        let tx = tx.clone();
        let group = group.clone();

        pools.candidate.submit(Box::new(move || {
            if is_candidate(&lookup, rule, step, dist_thold, pos) {
                let _ = tx.send(pos);
            }
            group.done();
        }));
    }

    pools.wait_and_close(group, tx);
    rx
}

fn is_candidate<L: PieceLookup>(lookup: &L, rule: Rule, step: u32, dist_thold: u8, pos: Position) -> bool {
    if lookup.lookup(pos) != Piece::None {
        return false;
    }
    let (legal, _hint) = is_legal(rule, step, pos);
    if !legal {
        return false;
    }

    if step == 1 || dist_thold == 0 {
        if pos != CENTER_POSITION {
            let (center_legal, _) = is_legal(rule, 1, CENTER_POSITION);
            if center_legal {
                return false;
            }
        }
        return true;
    }

    let (x, y) = (pos.x(), pos.y());
    let d = dist_thold as i32;
    let left = (x - d).max(0);
    let right = (x + d).min(BOARD_SIZE - 1);
    let top = (y - d).max(0);
    let bottom = (y + d).min(BOARD_SIZE - 1);

    for ny in top..=bottom {
        for nx in left..=right {
            if nx == x && ny == y {
                continue;
            }
            let neighbor = Position::new(nx, ny, false).expect("clamped coordinates stay in range");
            let piece = lookup.lookup(neighbor);
            if piece == Piece::Black || piece == Piece::White {
                return true;
            }
        }
    }
    false
}

/// Materializes `rx` into a `Vec`, optionally shrinking to exact length and
/// shuffling with a uniform Fisher-Yates. Stream order is non-deterministic;
/// the returned order is deterministic only when `shuffle` is false.
pub fn collect_candidates<R: Rng + ?Sized>(
    rx: Receiver<Position>,
    shrink: bool,
    shuffle: bool,
    rng: &mut R,
) -> Vec<Position> {
    let mut positions: Vec<Position> = rx.into_iter().collect();
    if shrink {
        positions.shrink_to_fit();
    }
    if shuffle {
        fisher_yates(&mut positions, rng);
    }
    positions
}

fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::TreeLookup;
    use gmk_board::{Position, CENTER_POSITION};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::sync::{Arc, RwLock};

    fn pools() -> WorkerPools {
        WorkerPools::new(4)
    }

    fn lookup_from(board: Board) -> TreeLookup {
        TreeLookup::new(Arc::new(RwLock::new(board)), Arc::new(Vec::new()))
    }

    #[test]
    fn empty_board_step_one_yields_only_center() {
        let pools = pools();
        let lookup = lookup_from(Board::new());
        let rx = generate_candidates(&pools, &lookup, Rule::StandardGomoku, 1, 1);
        let mut rng = SmallRng::seed_from_u64(1);
        let positions = collect_candidates(rx, true, false, &mut rng);
        assert_eq!(positions, vec![CENTER_POSITION]);
    }

    #[test]
    fn distance_one_yields_exactly_the_eight_neighbors() {
        let pools = pools();
        let mut board = Board::new();
        board.set(CENTER_POSITION, Piece::Black).unwrap();
        let lookup = lookup_from(board);
        let rx = generate_candidates(&pools, &lookup, Rule::StandardGomoku, 2, 1);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut positions = collect_candidates(rx, true, false, &mut rng);
        positions.sort();

        let mut expected: Vec<Position> = (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| (dx, dy) != (0, 0))
            .map(|(dx, dy)| CENTER_POSITION.go(dx, dy).unwrap())
            .collect();
        expected.sort();

        assert_eq!(positions, expected);
    }

    #[test]
    fn gomoku_pro_step_three_locally_raises_distance() {
        let pools = pools();
        let mut board = Board::new();
        board.set(CENTER_POSITION, Piece::Black).unwrap();
        let second = CENTER_POSITION.go(10, 10).unwrap();
        board.set(second, Piece::White).unwrap();
        let lookup = lookup_from(board);
        // dist_thold of 0 would normally disable the filter entirely, but
        // step == 3 under Gomoku-Pro always uses at least 2.
        let rx = generate_candidates(&pools, &lookup, Rule::GomokuPro, 3, 1);
        let mut rng = SmallRng::seed_from_u64(1);
        let positions = collect_candidates(rx, true, false, &mut rng);
        // Every returned position must be outside the central 5x5 box and
        // within Chebyshev distance 2 of an occupied cell.
        for pos in &positions {
            assert!(pos.x_offset().abs() > 2 || pos.y_offset().abs() > 2);
        }
    }

    #[test]
    fn shuffle_preserves_the_same_set_of_positions() {
        let pools = pools();
        let mut board = Board::new();
        board.set(CENTER_POSITION, Piece::Black).unwrap();
        let lookup = lookup_from(board);
        let rx = generate_candidates(&pools, &lookup, Rule::StandardGomoku, 2, 1);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut shuffled = collect_candidates(rx, true, true, &mut rng);
        shuffled.sort();
        assert_eq!(shuffled.len(), 8);
    }
}
