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

//! Five-in-a-row detection: eight half-ray scans, one per [`Direction`],
//! feeding four shared atomic per-axis counters.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use gmk_board::{Axis, Direction, Piece, Position};

use crate::lookup::PieceLookup;
use crate::pool::{TaskGroup, WorkerPools};

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
        Axis::DiagonalLeftUpRightDown => 2,
        Axis::DiagonalRightUpLeftDown => 3,
    }
}

/// Checks whether the stone at `pos` (as seen through `lookup`) forms a run
/// of five or more through `pos` along any axis.
///
/// Returns `Piece::Invalid` if `pos` is out of range or `lookup` reports an
/// invalid color there; `Piece::None` if the cell is empty, holds `Both`, or
/// no axis reaches a five-in-a-row; otherwise the winning color.
pub fn check_outcome<L>(pools: &WorkerPools, lookup: &L, pos: Position) -> Piece
where
    L: PieceLookup + Clone + 'static,
{
    if pos.is_out_of_range() {
        return Piece::Invalid;
    }

    let color = lookup.lookup(pos);
    match color {
        Piece::None | Piece::Both => return Piece::None,
        Piece::Invalid => return Piece::Invalid,
        Piece::Black | Piece::White => {}
    }

    let counters: Arc<[AtomicU8; 4]> = Arc::new([
        AtomicU8::new(0),
        AtomicU8::new(0),
        AtomicU8::new(0),
        AtomicU8::new(0),
    ]);
    let group = TaskGroup::new();
    group.add(Direction::ALL.len());

    for dir in Direction::ALL {
        let lookup = lookup.clone();
        let counters = counters.clone();
        let group = group.clone();

        pools.outcome.submit(Box::new(move || {
            let idx = axis_index(dir.axis());
            if counters[idx].load(Ordering::Relaxed) < 4 {
                let (dx, dy) = dir.delta();
                let mut cur = pos;
                let mut run = 0u8;

                loop {
                    match cur.go(dx, dy) {
                        Ok(next) if lookup.lookup(next) == color => {
                            run += 1;
                            cur = next;
                        }
                        _ => break,
                    }
                }

                if run > 0 {
                    counters[idx].fetch_add(run, Ordering::Relaxed);
                }
            }
            group.done();
        }));
    }

    group.wait();

    if counters.iter().any(|c| c.load(Ordering::Relaxed) >= 4) {
        color
    } else {
        Piece::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmk_board::{Board, Position, CENTER_POSITION};
    use crate::lookup::TreeLookup;
    use std::sync::RwLock;

    fn pools() -> WorkerPools {
        WorkerPools::new(4)
    }

    fn lookup_from(board: Board) -> TreeLookup {
        TreeLookup::new(Arc::new(RwLock::new(board)), Arc::new(Vec::new()))
    }

    #[test]
    fn five_in_a_row_is_detected() {
        let pools = pools();
        let mut board = Board::new();
        for row in ["H6", "H7", "H8", "H9", "H10"] {
            board.set(Position::parse(row).unwrap(), Piece::Black).unwrap();
        }
        let lookup = lookup_from(board);
        let result = check_outcome(&pools, &lookup, CENTER_POSITION);
        assert_eq!(result, Piece::Black);
    }

    #[test]
    fn gap_breaks_the_run() {
        let pools = pools();
        let mut board = Board::new();
        let h8 = Position::parse("H8").unwrap();
        board.set(h8, Piece::Black).unwrap();
        board.set(Position::parse("J10").unwrap(), Piece::Black).unwrap();
        board.set(Position::parse("K11").unwrap(), Piece::Black).unwrap();
        board.set(Position::parse("L12").unwrap(), Piece::Black).unwrap();
        let m13 = Position::parse("M13").unwrap();
        board.set(m13, Piece::Black).unwrap();
        let lookup = lookup_from(board);
        let result = check_outcome(&pools, &lookup, m13);
        assert_eq!(result, Piece::None, "run through M13 is only 4 contiguous stones");
    }

    #[test]
    fn empty_cell_has_no_outcome() {
        let pools = pools();
        let board = Board::new();
        let lookup = lookup_from(board);
        assert_eq!(check_outcome(&pools, &lookup, CENTER_POSITION), Piece::None);
    }

    #[test]
    fn out_of_range_is_invalid() {
        let pools = pools();
        let board = Board::new();
        let lookup = lookup_from(board);
        assert_eq!(
            check_outcome(&pools, &lookup, gmk_board::INVALID_POSITION),
            Piece::Invalid
        );
    }
}
