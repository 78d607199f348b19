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

//! Piece lookups used to query hypothetical board state without
//! materializing a full board per simulation.
//!
//! Three shapes of lookup are needed: the tree-local lookup composing the
//! authoritative board with the ancestor path (used by `expand`'s outcome
//! check and by `uct`-adjacent code), and the rollout-local lookup that adds
//! a third, mutable overlay layer on top of those two. Both are cheap to
//! clone (`Arc`-backed) so they can be captured by `'static` worker-pool
//! jobs without copying the underlying data.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use gmk_board::{Board, Piece, Position};

/// Anything that can answer "what piece occupies this position".
pub trait PieceLookup: Send + Sync {
    fn lookup(&self, pos: Position) -> Piece;
}

/// One step of the path from the tree root down to the node being queried:
/// `(position_played, step)`. The piece credited is `Piece::for_step(step)`.
pub type AncestorPath = Arc<Vec<(Position, u32)>>;

/// Composes the authoritative board with a node's ancestor path, in that
/// priority order — exactly the lookup `expand()` and `lookup_piece()` need.
/// Cheap to clone: both fields are `Arc`s.
#[derive(Clone)]
pub struct TreeLookup {
    board: Arc<RwLock<Board>>,
    path: AncestorPath,
}

impl TreeLookup {
    pub fn new(board: Arc<RwLock<Board>>, path: AncestorPath) -> Self {
        TreeLookup { board, path }
    }
}

impl PieceLookup for TreeLookup {
    fn lookup(&self, pos: Position) -> Piece {
        if pos.is_out_of_range() {
            return Piece::Invalid;
        }
        let from_board = self.board.read().expect("board lock poisoned").get(pos);
        if from_board != Piece::None {
            return from_board;
        }
        for &(ancestor_pos, step) in self.path.iter() {
            if ancestor_pos == pos {
                return Piece::for_step(step);
            }
        }
        Piece::None
    }
}

/// Adds a third, mutable overlay on top of a [`TreeLookup`]: the moves
/// played so far during one rollout. Checked last, after the board and the
/// ancestor path, matching §4.6's layering order.
#[derive(Clone)]
pub struct RolloutLookup {
    tree: TreeLookup,
    overlay: Arc<RwLock<HashMap<Position, Piece>>>,
}

impl RolloutLookup {
    pub fn new(tree: TreeLookup) -> Self {
        RolloutLookup { tree, overlay: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Records a move played during the rollout so subsequent lookups see it.
    pub fn place(&self, pos: Position, piece: Piece) {
        self.overlay.write().expect("overlay lock poisoned").insert(pos, piece);
    }
}

impl PieceLookup for RolloutLookup {
    fn lookup(&self, pos: Position) -> Piece {
        if pos.is_out_of_range() {
            return Piece::Invalid;
        }
        let base = self.tree.lookup(pos);
        if base != Piece::None {
            return base;
        }
        self.overlay
            .read()
            .expect("overlay lock poisoned")
            .get(&pos)
            .copied()
            .unwrap_or(Piece::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmk_board::CENTER_POSITION;

    #[test]
    fn board_takes_priority_over_ancestor_path() {
        let mut board = Board::new();
        board.set(CENTER_POSITION, Piece::Black).unwrap();
        let board = Arc::new(RwLock::new(board));
        let path = Arc::new(vec![(CENTER_POSITION, 2u32)]); // would say White
        let lookup = TreeLookup::new(board, path);
        assert_eq!(lookup.lookup(CENTER_POSITION), Piece::Black);
    }

    #[test]
    fn ancestor_path_used_when_board_is_empty_there() {
        let board = Arc::new(RwLock::new(Board::new()));
        let other = CENTER_POSITION.go(1, 0).unwrap();
        let path = Arc::new(vec![(other, 3u32)]); // odd step => Black
        let lookup = TreeLookup::new(board, path);
        assert_eq!(lookup.lookup(other), Piece::Black);
        assert_eq!(lookup.lookup(CENTER_POSITION), Piece::None);
    }

    #[test]
    fn rollout_overlay_is_consulted_last() {
        let board = Arc::new(RwLock::new(Board::new()));
        let path = Arc::new(Vec::new());
        let tree = TreeLookup::new(board, path);
        let rollout = RolloutLookup::new(tree);
        assert_eq!(rollout.lookup(CENTER_POSITION), Piece::None);
        rollout.place(CENTER_POSITION, Piece::White);
        assert_eq!(rollout.lookup(CENTER_POSITION), Piece::White);
    }

    #[test]
    fn out_of_range_is_invalid_regardless_of_layer() {
        let board = Arc::new(RwLock::new(Board::new()));
        let path = Arc::new(Vec::new());
        let tree = TreeLookup::new(board, path);
        assert_eq!(tree.lookup(gmk_board::INVALID_POSITION), Piece::Invalid);
    }
}
