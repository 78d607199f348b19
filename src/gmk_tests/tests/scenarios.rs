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

//! Black-box, cross-crate scenarios: the pieces in `gmk_board` and
//! `gmk_mcts` exercised together the way a front end would, rather than in
//! isolation as each crate's own unit tests do.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use gmk_board::{Board, Piece, Position, Rule, CENTER_POSITION};
use gmk_mcts::{check_outcome, mcts, EngineConfig, Tree, WorkerPools};

fn quick_config() -> EngineConfig {
    EngineConfig { time_limit: Duration::from_millis(100), ..EngineConfig::default() }
}

#[test]
fn position_round_trips_through_letter_number_format() {
    assert_eq!(Position::parse("H8").unwrap(), CENTER_POSITION);
    assert_eq!(CENTER_POSITION.raw(), 113);
    assert_eq!(CENTER_POSITION.to_string(), "H8");
}

#[test]
fn gomoku_pro_step_three_legality_matrix() {
    let h8 = CENTER_POSITION;
    let f6 = CENTER_POSITION.go(-2, -2).unwrap();
    let f5 = CENTER_POSITION.go(-3, -2).unwrap();

    assert!(!gmk_board::is_legal(Rule::GomokuPro, 3, h8).0);
    assert!(!gmk_board::is_legal(Rule::GomokuPro, 3, f6).0);
    assert!(gmk_board::is_legal(Rule::GomokuPro, 3, f5).0);
}

#[test]
fn five_in_a_row_is_detected_across_crates() {
    let pools = WorkerPools::new(2);
    let board = Arc::new(RwLock::new(Board::new()));
    {
        let mut b = board.write().unwrap();
        for offset in -2..=1 {
            b.set(CENTER_POSITION.go(0, offset).unwrap(), Piece::Black).unwrap();
        }
    }
    let h12 = CENTER_POSITION.go(0, 2).unwrap();
    board.write().unwrap().set(h12, Piece::Black).unwrap();

    let lookup = gmk_mcts::TreeLookup::new(Arc::clone(&board), Arc::new(Vec::new()));
    assert_eq!(check_outcome(&pools, &lookup, h12), Piece::Black);
}

#[test]
fn a_gap_prevents_five_in_a_row() {
    let pools = WorkerPools::new(2);
    let board = Arc::new(RwLock::new(Board::new()));
    let h8 = CENTER_POSITION;
    let k11 = h8.go(3, 3).unwrap();
    let l12 = h8.go(4, 4).unwrap();
    let m13 = h8.go(5, 5).unwrap();
    let j10_gap = h8.go(2, 2).unwrap();

    {
        let mut b = board.write().unwrap();
        b.set(h8, Piece::Black).unwrap();
        b.set(k11, Piece::Black).unwrap();
        b.set(l12, Piece::Black).unwrap();
        b.set(m13, Piece::Black).unwrap();
        assert_eq!(b.get(j10_gap), Piece::None);
    }

    let lookup = gmk_mcts::TreeLookup::new(Arc::clone(&board), Arc::new(Vec::new()));
    assert_eq!(check_outcome(&pools, &lookup, m13), Piece::None);
}

#[test]
fn playing_out_a_few_moves_keeps_the_tree_consistent() {
    let pools = WorkerPools::new(2);
    let board = Arc::new(RwLock::new(Board::new()));
    let config = quick_config();
    let rule = Rule::StandardGomoku;

    let mut tree = Tree::new_root(&pools, rule, config.valid_dist_thold).unwrap();
    let mut step = 1u32;

    for _ in 0..3 {
        let best = mcts(&mut tree, &pools, &board, rule, &config).unwrap();
        let pos = tree.pos(best);
        assert!(board.read().unwrap().get(pos) == Piece::None);
        board.write().unwrap().set(pos, Piece::for_step(step)).unwrap();

        tree = match tree.find_child_by_pos(tree.root(), pos) {
            Some(child) => tree.hoist(child),
            None => {
                Tree::new_synthetic_root(&pools, &board, rule, config.valid_dist_thold, step, pos).unwrap()
            }
        };
        assert_eq!(tree.pos(tree.root()), pos);
        step += 1;
    }
}

#[test]
fn mcts_always_returns_a_legal_move_when_one_exists() {
    let pools = WorkerPools::new(2);
    let board = Arc::new(RwLock::new(Board::new()));
    let config = quick_config();
    let mut tree = Tree::new_root(&pools, Rule::StandardGomoku, config.valid_dist_thold).unwrap();

    let best = mcts(&mut tree, &pools, &board, Rule::StandardGomoku, &config).unwrap();
    let pos = tree.pos(best);
    assert_eq!(pos, CENTER_POSITION);
}
