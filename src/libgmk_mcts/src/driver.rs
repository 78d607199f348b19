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

//! The iterated simulate-until-budget loop: `traverse` (selection +
//! expansion) -> `rollout` -> `backpropagate`, repeated while there is time
//! left for roughly one more simulation.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use gmk_board::{Board, Rule};
use gmk_utils::GomokuError;

use crate::config::EngineConfig;
use crate::pool::WorkerPools;
use crate::tree::{NodeId, Tree};

/// Selection + expansion: descend via `best_uct_child` while `node` is fully
/// expanded and not terminal, then expand the node we stop at (or return it
/// directly if it's already terminal).
fn traverse(
    tree: &mut Tree,
    pools: &WorkerPools,
    board: &Arc<RwLock<Board>>,
    rule: Rule,
    config: &EngineConfig,
) -> Result<NodeId, GomokuError> {
    let mut rng = rand::thread_rng();
    let mut node = tree.root();

    while tree.is_fully_expanded(node) && !tree.is_terminal(node) {
        node = tree
            .best_uct_child(pools, node, config.uct_param_c, config.uct_cmp_thold, &mut rng)
            .expect("fully-expanded non-terminal node always has at least one child");
    }

    if tree.is_terminal(node) {
        return Ok(node);
    }

    match tree.expand(pools, board, rule, config.valid_dist_thold, node)? {
        Some(child) => Ok(child),
        None => Ok(node),
    }
}

/// One selection + expansion + rollout + backpropagation pass. Returns the
/// wall-clock time it took.
pub fn simulate(
    tree: &mut Tree,
    pools: &WorkerPools,
    board: &Arc<RwLock<Board>>,
    rule: Rule,
    config: &EngineConfig,
) -> Result<Duration, GomokuError> {
    let start = Instant::now();
    let leaf = traverse(tree, pools, board, rule, config)?;
    let outcome = tree.rollout_from(pools, board, rule, config.valid_dist_thold, leaf);
    tree.backpropagate(leaf, outcome)?;
    Ok(start.elapsed())
}

/// Repeats [`simulate`] while the remaining time budget exceeds half the
/// running mean simulation time, then returns the most-simulated child of
/// the root. Returns the root itself if it is terminal (or has no
/// children, which only happens for a terminal root).
pub fn mcts(
    tree: &mut Tree,
    pools: &WorkerPools,
    board: &Arc<RwLock<Board>>,
    rule: Rule,
    config: &EngineConfig,
) -> Result<NodeId, GomokuError> {
    let root = tree.root();
    if tree.is_terminal(root) {
        return Ok(root);
    }

    let start = Instant::now();
    let mut num_sim: f64 = 0.0;
    let mut half_avg_elapsed = Duration::ZERO;

    while config.time_limit.saturating_sub(start.elapsed()) > half_avg_elapsed {
        let elapsed = simulate(tree, pools, board, rule, config)?;
        num_sim += 1.0;
        let half_elapsed_secs = elapsed.as_secs_f64() / 2.0;
        let avg_secs = half_avg_elapsed.as_secs_f64();
        let new_avg_secs = (avg_secs * (num_sim - 1.0) + half_elapsed_secs) / num_sim;
        half_avg_elapsed = Duration::from_secs_f64(new_avg_secs.max(0.0));
    }

    log::info!("mcts: ran {num_sim} simulation(s) in {:?}", start.elapsed());

    let mut rng = rand::thread_rng();
    tree.best_num_sim_child(root, &mut rng).ok_or(GomokuError::NoMove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmk_board::Rule;

    #[test]
    fn mcts_on_an_empty_board_returns_the_center() {
        let pools = WorkerPools::new(4);
        let board = Arc::new(RwLock::new(Board::new()));
        let config = EngineConfig {
            time_limit: Duration::from_millis(200),
            ..EngineConfig::default()
        };
        let mut tree = Tree::new_root(&pools, Rule::StandardGomoku, config.valid_dist_thold).unwrap();
        let best = mcts(&mut tree, &pools, &board, Rule::StandardGomoku, &config).unwrap();
        assert_eq!(tree.pos(best), gmk_board::CENTER_POSITION);
    }

    #[test]
    fn simulate_increments_root_sim_count() {
        let pools = WorkerPools::new(4);
        let board = Arc::new(RwLock::new(Board::new()));
        let config = EngineConfig::default();
        let mut tree = Tree::new_root(&pools, Rule::StandardGomoku, config.valid_dist_thold).unwrap();
        simulate(&mut tree, &pools, &board, Rule::StandardGomoku, &config).unwrap();
        assert_eq!(tree.num_sim(tree.root()), 1);
    }
}
