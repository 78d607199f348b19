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

//! The single entry point the console front end (and, eventually, any other
//! front end) drives a game through: settings, move history, the
//! authoritative board, the current search tree, and the cached outcome once
//! the game has ended.

use std::sync::{Arc, RwLock};

use gmk_board::{Board, Piece, Position};
use gmk_mcts::{mcts, Tree, WorkerPools};
use gmk_utils::GomokuError;

use crate::settings::Settings;

/// Owns everything one game of Gomoku needs between moves.
pub struct Game {
    settings: Settings,
    history: Vec<Position>,
    board: Arc<RwLock<Board>>,
    pools: WorkerPools,
    tree: Tree,
    outcome: Option<Piece>,
}

impl Game {
    /// Starts a fresh game under `settings`.
    pub fn new(settings: Settings) -> Result<Game, GomokuError> {
        let pools = WorkerPools::new(settings.worker.number.max(1));
        let tree = Tree::new_root(&pools, settings.rule, settings.ai.valid_dist_thold)?;
        Ok(Game {
            settings,
            history: Vec::new(),
            board: Arc::new(RwLock::new(Board::new())),
            pools,
            tree,
            outcome: None,
        })
    }

    pub fn board(&self) -> Arc<RwLock<Board>> {
        Arc::clone(&self.board)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// 1-based step number of the move about to be played.
    pub fn step(&self) -> u32 {
        self.history.len() as u32 + 1
    }

    /// A recorded outcome exists, or the current root is terminal.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some() || self.tree.is_terminal(self.tree.root())
    }

    /// The game's final outcome, once `is_terminal()`.
    pub fn outcome(&self) -> Option<Piece> {
        self.outcome.or_else(|| {
            self.tree
                .is_terminal(self.tree.root())
                .then(|| gmk_mcts::check_outcome(&self.pools, &self.tree.lookup_for(&self.board, self.tree.root()), self.tree.pos(self.tree.root())))
        })
    }

    /// Places a user-chosen move at `pos`: writes the stone to the
    /// authoritative board, then hoists the matching root child if one
    /// exists, else synthesizes a fresh root at the new step.
    pub fn place_by_user(&mut self, pos: Position) -> Result<(), GomokuError> {
        let step = self.step();
        let piece = Piece::for_step(step);
        self.board.write().expect("board lock poisoned").set(pos, piece)?;
        self.history.push(pos);
        self.advance_root(pos, step)
    }

    /// Lets the MCTS engine pick and play the AI's move. Requires that the
    /// piece about to move is in the AI's configured mask.
    pub fn place_by_ai(&mut self) -> Result<Position, GomokuError> {
        let step = self.step();
        if !Piece::for_step(step).intersects(self.settings.ai.ai_piece) {
            return Err(GomokuError::NotAiTurn);
        }

        let config = self.settings.ai.to_engine_config(&self.settings.worker);
        let best = mcts(&mut self.tree, &self.pools, &self.board, self.settings.rule, &config)?;
        let pos = self.tree.pos(best);

        self.board
            .write()
            .expect("board lock poisoned")
            .set(pos, Piece::for_step(step))?;
        self.history.push(pos);
        self.advance_root(pos, step)?;
        Ok(pos)
    }

    /// Common tail of both move operations: try to hoist the matching child
    /// of the current root to become the new root; if none exists (the move
    /// fell outside the root's expanded candidates), build a synthetic one.
    fn advance_root(&mut self, pos: Position, step: u32) -> Result<(), GomokuError> {
        self.tree = match self.tree.find_child_by_pos(self.tree.root(), pos) {
            Some(child) => self.tree.hoist(child),
            None => Tree::new_synthetic_root(
                &self.pools,
                &self.board,
                self.settings.rule,
                self.settings.ai.valid_dist_thold,
                step,
                pos,
            )?,
        };

        if self.tree.is_terminal(self.tree.root()) {
            let lookup = self.tree.lookup_for(&self.board, self.tree.root());
            let outcome = gmk_mcts::check_outcome(&self.pools, &lookup, pos);
            self.outcome = Some(outcome);
        }
        Ok(())
    }

    /// Closes the four internal task-input channels in the mandated order
    /// and waits for their completion signals before the root is dropped.
    pub fn teardown(&mut self) {
        self.pools.teardown();
    }
}
