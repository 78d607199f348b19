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

//! The search tree: an arena of nodes linked by `parent`/`prev_sibling`/
//! `last_child`, plus the four MCTS phase operations and root hoisting.
//!
//! Nodes live in a `Vec` and are addressed by index (`NodeId`) rather than
//! by pointer, so the tree stays plain-safe `Send + Sync` data without any
//! `unsafe` — worker threads only ever see `Copy` snapshots of node state,
//! never the arena itself.

use std::sync::{Arc, RwLock};

use rand::Rng;

use gmk_board::{Board, Piece, Position, Rule};
use gmk_utils::GomokuError;

use crate::candidate::{collect_candidates, generate_candidates};
use crate::lookup::{PieceLookup, RolloutLookup, TreeLookup};
use crate::outcome::check_outcome;
use crate::pool::WorkerPools;
use crate::reservoir::{select_best, Reservoir};

/// An index into a [`Tree`]'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

struct Node {
    step: u32,
    pos: Position,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    last_child: Option<NodeId>,
    num_win: u64,
    num_sim: u64,
    unexpanded: Vec<Position>,
}

/// The search tree for one game-in-progress. Holds no reference to the
/// authoritative board; callers pass it in (as `Arc<RwLock<Board>>`) to
/// every operation that needs it, matching the layered-lookup design.
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Builds the initial root, representing "game start" (`step == 0`,
    /// `pos == InvalidPosition`). Its `unexpanded` list is the set of legal
    /// first moves, exactly as the step-1 candidate generator would produce
    /// against an empty board.
    pub fn new_root(pools: &WorkerPools, rule: Rule, dist_thold: u8) -> Result<Tree, GomokuError> {
        let board = Arc::new(RwLock::new(Board::new()));
        let lookup = TreeLookup::new(board, Arc::new(Vec::new()));
        let rx = generate_candidates(pools, &lookup, rule, 1, dist_thold);
        let unexpanded = collect_candidates(rx, true, true, &mut rand::thread_rng());

        Ok(Tree {
            nodes: vec![Node {
                step: 0,
                pos: gmk_board::INVALID_POSITION,
                parent: None,
                prev_sibling: None,
                last_child: None,
                num_win: 0,
                num_sim: 0,
                unexpanded,
            }],
            root: NodeId(0),
        })
    }

    /// Synthesizes a fresh, standalone root at `step` for `pos`, used by the
    /// facade when hoisting an existing child isn't possible. Runs the same
    /// outcome-check-then-candidate-generate logic as [`Tree::expand`].
    pub fn new_synthetic_root(
        pools: &WorkerPools,
        board: &Arc<RwLock<Board>>,
        rule: Rule,
        dist_thold: u8,
        step: u32,
        pos: Position,
    ) -> Result<Tree, GomokuError> {
        assert!(step > 0, "new_synthetic_root called with step == 0");
        let id = NodeId(0);
        let mut tree = Tree {
            nodes: vec![Node {
                step,
                pos,
                parent: None,
                prev_sibling: None,
                last_child: None,
                num_win: 0,
                num_sim: 0,
                unexpanded: Vec::new(),
            }],
            root: id,
        };
        let unexpanded = compute_unexpanded(pools, &tree, board, rule, dist_thold, id)?;
        tree.nodes[0].unexpanded = unexpanded;
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn step(&self, id: NodeId) -> u32 {
        self.nodes[id.0].step
    }

    pub fn pos(&self, id: NodeId) -> Position {
        self.nodes[id.0].pos
    }

    pub fn num_win(&self, id: NodeId) -> u64 {
        self.nodes[id.0].num_win
    }

    pub fn num_sim(&self, id: NodeId) -> u64 {
        self.nodes[id.0].num_sim
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// True iff `id` has no unexpanded candidates and no children: it
    /// cannot be expanded further.
    pub fn is_terminal(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        node.unexpanded.is_empty() && node.last_child.is_none()
    }

    /// True iff `id` has no unexpanded candidates left, regardless of its
    /// child list.
    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        self.nodes[id.0].unexpanded.is_empty()
    }

    /// The positions played from the tree root down to and including `id`,
    /// as `(pos, step)` pairs, stopping at (and excluding) the `step == 0`
    /// sentinel root.
    pub fn ancestor_path(&self, id: NodeId) -> Vec<(Position, u32)> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(nid) = cur {
            let node = &self.nodes[nid.0];
            if node.step == 0 {
                break;
            }
            path.push((node.pos, node.step));
            cur = node.parent;
        }
        path
    }

    /// Builds the tree-local lookup for `id`: the authoritative board
    /// composed with `id`'s ancestor path.
    pub fn lookup_for(&self, board: &Arc<RwLock<Board>>, id: NodeId) -> TreeLookup {
        TreeLookup::new(board.clone(), Arc::new(self.ancestor_path(id)))
    }

    /// Children of `id`, from most- to least-recently created (i.e. in
    /// `last_child` -> `prev_sibling` order).
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.nodes[id.0].last_child;
        while let Some(c) = cur {
            out.push(c);
            cur = self.nodes[c.0].prev_sibling;
        }
        out
    }

    /// Pops the last unexpanded candidate of `id`, creates a child for it,
    /// and populates the child's own `unexpanded` list. No-op (returns
    /// `Ok(None)`) if `id` is already fully expanded.
    pub fn expand(
        &mut self,
        pools: &WorkerPools,
        board: &Arc<RwLock<Board>>,
        rule: Rule,
        dist_thold: u8,
        id: NodeId,
    ) -> Result<Option<NodeId>, GomokuError> {
        if self.is_fully_expanded(id) {
            return Ok(None);
        }

        let pos = self.nodes[id.0].unexpanded.pop().expect("checked non-empty above");
        let step = self.nodes[id.0].step + 1;
        let new_id = NodeId(self.nodes.len());

        self.nodes.push(Node {
            step,
            pos,
            parent: Some(id),
            prev_sibling: self.nodes[id.0].last_child,
            last_child: None,
            num_win: 0,
            num_sim: 0,
            unexpanded: Vec::new(),
        });
        self.nodes[id.0].last_child = Some(new_id);

        let unexpanded = compute_unexpanded(pools, self, board, rule, dist_thold, new_id)?;
        self.nodes[new_id.0].unexpanded = unexpanded;

        Ok(Some(new_id))
    }

    /// `w/n + c*sqrt(ln(N)/n)`: `+inf` for an unsimulated or rootless node.
    pub fn uct(&self, id: NodeId, uct_param_c: f64) -> f64 {
        uct_value(self.uct_input(id), uct_param_c)
    }

    fn uct_input(&self, id: NodeId) -> UctInput {
        let node = &self.nodes[id.0];
        let parent_num_sim = node.parent.map(|p| self.nodes[p.0].num_sim).unwrap_or(0);
        UctInput {
            num_win: node.num_win,
            num_sim: node.num_sim,
            parent_num_sim,
            has_parent: node.parent.is_some(),
        }
    }

    /// Dispatches one UCT-evaluation task per child (in parallel, via
    /// `pools.uct`), then picks the argmax with an epsilon-band tie
    /// comparator, resolving ties with reservoir sampling.
    pub fn best_uct_child<R: Rng + ?Sized>(
        &self,
        pools: &WorkerPools,
        id: NodeId,
        uct_param_c: f64,
        uct_cmp_thold: f64,
        rng: &mut R,
    ) -> Option<NodeId> {
        let children = self.children(id);
        if children.is_empty() {
            return None;
        }
        let cmp_thold = if uct_cmp_thold > 0.0 { uct_cmp_thold } else { smallest_positive_epsilon() };

        let (tx, rx) = crossbeam_channel::bounded(children.len());
        let group = crate::pool::TaskGroup::new();
        group.add(children.len());

        for child in &children {
            let input = self.uct_input(*child);
            let tx = tx.clone();
            let group = group.clone();
            let child = *child;
            pools.uct.submit(Box::new(move || {
                let value = uct_value(input, uct_param_c);
                let _ = tx.send((child, value));
                group.done();
            }));
        }
        pools.wait_and_close(group, tx);

        let best = select_best(
            rx,
            |candidate, best| match best {
                None => std::cmp::Ordering::Greater,
                Some((_, best_value)) => {
                    if candidate.1 > best_value + cmp_thold {
                        std::cmp::Ordering::Greater
                    } else if candidate.1 > best_value - cmp_thold {
                        std::cmp::Ordering::Equal
                    } else {
                        std::cmp::Ordering::Less
                    }
                }
            },
            rng,
        );
        best.map(|(id, _)| id)
    }

    /// Argmax over `num_sim`, strict-equality ties broken by reservoir
    /// sampling. No worker-pool fan-out: reading a handful of counters does
    /// not benefit from it, and the original does this inline too.
    pub fn best_num_sim_child<R: Rng + ?Sized>(&self, id: NodeId, rng: &mut R) -> Option<NodeId> {
        let items: Vec<(NodeId, u64)> =
            self.children(id).into_iter().map(|child| (child, self.nodes[child.0].num_sim)).collect();
        let best = select_best(
            items,
            |candidate, best| match best {
                None => std::cmp::Ordering::Greater,
                Some((_, best_sim)) => candidate.1.cmp(best_sim),
            },
            rng,
        );
        best.map(|(id, _)| id)
    }

    /// Plays a random game from `id` to a terminal outcome, through a lookup
    /// layering the board, `id`'s ancestor path, and a rollout-local
    /// overlay. Returns `Piece::None` for a draw (no candidates at some
    /// ply) or when the generator/outcome detector reports `Both`.
    pub fn rollout_from(
        &self,
        pools: &WorkerPools,
        board: &Arc<RwLock<Board>>,
        rule: Rule,
        dist_thold: u8,
        id: NodeId,
    ) -> Piece {
        let node_pos = self.pos(id);
        let node_step = self.step(id);
        let tree_lookup = self.lookup_for(board, id);

        if self.is_terminal(id) {
            return normalize_outcome(check_outcome(pools, &tree_lookup, node_pos));
        }

        let rollout_lookup = RolloutLookup::new(tree_lookup);
        let mut step = node_step;
        let mut rng = rand::thread_rng();

        loop {
            step += 1;
            let rx = generate_candidates(pools, &rollout_lookup, rule, step, dist_thold);
            let mut reservoir = Reservoir::new();
            for candidate in rx {
                reservoir.offer(candidate, &mut rng);
            }
            let pos = match reservoir.into_inner() {
                None => return Piece::None,
                Some(pos) => pos,
            };
            rollout_lookup.place(pos, Piece::for_step(step));
            let outcome = normalize_outcome(check_outcome(pools, &rollout_lookup, pos));
            if outcome != Piece::None {
                return outcome;
            }
        }
    }

    /// Propagates `outcome` from `id` up through every ancestor: `num_sim`
    /// always increments; `num_win` increments where the node's step parity
    /// matches the winning color, flipping at each hop.
    pub fn backpropagate(&mut self, id: NodeId, outcome: Piece) -> Result<(), GomokuError> {
        let outcome = match outcome {
            Piece::None | Piece::Both => Piece::None,
            Piece::Black | Piece::White => outcome,
            Piece::Invalid => return Err(GomokuError::InvalidOutcome),
        };

        let mut is_win = match outcome {
            Piece::Black => self.nodes[id.0].step % 2 == 1,
            Piece::White => self.nodes[id.0].step % 2 == 0,
            _ => false,
        };

        let mut cur = Some(id);
        while let Some(nid) = cur {
            let node = &mut self.nodes[nid.0];
            if is_win {
                node.num_win += 1;
            }
            node.num_sim += 1;
            cur = node.parent;
            if outcome != Piece::None {
                is_win = !is_win;
            }
        }
        Ok(())
    }

    /// Detaches `id` from its parent's sibling chain in place. A no-op if
    /// `id` is already a root. Does not reclaim memory — see [`Tree::hoist`]
    /// for the compacting variant the facade actually uses.
    pub fn take_out(&mut self, id: NodeId) {
        let parent_id = match self.nodes[id.0].parent {
            Some(p) => p,
            None => return,
        };
        let sibling = self.nodes[id.0].prev_sibling;
        self.nodes[id.0].parent = None;
        self.nodes[id.0].prev_sibling = None;

        if self.nodes[parent_id.0].last_child == Some(id) {
            self.nodes[parent_id.0].last_child = sibling;
            return;
        }

        let mut cur = self.nodes[parent_id.0].last_child;
        while let Some(cur_id) = cur {
            if self.nodes[cur_id.0].prev_sibling == Some(id) {
                self.nodes[cur_id.0].prev_sibling = sibling;
                return;
            }
            cur = self.nodes[cur_id.0].prev_sibling;
        }
    }

    /// Builds a fresh, compacted `Tree` containing only the subtree rooted
    /// at `new_root_id`, detached (no parent, no prev_sibling). The caller
    /// drops the old `Tree` afterward, which is how memory for the pruned
    /// siblings and ancestors is actually reclaimed in this safe-arena
    /// design (the original mutates pointers in place; we can't alias into
    /// the middle of a `Vec` safely, so we copy the live subtree instead).
    pub fn hoist(&self, new_root_id: NodeId) -> Tree {
        let mut new_nodes = Vec::new();
        let new_root = copy_subtree(self, new_root_id, None, &mut new_nodes);
        Tree { nodes: new_nodes, root: new_root }
    }

    /// Finds the child of `id` whose move is `pos`, if any.
    pub fn find_child_by_pos(&self, id: NodeId, pos: Position) -> Option<NodeId> {
        self.children(id).into_iter().find(|&c| self.pos(c) == pos)
    }
}

fn copy_subtree(old: &Tree, old_id: NodeId, new_parent: Option<NodeId>, new_nodes: &mut Vec<Node>) -> NodeId {
    let old_node = &old.nodes[old_id.0];
    let new_id = NodeId(new_nodes.len());
    new_nodes.push(Node {
        step: old_node.step,
        pos: old_node.pos,
        parent: new_parent,
        prev_sibling: None,
        last_child: None,
        num_win: old_node.num_win,
        num_sim: old_node.num_sim,
        unexpanded: old_node.unexpanded.clone(),
    });

    let mut old_child_ids = Vec::new();
    let mut cur = old_node.last_child;
    while let Some(cid) = cur {
        old_child_ids.push(cid);
        cur = old.nodes[cid.0].prev_sibling;
    }

    let new_child_ids: Vec<NodeId> = old_child_ids
        .iter()
        .map(|&cid| copy_subtree(old, cid, Some(new_id), new_nodes))
        .collect();

    for (i, &nid) in new_child_ids.iter().enumerate() {
        let prev = new_child_ids.get(i + 1).copied();
        new_nodes[nid.0].prev_sibling = prev;
    }
    new_nodes[new_id.0].last_child = new_child_ids.first().copied();

    new_id
}

fn compute_unexpanded(
    pools: &WorkerPools,
    tree: &Tree,
    board: &Arc<RwLock<Board>>,
    rule: Rule,
    dist_thold: u8,
    id: NodeId,
) -> Result<Vec<Position>, GomokuError> {
    let lookup = tree.lookup_for(board, id);
    let pos = tree.pos(id);
    let step = tree.step(id);
    let outcome = check_outcome(pools, &lookup, pos);

    match outcome {
        Piece::Black | Piece::White => Ok(Vec::new()),
        Piece::None | Piece::Both => {
            let rx = generate_candidates(pools, &lookup, rule, step + 1, dist_thold);
            Ok(collect_candidates(rx, true, true, &mut rand::thread_rng()))
        }
        Piece::Invalid => Err(GomokuError::InvalidOutcome),
    }
}

fn normalize_outcome(outcome: Piece) -> Piece {
    if outcome == Piece::Both {
        Piece::None
    } else {
        outcome
    }
}

#[derive(Clone, Copy)]
struct UctInput {
    num_win: u64,
    num_sim: u64,
    parent_num_sim: u64,
    has_parent: bool,
}

fn uct_value(input: UctInput, uct_param_c: f64) -> f64 {
    if input.num_sim == 0 || !input.has_parent {
        return f64::INFINITY;
    }
    let w = input.num_win as f64;
    let n = input.num_sim as f64;
    let np = input.parent_num_sim as f64;
    w / n + uct_param_c * (np.ln() / n).sqrt()
}

fn smallest_positive_epsilon() -> f64 {
    f64::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmk_board::CENTER_POSITION;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn pools() -> WorkerPools {
        WorkerPools::new(4)
    }

    #[test]
    fn new_root_has_only_center_as_unexpanded() {
        let pools = pools();
        let tree = Tree::new_root(&pools, Rule::StandardGomoku, 1).unwrap();
        let root = tree.root();
        assert_eq!(tree.step(root), 0);
        assert!(!tree.is_terminal(root));
        assert!(!tree.is_fully_expanded(root));
    }

    #[test]
    fn expand_creates_a_child_with_correct_step() {
        let pools = pools();
        let mut tree = Tree::new_root(&pools, Rule::StandardGomoku, 1).unwrap();
        let board = Arc::new(RwLock::new(Board::new()));
        let root = tree.root();
        let child = tree
            .expand(&pools, &board, Rule::StandardGomoku, 1, root)
            .unwrap()
            .expect("root had an unexpanded candidate");
        assert_eq!(tree.step(child), 1);
        assert_eq!(tree.pos(child), CENTER_POSITION);
        assert_eq!(tree.parent(child), Some(root));
    }

    #[test]
    fn take_out_detaches_and_clears_links() {
        let pools = pools();
        let mut tree = Tree::new_root(&pools, Rule::StandardGomoku, 1).unwrap();
        let board = Arc::new(RwLock::new(Board::new()));
        let root = tree.root();
        let child = tree
            .expand(&pools, &board, Rule::StandardGomoku, 1, root)
            .unwrap()
            .unwrap();
        tree.take_out(child);
        assert_eq!(tree.parent(child), None);
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn hoist_preserves_only_the_reachable_subtree() {
        let pools = pools();
        let mut tree = Tree::new_root(&pools, Rule::StandardGomoku, 1).unwrap();
        let board = Arc::new(RwLock::new(Board::new()));
        let root = tree.root();
        let child = tree
            .expand(&pools, &board, Rule::StandardGomoku, 1, root)
            .unwrap()
            .unwrap();
        tree.backpropagate(child, Piece::None).unwrap();

        let hoisted = tree.hoist(child);
        let new_root = hoisted.root();
        assert_eq!(hoisted.step(new_root), 1);
        assert_eq!(hoisted.parent(new_root), None);
        assert_eq!(hoisted.num_sim(new_root), 1);
    }

    #[test]
    fn backpropagate_credits_correct_parity() {
        let pools = pools();
        let mut tree = Tree::new_root(&pools, Rule::StandardGomoku, 1).unwrap();
        let board = Arc::new(RwLock::new(Board::new()));
        let root = tree.root();
        let child = tree
            .expand(&pools, &board, Rule::StandardGomoku, 1, root)
            .unwrap()
            .unwrap(); // step 1, odd => Black
        tree.backpropagate(child, Piece::Black).unwrap();
        assert_eq!(tree.num_win(child), 1);
        assert_eq!(tree.num_sim(child), 1);
        assert_eq!(tree.num_sim(root), 1);
        // Root represents "before any move"; White's perspective at step 0
        // is even, so Black's win does not credit it.
        assert_eq!(tree.num_win(root), 0);
    }

    #[test]
    fn best_num_sim_child_picks_the_most_simulated() {
        let pools = pools();
        let mut tree = Tree::new_root(&pools, Rule::StandardGomoku, 1).unwrap();
        let board = Arc::new(RwLock::new(Board::new()));
        let root = tree.root();
        // Root -> center (step 1), which as a side effect of its own
        // placement has several neighbor candidates at step 2.
        let center_child = tree
            .expand(&pools, &board, Rule::StandardGomoku, 1, root)
            .unwrap()
            .unwrap();

        let mut children = Vec::new();
        for _ in 0..3 {
            if let Some(c) = tree.expand(&pools, &board, Rule::StandardGomoku, 1, center_child).unwrap() {
                children.push(c);
            }
        }
        assert!(children.len() >= 2, "expected multiple step-2 candidates near the center");

        tree.backpropagate(children[0], Piece::None).unwrap();
        tree.backpropagate(children[0], Piece::None).unwrap();
        tree.backpropagate(children[1], Piece::None).unwrap();

        let mut rng = SmallRng::seed_from_u64(1);
        let best = tree.best_num_sim_child(center_child, &mut rng);
        assert_eq!(best, Some(children[0]));
    }
}
