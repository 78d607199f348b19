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

//! Parallel Monte Carlo Tree Search for Gomoku: worker pools, the candidate
//! generator, the five-in-a-row outcome detector, the search tree, and the
//! simulate-until-budget driver. Depends on [`gmk_board`] for the domain
//! model and [`gmk_utils`] for errors, nothing else in the workspace.

pub mod candidate;
pub mod config;
pub mod driver;
pub mod lookup;
pub mod outcome;
pub mod pool;
pub mod reservoir;
pub mod tree;

pub use candidate::{collect_candidates, generate_candidates};
pub use config::{EngineConfig, WAIT_AND_CLOSE_WORKERS};
pub use driver::{mcts, simulate};
pub use lookup::{PieceLookup, RolloutLookup, TreeLookup};
pub use outcome::check_outcome;
pub use pool::{Job, TaskGroup, WorkerPool, WorkerPools};
pub use reservoir::Reservoir;
pub use tree::{NodeId, Tree};
