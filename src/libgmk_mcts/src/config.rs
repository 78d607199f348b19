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

//! The plain-data tuning knobs the search engine needs. Deliberately not
//! `serde`-aware: persistence is the binary crate's concern, this crate only
//! consumes already-parsed values.

use std::time::Duration;

/// Tuning parameters for one MCTS search. The binary crate builds this from
/// its persisted `Settings` once per AI move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Wall-clock budget for one `mcts()` call.
    pub time_limit: Duration,
    /// Chebyshev radius for candidate filtering; `0` disables the filter.
    pub valid_dist_thold: u8,
    /// Epsilon band for `best_uct_child` tie detection.
    pub uct_cmp_thold: f64,
    /// UCT exploration constant `c`.
    pub uct_param_c: f64,
    /// Worker count for the candidate/UCT/outcome pools. The wait-and-close
    /// pool always uses 3 workers regardless of this value.
    pub worker_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(15),
            valid_dist_thold: 1,
            uct_cmp_thold: 1e-4,
            uct_param_c: std::f64::consts::SQRT_2,
            worker_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

/// Number of workers the wait-and-close pool always runs, independent of
/// `EngineConfig::worker_count`.
pub const WAIT_AND_CLOSE_WORKERS: usize = 3;
