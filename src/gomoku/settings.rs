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

//! The human-editable settings file: everything a player can tune without
//! recompiling. `#[serde(default)]` throughout so a partial or missing file
//! degrades field-by-field to the defaults below, mirroring the original's
//! `omitempty` JSON tags.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use gmk_board::{Piece, Rule};
use gmk_mcts::EngineConfig;
use gmk_utils::{load_json, store_json, BoardPrintSettings, GomokuError, WorkerSettings};

/// Tunables for the AI's move selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub ai_piece: Piece,
    #[serde(rename = "mcts_time_limit")]
    pub mcts_time_limit_secs: f64,
    pub valid_dist_thold: u8,
    pub uct_cmp_thold: f64,
    pub uct_param_c: f64,
}

impl Default for AiSettings {
    fn default() -> Self {
        AiSettings {
            ai_piece: Piece::White,
            mcts_time_limit_secs: 15.0,
            valid_dist_thold: 1,
            uct_cmp_thold: 1e-4,
            uct_param_c: std::f64::consts::SQRT_2,
        }
    }
}

impl AiSettings {
    /// Converts to the plain, non-serde config the search engine consumes.
    /// `gmk_mcts` deliberately knows nothing about settings files.
    pub fn to_engine_config(&self, worker: &WorkerSettings) -> EngineConfig {
        EngineConfig {
            time_limit: Duration::from_secs_f64(self.mcts_time_limit_secs.max(0.0)),
            valid_dist_thold: self.valid_dist_thold,
            uct_cmp_thold: self.uct_cmp_thold,
            uct_param_c: self.uct_param_c,
            worker_count: worker.number.max(1),
        }
    }
}

/// I/O-related settings; currently just board rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoSettings {
    pub board_print: BoardPrintSettings,
}

impl Default for IoSettings {
    fn default() -> Self {
        IoSettings { board_print: BoardPrintSettings::default() }
    }
}

/// The full settings document, persisted as `settings.json` next to the
/// running executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rule: Rule,
    pub ai: AiSettings,
    pub worker: WorkerSettings,
    pub io: IoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rule: Rule::StandardGomoku,
            ai: AiSettings::default(),
            worker: WorkerSettings::default(),
            io: IoSettings::default(),
        }
    }
}

impl Settings {
    /// Reads and parses `path`. Whether a missing file should fall back to
    /// defaults is the caller's call (mirrors the original's `LoadSettings`
    /// deferring the `os.IsNotExist` check to `main`).
    pub fn load(path: &Path) -> Result<Settings, GomokuError> {
        load_json(path)
    }

    /// Writes `self` as pretty-printed JSON to `path`.
    pub fn store(&self, path: &Path) -> Result<(), GomokuError> {
        store_json(path, self)
    }
}
