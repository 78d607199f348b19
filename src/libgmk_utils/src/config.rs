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

//! Generic settings plumbing shared by every settings-bearing struct in the
//! workspace: where the settings file lives, how it's read/written, and the
//! handful of sub-structs (worker counts, board-print characters) that don't
//! belong to any one domain crate.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::GomokuError;

lazy_static::lazy_static! {
    /// The directory the running executable lives in, resolved once at
    /// startup. Mirrors `dg_utils::config`'s pattern of lazily resolving
    /// process-wide paths a single time and handing out the cached value.
    static ref EXE_DIR: PathBuf = {
        std::env::current_exe()
            .ok()
            .and_then(|p| std::fs::canonicalize(&p).ok().or(Some(p)))
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    };
}

/// Returns the well-known path of the settings file, next to the executable.
pub fn default_settings_path() -> PathBuf {
    EXE_DIR.join("settings.json")
}

/// Reads and parses a JSON settings file. A missing file is surfaced as a
/// plain `io::Error` wrapped in [`GomokuError::Persistence`]; callers that
/// want "missing file means defaults" should inspect `path.exists()` first
/// (this mirrors the original's `LoadSettings`, which distinguishes
/// `os.IsNotExist` from other failures one level up, in `main`).
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, GomokuError> {
    let data = std::fs::read_to_string(path).map_err(|e| GomokuError::Persistence(e.to_string()))?;
    serde_json::from_str(&data).map_err(|e| GomokuError::Persistence(e.to_string()))
}

/// Serializes `value` as pretty JSON and writes it to `path`.
pub fn store_json<T: Serialize>(path: &Path, value: &T) -> Result<(), GomokuError> {
    let data = serde_json::to_string_pretty(value).map_err(|e| GomokuError::Persistence(e.to_string()))?;
    std::fs::write(path, data).map_err(|e| GomokuError::Persistence(e.to_string()))
}

/// Worker-count configuration shared by the candidate, UCT, and outcome
/// pools. The wait-and-close pool does not consult this: it always runs
/// exactly 3 workers (see `spec.md` §5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WorkerSettings {
    pub number: usize,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            number: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

/// Rendering characters and options for the console board printer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardPrintSettings {
    pub empty_char: String,
    pub black_char: String,
    pub white_char: String,
    pub does_show_line_number: bool,
}

impl Default for BoardPrintSettings {
    fn default() -> Self {
        Self {
            empty_char: ".".to_string(),
            black_char: "x".to_string(),
            white_char: "o".to_string(),
            does_show_line_number: true,
        }
    }
}
