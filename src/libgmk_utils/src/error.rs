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

use thiserror::Error;

/// Domain-level errors returned as values by the engine.
///
/// Programmer-contract violations (null/invalid inputs the caller should
/// never produce, calling an AI move out of turn on a torn-down facade,
/// `step == 0` where the caller had just checked) are `panic!`s at the call
/// site instead of variants here; see each module for the ones that apply.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GomokuError {
    /// A position string could not be parsed.
    #[error("position {0:?} is unknown")]
    UnknownPosition(String),

    /// Coordinates fell outside `0..BOARD_SIZE`.
    #[error("position is out of range (0-{max}), x: {x}, y: {y}")]
    PositionOutOfRange { x: i32, y: i32, max: i32 },

    /// A ruleset selector was not recognized.
    #[error("rule is unknown")]
    UnknownRule,

    /// Backpropagation received a piece value outside {None, Black, White, Both}.
    #[error("outcome is invalid")]
    InvalidOutcome,

    /// An operation was attempted on a facade that has already been torn down.
    #[error("game is already torn down")]
    TornDown,

    /// An AI move was requested when it is not the AI's turn.
    #[error("it is not the AI's turn")]
    NotAiTurn,

    /// MCTS returned no child to play; only possible when the root is terminal.
    #[error("cannot find a position to place a stone")]
    NoMove,

    /// The settings file could not be read or written. Non-fatal: callers
    /// should log a warning and continue with default settings.
    #[error("could not persist settings: {0}")]
    Persistence(String),
}
