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

//! Board domain types: cell positions, stone pieces, scan directions, the
//! sparse board itself, and opening-rule legality. Depends only on
//! [`gmk_utils`] for errors and print settings; knows nothing about search.

pub mod board;
pub mod direction;
pub mod piece;
pub mod position;
pub mod rule;

pub use board::Board;
pub use direction::{Axis, Direction};
pub use piece::Piece;
pub use position::{
    Position, BOARD_SIZE, CENTER_POSITION, INVALID_POSITION, MAX_POSITION, MIN_POSITION,
    NUM_POSITIONS, POSITION_OFFSET,
};
pub use rule::{is_legal, parse_rule_or_err, Rule};
