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

//! The eight compass directions used by the outcome detector's half-ray
//! scans. Opposite pairs (`Left`/`Right`, `LeftUp`/`RightDown`, `Up`/`Down`,
//! `RightUp`/`LeftDown`) share one axis counter.

/// One of the eight directions a half-ray scan can walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    LeftUp,
    Up,
    RightUp,
    Right,
    RightDown,
    Down,
    LeftDown,
}

/// Which of the four axes (horizontal, vertical, and the two diagonals) a
/// direction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    DiagonalLeftUpRightDown,
    DiagonalRightUpLeftDown,
}

impl Direction {
    /// All eight directions, in the order the original scans them.
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::LeftUp,
        Direction::Up,
        Direction::RightUp,
        Direction::Right,
        Direction::RightDown,
        Direction::Down,
        Direction::LeftDown,
    ];

    /// The `(dx, dy)` unit step for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::LeftUp => (-1, -1),
            Direction::Up => (0, -1),
            Direction::RightUp => (1, -1),
            Direction::Right => (1, 0),
            Direction::RightDown => (1, 1),
            Direction::Down => (0, 1),
            Direction::LeftDown => (-1, 1),
        }
    }

    /// The axis this half-ray shares its counter with.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::LeftUp | Direction::RightDown => Axis::DiagonalLeftUpRightDown,
            Direction::RightUp | Direction::LeftDown => Axis::DiagonalRightUpLeftDown,
        }
    }
}
