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

//! The authoritative board: a sparse `Position -> Piece` mapping plus
//! text rendering.

use std::collections::HashMap;
use std::fmt::Write as _;

use gmk_utils::{BoardPrintSettings, GomokuError};

use crate::position::{Position, BOARD_SIZE, MIN_POSITION, MAX_POSITION};
use crate::piece::Piece;

/// The authoritative game board. Only occupied cells are stored; an absent
/// entry means [`Piece::None`].
#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: HashMap<Position, Piece>,
}

impl Board {
    pub fn new() -> Board {
        Board { cells: HashMap::new() }
    }

    /// Looks up the piece at `pos`. Returns [`Piece::Invalid`] for
    /// out-of-range positions, [`Piece::None`] for empty in-range cells.
    pub fn get(&self, pos: Position) -> Piece {
        if pos.is_out_of_range() {
            return Piece::Invalid;
        }
        self.cells.get(&pos).copied().unwrap_or(Piece::None)
    }

    /// Places `piece` at `pos`. Overwriting an occupied cell is a
    /// programmer error the caller is expected to have already ruled out
    /// via the move-legality check, so this does not validate occupancy.
    pub fn set(&mut self, pos: Position, piece: Piece) -> Result<(), GomokuError> {
        if pos.is_out_of_range() {
            return Err(GomokuError::PositionOutOfRange {
                x: pos.x(),
                y: pos.y(),
                max: BOARD_SIZE - 1,
            });
        }
        if piece == Piece::None {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, piece);
        }
        Ok(())
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().map(|(&p, &v)| (p, v))
    }

    /// Renders the board to a string following `settings`: one row per
    /// line, cells separated by spaces, with optional column header and
    /// row numbers.
    pub fn render(&self, settings: &BoardPrintSettings) -> Result<String, GomokuError> {
        let mut out = String::new();
        if settings.does_show_line_number {
            for x in 0..BOARD_SIZE {
                out.push((b'A' + x as u8) as char);
                if x < BOARD_SIZE - 1 {
                    out.push(' ');
                } else {
                    out.push('\n');
                }
            }
        }
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let pos = Position::new(x, y, false)?;
                let ch = match self.get(pos) {
                    Piece::None => settings.empty_char.as_str(),
                    Piece::Black => settings.black_char.as_str(),
                    Piece::White => settings.white_char.as_str(),
                    Piece::Both | Piece::Invalid => return Err(GomokuError::InvalidOutcome),
                };
                out.push_str(ch);
                if x < BOARD_SIZE - 1 {
                    out.push(' ');
                }
            }
            if settings.does_show_line_number {
                let _ = write!(out, " {}", y + 1);
            }
            if y < BOARD_SIZE - 1 {
                out.push('\n');
            }
        }
        Ok(out)
    }

    /// All in-range positions, in row-major order, used by candidate
    /// generation and full-board scans.
    pub fn all_positions() -> impl Iterator<Item = Position> {
        (MIN_POSITION.raw()..=MAX_POSITION.raw()).map(|raw| {
            // SAFETY-free reconstruction: `raw` stays within the valid
            // encoding range produced by MIN_POSITION..=MAX_POSITION.
            Position::new(
                ((raw - 1) as i32) % BOARD_SIZE,
                ((raw - 1) as i32) / BOARD_SIZE,
                false,
            )
            .expect("raw stays in range by construction")
        })
    }
}
