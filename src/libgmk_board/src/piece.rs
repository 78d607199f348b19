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

//! The three meaningful stone colors, plus the combined `Both` bit and the
//! `Invalid` sentinel used by out-of-range lookups.

use std::fmt;

/// A stone color, or the absence of one, represented as a small bitset:
/// `Black = 1`, `White = 2`, `Both = Black | White = 3`, `Invalid = 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    /// No stone.
    None = 0,
    Black = 1,
    White = 2,
    /// "Either color has been seen" — used internally by the outcome
    /// detector's hypothetical queries; never placed on the real board.
    Both = 3,
    /// A query on an out-of-range cell.
    Invalid = 4,
}

impl Piece {
    /// Parses the settings-file spelling of a piece (`"Black"`, `"White"`,
    /// `"Both"`, `"None"`, case/space-insensitive). Anything else yields
    /// `Piece::Invalid`.
    pub fn parse(s: &str) -> Piece {
        let normalized = s.to_ascii_lowercase().replace(' ', "_");
        match normalized.as_str() {
            "none" => Piece::None,
            "black" => Piece::Black,
            "white" => Piece::White,
            "both" | "black_and_white" | "white_and_black" => Piece::Both,
            _ => Piece::Invalid,
        }
    }

    /// True for `Black`, `White`, or `Both` — i.e. everything but `None` and
    /// `Invalid`.
    pub fn is_valid(self) -> bool {
        matches!(self, Piece::Black | Piece::White | Piece::Both)
    }

    /// Bitwise AND, used for membership tests like `next_turn & ai_piece`.
    pub fn intersects(self, other: Piece) -> bool {
        (self as u8) & (other as u8) != 0
    }

    /// The piece credited for a move made at 1-based `step`: odd steps are
    /// Black, even steps are White.
    pub fn for_step(step: u32) -> Piece {
        if step % 2 == 1 {
            Piece::Black
        } else {
            Piece::White
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Piece::None => "None",
            Piece::Black => "Black",
            Piece::White => "White",
            Piece::Both => "Both",
            Piece::Invalid => "Invalid",
        };
        write!(f, "{s}")
    }
}

impl serde::Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Piece::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        for p in [Piece::None, Piece::Black, Piece::White, Piece::Both] {
            assert_eq!(Piece::parse(&p.to_string()), p);
        }
    }

    #[test]
    fn parse_is_case_and_space_insensitive() {
        assert_eq!(Piece::parse("BLACK"), Piece::Black);
        assert_eq!(Piece::parse("black and white"), Piece::Both);
    }

    #[test]
    fn parse_unknown_is_invalid() {
        assert_eq!(Piece::parse("purple"), Piece::Invalid);
    }

    #[test]
    fn validity() {
        assert!(Piece::Black.is_valid());
        assert!(Piece::Both.is_valid());
        assert!(!Piece::None.is_valid());
        assert!(!Piece::Invalid.is_valid());
    }

    #[test]
    fn step_parity() {
        assert_eq!(Piece::for_step(1), Piece::Black);
        assert_eq!(Piece::for_step(2), Piece::White);
    }
}
