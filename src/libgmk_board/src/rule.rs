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

//! Opening-rule legality: Standard Gomoku (anything goes) and Gomoku-Pro
//! (constrained opening moves).

use std::fmt;

use gmk_utils::GomokuError;

use crate::position::Position;

/// A Gomoku ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    StandardGomoku,
    GomokuPro,
}

impl Rule {
    /// Parses the settings-file spelling (`"StandardGomoku"`,
    /// `"Gomoku-Pro"`), case-insensitively. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Rule> {
        if s.eq_ignore_ascii_case("StandardGomoku") {
            Some(Rule::StandardGomoku)
        } else if s.eq_ignore_ascii_case("Gomoku-Pro") {
            Some(Rule::GomokuPro)
        } else {
            None
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rule::StandardGomoku => "StandardGomoku",
            Rule::GomokuPro => "Gomoku-Pro",
        };
        write!(f, "{s}")
    }
}

impl serde::Serialize for Rule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rule::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown rule {s:?}")))
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule::StandardGomoku
    }
}

/// Returns whether `pos` is a legal move at 1-based `step` under `rule`,
/// together with a human-readable hint to show the player when it isn't.
///
/// `step == 0` is a programmer-contract violation (the caller should always
/// know which 1-based step it is about to play) and panics, mirroring the
/// original's `panic(errors.New("step is zero"))`.
pub fn is_legal(rule: Rule, step: u32, pos: Position) -> (bool, &'static str) {
    assert!(step > 0, "is_legal called with step == 0");
    match rule {
        Rule::StandardGomoku => is_legal_standard(step, pos),
        Rule::GomokuPro => is_legal_gomoku_pro(step, pos),
    }
}

fn is_legal_standard(_step: u32, pos: Position) -> (bool, &'static str) {
    if pos.is_out_of_range() {
        return (false, "Position is outside the board.");
    }
    (true, "")
}

fn is_legal_gomoku_pro(step: u32, pos: Position) -> (bool, &'static str) {
    if step != 1 && step != 3 {
        return is_legal_standard(step, pos);
    }
    let (x, y) = (pos.x_offset(), pos.y_offset());
    if step == 1 {
        if x != 0 || y != 0 {
            return (false, "First step must be at H8.");
        }
        (true, "")
    } else {
        let (is_legal, hint) = is_legal_standard(step, pos);
        if !is_legal {
            return (is_legal, hint);
        }
        if (-2..=2).contains(&x) && (-2..=2).contains(&y) {
            return (false, "Third step must be outside the central 5x5 area.");
        }
        (true, "")
    }
}

/// Parses a rule name, producing [`GomokuError::UnknownRule`] for anything
/// not recognized by [`Rule::parse`]. Used where the caller needs an error
/// rather than an `Option` (e.g. loading settings).
pub fn parse_rule_or_err(s: &str) -> Result<Rule, GomokuError> {
    Rule::parse(s).ok_or(GomokuError::UnknownRule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    #[should_panic]
    fn step_zero_panics() {
        let _ = is_legal(Rule::StandardGomoku, 0, Position::parse("H8").unwrap());
    }

    #[test]
    fn standard_gomoku_allows_anything_in_range() {
        let (legal, _) = is_legal(Rule::StandardGomoku, 1, Position::parse("A1").unwrap());
        assert!(legal);
    }

    #[test]
    fn gomoku_pro_step_1_must_be_center() {
        let (legal, _) = is_legal(Rule::GomokuPro, 1, Position::parse("H8").unwrap());
        assert!(legal);
        let (legal, _) = is_legal(Rule::GomokuPro, 1, Position::parse("A1").unwrap());
        assert!(!legal);
    }

    #[test]
    fn gomoku_pro_step_3_scenarios() {
        let (legal, _) = is_legal(Rule::GomokuPro, 3, Position::parse("H8").unwrap());
        assert!(!legal, "H8 is inside the central 5x5 box");
        let (legal, _) = is_legal(Rule::GomokuPro, 3, Position::parse("F6").unwrap());
        assert!(!legal, "F6 has |dx|=|dy|=2, still inside the box");
        let (legal, _) = is_legal(Rule::GomokuPro, 3, Position::parse("F5").unwrap());
        assert!(legal, "F5 is outside the central 5x5 box");
    }

    #[test]
    fn gomoku_pro_other_steps_defer_to_standard() {
        let (legal, _) = is_legal(Rule::GomokuPro, 2, Position::parse("A1").unwrap());
        assert!(legal);
    }
}
