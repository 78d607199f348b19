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

//! Console rendering and input parsing. Never reached into by the library
//! crates; the core only exposes the parse/legality helpers this module
//! calls.

use std::io::{self, Write};

use gmk_board::{is_legal, Position, Rule};
use gmk_utils::GomokuError;

use crate::facade::Game;

/// `q`/`quit`, case-insensitively, means "abort the game"; anything else is
/// parsed as a `<letter><number>` coordinate.
pub fn parse_input(line: &str) -> Result<Option<Position>, GomokuError> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Ok(None);
    }
    Position::parse(trimmed).map(Some)
}

/// Prompts on stdout, reads one line from stdin, and parses it. Returns
/// `Ok(None)` if the player asked to quit. Re-prompts on a parse failure or
/// an opening-rule legality violation, surfacing the rule engine's hint the
/// same way the original's `AskForInputPosition` does.
pub fn ask_for_input_position(rule: Rule, step: u32) -> Result<Option<Position>, GomokuError> {
    loop {
        print!("Turn {} - your move (or 'q' to quit): ", step / 2 + 1);
        io::stdout().flush().ok();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
            // Stdin closed; treat like a quit request.
            return Ok(None);
        }

        let pos = match parse_input(&line) {
            Ok(pos) => pos,
            Err(err) => {
                eprintln!("{err}, try again");
                continue;
            }
        };

        let Some(pos) = pos else {
            return Ok(None);
        };

        let (legal, hint) = is_legal(rule, step, pos);
        if !legal {
            eprintln!("{pos} is not a legal move here: {hint}, try again");
            continue;
        }

        return Ok(Some(pos));
    }
}

/// Renders the board into a multi-line string: an optional header row of
/// column letters, one row per board row top-to-bottom with an optional
/// trailing row number.
pub fn print_board(game: &Game) -> Result<(), GomokuError> {
    let board = game.board();
    let board = board.read().expect("board lock poisoned");
    let rendered = board.render(&game.settings().io.board_print)?;
    println!("{rendered}");
    Ok(())
}

/// A short welcome banner naming the settings file path.
pub fn print_welcome(settings_path: &std::path::Path) {
    println!("Gomoku");
    println!("Settings loaded from {}", settings_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_is_recognized_case_insensitively() {
        assert_eq!(parse_input("Q").unwrap(), None);
        assert_eq!(parse_input(" quit ").unwrap(), None);
    }

    #[test]
    fn coordinate_is_parsed() {
        assert_eq!(parse_input("h8").unwrap(), Some(gmk_board::CENTER_POSITION));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_input("zz").is_err());
    }
}
