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

//! Interactive text-mode front end: bootstraps settings, runs the turn
//! loop, and tears the engine down on exit.

mod facade;
mod io;
mod settings;

use std::process::ExitCode;

use gmk_board::Piece;

use facade::Game;
use settings::Settings;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), gmk_utils::GomokuError> {
    let settings_path = gmk_utils::default_settings_path();

    let settings = if settings_path.exists() {
        Settings::load(&settings_path)?
    } else {
        let settings = Settings::default();
        if let Err(err) = settings.store(&settings_path) {
            log::warn!("could not store default settings to {}: {err}", settings_path.display());
        }
        settings
    };

    let mut game = Game::new(settings)?;

    io::print_welcome(&settings_path);
    println!();
    io::print_board(&game)?;
    println!();

    while !game.is_terminal() {
        let step = game.step();
        let to_move = Piece::for_step(step);

        if to_move.intersects(game.settings().ai.ai_piece) {
            print!("Turn {} - AI's turn: ", step / 2 + 1);
            let pos = game.place_by_ai()?;
            println!("{pos}");
        } else {
            match io::ask_for_input_position(game.settings().rule, step)? {
                Some(pos) => game.place_by_user(pos)?,
                None => {
                    game.teardown();
                    return Ok(());
                }
            }
        }

        println!();
        io::print_board(&game)?;
        println!();
    }

    println!("Game over. Winner: {}", game.outcome().unwrap_or(Piece::None));
    game.teardown();
    Ok(())
}
