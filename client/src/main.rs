use std::{env, io};

use colored::Colorize;
use config::Config;
use libgame::{Simulation, board::GameBoard};

mod cli;
mod config;

pub struct State {
    simulation: Simulation,
}

fn main() -> anyhow::Result<()> {
    let config = match env::args().nth(1) {
        Some(config_path) => Config::load(config_path)?,
        None => Config::default(),
    };

    let mut board = GameBoard::new(config.width, config.height);
    board.set_workers(config.workers);

    let mut state = State {
        simulation: Simulation::new(board, config.rule),
    };

    println!(
        "{} {}x{} board, rule {}, {} workers",
        "life".bright_green(),
        config.width,
        config.height,
        state.simulation.rule(),
        state.simulation.board().workers()
    );

    cli::run_cli(&mut state, io::stdin().lock())
}
