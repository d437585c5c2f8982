use std::{io::BufRead, ops::ControlFlow};

use anyhow::{Context, bail};
use colored::Colorize;
use libgame::{board::LifeBoard, pattern::Pattern, pos::Position, rule::Rule};

use crate::State;

pub fn run_cli<R>(state: &mut State, input: R) -> anyhow::Result<()>
where
    R: BufRead,
{
    for line_res in input.lines() {
        let line = line_res.context("Couldn't read command")?;
        let args = line.split_whitespace();

        match handle_cmd(state, args) {
            Ok(ControlFlow::Continue(())) => println!("OK"),
            Ok(ControlFlow::Break(())) => break,
            Err(e) => eprintln!("{} {e:?}", "!".bright_red()),
        }
    }

    Ok(())
}

pub fn handle_cmd<'a, I>(state: &mut State, mut args: I) -> anyhow::Result<ControlFlow<()>>
where
    I: Iterator<Item = &'a str>,
{
    let simulation = &mut state.simulation;

    match args.next().context("No command")? {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            for _ in 0..times {
                simulation.next_generation();
            }
        }

        "clear" => {
            simulation.clear();
        }

        "toggle" => {
            simulation.toggle_cell(parse_position(&mut args)?);
        }

        "set" => {
            simulation.set_cell_alive(parse_position(&mut args)?);
        }

        "kill" => {
            simulation.set_cell_dead(parse_position(&mut args)?);
        }

        "import" => {
            let path = args.next().context("missing pattern path")?;
            let pattern = Pattern::read(path)
                .with_context(|| format!("Couldn't import pattern {path:?}"))?;

            let origin = match args.next() {
                Some(x) => {
                    let x = x.parse::<usize>()?;
                    let y = args.next().context("missing y")?.parse::<usize>()?;
                    Position::new(x, y)
                }
                None => Position::new(
                    simulation.grid_width().saturating_sub(pattern.width()) / 2,
                    simulation.grid_height().saturating_sub(pattern.height()) / 2,
                ),
            };

            simulation.import_pattern(&pattern, origin);

            println!(
                "{}x{} pattern with {} live cells at ({}, {})",
                pattern.width(),
                pattern.height(),
                pattern.alive_count(),
                origin.x,
                origin.y
            );

            if let Some(rule) = pattern.rule()
                && rule != simulation.rule()
            {
                println!("Pattern declares rule {rule}, enter `rule {rule}` to use it");
            }
        }

        "rule" => match args.next() {
            Some(rule_string) => {
                let rule = rule_string.parse::<Rule>()?;
                simulation.set_rule(rule);
            }
            None => println!("{}", simulation.rule()),
        },

        "workers" => match args.next() {
            Some(workers) => {
                let workers = workers.parse::<usize>()?;
                simulation.board_mut().set_workers(workers);
            }
            None => println!("{}", simulation.board().workers()),
        },

        "show" => {
            for row in simulation.board().to_string().lines() {
                let row = row
                    .chars()
                    .map(|tile| match tile {
                        'O' => "O".bright_green().to_string(),
                        _ => ".".dimmed().to_string(),
                    })
                    .collect::<String>();
                println!("{row}");
            }
        }

        "count" => {
            println!(
                "gen {}: {} live cells",
                simulation.generation().to_string().bright_cyan(),
                simulation.board().alive_count()
            );
        }

        "exit" => {
            return Ok(ControlFlow::Break(()));
        }

        _ => bail!("Unknown command"),
    }

    Ok(ControlFlow::Continue(()))
}

fn parse_position<'a, I>(args: &mut I) -> anyhow::Result<Position>
where
    I: Iterator<Item = &'a str>,
{
    let x = args.next().context("missing x")?.parse::<usize>()?;
    let y = args.next().context("missing y")?.parse::<usize>()?;

    Ok(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use libgame::{Simulation, board::GameBoard};

    use super::*;

    fn state(width: usize, height: usize) -> State {
        State {
            simulation: Simulation::new(GameBoard::new(width, height), Rule::default()),
        }
    }

    fn run(state: &mut State, line: &str) -> anyhow::Result<ControlFlow<()>> {
        handle_cmd(state, line.split_whitespace())
    }

    fn pattern_path(name: &str) -> String {
        format!(
            "{}/../libgame/tests/patterns/{name}",
            env!("CARGO_MANIFEST_DIR")
        )
    }

    #[test]
    fn edits_and_steps_a_blinker() {
        let mut state = state(5, 5);

        for line in ["set 1 2", "set 2 2", "toggle 3 2", "set 4 4", "kill 4 4"] {
            run(&mut state, line).unwrap();
        }
        assert_eq!(state.simulation.live_cell_count(), 3);

        run(&mut state, "step 3").unwrap();
        assert_eq!(state.simulation.generation(), 3);
        assert!(state.simulation.is_cell_alive((2, 1)));
        assert!(state.simulation.is_cell_alive((2, 3)));

        run(&mut state, "clear").unwrap();
        assert_eq!(state.simulation.live_cell_count(), 0);
    }

    #[test]
    fn imports_centered_or_at_position() {
        let mut state = state(11, 11);

        run(&mut state, &format!("import {}", pattern_path("glider.cells"))).unwrap();
        assert!(state.simulation.is_cell_alive((5, 4)));
        assert!(state.simulation.is_cell_alive((4, 6)));

        run(&mut state, "clear").unwrap();
        run(&mut state, &format!("import {} 0 1", pattern_path("glider.lif"))).unwrap();
        assert!(state.simulation.is_cell_alive((1, 1)));
        assert_eq!(state.simulation.live_cell_count(), 5);
    }

    #[test]
    fn failed_import_leaves_board_alone() {
        let mut state = state(6, 6);
        run(&mut state, "set 3 3").unwrap();

        assert!(run(&mut state, &format!("import {}", pattern_path("broken.life"))).is_err());
        assert_eq!(state.simulation.live_cell_count(), 1);
    }

    #[test]
    fn changes_rule_and_workers() {
        let mut state = state(8, 8);

        run(&mut state, "rule b36/s23").unwrap();
        assert_eq!(state.simulation.rule().to_string(), "B36/S23");
        assert!(run(&mut state, "rule 23/3").is_err());
        assert_eq!(state.simulation.rule().to_string(), "B36/S23");

        run(&mut state, "workers 4").unwrap();
        assert_eq!(state.simulation.board().workers(), 4);
    }

    #[test]
    fn rejects_bad_input() {
        let mut state = state(4, 4);

        assert!(run(&mut state, "").is_err());
        assert!(run(&mut state, "dance").is_err());
        assert!(run(&mut state, "set 1").is_err());
        assert!(run(&mut state, "set -1 2").is_err());
        assert!(run(&mut state, "step many").is_err());
    }

    #[test]
    fn exit_stops_the_console() {
        let mut state = state(4, 4);

        assert_eq!(run(&mut state, "exit").unwrap(), ControlFlow::Break(()));

        let input = "set 1 1\nexit\nset 2 2\n".as_bytes();
        run_cli(&mut state, input).unwrap();
        assert_eq!(state.simulation.live_cell_count(), 1);
    }
}
