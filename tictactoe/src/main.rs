//! Command-line tic-tac-toe.
//!
//! `play` reads moves as `x y` lines from stdin; `show-flow` prints the
//! round/turn outline the game runs on.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tictactoe::config::load_config;
use tictactoe::exit_codes;
use tictactoe::game::{DEFAULT_FLOW, Game, Outcome, new_engine, play};
use tictactoe::moves::{LineMoves, ScriptedMoves};
use turnflow::FlowDefinition;
use turnflow::io::definition_store::load_definition;

#[derive(Parser)]
#[command(
    name = "tictactoe",
    version,
    about = "Tic-tac-toe on a depth-first turn flow"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one game, reading moves from stdin.
    Play {
        /// Game config (players, engine limits). Defaults apply if missing.
        #[arg(long, default_value = "game.toml")]
        config: PathBuf,
        /// Flow definition replacing the built-in one.
        #[arg(long)]
        flow: Option<PathBuf>,
    },
    /// Print the flow outline with per-player turns expanded.
    ShowFlow {
        #[arg(long, default_value = "game.toml")]
        config: PathBuf,
        #[arg(long)]
        flow: Option<PathBuf>,
    },
}

fn main() {
    turnflow::logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Play { config, flow } => cmd_play(&config, flow.as_deref()),
        Command::ShowFlow { config, flow } => cmd_show_flow(&config, flow.as_deref()),
    }
}

fn cmd_play(config_path: &Path, flow_path: Option<&Path>) -> Result<i32> {
    let config = load_config(config_path)?;
    let definition = load_flow(flow_path)?;
    let moves = LineMoves::new(io::stdin().lock(), io::stdout());
    let game = Game::new(Box::new(moves), Box::new(io::stdout()));
    let mut engine = new_engine(&config, &definition, game)?;

    let outcome = play(&mut engine)?;
    io::stdout().flush().context("flush stdout")?;
    Ok(match outcome {
        Outcome::Winner(_) | Outcome::Draw => exit_codes::OK,
        Outcome::Abandoned => exit_codes::ABANDONED,
    })
}

fn cmd_show_flow(config_path: &Path, flow_path: Option<&Path>) -> Result<i32> {
    let config = load_config(config_path)?;
    let definition = load_flow(flow_path)?;
    let game = Game::new(Box::new(ScriptedMoves::new([])), Box::new(io::sink()));
    let engine = new_engine(&config, &definition, game)?;
    println!("{}", engine.flow()?.render_tree());
    Ok(exit_codes::OK)
}

fn load_flow(path: Option<&Path>) -> Result<FlowDefinition> {
    match path {
        Some(path) => load_definition(path),
        None => FlowDefinition::from_toml(DEFAULT_FLOW).context("parse built-in flow"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_play_defaults() {
        let cli = Cli::parse_from(["tictactoe", "play"]);
        match cli.command {
            Command::Play { config, flow } => {
                assert_eq!(config, PathBuf::from("game.toml"));
                assert!(flow.is_none());
            }
            Command::ShowFlow { .. } => panic!("expected play"),
        }
    }

    #[test]
    fn parse_show_flow_with_custom_flow() {
        let cli = Cli::parse_from(["tictactoe", "show-flow", "--flow", "custom.toml"]);
        assert!(matches!(
            cli.command,
            Command::ShowFlow { flow: Some(ref path), .. } if path == Path::new("custom.toml")
        ));
    }
}
