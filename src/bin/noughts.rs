//! noughts CLI - solve, play and train noughts and crosses agents
//!
//! This CLI provides a unified interface for:
//! - Solving every reachable position exactly
//! - Playing any two agents against each other, humans included
//! - Training temporal-difference learners and reporting their progress

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Noughts and crosses solver, agents and learner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the game and save the value table
    Solve(noughts::cli::commands::solve::SolveArgs),

    /// Play games between two agents
    Play(noughts::cli::commands::play::PlayArgs),

    /// Train a temporal-difference learner
    Train(Box<noughts::cli::commands::train::TrainArgs>),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => noughts::cli::commands::solve::execute(args),
        Commands::Play(args) => noughts::cli::commands::play::execute(args),
        Commands::Train(args) => noughts::cli::commands::train::execute(*args),
    }
}
