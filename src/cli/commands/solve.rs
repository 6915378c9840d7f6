//! Solve command - enumerate the game and store exact values

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{format_number, print_kv, print_section},
    solver::{SavedTable, Solver},
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Solve every reachable position")]
pub struct SolveArgs {
    /// Output file for the solved table
    #[arg(long, short = 'o', default_value = "solved.msgpack")]
    pub output: PathBuf,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let table = Solver::new().solve();
    let root = table.get(&Board::new())?;

    print_section("Solved");
    print_kv("States", &format_number(table.len()));
    print_kv("Empty board value", &format!("{root}"));

    SavedTable::solved(table).save_to_file(&args.output)?;
    print_kv("Saved to", &args.output.display().to_string());
    Ok(())
}
