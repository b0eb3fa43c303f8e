//! Advise command - query the trained policy for a move

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{cli::output::print_kv, q_learning::MoveAdvisor, tictactoe::BoardState};

#[derive(Parser, Debug)]
#[command(about = "Suggest a move for a board position")]
pub struct AdviseArgs {
    /// Board as a 9-character string, row-major (space=empty, X, O),
    /// e.g. "X   O    "
    pub board: String,

    /// Q-table file to consult
    #[arg(long, short = 't', default_value = "q_table.json")]
    pub table: PathBuf,

    /// Random seed for tie handling (reproducible answers)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: AdviseArgs) -> Result<()> {
    let state = BoardState::from_string(&args.board)
        .with_context(|| format!("invalid board string '{}'", args.board))?;

    if !args.table.exists() {
        println!(
            "[INFO] No Q-table found at '{}'; the suggestion is random.",
            args.table.display()
        );
    }
    let mut advisor = MoveAdvisor::from_file(&args.table)
        .with_context(|| format!("failed to load Q-table from '{}'", args.table.display()))?;
    if let Some(seed) = args.seed {
        advisor = advisor.with_seed(seed);
    }

    println!("{state}");
    match advisor.choose_best_action(&state) {
        Some(action) => {
            print_kv("Suggested cell", &action.to_string());
            print_kv("Row", &(action / 3).to_string());
            print_kv("Column", &(action % 3).to_string());
        }
        None => println!("Board is full; no move available."),
    }

    Ok(())
}
