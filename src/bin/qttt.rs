//! qttt CLI - train and query a tabular Q-learning Tic-Tac-Toe policy
//!
//! This CLI provides:
//! - Self-play training of the Q-table with epsilon-greedy exploration
//! - Move advice for a live board position from the trained table

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qttt")]
#[command(version, about = "Tabular Q-learning Tic-Tac-Toe trainer and advisor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the policy through self-play episodes
    Train(qttt::cli::commands::train::TrainArgs),

    /// Suggest the best known move for a board position
    Advise(qttt::cli::commands::advise::AdviseArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qttt::cli::commands::train::execute(args),
        Commands::Advise(args) => qttt::cli::commands::advise::execute(args),
    }
}
