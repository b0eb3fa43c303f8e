//! Train command - self-play Q-learning over a persisted table

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    cli::output::{create_training_progress, format_number, print_kv, print_section},
    q_learning::QTable,
    training::{Hyperparameters, SelfPlayTrainer},
};

#[derive(Parser, Debug)]
#[command(about = "Train the policy through self-play", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of self-play episodes
    #[arg(long, short = 'e', default_value_t = 20_000)]
    pub episodes: usize,

    /// Learning rate α (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    pub alpha: f64,

    /// Discount factor γ (0.0-1.0)
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Initial exploration rate
    #[arg(long, default_value_t = 1.0)]
    pub epsilon_start: f64,

    /// Final exploration rate (decay floor)
    #[arg(long, default_value_t = 0.01)]
    pub epsilon_end: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Q-table file to load from and save to
    #[arg(long, short = 't', default_value = "q_table.json")]
    pub table: PathBuf,

    /// Show progress bar (pass `--progress false` for piped output)
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub progress: bool,
}

fn validate_unit_interval(value: f64, flag: &str) -> Result<()> {
    if (0.0..=1.0).contains(&value) && value.is_finite() {
        Ok(())
    } else {
        Err(anyhow!("{flag} must be within [0.0, 1.0], got {value}"))
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    validate_unit_interval(args.alpha, "--alpha")?;
    validate_unit_interval(args.gamma, "--gamma")?;
    validate_unit_interval(args.epsilon_start, "--epsilon-start")?;
    validate_unit_interval(args.epsilon_end, "--epsilon-end")?;

    if !args.table.exists() {
        println!(
            "[INFO] No Q-table found at '{}'; starting from an empty table.",
            args.table.display()
        );
    }
    let table = QTable::load_from_file(&args.table)
        .with_context(|| format!("failed to load Q-table from '{}'", args.table.display()))?;
    let initial_size = table.len();

    let config = Hyperparameters {
        learning_rate: args.alpha,
        discount_factor: args.gamma,
        epsilon_start: args.epsilon_start,
        epsilon_end: args.epsilon_end,
        episodes: args.episodes,
        seed: args.seed,
    };

    let mut trainer = SelfPlayTrainer::new(config, table);

    let report = if args.progress {
        let pb = create_training_progress(args.episodes as u64);
        let report = trainer.run_with(|_, _| pb.inc(1))?;
        pb.finish_and_clear();
        report
    } else {
        trainer.run()?
    };

    print_section(&format!(
        "Training completed after {} games",
        format_number(report.episodes)
    ));
    print_kv("X wins", &format_number(report.x_wins));
    print_kv("O wins", &format_number(report.o_wins));
    print_kv("Draws", &format_number(report.draws));
    print_kv("Final epsilon", &format!("{:.4}", report.final_epsilon));
    print_kv(
        "Table entries",
        &format!(
            "{} ({} new)",
            format_number(report.table_size),
            format_number(report.table_size.saturating_sub(initial_size))
        ),
    );

    trainer
        .into_table()
        .save_to_file(&args.table)
        .with_context(|| format!("failed to save Q-table to '{}'", args.table.display()))?;
    println!("Q-table saved to '{}'.", args.table.display());

    Ok(())
}
