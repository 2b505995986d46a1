use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ml_tic_tac_toe::ai::NeuralAgent;
use ml_tic_tac_toe::config::AppConfig;
use ml_tic_tac_toe::logging;
use ml_tic_tac_toe::training::trainer::Trainer;

/// Train the tic-tac-toe agent against a random opponent.
#[derive(Parser)]
#[command(name = "train", about = "Train the tic-tac-toe agent headlessly")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override learning rate
    #[arg(long)]
    lr: Option<f64>,

    /// Seed for the network and the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let _logger = logging::init(&cli.log_level).context("starting logger")?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(episodes) = cli.episodes {
        config.training.num_episodes = episodes;
    }
    if let Some(lr) = cli.lr {
        config.network.learning_rate = lr;
    }
    if let Some(seed) = cli.seed {
        config.network.seed = Some(seed);
        config.training.opponent_seed = Some(seed.wrapping_add(1));
    }
    config.validate().context("invalid configuration")?;

    let mut agent: NeuralAgent = NeuralAgent::from_config(
        &config.network,
        config.training.reward_targets(),
        &Default::default(),
    );

    let summary = Trainer::new(config.training.clone())
        .train(&mut agent)
        .context("training")?;

    println!("-------------------------------------------");
    println!("Training complete. Total episodes: {}", summary.episodes);
    println!("Mean loss (last window): {:.5}", summary.average_loss);
    println!(
        "Final eval vs Random ({} games): {:.1}% win | {:.1}% draw | {:.1}% loss",
        summary.final_eval.games,
        summary.final_eval.win_rate * 100.0,
        summary.final_eval.draw_rate * 100.0,
        summary.final_eval.loss_rate * 100.0
    );
    println!("Weights are kept in memory only and are discarded on exit.");

    Ok(())
}
