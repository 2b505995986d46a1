use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ml_tic_tac_toe::ai::NeuralAgent;
use ml_tic_tac_toe::cli::run_session;
use ml_tic_tac_toe::config::AppConfig;
use ml_tic_tac_toe::logging;
use ml_tic_tac_toe::training::trainer::Trainer;

/// Play tic-tac-toe against a neural-network agent.
#[derive(Parser)]
#[command(name = "ml_tic_tac_toe", about = "Play tic-tac-toe against a learning agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Seed for the network weights and fallback moves
    #[arg(long)]
    seed: Option<u64>,

    /// Override the hidden layer size
    #[arg(long)]
    hidden_size: Option<usize>,

    /// Override learning rate
    #[arg(long)]
    lr: Option<f64>,

    /// Let the agent make the first move
    #[arg(long)]
    agent_first: bool,

    /// Do not train the agent on finished games
    #[arg(long)]
    no_learn: bool,

    /// Train against a random opponent for this many games before playing
    #[arg(long)]
    pretrain: Option<usize>,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init(&cli.log_level).context("starting logger")?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(seed) = cli.seed {
        config.network.seed = Some(seed);
    }
    if let Some(hidden_size) = cli.hidden_size {
        config.network.hidden_size = hidden_size;
    }
    if let Some(lr) = cli.lr {
        config.network.learning_rate = lr;
    }
    if cli.agent_first {
        config.play.human_first = false;
    }
    if cli.no_learn {
        config.play.learn_from_games = false;
    }
    if let Some(episodes) = cli.pretrain {
        config.training.num_episodes = episodes;
    }
    config.validate().context("invalid configuration")?;

    let mut agent: NeuralAgent = NeuralAgent::from_config(
        &config.network,
        config.training.reward_targets(),
        &Default::default(),
    );

    if cli.pretrain.is_some() {
        println!("Warming up against a random opponent...");
        let summary = Trainer::new(config.training.clone())
            .train(&mut agent)
            .context("pretraining")?;
        println!(
            "Pretrained for {} games: {:.1}% wins vs random",
            summary.episodes,
            summary.final_eval.win_rate * 100.0
        );
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let stats = run_session(&mut agent, &mut input, &mut output, &config.play)
        .context("running game session")?;
    log::info!("session finished after {} games", stats.games());

    Ok(())
}
