//! Little-Go command line.
//!
//! ## Usage
//!
//! - `little-go train` - Self-play training, saving policies periodically
//! - `little-go judge --moves N` - Adjudicate one move from the interchange files
//! - `little-go move --policy FILE` - Answer the interchange input with a trained policy
//! - `little-go play --policy FILE` - Play against a trained policy at the terminal
//! - `little-go config` - Print the default configuration

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use little_go::agent::{Agent, ManualAgent, TableAgent};
use little_go::board::Stone;
use little_go::config::AppConfig;
use little_go::constants::{EXIT_ABNORMAL, INPUT_FILE, MAX_INVALID_ATTEMPTS, OUTPUT_FILE};
use little_go::game::play_game;
use little_go::interchange::{format_move, read_input};
use little_go::judge::{adjudicate, respond};
use little_go::policy::{PolicyStore, load_policy};
use little_go::position::Outcome;
use little_go::trainer::Trainer;
use little_go::value::ValueTable;

/// Little-Go: 5x5 Go with a self-play value-table learner
#[derive(Parser)]
#[command(name = "little-go")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "little-go.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train two agents against each other
    Train {
        /// Override number of games
        #[arg(long)]
        games: Option<usize>,
        /// Override the policy output directory
        #[arg(long)]
        policy_dir: Option<PathBuf>,
        /// Start Black from an existing policy
        #[arg(long)]
        black_policy: Option<PathBuf>,
        /// Start White from an existing policy
        #[arg(long)]
        white_policy: Option<PathBuf>,
        /// Seed both agents for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Adjudicate the decision in the output file against the input file
    Judge {
        /// Plies played before this decision
        #[arg(long, default_value_t = 0)]
        moves: usize,
        #[arg(long, default_value = INPUT_FILE)]
        input: PathBuf,
        #[arg(long, default_value = OUTPUT_FILE)]
        output: PathBuf,
    },
    /// Write a decision for the input file using a trained policy
    Move {
        #[arg(long)]
        policy: PathBuf,
        #[arg(long, default_value = INPUT_FILE)]
        input: PathBuf,
        #[arg(long, default_value = OUTPUT_FILE)]
        output: PathBuf,
    },
    /// Print the default configuration as TOML
    Config,
    /// Play against a trained policy
    Play {
        #[arg(long)]
        policy: Option<PathBuf>,
        /// Take White instead of Black
        #[arg(long)]
        white: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("little_go=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Judge {
            moves,
            input,
            output,
        } => {
            // The exit code carries the verdict.
            return match adjudicate(&input, &output, moves) {
                Ok(verdict) => {
                    info!(?verdict, "adjudicated");
                    ExitCode::from(verdict.exit_code() as u8)
                }
                Err(e) => {
                    error!(error = %e, "cannot adjudicate");
                    ExitCode::from(EXIT_ABNORMAL as u8)
                }
            };
        }
        Commands::Train {
            games,
            policy_dir,
            black_policy,
            white_policy,
            seed,
        } => load_config(&cli.config).and_then(|mut config| {
            if let Some(games) = games {
                config.training.num_games = games;
            }
            if let Some(dir) = policy_dir {
                config.policy.dir = dir;
            }
            if seed.is_some() {
                config.agent.seed = seed;
            }
            run_train(&config, black_policy, white_policy)
        }),
        Commands::Move {
            policy,
            input,
            output,
        } => run_move(&policy, &input, &output),
        Commands::Play { policy, white } => run_play(policy, white),
        Commands::Config => AppConfig::default_toml()
            .map(|text| print!("{text}"))
            .context("rendering default config"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path) -> Result<AppConfig> {
    AppConfig::load_or_default(path)
        .with_context(|| format!("loading config from {}", path.display()))
}

fn load_table(path: Option<PathBuf>) -> Result<ValueTable> {
    match path {
        Some(path) => load_policy(&path).with_context(|| format!("loading {}", path.display())),
        None => Ok(ValueTable::new()),
    }
}

fn run_train(
    config: &AppConfig,
    black_policy: Option<PathBuf>,
    white_policy: Option<PathBuf>,
) -> Result<()> {
    let mut black =
        TableAgent::new("player1", Stone::Black, &config.agent).with_table(load_table(black_policy)?);
    let mut white =
        TableAgent::new("player2", Stone::White, &config.agent).with_table(load_table(white_policy)?);

    let trainer = Trainer::new(
        config.training.clone(),
        Some(PolicyStore::new(&config.policy.dir)),
    )
    .context("invalid training schedule")?;
    let summary = trainer
        .run(&mut black, &mut white)
        .context("training failed")?;

    println!("Games played: {}", summary.games);
    println!(
        "Black wins: {}  White wins: {}  Ties: {}",
        summary.black_wins, summary.white_wins, summary.ties
    );
    println!("Average plies: {:.2}", summary.average_plies());
    println!(
        "States learned: player1 {}  player2 {}",
        summary.black_states, summary.white_states
    );
    Ok(())
}

fn run_move(policy: &Path, input: &Path, output: &Path) -> Result<()> {
    let table = load_table(Some(policy.to_path_buf()))?;
    let record = read_input(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let mut agent = TableAgent::greedy("policy", record.stone, table);
    let mv = respond(input, output, &mut agent).context("writing decision")?;
    println!("{}", format_move(&mv));
    Ok(())
}

fn run_play(policy: Option<PathBuf>, human_white: bool) -> Result<()> {
    let table = load_table(policy)?;
    let human_stone = if human_white { Stone::White } else { Stone::Black };
    let mut human = ManualAgent::new(human_stone, io::stdin().lock(), io::stdout());
    let mut machine = TableAgent::greedy("policy", human_stone.opponent(), table);

    let (black, white): (&mut dyn Agent, &mut dyn Agent) = if human_white {
        (&mut machine, &mut human)
    } else {
        (&mut human, &mut machine)
    };
    let result = play_game(black, white, MAX_INVALID_ATTEMPTS);

    print!("{}", result.final_board);
    match result.outcome {
        Outcome::Winner(stone) => println!("The winner is {stone}"),
        Outcome::Tie => println!("The game is a tie"),
    }
    Ok(())
}
