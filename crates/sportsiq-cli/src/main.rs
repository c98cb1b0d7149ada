//! sportsiq CLI — sports trivia in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use sportsiq_core::model::Difficulty;
use sportsiq_core::preferences::Theme;

mod commands;
mod input;
mod ui;

#[derive(Parser)]
#[command(name = "sportsiq", version, about = "Timed sports trivia quiz")]
struct Cli {
    /// Directory for high scores, stats and preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a round of questions
    Play {
        /// easy, medium or hard
        #[arg(long, short)]
        difficulty: Difficulty,

        /// Number of questions (default from config: 10)
        #[arg(long)]
        questions: Option<u32>,

        /// Seconds per question (default from config: 15)
        #[arg(long)]
        timer: Option<u32>,

        /// Save a qualifying score under these initials without prompting
        #[arg(long)]
        initials: Option<String>,
    },

    /// Show the high-score tables
    Scores {
        /// Only show this difficulty
        #[arg(long, short)]
        difficulty: Option<Difficulty>,
    },

    /// Show lifetime stats and achievements
    Stats,

    /// Clear lifetime stats and achievements (high scores are kept)
    ResetStats {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show or set the colour theme
    Theme { theme: Option<Theme> },

    /// Show or set sound cues
    Sound { setting: Option<Toggle> },

    /// Create a starter config and question bank
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sportsiq=warn")),
        )
        .init();

    let cli = Cli::parse();
    let paths = commands::Paths {
        data_dir: cli.data_dir,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Play {
            difficulty,
            questions,
            timer,
            initials,
        } => commands::play::execute(&paths, difficulty, questions, timer, initials).await,
        Commands::Scores { difficulty } => commands::scores::execute(&paths, difficulty),
        Commands::Stats => commands::stats::execute(&paths),
        Commands::ResetStats { yes } => commands::reset_stats::execute(&paths, yes),
        Commands::Theme { theme } => commands::prefs::theme(&paths, theme),
        Commands::Sound { setting } => {
            commands::prefs::sound(&paths, setting.map(|s| matches!(s, Toggle::Off)))
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
