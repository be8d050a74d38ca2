use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use crate::core::engine::Engine;
use crate::core::game::TerminalGame;
use crate::core::terminal::{LineRunner, OutputFormat, PromptSource, ReaderSource, TerminalContext};
use crate::games::hangman::{GameEngine, HangmanRenderer, WordList};
use crate::logging::{self, LogSink};

#[derive(Parser)]
#[command(name = "hangman")]
#[command(about = "🪢 Guess the hidden word before the gallows is complete")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Write logs to this file (the full-screen UI logs nowhere else)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play in a full-screen terminal UI (default)
    Play(GameArgs),
    /// Play one guess per line on stdin; `:new` restarts, `:quit` exits
    Line {
        #[command(flatten)]
        game: GameArgs,

        /// Print every state as a JSON object instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the built-in words
    Words,
}

#[derive(Args, Default)]
pub struct GameArgs {
    /// Play this word instead of a random one
    #[arg(short, long)]
    pub word: Option<String>,

    /// Seed the word picker for a reproducible sequence of games
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl GameArgs {
    pub fn engine(&self) -> Result<GameEngine> {
        let words = match &self.word {
            Some(word) => WordList::single(word).context("invalid --word")?,
            None => WordList::builtin(),
        };
        Ok(GameEngine::new(words))
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => play(cli.log_file.as_deref(), &cli.log_level, &GameArgs::default())?,
        Some(Commands::Play(ref game)) => play(cli.log_file.as_deref(), &cli.log_level, game)?,
        Some(Commands::Line { ref game, json }) => {
            logging::init(LogSink::Stderr, cli.log_file.as_deref(), &cli.log_level)?;
            let format = if json { OutputFormat::Json } else { OutputFormat::Text };
            let runner = LineRunner::<_, HangmanRenderer>::new(game.engine()?, format);
            let mut rng = game.rng();

            let stdin = io::stdin();
            let stdout = io::stdout();
            let colored = stdout.is_terminal() && !json;
            let mut ctx = TerminalContext::new(stdout.lock(), colored);

            if stdin.is_terminal() {
                runner.run(&mut PromptSource::new(), &mut ctx, &mut rng)?;
            } else {
                runner.run(&mut ReaderSource::new(stdin.lock()), &mut ctx, &mut rng)?;
            }
        }
        Some(Commands::Words) => {
            println!("🪢 {} - {}", GameEngine::NAME, GameEngine::DESCRIPTION);
            println!();
            println!("Built-in words:");
            println!("{}", WordList::builtin().words().join(", "));
        }
    }

    Ok(())
}

fn play(log_file: Option<&Path>, log_level: &str, game: &GameArgs) -> Result<()> {
    logging::init(LogSink::FileOnly, log_file, log_level)?;
    let engine = Engine::<_, HangmanRenderer>::new(game.engine()?);
    let mut rng = game.rng();

    let mut terminal = ratatui::init();
    let result = engine.run(&mut terminal, &mut rng);
    ratatui::restore();

    let state = result?;
    println!("{}", state.message());
    Ok(())
}
