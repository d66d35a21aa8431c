//! Startup configuration.
//!
//! Flags are parsed with `clap`; each one that makes sense in a `.env` file also reads
//! an environment variable.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::error::{AppError, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://quizzes.sqlite";

/// Interactive quiz trainer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database URL
    #[arg(long, env = "QUIZ_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Keep quizzes in memory for this session only
    #[arg(long)]
    pub in_memory: bool,

    /// Do not insert the starter quizzes into an empty store
    #[arg(long)]
    pub no_seed: bool,

    /// Use the plain line prompter even on a terminal
    #[arg(long)]
    pub plain: bool,

    /// Seed for the play order
    #[arg(long, env = "QUIZ_SEED")]
    pub seed: Option<u64>,

    /// Directory for `quiz.log`; logs go to stderr when unset
    #[arg(long, env = "QUIZ_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite(String),
    Memory,
}

/// Settings the bootstrap acts on.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreKind,
    pub seed_starter_quizzes: bool,
    pub force_plain_prompt: bool,
    pub rng_seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            store: if cli.in_memory {
                StoreKind::Memory
            } else {
                StoreKind::Sqlite(cli.database_url)
            },
            seed_starter_quizzes: !cli.no_seed,
            force_plain_prompt: cli.plain,
            rng_seed: cli.seed,
            log_dir: cli.log_dir,
        }
    }
}

impl Config {
    /// # Errors
    ///
    /// Returns `AppError::Config` if the database URL is not a SQLite URL.
    pub fn validate(&self) -> Result<()> {
        if let StoreKind::Sqlite(url) = &self.store {
            if !url.starts_with("sqlite:") {
                return Err(AppError::Config(format!(
                    "database URL must start with 'sqlite:', got '{}'",
                    url
                )));
            }
        }
        Ok(())
    }

    /// Whether to use the editing terminal prompter rather than the plain line prompter.
    pub fn use_terminal_prompt(&self) -> bool {
        !self.force_plain_prompt && std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }
}
