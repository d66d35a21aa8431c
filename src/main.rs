mod cli;
mod config;
mod db;
mod error;
mod models;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use cli::{App, LinePrompter, Prompter, TerminalPrompter};
use colored::*;
use config::{Cli, Config, StoreKind};
use db::{seed_if_empty, MemoryStore, QuizStore, SqliteStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from(Cli::parse());

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(config.log_dir.as_deref())?;
    config.validate()?;

    info!("Initializing quiz trainer...");

    let store = match open_store(&config).await {
        Ok(store) => {
            info!("Quiz store ready.");
            store
        },
        Err(e) => {
            error!("Failed to open quiz store: {:?}", e);
            println!("{}", "Error: Failed to open the quiz store. Check logs.".red());
            return Err(e).context("opening the quiz store");
        },
    };

    let prompter: Box<dyn Prompter> = if config.use_terminal_prompt() {
        Box::new(TerminalPrompter::new())
    } else {
        info!("Using plain line prompter");
        Box::new(LinePrompter::stdio())
    };

    let rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("{}", "Welcome to the Quiz Trainer!".cyan().bold());
    println!("Type {} to list the available commands.", "help".magenta());

    let mut app = App::new(store, prompter, rng);
    app.run().await.context("reading user input")?;

    println!("{}", "Goodbye!".green());
    Ok(())
}

/// Logs go to stderr (silent unless `RUST_LOG` is set) or, with a log directory, to `quiz.log`.
fn init_tracing(log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "quiz.log"));
            tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        },
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter("off"))
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        },
    }
}

async fn open_store(config: &Config) -> error::Result<Box<dyn QuizStore>> {
    let store: Box<dyn QuizStore> = match &config.store {
        StoreKind::Memory => Box::new(MemoryStore::new()),
        StoreKind::Sqlite(url) => Box::new(SqliteStore::connect(url).await?),
    };

    if config.seed_starter_quizzes {
        seed_if_empty(store.as_ref()).await?;
    }
    Ok(store)
}
