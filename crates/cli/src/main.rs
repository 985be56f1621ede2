//! Command-line front-end for the todo task tracker
//!
//! Runs the interactive menu by default, or a single subcommand.

mod cli;
mod commands;
mod menu;
mod render;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::menu::Menu;
use todo_core::task::TaskStore;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so menu output stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=warn,todo_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.store_config()?;
    tracing::debug!(
        "Using task file {:?} with id strategy {}",
        config.tasks_file,
        config.id_strategy.as_str()
    );

    let (mut store, outcome) = TaskStore::open(&config).with_context(|| {
        format!("Failed to open task file {}", config.tasks_file.display())
    })?;
    if let Some(warning) = outcome.warning() {
        eprintln!("Warning: {}. Starting with an empty task list.", warning);
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    match cli.command {
        Some(command) => commands::run(&mut store, command, stdin.lock(), &mut stdout),
        None => Menu::new(&mut store, stdin.lock(), stdout.lock())
            .run()
            .context("Terminal I/O failed"),
    }
}
