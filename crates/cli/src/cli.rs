//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use todo_core::{IdStrategy, StoreConfig};

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(version)]
#[command(about = "Personal task tracker")]
pub struct Cli {
    /// Task file (defaults to $TODO_TASKS_FILE, then tasks.json)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Id rule for new tasks: "count" or "max" (defaults to $TODO_ID_STRATEGY, then count)
    #[arg(long, global = true)]
    pub id_strategy: Option<String>,

    /// Without a subcommand the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// low/medium/high (also düşük/orta/yüksek); anything else means medium
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// List tasks
    List {
        /// Only show tasks with this status (pending/completed)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Mark a task completed
    Complete { id: u64 },
    /// Delete a task
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Edit a task; omitted fields keep their value
    Edit {
        id: u64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Show task statistics
    Stats,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn store_config(&self) -> todo_core::Result<StoreConfig> {
        let mut config = StoreConfig::from_env()?;
        if let Some(file) = &self.file {
            config = config.with_tasks_file(file);
        }
        if let Some(raw) = &self.id_strategy {
            config = config.with_id_strategy(IdStrategy::from_str(raw)?);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["todo", "add", "Buy milk", "-p", "high"]).unwrap();
        match cli.command {
            Some(Commands::Add {
                title,
                description,
                priority,
            }) => {
                assert_eq!(title, "Buy milk");
                assert_eq!(description, "");
                assert_eq!(priority.as_deref(), Some("high"));
            }
            other => panic!("Expected add command, got: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["todo", "--file", "/tmp/x.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/x.json")));
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from(["todo", "stats", "--file", "mine.json", "--id-strategy", "max"])
            .unwrap();
        let config = cli.store_config().unwrap();
        assert_eq!(config.tasks_file, PathBuf::from("mine.json"));
        assert_eq!(config.id_strategy, IdStrategy::NextAfterMax);
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["todo", "complete", "abc"]).is_err());
    }
}
