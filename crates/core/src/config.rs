//! Store configuration
//!
//! Values come from explicit setters or the `TODO_*` environment variables.

use std::path::PathBuf;

use crate::{Error, Result};

/// Default backing file, relative to the working directory
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

pub const TASKS_FILE_ENV: &str = "TODO_TASKS_FILE";
pub const ID_STRATEGY_ENV: &str = "TODO_ID_STRATEGY";

/// How the id of a newly added task is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// `number of tasks + 1`. Compatible with files written by earlier
    /// versions, but repeats an id once a task other than the last is deleted.
    #[default]
    CountPlusOne,
    /// `highest existing id + 1`. Never collides with a live task.
    NextAfterMax,
}

impl IdStrategy {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "count" | "count-plus-one" => Ok(Self::CountPlusOne),
            "max" | "next-after-max" => Ok(Self::NextAfterMax),
            other => Err(Error::Config(format!(
                "Unknown id strategy {:?} (expected \"count\" or \"max\")",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CountPlusOne => "count",
            Self::NextAfterMax => "max",
        }
    }

    /// Next id for a collection whose current ids are `ids`
    pub fn next_id(&self, ids: impl ExactSizeIterator<Item = u64>) -> u64 {
        match self {
            Self::CountPlusOne => ids.len() as u64 + 1,
            Self::NextAfterMax => ids.max().unwrap_or(0) + 1,
        }
    }
}

/// Configuration for a [`TaskStore`](crate::task::TaskStore)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the JSON file holding all tasks
    pub tasks_file: PathBuf,
    /// Id assignment rule for new tasks
    pub id_strategy: IdStrategy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from(DEFAULT_TASKS_FILE),
            id_strategy: IdStrategy::default(),
        }
    }
}

impl StoreConfig {
    pub fn new(tasks_file: impl Into<PathBuf>) -> Self {
        Self {
            tasks_file: tasks_file.into(),
            ..Default::default()
        }
    }

    /// Load configuration from `TODO_TASKS_FILE` and `TODO_ID_STRATEGY`,
    /// falling back to defaults for unset or blank variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = env_value(TASKS_FILE_ENV) {
            config.tasks_file = PathBuf::from(path);
        }
        if let Some(raw) = env_value(ID_STRATEGY_ENV) {
            config.id_strategy = IdStrategy::from_str(&raw)?;
        }

        Ok(config)
    }

    /// Set the backing file
    pub fn with_tasks_file(mut self, tasks_file: impl Into<PathBuf>) -> Self {
        self.tasks_file = tasks_file.into();
        self
    }

    /// Set the id strategy
    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
