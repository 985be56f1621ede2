//! Task store
//!
//! Owns the ordered task list and writes it back through a
//! [`TaskRepository`] after every successful mutation.

use std::path::Path;

use tracing::{debug, info, warn};

use super::file_store::JsonTaskFile;
use super::model::{now, Task, TaskPriority, TaskStatus};
use super::repository::TaskRepository;
use super::stats::TaskStatistics;
use crate::config::{IdStrategy, StoreConfig};
use crate::{Error, Result};

/// What [`TaskStore::load`] found in storage
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing stored yet; the store starts empty
    Missing,
    /// Stored tasks were loaded
    Loaded(usize),
    /// Stored content was unreadable; the store starts empty and the
    /// broken content is replaced on the next save
    Recovered(Error),
}

impl LoadOutcome {
    /// The corruption warning, if the store had to start empty
    pub fn warning(&self) -> Option<&Error> {
        match self {
            Self::Recovered(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of [`TaskStore::complete`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The task moved from pending to completed
    Completed(Task),
    /// The task was already completed; nothing changed
    AlreadyCompleted(Task),
}

impl Completion {
    pub fn task(&self) -> &Task {
        match self {
            Self::Completed(task) | Self::AlreadyCompleted(task) => task,
        }
    }

    pub fn into_task(self) -> Task {
        match self {
            Self::Completed(task) | Self::AlreadyCompleted(task) => task,
        }
    }

    pub fn was_already_completed(&self) -> bool {
        matches!(self, Self::AlreadyCompleted(_))
    }
}

/// Partial update for [`TaskStore::edit`]
///
/// `None` or blank fields keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
}

impl TaskUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// In-memory task list backed by a repository
pub struct TaskStore<R = JsonTaskFile> {
    tasks: Vec<Task>,
    repository: R,
    id_strategy: IdStrategy,
}

impl TaskStore<JsonTaskFile> {
    /// Open the JSON file named by `config` and load its tasks.
    ///
    /// A missing or corrupt file is not an error; see [`LoadOutcome`].
    pub fn open(config: &StoreConfig) -> Result<(Self, LoadOutcome)> {
        let mut store = Self::with_repository(
            JsonTaskFile::new(&config.tasks_file),
            config.id_strategy,
        );
        let outcome = store.load()?;
        Ok((store, outcome))
    }
}

impl<R: TaskRepository> TaskStore<R> {
    /// Create an empty store over `repository`. Call [`load`](Self::load)
    /// to pick up stored tasks.
    pub fn with_repository(repository: R, id_strategy: IdStrategy) -> Self {
        Self {
            tasks: Vec::new(),
            repository,
            id_strategy,
        }
    }

    /// Replace the in-memory list with the stored one
    pub fn load(&mut self) -> Result<LoadOutcome> {
        match self.repository.read_all() {
            Ok(Some(mut tasks)) => {
                let count = tasks.len();
                let repaired = tasks
                    .iter_mut()
                    .map(Task::repair_completion)
                    .filter(|&changed| changed)
                    .count();
                if repaired > 0 {
                    warn!(
                        "Repaired completion time of {} tasks in {}",
                        repaired,
                        self.location().display()
                    );
                }
                self.tasks = tasks;
                info!("Loaded {} tasks from {}", count, self.location().display());
                Ok(LoadOutcome::Loaded(count))
            }
            Ok(None) => {
                self.tasks.clear();
                Ok(LoadOutcome::Missing)
            }
            Err(err @ Error::CorruptStore { .. }) => {
                warn!("{}; starting with an empty task list", err);
                self.tasks.clear();
                Ok(LoadOutcome::Recovered(err))
            }
            Err(err) => Err(err),
        }
    }

    /// Write the whole list to storage. Never changes the in-memory list,
    /// so a failed save can simply be retried.
    pub fn save(&self) -> Result<()> {
        self.repository.write_all(&self.tasks)
    }

    /// Append a new pending task.
    ///
    /// An unrecognised or missing priority falls back to medium.
    pub fn add(&mut self, title: &str, description: &str, priority: Option<&str>) -> Result<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidTitle);
        }

        let priority = match non_blank(priority) {
            Some(raw) => TaskPriority::parse(raw).unwrap_or_else(|_| {
                warn!("Unknown priority {:?}, using {}", raw, TaskPriority::default());
                TaskPriority::default()
            }),
            None => TaskPriority::default(),
        };

        let id = self.id_strategy.next_id(self.tasks.iter().map(|t| t.id));
        if self.get(id).is_some() {
            warn!("New task reuses id {} already held by another task", id);
        }

        let task = Task::new(id, title)
            .with_description(description.trim())
            .with_priority(priority);
        self.tasks.push(task.clone());
        self.save()?;

        info!("Added task {}: {}", task.id, task.title);
        Ok(task)
    }

    /// Tasks with the given status, or all tasks, in insertion order
    pub fn list(&self, status: Option<TaskStatus>) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .collect()
    }

    /// First task with the given id
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn location(&self) -> &Path {
        self.repository.location()
    }

    /// Mark the first task with `id` completed
    pub fn complete(&mut self, id: u64) -> Result<Completion> {
        let task = self.find_mut(id)?;
        if !task.mark_completed(now()) {
            debug!("Task {} is already completed", id);
            return Ok(Completion::AlreadyCompleted(task.clone()));
        }

        let task = task.clone();
        self.save()?;

        info!("Completed task {}: {}", task.id, task.title);
        Ok(Completion::Completed(task))
    }

    /// Remove the first task with `id`. Remaining ids are left as they are.
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;

        let task = self.tasks.remove(index);
        self.save()?;

        info!("Deleted task {}: {}", task.id, task.title);
        Ok(task)
    }

    /// Apply a partial update to the first task with `id`.
    ///
    /// An invalid priority is rejected before anything changes. Storage is
    /// only written when a field actually changed.
    pub fn edit(&mut self, id: u64, update: TaskUpdate) -> Result<Task> {
        let task = self.find_mut(id)?;

        let priority = non_blank(update.priority.as_deref())
            .map(TaskPriority::parse)
            .transpose()?;

        let mut changed = false;
        if let Some(title) = non_blank(update.title.as_deref()) {
            if task.title != title {
                task.title = title.to_string();
                changed = true;
            }
        }
        if let Some(description) = non_blank(update.description.as_deref()) {
            if task.description != description {
                task.description = description.to_string();
                changed = true;
            }
        }
        if let Some(priority) = priority {
            if task.priority != priority {
                task.priority = priority;
                changed = true;
            }
        }

        let task = task.clone();
        if changed {
            self.save()?;
            info!("Updated task {}: {}", task.id, task.title);
        } else {
            debug!("Edit of task {} changed nothing", id);
        }
        Ok(task)
    }

    pub fn statistics(&self) -> TaskStatistics {
        TaskStatistics::compute(&self.tasks)
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::NotFound(id))
    }
}
