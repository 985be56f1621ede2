//! Task repository trait
//!
//! Defines the interface between [`TaskStore`](super::TaskStore) and the
//! medium holding the task list.

use std::path::Path;

use super::model::Task;
use crate::Result;

/// Whole-collection storage for tasks
pub trait TaskRepository {
    /// Read every stored task in order.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet and
    /// `Err(Error::CorruptStore)` when stored content cannot be decoded.
    fn read_all(&self) -> Result<Option<Vec<Task>>>;

    /// Replace the stored collection with `tasks`.
    ///
    /// On failure the previously stored collection must still be readable.
    fn write_all(&self, tasks: &[Task]) -> Result<()>;

    /// Location reported in errors and logs
    fn location(&self) -> &Path;
}
