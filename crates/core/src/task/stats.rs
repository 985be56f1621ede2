//! Task statistics

use super::model::{Task, TaskPriority};

/// Summary counts over a task collection
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of completed tasks; `None` when there are no tasks
    pub completion_rate: Option<f64>,
    /// Count per priority, in order of first occurrence. Priorities no task
    /// holds are absent.
    pub by_priority: Vec<(TaskPriority, usize)>,
}

impl TaskStatistics {
    pub fn compute<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut total = 0;
        let mut completed = 0;
        let mut by_priority: Vec<(TaskPriority, usize)> = Vec::new();

        for task in tasks {
            total += 1;
            if task.is_completed() {
                completed += 1;
            }
            match by_priority.iter_mut().find(|(p, _)| *p == task.priority) {
                Some((_, count)) => *count += 1,
                None => by_priority.push((task.priority, 1)),
            }
        }

        let completion_rate = (total > 0).then(|| completed as f64 / total as f64 * 100.0);

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
            by_priority,
        }
    }

    /// Count for one priority, zero if absent
    pub fn priority_count(&self, priority: TaskPriority) -> usize {
        self.by_priority
            .iter()
            .find(|(p, _)| *p == priority)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}
