//! Plain-text rendering of tasks and statistics

use std::io::{self, Write};

use todo_core::task::{Task, TaskPriority, TaskStatistics, TaskStatus};

fn status_tag(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[PENDING]",
        TaskStatus::Completed => "[DONE]",
    }
}

fn priority_tag(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "[LOW]",
        TaskPriority::Medium => "[MEDIUM]",
        TaskPriority::High => "[HIGH]",
    }
}

pub fn task<W: Write>(out: &mut W, task: &Task) -> io::Result<()> {
    writeln!(
        out,
        "{} {} {}. {}",
        status_tag(task.status),
        priority_tag(task.priority),
        task.id,
        task.title
    )?;
    if !task.description.is_empty() {
        writeln!(out, "   Description: {}", task.description)?;
    }
    writeln!(out, "   Created: {}", task.created_at.format(todo_core::task::timestamp::FORMAT))?;
    if let Some(completed_at) = task.completed_at {
        writeln!(out, "   Completed: {}", completed_at.format(todo_core::task::timestamp::FORMAT))?;
    }
    writeln!(out)
}

/// Render a listing. `store_is_empty` distinguishes "no tasks at all" from
/// "no tasks match the filter".
pub fn task_list<W: Write>(
    out: &mut W,
    tasks: &[&Task],
    filter: Option<TaskStatus>,
    store_is_empty: bool,
) -> io::Result<()> {
    if store_is_empty {
        return writeln!(out, "No tasks yet.");
    }
    if tasks.is_empty() {
        return match filter {
            Some(status) => writeln!(out, "No {} tasks found.", status),
            None => writeln!(out, "No tasks found."),
        };
    }

    writeln!(out, "\nTasks ({}):", tasks.len())?;
    writeln!(out, "{}", "-".repeat(80))?;
    for t in tasks {
        task(out, t)?;
    }
    Ok(())
}

pub fn statistics<W: Write>(out: &mut W, stats: &TaskStatistics) -> io::Result<()> {
    writeln!(out, "\nStatistics:")?;
    writeln!(out, "{}", "-".repeat(30))?;
    writeln!(out, "Total tasks: {}", stats.total)?;
    writeln!(out, "Completed: {}", stats.completed)?;
    writeln!(out, "Pending: {}", stats.pending)?;

    if let Some(rate) = stats.completion_rate {
        writeln!(out, "Completion rate: {:.1}%", rate)?;
    }

    if !stats.by_priority.is_empty() {
        writeln!(out, "\nBy priority:")?;
        for (priority, count) in &stats.by_priority {
            let noun = if *count == 1 { "task" } else { "tasks" };
            writeln!(out, "   {}: {} {}", priority, count, noun)?;
        }
    }
    Ok(())
}
