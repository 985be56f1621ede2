//! One-shot subcommands

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use todo_core::task::{Completion, TaskRepository, TaskStatus, TaskStore, TaskUpdate};

use crate::cli::Commands;
use crate::menu::is_confirmation;
use crate::render;

pub fn run<Repo, R, W>(
    store: &mut TaskStore<Repo>,
    command: Commands,
    mut input: R,
    out: &mut W,
) -> Result<()>
where
    Repo: TaskRepository,
    R: BufRead,
    W: Write,
{
    match command {
        Commands::Add {
            title,
            description,
            priority,
        } => {
            let task = store.add(&title, &description, priority.as_deref())?;
            writeln!(out, "Task added: {} (ID {})", task.title, task.id)?;
        }
        Commands::List { status } => {
            let filter = status
                .as_deref()
                .map(TaskStatus::parse)
                .transpose()?;
            let tasks = store.list(filter);
            render::task_list(out, &tasks, filter, store.is_empty())?;
        }
        Commands::Complete { id } => match store.complete(id)? {
            Completion::Completed(task) => writeln!(out, "Task completed: {}", task.title)?,
            Completion::AlreadyCompleted(task) => {
                writeln!(out, "Task already completed: {}", task.title)?
            }
        },
        Commands::Delete { id, yes } => {
            let Some(task) = store.get(id) else {
                bail!(todo_core::Error::NotFound(id));
            };
            if !yes {
                write!(out, "Delete \"{}\"? (y/n): ", task.title)?;
                out.flush()?;
                let mut answer = String::new();
                input
                    .read_line(&mut answer)
                    .context("Failed to read confirmation")?;
                if !is_confirmation(&answer) {
                    writeln!(out, "Deletion cancelled.")?;
                    return Ok(());
                }
            }
            let task = store.delete(id)?;
            writeln!(out, "Task deleted: {}", task.title)?;
        }
        Commands::Edit {
            id,
            title,
            description,
            priority,
        } => {
            let update = TaskUpdate {
                title,
                description,
                priority,
            };
            let task = store.edit(id, update)?;
            writeln!(out, "Task updated: {}", task.title)?;
        }
        Commands::Stats => render::statistics(out, &store.statistics())?,
    }
    Ok(())
}
