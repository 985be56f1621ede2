//! Interactive numbered menu
//!
//! Reads choices line by line and routes them to the task store. Core errors
//! are shown to the user and the loop continues; only terminal I/O failures
//! end it.

use std::io::{self, BufRead, Write};

use todo_core::task::{Completion, TaskPriority, TaskRepository, TaskStatus, TaskStore, TaskUpdate};
use tracing::debug;

use crate::render;

const RULE_WIDTH: usize = 50;

/// Answers accepted as "yes" when confirming a deletion
pub fn is_confirmation(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "e" | "evet"
    )
}

pub struct Menu<'a, Repo, R, W> {
    store: &'a mut TaskStore<Repo>,
    input: R,
    output: W,
}

impl<'a, Repo, R, W> Menu<'a, Repo, R, W>
where
    Repo: TaskRepository,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a mut TaskStore<Repo>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run until the user picks exit or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the to-do list!")?;

        loop {
            self.show_menu()?;
            let Some(choice) = self.prompt("\nChoose an option (1-9): ")? else {
                break;
            };
            debug!("Menu choice {:?}", choice);

            match choice.as_str() {
                "1" => self.add()?,
                "2" => self.list(None)?,
                "3" => self.list(Some(TaskStatus::Pending))?,
                "4" => self.list(Some(TaskStatus::Completed))?,
                "5" => self.complete()?,
                "6" => self.delete()?,
                "7" => self.edit()?,
                "8" => render::statistics(&mut self.output, &self.store.statistics())?,
                "9" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice! Please enter a number from 1 to 9.")?,
            }

            if self.prompt("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }

        writeln!(self.output)?;
        Ok(())
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{}", rule)?;
        writeln!(self.output, "TO-DO LIST")?;
        writeln!(self.output, "{}", rule)?;
        for line in [
            "1. Add a new task",
            "2. List all tasks",
            "3. List pending tasks",
            "4. List completed tasks",
            "5. Complete a task",
            "6. Delete a task",
            "7. Edit a task",
            "8. Statistics",
            "9. Exit",
        ] {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output, "{}", rule)
    }

    /// Print `label` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a task id; reports and returns `None` on non-numeric input
    fn prompt_id(&mut self, label: &str) -> io::Result<Option<u64>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match raw.parse::<u64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Invalid ID!")?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: todo_core::Error) -> io::Result<()> {
        writeln!(self.output, "Error: {}", err)
    }

    fn add(&mut self) -> io::Result<()> {
        let title = self.prompt("Task title: ")?.unwrap_or_default();
        if title.is_empty() {
            return writeln!(self.output, "Title cannot be empty!");
        }
        let description = self.prompt("Description (optional): ")?.unwrap_or_default();
        let priority = self
            .prompt("Priority (low/medium/high) [medium]: ")?
            .unwrap_or_default();

        match self.store.add(&title, &description, Some(&priority)) {
            Ok(task) => writeln!(self.output, "Task added: {}", task.title),
            Err(err) => self.report(err),
        }
    }

    fn list(&mut self, filter: Option<TaskStatus>) -> io::Result<()> {
        let tasks = self.store.list(filter);
        render::task_list(&mut self.output, &tasks, filter, self.store.is_empty())
    }

    fn complete(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("ID of the task to complete: ")? else {
            return Ok(());
        };

        match self.store.complete(id) {
            Ok(Completion::Completed(task)) => {
                writeln!(self.output, "Task completed: {}", task.title)
            }
            Ok(Completion::AlreadyCompleted(task)) => {
                writeln!(self.output, "Task already completed: {}", task.title)
            }
            Err(err) => self.report(err),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("ID of the task to delete: ")? else {
            return Ok(());
        };
        let answer = self
            .prompt("Are you sure you want to delete this task? (y/n): ")?
            .unwrap_or_default();
        if !is_confirmation(&answer) {
            return writeln!(self.output, "Deletion cancelled.");
        }

        match self.store.delete(id) {
            Ok(task) => writeln!(self.output, "Task deleted: {}", task.title),
            Err(err) => self.report(err),
        }
    }

    fn edit(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("ID of the task to edit: ")? else {
            return Ok(());
        };
        let title = self
            .prompt("New title (leave blank to keep): ")?
            .unwrap_or_default();
        let description = self
            .prompt("New description (leave blank to keep): ")?
            .unwrap_or_default();
        let priority = self
            .prompt("New priority (low/medium/high, leave blank to keep): ")?
            .unwrap_or_default();

        if !priority.is_empty() && TaskPriority::parse(&priority).is_err() {
            return writeln!(self.output, "Invalid priority!");
        }

        let update = TaskUpdate {
            title: Some(title),
            description: Some(description),
            priority: Some(priority),
        };
        match self.store.edit(id, update) {
            Ok(task) => writeln!(self.output, "Task updated: {}", task.title),
            Err(err) => self.report(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;
    use todo_core::task::JsonTaskFile;
    use todo_core::StoreConfig;

    fn create_test_store() -> (TaskStore<JsonTaskFile>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::new(temp_dir.path().join("tasks.json"));
        let (store, _) = TaskStore::open(&config).unwrap();
        (store, temp_dir)
    }

    fn run_script(store: &mut TaskStore<JsonTaskFile>, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(store, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_confirmation_answers() {
        for yes in ["y", "YES", "e", "evet", " y "] {
            assert!(is_confirmation(yes), "{:?}", yes);
        }
        for no in ["", "n", "no", "hayir", "maybe"] {
            assert!(!is_confirmation(no), "{:?}", no);
        }
    }

    #[test]
    fn test_add_and_list() {
        let (mut store, _temp) = create_test_store();
        let output = run_script(&mut store, "1\nBuy milk\n\nhigh\n\n2\n\n9\n");

        assert!(output.contains("Task added: Buy milk"));
        assert!(output.contains("[PENDING] [HIGH] 1. Buy milk"));
        assert!(output.contains("Goodbye!"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_rejects_empty_title() {
        let (mut store, _temp) = create_test_store();
        let output = run_script(&mut store, "1\n   \n\n9\n");

        assert!(output.contains("Title cannot be empty!"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_priority_falls_back_to_medium() {
        let (mut store, _temp) = create_test_store();
        run_script(&mut store, "1\nTask\n\nasap\n\n9\n");
        assert_eq!(store.get(1).unwrap().priority, TaskPriority::Medium);
    }

    #[test]
    fn test_complete_and_filters() {
        let (mut store, _temp) = create_test_store();
        store.add("First", "", None).unwrap();
        store.add("Second", "", None).unwrap();

        let output = run_script(&mut store, "5\n1\n\n5\n1\n\n4\n\n3\n\n9\n");
        assert!(output.contains("Task completed: First"));
        assert!(output.contains("Task already completed: First"));
        assert!(output.contains("[DONE] [MEDIUM] 1. First"));
        assert!(output.contains("[PENDING] [MEDIUM] 2. Second"));
    }

    #[test]
    fn test_invalid_id_and_missing_task() {
        let (mut store, _temp) = create_test_store();
        let output = run_script(&mut store, "5\nabc\n\n5\n42\n\n9\n");

        assert!(output.contains("Invalid ID!"));
        assert!(output.contains("Error: Task not found: ID 42"));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut store, _temp) = create_test_store();
        store.add("Keep", "", None).unwrap();

        let output = run_script(&mut store, "6\n1\nn\n\n9\n");
        assert!(output.contains("Deletion cancelled."));
        assert_eq!(store.len(), 1);

        let output = run_script(&mut store, "6\n1\nevet\n\n9\n");
        assert!(output.contains("Task deleted: Keep"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_keeps_blank_fields() {
        let (mut store, _temp) = create_test_store();
        store.add("Old title", "Old description", Some("low")).unwrap();

        let output = run_script(&mut store, "7\n1\nNew title\n\n\n\n9\n");
        assert!(output.contains("Task updated: New title"));

        let task = store.get(1).unwrap();
        assert_eq!(task.title, "New title");
        assert_eq!(task.description, "Old description");
        assert_eq!(task.priority, TaskPriority::Low);
    }

    #[test]
    fn test_edit_rejects_invalid_priority() {
        let (mut store, _temp) = create_test_store();
        store.add("Title", "", None).unwrap();

        let output = run_script(&mut store, "7\n1\nChanged\n\nurgent\n\n9\n");
        assert!(output.contains("Invalid priority!"));
        assert_eq!(store.get(1).unwrap().title, "Title");
    }

    #[test]
    fn test_statistics_and_invalid_choice() {
        let (mut store, _temp) = create_test_store();
        store.add("One", "", Some("high")).unwrap();
        store.complete(1).unwrap();

        let output = run_script(&mut store, "8\n\n0\n\n9\n");
        assert!(output.contains("Completion rate: 100.0%"));
        assert!(output.contains("Invalid choice!"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (mut store, _temp) = create_test_store();
        let output = run_script(&mut store, "2\n");
        assert!(output.contains("No tasks yet."));
        assert!(!output.contains("Goodbye!"));
    }
}
