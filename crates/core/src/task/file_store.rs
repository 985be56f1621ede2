//! File-based task storage implementation
//!
//! Stores tasks as a pretty-printed JSON array in a single file on disk.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use super::model::Task;
use super::repository::TaskRepository;
use crate::{Error, Result};

/// JSON file holding the whole task list
#[derive(Debug, Clone)]
pub struct JsonTaskFile {
    /// Path to the JSON file
    path: PathBuf,
}

impl JsonTaskFile {
    /// Bind to `path`. Nothing is touched until the first read or write;
    /// a missing file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path the data actually lands in. A symlinked task file is followed so
    /// the link itself survives the rename.
    fn resolve_target(&self) -> PathBuf {
        if let Ok(resolved) = fs::canonicalize(&self.path) {
            return resolved;
        }
        match fs::read_link(&self.path) {
            Ok(link_target) => match self.path.parent() {
                Some(parent) => parent.join(link_target),
                None => link_target,
            },
            Err(_) => self.path.clone(),
        }
    }

    fn temp_path(target: &Path) -> PathBuf {
        let file_name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tasks".to_string());
        let temp_name = format!(".{}.{}.tmp", file_name, Uuid::new_v4().as_hyphenated());
        match target.parent() {
            Some(parent) => parent.join(temp_name),
            None => PathBuf::from(temp_name),
        }
    }

    fn write_temp(
        temp_path: &Path,
        content: &[u8],
        permissions: Option<fs::Permissions>,
    ) -> io::Result<()> {
        let mut file = File::create(temp_path)?;
        if let Some(permissions) = permissions {
            file.set_permissions(permissions)?;
        }
        file.write_all(content)?;
        file.sync_all()
    }
}

impl TaskRepository for JsonTaskFile {
    fn read_all(&self) -> Result<Option<Vec<Task>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No task file at {}", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(Error::Io(err)),
        };

        let content =
            String::from_utf8(bytes).map_err(|e| Error::corrupt(&self.path, e))?;
        let tasks: Vec<Task> =
            serde_json::from_str(&content).map_err(|e| Error::corrupt(&self.path, e))?;

        debug!("Read {} tasks from {}", tasks.len(), self.path.display());
        Ok(Some(tasks))
    }

    fn write_all(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)?;

        let target = self.resolve_target();

        // Ensure parent directory exists
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::persist_failed(&self.path, e))?;
        }

        // The replacement keeps the mode of the file it replaces
        let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

        let temp_path = Self::temp_path(&target);
        if let Err(err) = Self::write_temp(&temp_path, content.as_bytes(), permissions) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::persist_failed(&self.path, err));
        }

        if let Err(err) = fs::rename(&temp_path, &target) {
            warn!(
                "Failed to move {} over {}: {}",
                temp_path.display(),
                target.display(),
                err
            );
            let _ = fs::remove_file(&temp_path);
            return Err(Error::persist_failed(&self.path, err));
        }

        debug!("Wrote {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
