//! Task model definitions
//!
//! Enum variants serialize to the Turkish literals used by existing
//! `tasks.json` files, so files stay readable by every front-end.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "bekliyor")]
    Pending,
    #[serde(rename = "tamamlandı")]
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TaskStatus {
    /// Parse user input. Accepts the stored literal, its ASCII spelling and
    /// the English name.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bekliyor" | "pending" => Ok(Self::Pending),
            "tamamlandı" | "tamamlandi" | "completed" | "done" => Ok(Self::Completed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }

    /// Literal written to the task file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "bekliyor",
            Self::Completed => "tamamlandı",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    #[serde(rename = "düşük")]
    Low,
    #[serde(rename = "orta")]
    Medium,
    #[serde(rename = "yüksek")]
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    /// Parse user input. Accepts the stored literal, its ASCII spelling and
    /// the English name, case-insensitively.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "düşük" | "dusuk" | "low" => Ok(Self::Low),
            "orta" | "medium" => Ok(Self::Medium),
            "yüksek" | "yuksek" | "high" => Ok(Self::High),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }

    /// Literal written to the task file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "düşük",
            Self::Medium => "orta",
            Self::High => "yüksek",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A tracked task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, with = "timestamp::option")]
    pub completed_at: Option<NaiveDateTime>,
}

impl Task {
    /// Create a pending task with the given id and title, stamped now
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            created_at: now(),
            completed_at: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Mark the task completed at `at`. Returns false, leaving the task
    /// untouched, if it was already completed.
    pub fn mark_completed(&mut self, at: NaiveDateTime) -> bool {
        if self.is_completed() {
            return false;
        }
        self.status = TaskStatus::Completed;
        self.completed_at = Some(at);
        true
    }

    /// Make `completed_at` agree with `status`. A completed task without a
    /// time gets its creation time; a pending task loses its time. Returns
    /// true if anything changed.
    pub fn repair_completion(&mut self) -> bool {
        match (self.status, self.completed_at) {
            (TaskStatus::Completed, None) => {
                self.completed_at = Some(self.created_at);
                true
            }
            (TaskStatus::Pending, Some(_)) => {
                self.completed_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Current local time truncated to whole seconds, matching the file format
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// `YYYY-MM-DD HH:MM:SS` serde format for timestamps
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::FORMAT;
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => serializer.collect_str(&value.format(FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| NaiveDateTime::parse_from_str(&raw, FORMAT))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_create_task() {
        let task = Task::new(1, "Test task");
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Test task");
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.completed_at.is_none());
        assert_eq!(task.created_at.nanosecond(), 0);
    }

    #[test]
    fn test_task_builders() {
        let task = Task::new(2, "Test task")
            .with_description("This is a test")
            .with_priority(TaskPriority::High);
        assert_eq!(task.description, "This is a test");
        assert_eq!(task.priority, TaskPriority::High);
    }

    #[test]
    fn test_mark_completed_once() {
        let mut task = Task::new(1, "Test task");
        assert!(task.mark_completed(at(10, 0, 0)));
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_at, Some(at(10, 0, 0)));

        assert!(!task.mark_completed(at(11, 0, 0)));
        assert_eq!(task.completed_at, Some(at(10, 0, 0)));
    }

    #[test]
    fn test_parse_priority() {
        assert_eq!(TaskPriority::parse("düşük").unwrap(), TaskPriority::Low);
        assert_eq!(TaskPriority::parse("dusuk").unwrap(), TaskPriority::Low);
        assert_eq!(TaskPriority::parse(" Orta ").unwrap(), TaskPriority::Medium);
        assert_eq!(TaskPriority::parse("YÜKSEK").unwrap(), TaskPriority::High);
        assert_eq!(TaskPriority::parse("high").unwrap(), TaskPriority::High);

        match TaskPriority::parse("urgent") {
            Err(Error::InvalidPriority(value)) => assert_eq!(value, "urgent"),
            other => panic!("Expected InvalidPriority, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(TaskStatus::parse("bekliyor").unwrap(), TaskStatus::Pending);
        assert_eq!(TaskStatus::parse("tamamlandı").unwrap(), TaskStatus::Completed);
        assert_eq!(TaskStatus::parse("Completed").unwrap(), TaskStatus::Completed);
        assert!(matches!(
            TaskStatus::parse("archived"),
            Err(Error::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_serialized_literals() {
        let mut task = Task::new(3, "Süt al")
            .with_description("İki şişe")
            .with_priority(TaskPriority::Low);
        task.created_at = at(9, 5, 7);

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["priority"], "düşük");
        assert_eq!(json["status"], "bekliyor");
        assert_eq!(json["created_at"], "2024-03-09 09:05:07");
        assert!(json["completed_at"].is_null());

        task.mark_completed(at(18, 30, 0));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "tamamlandı");
        assert_eq!(json["completed_at"], "2024-03-09 18:30:00");
    }

    #[test]
    fn test_as_str_matches_serialized_literal() {
        for status in [TaskStatus::Pending, TaskStatus::Completed] {
            assert_eq!(serde_json::to_value(status).unwrap(), status.as_str());
            assert_eq!(TaskStatus::parse(status.as_str()).unwrap(), status);
        }
        for priority in TaskPriority::ALL {
            assert_eq!(serde_json::to_value(priority).unwrap(), priority.as_str());
            assert_eq!(TaskPriority::parse(priority.as_str()).unwrap(), priority);
        }
    }

    #[test]
    fn test_repair_completion() {
        let mut task = Task::new(1, "Test task");
        assert!(!task.repair_completion());

        task.status = TaskStatus::Completed;
        assert!(task.repair_completion());
        assert_eq!(task.completed_at, Some(task.created_at));
        assert!(!task.repair_completion());

        task.status = TaskStatus::Pending;
        assert!(task.repair_completion());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_deserialize_stored_record() {
        let raw = r#"{
            "id": 4,
            "title": "Rapor yaz",
            "description": "",
            "priority": "yüksek",
            "status": "tamamlandı",
            "created_at": "2024-03-09 08:00:00",
            "completed_at": "2024-03-09 12:15:42"
        }"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id, 4);
        assert_eq!(task.priority, TaskPriority::High);
        assert!(task.is_completed());
        assert_eq!(task.completed_at, Some(at(12, 15, 42)));
    }

    #[test]
    fn test_deserialize_rejects_unknown_priority() {
        let raw = r#"{"id": 1, "title": "x", "description": "", "priority": "acil",
            "status": "bekliyor", "created_at": "2024-03-09 08:00:00", "completed_at": null}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }
}
