//! Task module
//!
//! This module contains the task model, its storage and the store that
//! mutates it.

mod file_store;
mod model;
mod repository;
mod stats;
mod store;

pub use file_store::JsonTaskFile;
pub use model::*;
pub use repository::TaskRepository;
pub use stats::TaskStatistics;
pub use store::{Completion, LoadOutcome, TaskStore, TaskUpdate};
