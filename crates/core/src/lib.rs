//! Core library for the todo task tracker
//!
//! This crate contains the task engine shared by every front-end:
//! - Task model and its on-disk JSON format
//! - File-backed persistence with atomic writes
//! - Mutations (add, complete, edit, delete) and statistics
//! - Store configuration

pub mod config;
pub mod error;
pub mod task;

pub use config::{IdStrategy, StoreConfig};
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
