//! Assignment reminders laid out on a two-week board, with due dates picked
//! from a fixed weekly school timetable.

pub mod board;
pub mod commands;
pub mod config;
pub mod dates;
pub mod db;
pub mod logging;
pub mod models;
pub mod schedule;
pub mod store;
pub mod timetable;

pub use db::{BlobStore, Database, MemoryBlobStore};
pub use models::{Assignment, AssignmentPatch, NewAssignment, ValidationError};
pub use store::{AssignmentStore, StoreError, STORAGE_KEY};
pub use timetable::{SchoolDay, Timetable};
