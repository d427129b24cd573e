//! # Daybook Core Library
//!
//! A personal task planner engine: recurring tasks are stored once and
//! expanded into dated instances on every query.
//!
//! ## Features
//!
//! - **Recurrence Expansion**: daily, weekly, monthly and yearly tasks
//!   generate instances over any date range, with month-end and leap-day
//!   anchors skipped in months that lack the day
//! - **Task Views**: a today list and an upcoming list where each task shows
//!   only its next occurrence
//! - **Per-Instance Completion**: checking off one occurrence leaves the rest
//!   of the series untouched
//! - **Fractional Ordering**: manual reordering touches only the moved task
//! - **Lenient Loading**: older stored records are migrated once at load
//!
//! ## Core Modules
//!
//! - [`models`]: Core data structures and transfer objects
//! - [`recurrence`]: Recurrence predicates and range expansion
//! - [`views`]: Today and upcoming list selection
//! - [`calendar`]: Date ranges, month navigation and the month grid
//! - [`ordering`]: Fractional order keys
//! - [`migration`]: Conversion of stored records to the current schema
//! - [`store`]: Key-value persistence
//! - [`repository`]: Data access layer with Repository pattern
//! - [`backup`]: Export and import of the whole data set
//! - [`clock`]: Injectable source of "today"
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use daybook_core::{
//!     models::{NewTaskData, Recurrence},
//!     repository::{ScheduleRepository, StoreRepository, TaskRepository},
//!     store::FileStore,
//!     views::PriorityFilter,
//! };
//!
//! fn main() -> Result<(), daybook_core::error::CoreError> {
//!     let repo = StoreRepository::new(FileStore::open(".daybook"));
//!
//!     repo.add_task(NewTaskData {
//!         title: "Water plants".to_string(),
//!         due_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1),
//!         recurrence: Recurrence::Weekly,
//!         ..Default::default()
//!     })?;
//!
//!     let views = repo.views(PriorityFilter::All, 7)?;
//!     for instance in &views.today {
//!         println!("{} ({})", instance.task.title, instance.due_date);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backup;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod migration;
pub mod models;
pub mod ordering;
pub mod recurrence;
pub mod repository;
pub mod store;
pub mod views;
