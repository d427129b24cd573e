use std::cell::RefCell;

use chrono::NaiveDate;

use crate::calendar::{MonthCursor, MonthGrid};
use crate::clock::{Clock, SystemClock};
use crate::error::CoreError;
use crate::models::{NewTaskData, Task, UpdateTaskData};
use crate::store::KeyValueStore;
use crate::views::{PriorityFilter, TaskViews};

pub mod preferences;
pub mod schedule;
pub mod tasks;

pub use preferences::DevSettings;

// Traits are defined in this module and implemented in respective domain modules.
// Every mutating operation is a full read-modify-write of the stored task set.

/// Domain-specific trait for task operations
pub trait TaskRepository {
    /// Loads every task, migrating legacy records and writing them back once.
    fn load_tasks(&self) -> Result<Vec<Task>, CoreError>;
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), CoreError>;
    fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    fn find_task_by_id(&self, id: &str) -> Result<Option<Task>, CoreError>;
    fn find_tasks_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Task>, CoreError>;
    fn update_task(&self, id: &str, data: UpdateTaskData) -> Result<Task, CoreError>;
    fn delete_task(&self, id: &str) -> Result<Task, CoreError>;
    fn set_instance_complete(&self, id: &str, date: NaiveDate, complete: bool) -> Result<Task, CoreError>;
    fn add_subtask(&self, id: &str, text: &str) -> Result<Task, CoreError>;
    fn set_subtask_complete(&self, id: &str, index: usize, complete: bool) -> Result<Task, CoreError>;
    fn remove_subtask(&self, id: &str, index: usize) -> Result<Task, CoreError>;
}

/// Domain-specific trait for the derived schedule: views, calendar and manual order
pub trait ScheduleRepository {
    fn views(&self, filter: PriorityFilter, days: u32) -> Result<TaskViews, CoreError>;
    fn month(&self, cursor: MonthCursor) -> Result<MonthGrid, CoreError>;
    /// Gives `id` a new order key from its neighbours in `ordered_ids`, the
    /// list as displayed after the move. `Ok(None)` when `id` is unknown.
    fn reorder_task(&self, id: &str, ordered_ids: &[String]) -> Result<Option<f64>, CoreError>;
    /// Moves `id` to `position` (zero-based) within today's list.
    fn move_in_today(&self, id: &str, position: usize, filter: PriorityFilter) -> Result<Option<f64>, CoreError>;
}

/// Domain-specific trait for persisted UI preferences
pub trait PreferenceRepository {
    fn load_filter(&self) -> Result<Option<PriorityFilter>, CoreError>;
    fn save_filter(&self, filter: PriorityFilter) -> Result<(), CoreError>;
    fn last_visited_page(&self) -> Result<Option<String>, CoreError>;
    fn set_last_visited_page(&self, page: &str) -> Result<(), CoreError>;
    fn dev_settings(&self) -> Result<DevSettings, CoreError>;
    fn save_dev_settings(&self, settings: &DevSettings) -> Result<(), CoreError>;

    /// The page to open on a bare launch: the last visited one, unless
    /// reopening it is switched off.
    fn launch_page(&self) -> Result<Option<String>, CoreError> {
        if self.dev_settings()?.launch_to_last_section {
            self.last_visited_page()
        } else {
            Ok(None)
        }
    }
}

/// Main repository trait that composes all domain traits
pub trait Repository: TaskRepository + ScheduleRepository + PreferenceRepository {
    fn today(&self) -> NaiveDate;
}

/// Repository over any [`KeyValueStore`].
///
/// Holds no task state between calls: each operation re-reads the stored set.
pub struct StoreRepository<S, C = SystemClock> {
    store: RefCell<S>,
    clock: C,
}

impl<S: KeyValueStore> StoreRepository<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> StoreRepository<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store: RefCell::new(store),
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Consumes the repository, handing back the underlying store.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    pub(crate) fn read_key(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.store.borrow().get(key)
    }

    pub(crate) fn write_key(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.store.borrow_mut().set(key, value)
    }

    /// Loads all tasks, applies `f` to the task with `id` and saves the set.
    pub(crate) fn modify_task<F>(&self, id: &str, f: F) -> Result<Task, CoreError>
    where
        F: FnOnce(&mut Task) -> Result<(), CoreError>,
    {
        let mut tasks = self.load_tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        f(task)?;
        let updated = task.clone();
        self.save_tasks(&tasks)?;
        Ok(updated)
    }
}

impl<S: KeyValueStore, C: Clock> Repository for StoreRepository<S, C> {
    fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
