use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::CoreError;
use crate::migration::parse_tasks;
use crate::models::{new_task_id, normalize_tags, NewTaskData, Subtask, Task, UpdateTaskData};
use crate::ordering::default_order;
use crate::repository::{StoreRepository, TaskRepository};
use crate::store::{KeyValueStore, TASKS_KEY};

impl<S: KeyValueStore, C: Clock> TaskRepository for StoreRepository<S, C> {
    fn load_tasks(&self) -> Result<Vec<Task>, CoreError> {
        let Some(raw) = self.read_key(TASKS_KEY)? else {
            return Ok(Vec::new());
        };

        let migration = match parse_tasks(&raw) {
            Ok(migration) => migration,
            Err(e) => {
                // Corrupt data is left in place; the caller works from an empty set.
                warn!(error = %e, "stored task list is unreadable, starting empty");
                return Ok(Vec::new());
            }
        };

        if migration.changed {
            self.save_tasks(&migration.tasks)?;
        }
        Ok(migration.tasks)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), CoreError> {
        let json = serde_json::to_string(tasks)?;
        self.write_key(TASKS_KEY, &json)
    }

    fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(CoreError::InvalidInput("Task title cannot be empty".to_string()));
        }

        let task = Task {
            id: new_task_id(),
            title: title.to_string(),
            description: data.description,
            notes: data.notes,
            priority: data.priority,
            due_date: data.due_date,
            tags: normalize_tags(&data.tags),
            recurrence: data.recurrence,
            completed_on: Vec::new(),
            subtasks: data
                .subtasks
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(Subtask::new)
                .collect(),
            sort_order: default_order(self.clock().now_millis()),
        };

        let mut tasks = self.load_tasks()?;
        tasks.push(task.clone());
        self.save_tasks(&tasks)?;
        debug!(id = %task.id, recurrence = %task.recurrence, "added task");
        Ok(task)
    }

    fn find_task_by_id(&self, id: &str) -> Result<Option<Task>, CoreError> {
        Ok(self.load_tasks()?.into_iter().find(|t| t.id == id))
    }

    fn find_tasks_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Task>, CoreError> {
        let tasks = self.load_tasks()?;
        // An exact id always wins over longer ids sharing it as a prefix.
        if let Some(exact) = tasks.iter().find(|t| t.id == prefix) {
            return Ok(vec![exact.clone()]);
        }
        Ok(tasks.into_iter().filter(|t| t.id.starts_with(prefix)).collect())
    }

    fn update_task(&self, id: &str, data: UpdateTaskData) -> Result<Task, CoreError> {
        if let Some(title) = &data.title {
            if title.trim().is_empty() {
                return Err(CoreError::InvalidInput("Task title cannot be empty".to_string()));
            }
        }

        // Completion history and manual order survive every edit.
        self.modify_task(id, |task| {
            if let Some(title) = data.title {
                task.title = title.trim().to_string();
            }
            if let Some(description) = data.description {
                task.description = description;
            }
            if let Some(notes) = data.notes {
                task.notes = notes;
            }
            if let Some(priority) = data.priority {
                task.priority = priority;
            }
            if let Some(due_date) = data.due_date {
                task.due_date = due_date;
            }
            if let Some(tags) = data.tags {
                task.tags = normalize_tags(&tags);
            }
            if let Some(recurrence) = data.recurrence {
                task.recurrence = recurrence;
            }
            Ok(())
        })
    }

    fn delete_task(&self, id: &str) -> Result<Task, CoreError> {
        let mut tasks = self.load_tasks()?;
        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        let removed = tasks.remove(index);
        self.save_tasks(&tasks)?;
        debug!(id, "deleted task");
        Ok(removed)
    }

    fn set_instance_complete(&self, id: &str, date: NaiveDate, complete: bool) -> Result<Task, CoreError> {
        self.modify_task(id, |task| {
            task.set_complete_on(date, complete);
            Ok(())
        })
    }

    fn add_subtask(&self, id: &str, text: &str) -> Result<Task, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::InvalidInput("Subtask text cannot be empty".to_string()));
        }
        self.modify_task(id, |task| {
            task.subtasks.push(Subtask::new(text));
            Ok(())
        })
    }

    fn set_subtask_complete(&self, id: &str, index: usize, complete: bool) -> Result<Task, CoreError> {
        self.modify_task(id, |task| {
            let subtask = task
                .subtasks
                .get_mut(index)
                .ok_or_else(|| CoreError::NotFound(format!("subtask {} of task {}", index + 1, id)))?;
            subtask.is_complete = complete;
            Ok(())
        })
    }

    fn remove_subtask(&self, id: &str, index: usize) -> Result<Task, CoreError> {
        self.modify_task(id, |task| {
            if index >= task.subtasks.len() {
                return Err(CoreError::NotFound(format!("subtask {} of task {}", index + 1, id)));
            }
            task.subtasks.remove(index);
            Ok(())
        })
    }
}
