//! Conversion of stored task records into the current [`Task`] schema.
//!
//! Older records may lack `sortOrder`, `subtasks` or `completedOn`, store ids
//! as numbers, or carry free-form priority and recurrence strings. Every
//! record is read through [`LegacyTask`] and converted exactly once at load.

use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::error::CoreError;
use crate::models::{date_or_empty, new_task_id, Recurrence, Subtask, Task, TaskPriority};
use crate::ordering::ORDER_STEP;

/// Version of the [`Task`] schema written by this crate.
pub const SCHEMA_VERSION: u32 = 1;

/// A stored task record with every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTask {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default)]
    pub completed_on: Option<Vec<String>>,
    #[serde(default)]
    pub subtasks: Option<Vec<Subtask>>,
    #[serde(default)]
    pub sort_order: Option<f64>,
}

/// Result of migrating a stored task set.
#[derive(Debug, Clone, Default)]
pub struct Migration {
    pub tasks: Vec<Task>,
    /// Whether any record had to be back-filled or repaired, meaning the
    /// stored copy is stale and should be written back.
    pub changed: bool,
}

/// Parses a stored task array and migrates it to the current schema.
pub fn parse_tasks(json: &str) -> Result<Migration, CoreError> {
    let records: Vec<LegacyTask> = serde_json::from_str(json)?;
    Ok(migrate(records))
}

/// Converts stored records to [`Task`]s.
///
/// Records without `sortOrder` get `(index + 1) * ORDER_STEP`, spreading them
/// out in stored order. Missing `subtasks` and `completedOn` become empty
/// lists and a missing id is generated. Unrecognised priority or recurrence
/// values fall back to medium and none.
pub fn migrate(records: Vec<LegacyTask>) -> Migration {
    let mut changed = false;
    let mut tasks = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let id = match record.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                changed = true;
                new_task_id()
            }
        };

        let sort_order = record.sort_order.unwrap_or_else(|| {
            changed = true;
            ORDER_STEP * (index as f64 + 1.0)
        });

        let subtasks = record.subtasks.unwrap_or_else(|| {
            changed = true;
            Vec::new()
        });

        let completed_on = match record.completed_on {
            Some(raw) => {
                let total = raw.len();
                let dates: Vec<_> = raw.iter().filter_map(|d| date_or_empty::parse(d)).collect();
                if dates.len() != total {
                    warn!(task = %id, dropped = total - dates.len(), "dropping unparsable completion dates");
                    changed = true;
                }
                dates
            }
            None => {
                changed = true;
                Vec::new()
            }
        };

        let priority = record
            .priority
            .as_deref()
            .and_then(|p| p.parse::<TaskPriority>().ok())
            .unwrap_or_default();

        let recurrence = match record.recurrence.as_deref() {
            None => Recurrence::None,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(task = %id, recurrence = raw, "unknown recurrence, treating as one-off");
                Recurrence::None
            }),
        };

        tasks.push(Task {
            id,
            title: record.title.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            notes: record.notes.unwrap_or_default(),
            priority,
            due_date: record.due_date.as_deref().and_then(date_or_empty::parse),
            tags: record.tags.unwrap_or_default(),
            recurrence,
            completed_on,
            subtasks,
            sort_order,
        });
    }

    if changed {
        info!(tasks = tasks.len(), "migrated stored tasks to schema v{}", SCHEMA_VERSION);
    }

    Migration { tasks, changed }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Int(n)) => Some(n.to_string()),
        Some(Raw::Float(n)) => Some(n.to_string()),
        None => None,
    })
}
