use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::ordering::ORDER_STEP;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

/// The four fixed recurrence kinds. `None` marks a one-off task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    #[serde(alias = "")]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::None => write!(f, "none"),
            Recurrence::Daily => write!(f, "daily"),
            Recurrence::Weekly => write!(f, "weekly"),
            Recurrence::Monthly => write!(f, "monthly"),
            Recurrence::Yearly => write!(f, "yearly"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence: {0}")]
pub struct ParseRecurrenceError(String);

impl FromStr for Recurrence {
    type Err = ParseRecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            "yearly" => Ok(Recurrence::Yearly),
            _ => Err(ParseRecurrenceError(s.to_string())),
        }
    }
}

impl Recurrence {
    #[inline]
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub text: String,
    pub is_complete: bool,
}

impl Subtask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_complete: false,
        }
    }
}

/// A persisted task definition in the current schema.
///
/// For recurring tasks `due_date` is the anchor: the first occurrence and the
/// reference point for every generated instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    #[serde(with = "date_or_empty")]
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub notes: String,
    pub recurrence: Recurrence,
    pub completed_on: Vec<NaiveDate>,
    pub subtasks: Vec<Subtask>,
    pub sort_order: f64,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: new_task_id(),
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::default(),
            due_date: None,
            tags: Vec::new(),
            notes: String::new(),
            recurrence: Recurrence::None,
            completed_on: Vec::new(),
            subtasks: Vec::new(),
            sort_order: ORDER_STEP,
        }
    }
}

impl Task {
    /// Whether the instance due on `date` has been checked off.
    #[inline]
    pub fn is_complete_on(&self, date: NaiveDate) -> bool {
        self.completed_on.contains(&date)
    }

    /// Marks the instance on `date` complete or incomplete.
    ///
    /// Completing is idempotent; un-completing removes only `date` and leaves
    /// every other recorded completion in place. Returns whether anything changed.
    pub fn set_complete_on(&mut self, date: NaiveDate, complete: bool) -> bool {
        if complete {
            if self.is_complete_on(date) {
                return false;
            }
            self.completed_on.push(date);
            true
        } else {
            let before = self.completed_on.len();
            self.completed_on.retain(|d| *d != date);
            before != self.completed_on.len()
        }
    }
}

/// Generates a fresh random task id.
pub fn new_task_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trims tags, drops empty ones and repeated ones, keeping first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// One concrete occurrence of a task on a single calendar date.
///
/// Derived on every query and never persisted. `task` still carries the
/// anchor date; `due_date` is the date of this occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInstance {
    pub task: Task,
    pub due_date: NaiveDate,
    pub is_instance: bool,
}

impl TaskInstance {
    #[inline]
    pub fn id(&self) -> &str {
        &self.task.id
    }

    #[inline]
    pub fn sort_order(&self) -> f64 {
        self.task.sort_order
    }

    #[inline]
    pub fn priority(&self) -> TaskPriority {
        self.task.priority
    }

    /// An instance is complete iff its date is recorded in the task's `completed_on`.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.task.is_complete_on(self.due_date)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: String,
    pub notes: String,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub recurrence: Recurrence,
    pub subtasks: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub tags: Option<Vec<String>>,
    pub recurrence: Option<Recurrence>,
}

/// Serde adapter for the stored `dueDate` string: `None` round-trips as `""`
/// and any unparsable value loads as `None`.
pub mod date_or_empty {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), FORMAT).ok()
    }

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.collect_str(&d.format(FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }
}
