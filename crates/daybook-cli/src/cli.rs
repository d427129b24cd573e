use clap::{Args, Parser, Subcommand};
use daybook_core::models::{Recurrence, TaskPriority};
use daybook_core::views::PriorityFilter;

/// Daybook, a daily planner with recurring tasks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Without a command, reopens the last visited page (list or calendar)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Delete a task and all of its occurrences
    Delete(DeleteCommand),
    /// Mark one occurrence of a task as completed
    Done(CompletionCommand),
    /// Mark one occurrence of a task as not completed
    Undo(CompletionCommand),
    /// Manage a task's subtasks
    Subtask(SubtaskCommand),
    /// Show today's tasks and the upcoming week
    List(ListCommand),
    /// Reorder a task within today's list
    Move(MoveCommand),
    /// Show a month calendar
    Calendar(CalendarCommand),
    /// Write all data to a JSON backup
    Export(ExportCommand),
    /// Replace all tasks with those from a JSON backup
    Import(ImportCommand),
    /// Show or change developer settings
    Settings(SettingsCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The due date, e.g. '2024-03-01' or 'next friday'. Anchors recurring tasks
    #[clap(short, long)]
    pub due: Option<String>,
    /// The priority of the task (low, medium, high)
    #[clap(short, long)]
    pub priority: Option<TaskPriority>,
    /// How often the task repeats (none, daily, weekly, monthly, yearly)
    #[clap(short, long, default_value = "none")]
    pub every: Recurrence,
    /// Tags to add to the task
    #[clap(short, long)]
    pub tag: Vec<String>,
    /// The description of the task
    #[clap(long)]
    pub description: Option<String>,
    /// Free-form notes
    #[clap(long)]
    pub notes: Option<String>,
    /// Checklist items, one per flag
    #[clap(short, long)]
    pub subtask: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID (or unique prefix) of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub due: Option<String>,
    #[arg(long, conflicts_with = "due")]
    pub due_clear: bool,

    #[arg(long)]
    pub priority: Option<TaskPriority>,

    #[arg(long)]
    pub every: Option<Recurrence>,

    /// Replace the task's tags
    #[arg(long, conflicts_with = "tags_clear")]
    pub tag: Vec<String>,
    #[arg(long)]
    pub tags_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID (or unique prefix) of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionCommand {
    /// The ID (or unique prefix) of the task
    pub id: String,
    /// The occurrence date, defaults to today
    #[clap(long)]
    pub on: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SubtaskCommand {
    #[command(subcommand)]
    pub command: SubtaskSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubtaskSubcommand {
    /// Add a checklist item
    Add(SubtaskAddCommand),
    /// Check off a checklist item
    Done(SubtaskIndexCommand),
    /// Uncheck a checklist item
    Undo(SubtaskIndexCommand),
    /// Remove a checklist item
    Remove(SubtaskIndexCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct SubtaskAddCommand {
    /// The ID (or unique prefix) of the task
    pub id: String,
    /// The item text
    pub text: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SubtaskIndexCommand {
    /// The ID (or unique prefix) of the task
    pub id: String,
    /// The item number as shown by `list` (starting at 1)
    pub number: usize,
}

#[derive(Args, Debug, Clone)]
pub struct ListCommand {
    /// Only show tasks of this priority (all, low, medium, high). Remembered for later runs
    #[clap(short, long)]
    pub priority: Option<PriorityFilter>,
}

#[derive(Parser, Debug, Clone)]
pub struct MoveCommand {
    /// The ID (or unique prefix) of the task to move
    pub id: String,
    /// The new position in today's list (starting at 1)
    pub position: usize,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct CalendarCommand {
    /// The month to show, as YYYY-MM. Defaults to the current month
    #[clap(short, long)]
    pub month: Option<String>,
    /// Go back this many months
    #[clap(long, conflicts_with = "next")]
    pub prev: Option<u32>,
    /// Go forward this many months
    #[clap(long)]
    pub next: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportCommand {
    /// Write to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<std::path::PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportCommand {
    /// The backup file to read
    pub file: std::path::PathBuf,
    /// Replace existing tasks without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SettingsCommand {
    /// Reopen the last visited page when run without a command (true/false)
    #[arg(long, value_name = "BOOL")]
    pub launch_to_last_section: Option<bool>,
    /// Enable developer mode (true/false)
    #[arg(long, value_name = "BOOL")]
    pub dev_mode: Option<bool>,
}
