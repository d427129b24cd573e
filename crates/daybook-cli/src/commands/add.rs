use anyhow::Result;
use daybook_core::models::NewTaskData;
use daybook_core::repository::Repository;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::config::Config;
use crate::parser::parse_date;

pub fn add_task(repo: &impl Repository, command: AddCommand, config: &Config) -> Result<()> {
    let due_date = command.due.as_deref().map(parse_date).transpose()?;

    let new_task_data = NewTaskData {
        title: command.title,
        description: command.description.unwrap_or_default(),
        notes: command.notes.unwrap_or_default(),
        priority: command.priority.unwrap_or_default(),
        due_date,
        tags: command.tag,
        recurrence: command.every,
        subtasks: command.subtask,
    };

    let added_task = repo.add_task(new_task_data)?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    let subtle_style = Style::new().bright_black();

    let kind = if added_task.recurrence.is_recurring() {
        "recurring task"
    } else {
        "task"
    };
    println!(
        "{} Created {}: {}",
        "✓".style(success_style),
        kind,
        added_task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        added_task.id.yellow()
    );

    match added_task.due_date {
        Some(due) if added_task.recurrence.is_recurring() => println!(
            "  {} Repeats {} from {}",
            "→".style(info_style),
            added_task.recurrence,
            config.format_date(due).cyan()
        ),
        Some(due) => println!("  {} Due: {}", "→".style(info_style), config.format_date(due).cyan()),
        None => println!(
            "  {} No due date: the task stays off the today and upcoming lists",
            "→".style(subtle_style)
        ),
    }

    Ok(())
}
