use anyhow::Result;
use daybook_core::models::UpdateTaskData;
use daybook_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::cli::EditCommand;
use crate::parser::parse_date;
use crate::util::resolve_task_id;

pub fn edit_task(repo: &impl Repository, command: EditCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id)?;

    let due_date = if command.due_clear {
        Some(None)
    } else if let Some(due_str) = command.due.as_deref() {
        Some(Some(parse_date(due_str)?))
    } else {
        None
    };

    let tags = if command.tags_clear {
        Some(Vec::new())
    } else if !command.tag.is_empty() {
        Some(command.tag)
    } else {
        None
    };

    let update_data = UpdateTaskData {
        title: command.title,
        description: command.description,
        notes: command.notes,
        priority: command.priority,
        due_date,
        tags,
        recurrence: command.every,
    };

    let updated = repo.update_task(&task_id, update_data)?;
    println!("Updated task: '{}'", updated.title.bright_white().bold());
    Ok(())
}
