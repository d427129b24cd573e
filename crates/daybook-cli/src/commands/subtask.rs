use anyhow::{anyhow, Result};
use daybook_core::error::CoreError;
use daybook_core::repository::Repository;

use crate::cli::{SubtaskCommand, SubtaskIndexCommand, SubtaskSubcommand};
use crate::util::resolve_task_id;

pub fn subtask_command(repo: &impl Repository, command: SubtaskCommand) -> Result<()> {
    match command.command {
        SubtaskSubcommand::Add(add) => {
            let task_id = resolve_task_id(repo, &add.id)?;
            let task = repo.add_subtask(&task_id, &add.text)?;
            println!(
                "Added subtask {} to '{}'",
                task.subtasks.len(),
                task.title
            );
        }
        SubtaskSubcommand::Done(item) => set_complete(repo, item, true)?,
        SubtaskSubcommand::Undo(item) => set_complete(repo, item, false)?,
        SubtaskSubcommand::Remove(item) => {
            let (task_id, index) = resolve_item(repo, &item)?;
            let task = repo.remove_subtask(&task_id, index)?;
            println!("Removed subtask {} from '{}'", item.number, task.title);
        }
    }
    Ok(())
}

fn set_complete(repo: &impl Repository, item: SubtaskIndexCommand, complete: bool) -> Result<()> {
    let (task_id, index) = resolve_item(repo, &item)?;
    let task = repo.set_subtask_complete(&task_id, index, complete)?;
    let mark = if complete { "x" } else { " " };
    if let Some(subtask) = task.subtasks.get(index) {
        println!("[{}] {}", mark, subtask.text);
    }
    Ok(())
}

/// Resolves the task id and converts the 1-based item number to an index.
fn resolve_item(repo: &impl Repository, item: &SubtaskIndexCommand) -> Result<(String, usize)> {
    let task_id = resolve_task_id(repo, &item.id)?;
    let index = item
        .number
        .checked_sub(1)
        .ok_or_else(|| anyhow!(CoreError::InvalidInput("Subtask numbers start at 1".to_string())))?;
    Ok((task_id, index))
}
