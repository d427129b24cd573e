use anyhow::{anyhow, Result};
use daybook_core::error::CoreError;
use daybook_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::DeleteCommand;
use crate::util::resolve_task_id;

pub fn delete_task(repo: &impl Repository, command: DeleteCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id)?;
    let task = repo
        .find_task_by_id(&task_id)?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.clone())))?;

    if !command.force {
        let prompt = if task.recurrence.is_recurring() {
            format!(
                "Delete recurring task '{}' and all of its occurrences?",
                task.title
            )
        } else {
            format!("Are you sure you want to delete task '{}'?", task.title)
        };
        let confirmation = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let deleted = repo.delete_task(&task_id)?;
    println!("Deleted task: '{}'", deleted.title);
    Ok(())
}
