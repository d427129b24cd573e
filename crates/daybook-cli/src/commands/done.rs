use anyhow::{anyhow, Result};
use daybook_core::error::CoreError;
use daybook_core::repository::Repository;

use crate::cli::CompletionCommand;
use crate::config::Config;
use crate::parser::parse_date;
use crate::util::resolve_task_id;

/// Marks the occurrence on `--on` (default today) complete or incomplete.
pub fn set_completion(
    repo: &impl Repository,
    command: CompletionCommand,
    complete: bool,
    config: &Config,
) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id)?;
    let date = match command.on.as_deref() {
        Some(on) => parse_date(on)?,
        None => repo.today(),
    };

    let task = repo
        .find_task_by_id(&task_id)?
        .ok_or_else(|| anyhow!(CoreError::NotFound(task_id.clone())))?;
    // Undo stays allowed off-schedule so completions left behind by a changed
    // due date can still be cleared.
    let occurs = task
        .due_date
        .is_some_and(|anchor| task.recurrence.matches(anchor, date));
    if complete && !occurs {
        return Err(anyhow!(CoreError::InvalidInput(format!(
            "'{}' has no occurrence on {}",
            task.title,
            config.format_date(date)
        ))));
    }

    let task = repo.set_instance_complete(&task_id, date, complete)?;
    let verb = if complete { "Completed" } else { "Reopened" };
    println!("{} task: '{}' ({})", verb, task.title, config.format_date(date));
    Ok(())
}
