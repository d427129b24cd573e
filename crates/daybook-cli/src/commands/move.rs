use anyhow::{anyhow, Result};
use daybook_core::error::CoreError;
use daybook_core::repository::Repository;

use crate::cli::MoveCommand;
use crate::commands::list::effective_filter;
use crate::config::Config;
use crate::util::resolve_task_id;

pub fn move_task(repo: &impl Repository, command: MoveCommand, config: &Config) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id)?;
    let position = command
        .position
        .checked_sub(1)
        .ok_or_else(|| anyhow!(CoreError::InvalidInput("Positions start at 1".to_string())))?;

    // Positions refer to the list as `list` last showed it, filter included.
    let filter = effective_filter(repo, None, config)?;
    match repo.move_in_today(&task_id, position, filter)? {
        Some(_) => {
            let views = repo.views(filter, 0)?;
            let shown = views
                .today_ids()
                .iter()
                .position(|id| *id == task_id)
                .map_or(command.position, |i| i + 1);
            println!("Moved task to position {} in today's list.", shown);
            Ok(())
        }
        None => Err(anyhow!(CoreError::InvalidInput(
            "Only tasks in today's list can be reordered".to_string()
        ))),
    }
}
