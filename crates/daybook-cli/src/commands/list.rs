use anyhow::Result;
use daybook_core::repository::Repository;
use daybook_core::views::PriorityFilter;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::util::display_id_len;
use crate::views::table::display_views;

/// Name recorded as the last visited page by `list`.
pub const TASKS_PAGE: &str = "tasks";

/// The filter in effect: an explicit `--priority` (remembered for later
/// runs), else the remembered one, else the configured default.
pub fn effective_filter(
    repo: &impl Repository,
    requested: Option<PriorityFilter>,
    config: &Config,
) -> Result<PriorityFilter> {
    if let Some(filter) = requested {
        repo.save_filter(filter)?;
        return Ok(filter);
    }
    if let Some(filter) = repo.load_filter()? {
        return Ok(filter);
    }
    Ok(config
        .default_priority
        .map_or(PriorityFilter::All, PriorityFilter::Only))
}

pub fn list_tasks(repo: &impl Repository, command: ListCommand, config: &Config) -> Result<()> {
    let filter = effective_filter(repo, command.priority, config)?;
    repo.set_last_visited_page(TASKS_PAGE)?;
    show_lists(repo, filter, config)
}

/// Prints the today and upcoming lists without recording the visit.
pub fn show_lists(repo: &impl Repository, filter: PriorityFilter, config: &Config) -> Result<()> {
    let views = repo.views(filter, config.upcoming_days)?;
    if filter != PriorityFilter::All {
        println!("Showing {} priority tasks only.", filter);
    }
    let id_len = display_id_len(repo)?;
    display_views(&views, config, id_len);
    Ok(())
}
