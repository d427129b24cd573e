use anyhow::Result;
use daybook_core::calendar::MonthCursor;
use daybook_core::repository::Repository;
use tracing::debug;

use crate::commands::calendar::{show_month, CALENDAR_PAGE};
use crate::commands::list::{effective_filter, show_lists};
use crate::config::Config;

/// Runs a bare `daybook`: reopens the calendar when it was the last page
/// visited and launching there is enabled, otherwise shows the lists.
pub fn open_start_page(repo: &impl Repository, config: &Config) -> Result<()> {
    let page = repo.launch_page()?;
    debug!(page = ?page, "opening start page");

    match page.as_deref() {
        Some(CALENDAR_PAGE) => show_month(repo, MonthCursor::current(repo.today())),
        _ => {
            let filter = effective_filter(repo, None, config)?;
            show_lists(repo, filter, config)
        }
    }
}
