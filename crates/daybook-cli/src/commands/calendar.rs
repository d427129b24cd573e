use anyhow::{anyhow, Result};
use daybook_core::calendar::MonthCursor;
use daybook_core::error::CoreError;
use daybook_core::repository::Repository;

use crate::cli::CalendarCommand;
use crate::parser::parse_month;
use crate::views::table::display_calendar;

/// Name recorded as the last visited page by `calendar`.
pub const CALENDAR_PAGE: &str = "calendar";

pub fn show_calendar(repo: &impl Repository, command: CalendarCommand) -> Result<()> {
    let base = match command.month.as_deref() {
        Some(month) => parse_month(month)?,
        None => MonthCursor::current(repo.today()),
    };

    let delta = match (command.prev, command.next) {
        (Some(back), _) => -month_offset(back)?,
        (None, Some(forward)) => month_offset(forward)?,
        (None, None) => 0,
    };
    let cursor = base.checked_shift(delta).ok_or_else(|| {
        anyhow!(CoreError::InvalidInput(
            "Month is outside the supported date range".to_string()
        ))
    })?;

    repo.set_last_visited_page(CALENDAR_PAGE)?;
    show_month(repo, cursor)
}

/// Prints the month grid without recording the visit.
pub fn show_month(repo: &impl Repository, cursor: MonthCursor) -> Result<()> {
    let grid = repo.month(cursor)?;
    display_calendar(&grid, repo.today());
    Ok(())
}

fn month_offset(months: u32) -> Result<i32> {
    i32::try_from(months).map_err(|_| {
        anyhow!(CoreError::InvalidInput(format!(
            "Cannot move by {} months",
            months
        )))
    })
}
