use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::calendar::DateRange;
use crate::models::{Recurrence, Task, TaskInstance};

/// Longest gap between two occurrences of any rule: a yearly anchor on Feb 29
/// next recurs up to eight years later (e.g. 2096-02-29 to 2104-02-29).
const MAX_OCCURRENCE_GAP_DAYS: u64 = 366 * 8 + 1;

impl Recurrence {
    /// Tests whether `day` is an occurrence of a rule anchored at `anchor`.
    ///
    /// Days before the anchor never match. Monthly and yearly rules compare
    /// calendar fields only, so an anchor on the 31st has no occurrence in a
    /// 30-day month and Feb 29 only recurs in leap years.
    pub fn matches(&self, anchor: NaiveDate, day: NaiveDate) -> bool {
        if day < anchor {
            return false;
        }
        match self {
            Recurrence::None => day == anchor,
            Recurrence::Daily => true,
            Recurrence::Weekly => day.weekday() == anchor.weekday(),
            Recurrence::Monthly => day.day() == anchor.day(),
            Recurrence::Yearly => day.month() == anchor.month() && day.day() == anchor.day(),
        }
    }
}

/// Expands every task into its due instances inside `range` (inclusive).
///
/// One-off tasks yield at most one instance with `is_instance = false`.
/// Recurring tasks yield one instance per matching day at or after their
/// anchor, flagged `is_instance = true`. Tasks without a due date never
/// appear. The result is ordered by date; ties keep input order.
pub fn expand(tasks: &[Task], range: DateRange) -> Vec<TaskInstance> {
    let mut instances = Vec::new();

    for task in tasks {
        let Some(anchor) = task.due_date else {
            continue;
        };

        if !task.recurrence.is_recurring() {
            if range.contains(anchor) {
                instances.push(TaskInstance {
                    task: task.clone(),
                    due_date: anchor,
                    is_instance: false,
                });
            }
            continue;
        }

        // Nothing before the anchor can match, so start the walk there.
        let walk = range.clamp_start(anchor);
        instances.extend(
            walk.into_iter()
                .filter(|day| task.recurrence.matches(anchor, *day))
                .map(|day| TaskInstance {
                    task: task.clone(),
                    due_date: day,
                    is_instance: true,
                }),
        );
    }

    instances.sort_by_key(|instance| instance.due_date);
    debug!(
        tasks = tasks.len(),
        instances = instances.len(),
        start = %range.start(),
        end = %range.end(),
        "expanded tasks"
    );
    instances
}

/// Convenience wrapper over [`expand`] taking the window bounds directly.
pub fn expand_between(tasks: &[Task], start: NaiveDate, end: NaiveDate) -> Vec<TaskInstance> {
    expand(tasks, DateRange::new(start, end))
}

/// Finds the first date on or after `from` on which `task` is due.
///
/// Returns `None` for tasks without a due date and for one-off tasks whose
/// date has already passed.
pub fn next_occurrence(task: &Task, from: NaiveDate) -> Option<NaiveDate> {
    let anchor = task.due_date?;
    if !task.recurrence.is_recurring() {
        return (anchor >= from).then_some(anchor);
    }

    let start = from.max(anchor);
    start
        .iter_days()
        .take(MAX_OCCURRENCE_GAP_DAYS as usize)
        .find(|day| task.recurrence.matches(anchor, *day))
}
