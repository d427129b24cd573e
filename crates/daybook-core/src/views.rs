use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::calendar::DateRange;
use crate::models::{ParseTaskPriorityError, Task, TaskInstance, TaskPriority};
use crate::recurrence::expand;

/// Days after today covered by the upcoming list; the window is inclusive so
/// it spans `UPCOMING_DAYS + 1` calendar days.
pub const UPCOMING_DAYS: u32 = 7;

/// Priority filter applied to the today and upcoming lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(TaskPriority),
}

impl PriorityFilter {
    #[inline]
    pub fn allows(&self, priority: TaskPriority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => *p == priority,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => write!(f, "all"),
            PriorityFilter::Only(p) => write!(f, "{p}"),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse().map(PriorityFilter::Only)
    }
}

// Stored as the bare string ("all", "low", ...) to match the persisted filter state.
impl Serialize for PriorityFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PriorityFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The two lists shown on the tasks page.
#[derive(Debug, Clone, Default)]
pub struct TaskViews {
    pub today: Vec<TaskInstance>,
    pub upcoming: Vec<TaskInstance>,
}

impl TaskViews {
    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.upcoming.is_empty()
    }

    /// Ids of the today list in display order.
    pub fn today_ids(&self) -> Vec<String> {
        self.today.iter().map(|i| i.id().to_string()).collect()
    }
}

/// Builds the today and upcoming lists over `[today, today + 7 days]`.
pub fn build_views(tasks: &[Task], today: NaiveDate, filter: PriorityFilter) -> TaskViews {
    build_views_with_window(tasks, today, UPCOMING_DAYS, filter)
}

/// Builds the today and upcoming lists over `[today, today + days]`.
///
/// The priority filter is applied to each instance before deduplication.
/// Each task then contributes only its earliest instance in the window. The
/// today list is ordered by `sort_order`, the upcoming list by date and then
/// `sort_order`.
pub fn build_views_with_window(
    tasks: &[Task],
    today: NaiveDate,
    days: u32,
    filter: PriorityFilter,
) -> TaskViews {
    let instances = expand(tasks, DateRange::upcoming(today, days));
    let next = next_occurrences(instances.into_iter().filter(|i| filter.allows(i.priority())));

    let (mut today_list, mut upcoming): (Vec<_>, Vec<_>) =
        next.into_iter().partition(|i| i.due_date == today);

    today_list.sort_by(|a, b| a.sort_order().total_cmp(&b.sort_order()));
    upcoming.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.sort_order().total_cmp(&b.sort_order()))
    });

    debug!(
        %today,
        %filter,
        today_count = today_list.len(),
        upcoming_count = upcoming.len(),
        "built task views"
    );

    TaskViews {
        today: today_list,
        upcoming,
    }
}

/// Keeps the first instance seen per task id. Fed instances in ascending
/// date order, that is each task's next occurrence.
pub fn next_occurrences<I>(instances: I) -> Vec<TaskInstance>
where
    I: IntoIterator<Item = TaskInstance>,
{
    let mut seen: HashSet<String> = HashSet::new();
    instances
        .into_iter()
        .filter(|instance| seen.insert(instance.id().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recurrence;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task(id: &str, due: &str, recurrence: Recurrence, priority: TaskPriority, order: f64) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            due_date: Some(date(due)),
            recurrence,
            priority,
            sort_order: order,
            ..Default::default()
        }
    }

    fn ids(instances: &[TaskInstance]) -> Vec<&str> {
        instances.iter().map(|i| i.id()).collect()
    }

    const TODAY: &str = "2024-05-10";

    #[test]
    fn test_daily_task_collapses_to_single_entry() {
        // Anchored three days before the window ends: five raw instances.
        let tasks = vec![task("d", "2024-05-13", Recurrence::Daily, TaskPriority::Medium, 1000.0)];
        let raw = expand(&tasks, DateRange::upcoming(date(TODAY), UPCOMING_DAYS));
        assert_eq!(raw.len(), 5);

        let views = build_views(&tasks, date(TODAY), PriorityFilter::All);
        assert!(views.today.is_empty());
        assert_eq!(views.upcoming.len(), 1);
        assert_eq!(views.upcoming[0].due_date, date("2024-05-13"));
    }

    #[test]
    fn test_recurring_task_due_today_appears_only_in_today() {
        let tasks = vec![task("d", "2024-05-01", Recurrence::Daily, TaskPriority::Low, 1000.0)];
        let views = build_views(&tasks, date(TODAY), PriorityFilter::All);
        assert_eq!(ids(&views.today), vec!["d"]);
        assert!(views.upcoming.is_empty());
    }

    #[test]
    fn test_partition_and_ordering() {
        let tasks = vec![
            task("today-late", TODAY, Recurrence::None, TaskPriority::Low, 3000.0),
            task("today-early", TODAY, Recurrence::None, TaskPriority::Low, 500.0),
            task("next-week", "2024-05-17", Recurrence::None, TaskPriority::Low, 1.0),
            task("tomorrow-b", "2024-05-11", Recurrence::None, TaskPriority::Low, 2000.0),
            task("tomorrow-a", "2024-05-11", Recurrence::None, TaskPriority::Low, 1000.0),
            task("too-far", "2024-05-18", Recurrence::None, TaskPriority::Low, 1.0),
            task("yesterday", "2024-05-09", Recurrence::None, TaskPriority::Low, 1.0),
        ];

        let views = build_views(&tasks, date(TODAY), PriorityFilter::All);
        assert_eq!(ids(&views.today), vec!["today-early", "today-late"]);
        assert_eq!(ids(&views.upcoming), vec!["tomorrow-a", "tomorrow-b", "next-week"]);
    }

    #[test]
    fn test_priority_filter_excludes_other_priorities() {
        let tasks = vec![
            task("high", TODAY, Recurrence::None, TaskPriority::High, 1.0),
            task("low", TODAY, Recurrence::None, TaskPriority::Low, 2.0),
            task("weekly-low", "2024-05-03", Recurrence::Weekly, TaskPriority::Low, 3.0),
            task("weekly-high", "2024-05-04", Recurrence::Weekly, TaskPriority::High, 4.0),
        ];

        let views = build_views(&tasks, date(TODAY), PriorityFilter::Only(TaskPriority::High));
        let all: Vec<&TaskInstance> = views.today.iter().chain(views.upcoming.iter()).collect();
        assert!(all.iter().all(|i| i.priority() == TaskPriority::High));
        assert_eq!(ids(&views.today), vec!["high"]);
        assert_eq!(ids(&views.upcoming), vec!["weekly-high"]);
        assert_eq!(views.upcoming[0].due_date, date("2024-05-11"));

        let views = build_views(&tasks, date(TODAY), PriorityFilter::All);
        assert_eq!(views.today.len() + views.upcoming.len(), 4);
    }

    #[test]
    fn test_completed_instances_still_listed() {
        let mut t = task("d", "2024-05-01", Recurrence::Daily, TaskPriority::Medium, 1.0);
        t.completed_on.push(date(TODAY));
        let views = build_views(&[t], date(TODAY), PriorityFilter::All);
        assert_eq!(views.today.len(), 1);
        assert!(views.today[0].is_complete());
    }

    #[test]
    fn test_custom_window() {
        let tasks = vec![task("far", "2024-05-25", Recurrence::None, TaskPriority::Low, 1.0)];
        assert!(build_views(&tasks, date(TODAY), PriorityFilter::All).is_empty());
        let views = build_views_with_window(&tasks, date(TODAY), 30, PriorityFilter::All);
        assert_eq!(ids(&views.upcoming), vec!["far"]);
    }

    #[test]
    fn test_filter_parse_and_serde() {
        assert_eq!("all".parse::<PriorityFilter>(), Ok(PriorityFilter::All));
        assert_eq!(
            "HIGH".parse::<PriorityFilter>(),
            Ok(PriorityFilter::Only(TaskPriority::High))
        );
        assert!("urgent".parse::<PriorityFilter>().is_err());

        let json = serde_json::to_string(&PriorityFilter::Only(TaskPriority::Low)).unwrap();
        assert_eq!(json, "\"low\"");
        let back: PriorityFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(back, PriorityFilter::All);
    }
}
