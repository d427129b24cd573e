//! Calendar primitives: inclusive date ranges walked lazily day by day, and
//! an explicit month cursor plus grid for the month view.

use chrono::{Datelike, Days as ChronoDays, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Task, TaskInstance};
use crate::recurrence::expand;

/// An inclusive span of calendar dates. Empty when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// `[today, today + days]`, so `days = 7` spans eight calendar days.
    pub fn upcoming(today: NaiveDate, days: u32) -> Self {
        let end = today
            .checked_add_days(ChronoDays::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self::new(today, end)
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range (zero when empty).
    pub fn len_days(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() as u64 + 1
        }
    }

    /// The same range with its start moved forward to `floor` if it lies later.
    pub fn clamp_start(&self, floor: NaiveDate) -> Self {
        Self::new(self.start.max(floor), self.end)
    }

    pub fn days(&self) -> Days {
        Days {
            next: (!self.is_empty()).then_some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

/// Lazy, finite walk over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.end { current.succ_opt() } else { None };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(next) => {
                let remaining = (self.end - next).num_days() as usize + 1;
                (remaining, Some(remaining))
            }
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for Days {}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid month: {0} (expected YYYY-MM)")]
pub struct ParseMonthError(String);

/// The month currently shown by the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// Returns `None` for a month outside 1..=12 or a year chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `today`.
    pub fn current(today: NaiveDate) -> Self {
        Self {
            first: today.with_day(1).unwrap_or(today),
        }
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// The previous month, wrapping January back to December of the prior year.
    pub fn prev(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// The next month, wrapping December forward to January.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// Moves by `delta` months, negative values going backwards. Stays put
    /// when the result would leave the supported date range.
    pub fn shift(&self, delta: i32) -> Self {
        self.checked_shift(delta).unwrap_or(*self)
    }

    /// Like [`MonthCursor::shift`], but `None` outside the supported date range.
    pub fn checked_shift(&self, delta: i32) -> Option<Self> {
        let months = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        moved.map(|first| Self { first })
    }

    #[inline]
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.first_day(), self.last_day())
    }

    pub fn name(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthCursor {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ParseMonthError(s.to_string()))?;
        let year: i32 = year.parse().map_err(|_| ParseMonthError(s.to_string()))?;
        let month: u32 = month.parse().map_err(|_| ParseMonthError(s.to_string()))?;
        MonthCursor::new(year, month).ok_or_else(|| ParseMonthError(s.to_string()))
    }
}

/// One day square of the month grid.
#[derive(Debug, Clone)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Incomplete instances due on `date`, in expansion order.
    pub instances: Vec<TaskInstance>,
}

/// A Sunday-first month grid ready for rendering.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub cursor: MonthCursor,
    /// Empty cells before day 1 (weekday of day 1, Sunday = 0).
    pub leading_blanks: u32,
    /// Week rows needed to fit the month, with no trailing empty row.
    pub rows: u32,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    /// Expands `tasks` over the month and buckets the instances by day.
    /// Completed instances are left out of the grid.
    pub fn build(cursor: MonthCursor, tasks: &[Task]) -> Self {
        let leading_blanks = cursor.first_day().weekday().num_days_from_sunday();
        let days_in_month = cursor.days_in_month();
        let rows = (leading_blanks + days_in_month).div_ceil(7);

        let mut days: Vec<DayCell> = cursor
            .range()
            .into_iter()
            .map(|date| DayCell {
                date,
                instances: Vec::new(),
            })
            .collect();

        for instance in expand(tasks, cursor.range()) {
            if instance.is_complete() {
                continue;
            }
            let index = instance.due_date.day0() as usize;
            if let Some(cell) = days.get_mut(index) {
                cell.instances.push(instance);
            }
        }

        Self {
            cursor,
            leading_blanks,
            rows,
            days,
        }
    }

    /// The grid as week rows of seven slots; `None` pads before day 1 and after the last day.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let mut slots: Vec<Option<&DayCell>> = Vec::with_capacity((self.rows * 7) as usize);
        slots.extend((0..self.leading_blanks).map(|_| None));
        slots.extend(self.days.iter().map(Some));
        slots.resize((self.rows * 7) as usize, None);
        slots.chunks(7).map(|week| week.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recurrence;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    mod date_range_tests {
        use super::*;

        #[test]
        fn test_days_inclusive() {
            let range = DateRange::new(date("2024-02-27"), date("2024-03-01"));
            let days: Vec<NaiveDate> = range.into_iter().collect();
            assert_eq!(
                days,
                vec![
                    date("2024-02-27"),
                    date("2024-02-28"),
                    date("2024-02-29"),
                    date("2024-03-01"),
                ]
            );
            assert_eq!(range.len_days(), 4);
        }

        #[test]
        fn test_single_day() {
            let range = DateRange::day(date("2024-01-01"));
            assert_eq!(range.days().count(), 1);
            assert!(range.contains(date("2024-01-01")));
        }

        #[test]
        fn test_empty_when_inverted() {
            let range = DateRange::new(date("2024-01-02"), date("2024-01-01"));
            assert!(range.is_empty());
            assert_eq!(range.days().count(), 0);
            assert_eq!(range.len_days(), 0);
        }

        #[test]
        fn test_restartable() {
            let range = DateRange::new(date("2024-01-01"), date("2024-01-03"));
            let days = range.days();
            assert_eq!(days.clone().count(), 3);
            assert_eq!(days.len(), 3);
            assert_eq!(range.days().count(), 3);
        }

        #[test]
        fn test_upcoming_spans_eight_days() {
            let range = DateRange::upcoming(date("2024-12-28"), 7);
            assert_eq!(range.end(), date("2025-01-04"));
            assert_eq!(range.len_days(), 8);
        }

        #[test]
        fn test_clamp_start() {
            let range = DateRange::new(date("2024-01-01"), date("2024-01-10"));
            assert_eq!(range.clamp_start(date("2024-01-05")).start(), date("2024-01-05"));
            assert_eq!(range.clamp_start(date("2023-12-01")).start(), date("2024-01-01"));
            assert!(range.clamp_start(date("2024-02-01")).is_empty());
        }
    }

    mod month_cursor_tests {
        use super::*;

        #[test]
        fn test_wraps_years() {
            let jan = MonthCursor::new(2024, 1).unwrap();
            assert_eq!(jan.prev(), MonthCursor::new(2023, 12).unwrap());
            let dec = MonthCursor::new(2024, 12).unwrap();
            assert_eq!(dec.next(), MonthCursor::new(2025, 1).unwrap());
            assert_eq!(jan.shift(-13), MonthCursor::new(2022, 12).unwrap());
            assert_eq!(jan.shift(14), MonthCursor::new(2025, 3).unwrap());
        }

        #[test]
        fn test_checked_shift_out_of_range() {
            let jan = MonthCursor::new(2024, 1).unwrap();
            assert_eq!(jan.checked_shift(-1), Some(MonthCursor::new(2023, 12).unwrap()));
            assert_eq!(jan.checked_shift(i32::MAX), None);
            assert_eq!(jan.checked_shift(i32::MIN), None);
            assert_eq!(jan.shift(i32::MIN), jan);
        }

        #[test]
        fn test_bounds() {
            let feb = MonthCursor::new(2024, 2).unwrap();
            assert_eq!(feb.first_day(), date("2024-02-01"));
            assert_eq!(feb.last_day(), date("2024-02-29"));
            assert_eq!(feb.days_in_month(), 29);
            assert_eq!(feb.name(), "February 2024");
        }

        #[test]
        fn test_current_and_parse() {
            assert_eq!(
                MonthCursor::current(date("2024-07-19")),
                "2024-07".parse::<MonthCursor>().unwrap()
            );
            assert!("2024-13".parse::<MonthCursor>().is_err());
            assert!("July".parse::<MonthCursor>().is_err());
            assert_eq!(MonthCursor::new(2024, 7).unwrap().to_string(), "2024-07");
        }
    }

    mod month_grid_tests {
        use super::*;

        #[test]
        fn test_layout() {
            // September 2024 starts on a Sunday: no blanks, 30 days, 5 rows.
            let grid = MonthGrid::build(MonthCursor::new(2024, 9).unwrap(), &[]);
            assert_eq!(grid.leading_blanks, 0);
            assert_eq!(grid.rows, 5);
            assert_eq!(grid.days.len(), 30);

            // March 2024 starts on a Friday: 5 blanks + 31 days = 6 rows.
            let grid = MonthGrid::build(MonthCursor::new(2024, 3).unwrap(), &[]);
            assert_eq!(grid.leading_blanks, 5);
            assert_eq!(grid.rows, 6);
            let weeks = grid.weeks();
            assert_eq!(weeks.len(), 6);
            assert!(weeks[0][4].is_none());
            assert_eq!(weeks[0][5].unwrap().date, date("2024-03-01"));
            assert!(weeks[5][1].is_none());
        }

        #[test]
        fn test_buckets_instances_and_hides_completed() {
            let weekly = Task {
                id: "w".to_string(),
                due_date: Some(date("2024-03-04")),
                recurrence: Recurrence::Weekly,
                completed_on: vec![date("2024-03-11")],
                ..Default::default()
            };
            let one_off = Task {
                id: "o".to_string(),
                due_date: Some(date("2024-03-04")),
                ..Default::default()
            };

            let grid = MonthGrid::build(MonthCursor::new(2024, 3).unwrap(), &[weekly, one_off]);
            let on = |d: &str| -> Vec<&str> {
                grid.days[date(d).day0() as usize]
                    .instances
                    .iter()
                    .map(|i| i.id())
                    .collect()
            };

            assert_eq!(on("2024-03-04"), vec!["w", "o"]);
            assert!(on("2024-03-11").is_empty());
            assert_eq!(on("2024-03-18"), vec!["w"]);
            assert_eq!(on("2024-03-25"), vec!["w"]);
            assert!(on("2024-03-05").is_empty());
        }
    }
}
