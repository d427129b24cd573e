use tracing::debug;

use crate::calendar::{MonthCursor, MonthGrid};
use crate::clock::Clock;
use crate::error::CoreError;
use crate::models::Task;
use crate::ordering::{compute_insert_order, is_exhausted, neighbours, renormalize};
use crate::repository::{ScheduleRepository, StoreRepository, TaskRepository};
use crate::store::KeyValueStore;
use crate::views::{build_views_with_window, PriorityFilter, TaskViews};

impl<S: KeyValueStore, C: Clock> ScheduleRepository for StoreRepository<S, C> {
    fn views(&self, filter: PriorityFilter, days: u32) -> Result<TaskViews, CoreError> {
        let tasks = self.load_tasks()?;
        Ok(build_views_with_window(&tasks, self.clock().today(), days, filter))
    }

    fn month(&self, cursor: MonthCursor) -> Result<MonthGrid, CoreError> {
        let tasks = self.load_tasks()?;
        Ok(MonthGrid::build(cursor, &tasks))
    }

    fn reorder_task(&self, id: &str, ordered_ids: &[String]) -> Result<Option<f64>, CoreError> {
        let mut tasks = self.load_tasks()?;
        if !tasks.iter().any(|t| t.id == id) {
            debug!(id, "reorder of unknown task ignored");
            return Ok(None);
        }

        let key_of = |other: &str| tasks.iter().find(|t| t.id == other).map(|t| t.sort_order);
        let Some((prev, next)) = neighbours(ordered_ids, id, key_of) else {
            debug!(id, "reorder target missing from list, ignored");
            return Ok(None);
        };

        if is_exhausted(prev, next) {
            // The gap is too narrow for another midpoint. Re-space every task,
            // including those hidden by a filter, so no two keys tie.
            respace_around(&mut tasks, id, ordered_ids);
            debug!(id, tasks = tasks.len(), "renormalized sort orders");
        } else {
            let order = compute_insert_order(prev, next);
            if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                task.sort_order = order;
            }
            debug!(id, order, "reordered task");
        }

        self.save_tasks(&tasks)?;
        Ok(tasks.iter().find(|t| t.id == id).map(|t| t.sort_order))
    }

    fn move_in_today(&self, id: &str, position: usize, filter: PriorityFilter) -> Result<Option<f64>, CoreError> {
        let views = self.views(filter, 0)?;
        let mut ids = views.today_ids();
        let Some(current) = ids.iter().position(|other| other == id) else {
            debug!(id, "task is not in today's list, move ignored");
            return Ok(None);
        };

        let moved = ids.remove(current);
        ids.insert(position.min(ids.len()), moved);
        self.reorder_task(id, &ids)
    }
}

/// Re-spaces all keys to `ORDER_STEP` steps in current key order, with `id`
/// moved next to its neighbour in `ordered_ids`: after the item shown before
/// it, or before the item shown after it.
fn respace_around(tasks: &mut [Task], id: &str, ordered_ids: &[String]) {
    let mut sequence: Vec<(usize, f64)> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.id != id)
        .map(|(index, t)| (index, t.sort_order))
        .collect();
    sequence.sort_by(|a, b| a.1.total_cmp(&b.1));
    let mut sequence: Vec<usize> = sequence.into_iter().map(|(index, _)| index).collect();

    let Some(moved) = tasks.iter().position(|t| t.id == id) else {
        return;
    };
    let position = ordered_ids.iter().position(|other| other == id).unwrap_or(0);
    let slot_of = |other: &String| {
        sequence
            .iter()
            .position(|&index| &tasks[index].id == other)
    };
    let after_prev = position
        .checked_sub(1)
        .and_then(|i| ordered_ids.get(i))
        .and_then(slot_of)
        .map(|slot| slot + 1);
    let before_next = || ordered_ids.get(position + 1).and_then(slot_of);
    let slot = after_prev.or_else(before_next).unwrap_or(sequence.len());
    sequence.insert(slot, moved);

    let mut orders = vec![0.0; sequence.len()];
    renormalize(orders.iter_mut());
    for (index, order) in sequence.into_iter().zip(orders) {
        tasks[index].sort_order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{Recurrence, TaskPriority};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task(id: &str, order: f64) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            due_date: Some(date("2024-03-01")),
            sort_order: order,
            ..Default::default()
        }
    }

    fn repo(tasks: &[Task]) -> StoreRepository<MemoryStore, FixedClock> {
        let repo = StoreRepository::with_clock(MemoryStore::new(), FixedClock::new(date("2024-03-01")));
        repo.save_tasks(tasks).unwrap();
        repo
    }

    fn today_ids(repo: &StoreRepository<MemoryStore, FixedClock>) -> Vec<String> {
        repo.views(PriorityFilter::All, 7).unwrap().today_ids()
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reorder_between_head_and_tail() {
        let repo = repo(&[task("a", 1000.0), task("b", 2000.0), task("c", 3000.0)]);

        assert_eq!(repo.reorder_task("c", &ids(&["a", "c", "b"])).unwrap(), Some(1500.0));
        assert_eq!(today_ids(&repo), ids(&["a", "c", "b"]));

        assert_eq!(repo.reorder_task("b", &ids(&["b", "a", "c"])).unwrap(), Some(500.0));
        assert_eq!(today_ids(&repo), ids(&["b", "a", "c"]));

        assert_eq!(repo.reorder_task("b", &ids(&["a", "c", "b"])).unwrap(), Some(2500.0));
        assert_eq!(today_ids(&repo), ids(&["a", "c", "b"]));
    }

    #[test]
    fn test_reorder_unknown_is_a_no_op() {
        let repo = repo(&[task("a", 1000.0), task("b", 2000.0)]);
        let before = repo.load_tasks().unwrap();

        assert_eq!(repo.reorder_task("zzz", &ids(&["a", "zzz", "b"])).unwrap(), None);
        assert_eq!(repo.reorder_task("a", &ids(&["b"])).unwrap(), None);
        assert_eq!(repo.load_tasks().unwrap(), before);
    }

    #[test]
    fn test_reorder_renormalizes_exhausted_gap() {
        let lo = 1000.0_f64;
        let hi = f64::from_bits(lo.to_bits() + 1);
        let repo = repo(&[task("a", lo), task("b", hi), task("c", 5000.0)]);

        let order = repo.reorder_task("c", &ids(&["a", "c", "b"])).unwrap();
        assert_eq!(order, Some(2000.0));

        let tasks = repo.load_tasks().unwrap();
        let order_of = |id: &str| tasks.iter().find(|t| t.id == id).unwrap().sort_order;
        assert_eq!(order_of("a"), 1000.0);
        assert_eq!(order_of("c"), 2000.0);
        assert_eq!(order_of("b"), 3000.0);
        assert_eq!(today_ids(&repo), ids(&["a", "c", "b"]));
    }

    #[test]
    fn test_filtered_move_respaces_hidden_tasks_too() {
        let lo = 1000.0_f64;
        let hi = f64::from_bits(lo.to_bits() + 1);
        let high = |id: &str, order: f64| Task {
            priority: TaskPriority::High,
            ..task(id, order)
        };
        let mut low = task("low", 2000.0);
        low.priority = TaskPriority::Low;
        let repo = repo(&[high("a", lo), high("b", hi), high("c", 5000.0), low]);

        let order = repo
            .move_in_today("c", 1, PriorityFilter::Only(TaskPriority::High))
            .unwrap();
        assert_eq!(order, Some(2000.0));

        let tasks = repo.load_tasks().unwrap();
        let mut keys: Vec<f64> = tasks.iter().map(|t| t.sort_order).collect();
        keys.sort_by(f64::total_cmp);
        keys.dedup();
        assert_eq!(keys.len(), tasks.len());

        let filtered = repo
            .views(PriorityFilter::Only(TaskPriority::High), 0)
            .unwrap()
            .today_ids();
        assert_eq!(filtered, ids(&["a", "c", "b"]));
        assert_eq!(today_ids(&repo), ids(&["a", "c", "b", "low"]));
    }

    #[test]
    fn test_move_in_today() {
        let repo = repo(&[task("a", 1000.0), task("b", 2000.0), task("c", 3000.0)]);

        repo.move_in_today("c", 0, PriorityFilter::All).unwrap();
        assert_eq!(today_ids(&repo), ids(&["c", "a", "b"]));

        repo.move_in_today("c", 99, PriorityFilter::All).unwrap();
        assert_eq!(today_ids(&repo), ids(&["a", "b", "c"]));

        assert_eq!(repo.move_in_today("nope", 0, PriorityFilter::All).unwrap(), None);
    }

    #[test]
    fn test_move_single_task_gets_default_spread() {
        let repo = repo(&[task("a", 123.0)]);
        assert_eq!(repo.move_in_today("a", 0, PriorityFilter::All).unwrap(), Some(1000.0));
    }

    #[test]
    fn test_views_and_month_read_current_state() {
        let mut weekly = task("w", 1.0);
        weekly.recurrence = Recurrence::Weekly;
        weekly.priority = TaskPriority::High;
        let repo = repo(&[weekly, task("o", 2.0)]);

        let views = repo.views(PriorityFilter::Only(TaskPriority::High), 7).unwrap();
        assert_eq!(views.today_ids(), ids(&["w"]));
        assert!(views.upcoming.is_empty());

        let grid = repo.month(MonthCursor::new(2024, 3).unwrap()).unwrap();
        let weekly_days: Vec<u32> = grid
            .days
            .iter()
            .filter(|cell| cell.instances.iter().any(|i| i.id() == "w"))
            .map(|cell| chrono::Datelike::day(&cell.date))
            .collect();
        assert_eq!(weekly_days, vec![1, 8, 15, 22, 29]);
    }
}
