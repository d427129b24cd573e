//! Fractional manual ordering.
//!
//! Tasks carry a numeric `sort_order`; dropping a task between two siblings
//! gives it the midpoint of their keys, so no other task is renumbered.
//! Repeated midpoint insertion into the same gap eventually runs out of `f64`
//! precision. [`is_exhausted`] detects that point and [`renormalize`]
//! re-spaces a sibling list to recover room.

/// Gap left between keys at the tail and after renormalization.
pub const ORDER_STEP: f64 = 1000.0;

/// Key for a task placed between `prev` and `next` (either may be absent).
///
/// - head: `next / 2`
/// - tail: `prev + ORDER_STEP`
/// - between: `(prev + next) / 2`
/// - only item: `ORDER_STEP`
pub fn compute_insert_order(prev: Option<f64>, next: Option<f64>) -> f64 {
    match (prev, next) {
        (None, None) => ORDER_STEP,
        (None, Some(next)) => next / 2.0,
        (Some(prev), None) => prev + ORDER_STEP,
        (Some(prev), Some(next)) => (prev + next) / 2.0,
    }
}

/// Default key for a newly created task. Derived from the creation time so
/// new tasks sort after everything that already exists.
#[inline]
pub fn default_order(now_millis: i64) -> f64 {
    now_millis as f64
}

/// True when the key computed for this gap would no longer sort strictly
/// between its neighbours.
pub fn is_exhausted(prev: Option<f64>, next: Option<f64>) -> bool {
    let key = compute_insert_order(prev, next);
    if !key.is_finite() {
        return true;
    }
    let after_prev = prev.map_or(true, |p| key > p);
    let before_next = next.map_or(true, |n| key < n);
    !(after_prev && before_next)
}

/// Computes the new key for `moved_id` from its neighbours in `ordered_ids`,
/// the list as displayed after the drop. `key_of` looks up the current key of
/// a neighbour; unknown neighbours count as absent.
///
/// Returns `None` when `moved_id` is not in the list.
pub fn order_for_position<S, F>(ordered_ids: &[S], moved_id: &str, key_of: F) -> Option<f64>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<f64>,
{
    let (prev, next) = neighbours(ordered_ids, moved_id, key_of)?;
    Some(compute_insert_order(prev, next))
}

/// Keys of the items on either side of `moved_id` in `ordered_ids`.
pub fn neighbours<S, F>(
    ordered_ids: &[S],
    moved_id: &str,
    key_of: F,
) -> Option<(Option<f64>, Option<f64>)>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<f64>,
{
    let position = ordered_ids.iter().position(|id| id.as_ref() == moved_id)?;
    let prev = position
        .checked_sub(1)
        .and_then(|i| ordered_ids.get(i))
        .and_then(|id| key_of(id.as_ref()));
    let next = ordered_ids
        .get(position + 1)
        .and_then(|id| key_of(id.as_ref()));
    Some((prev, next))
}

/// Re-spaces keys to `ORDER_STEP, 2 * ORDER_STEP, ...` in the order given.
/// Callers pass the siblings already sorted as displayed.
pub fn renormalize<'a, I>(orders: I)
where
    I: IntoIterator<Item = &'a mut f64>,
{
    for (index, order) in orders.into_iter().enumerate() {
        *order = ORDER_STEP * (index as f64 + 1.0);
    }
}
