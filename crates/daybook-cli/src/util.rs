use anyhow::{anyhow, Result};
use daybook_core::error::CoreError;
use daybook_core::repository::TaskRepository;

/// Fewest characters of an id shown in tables.
pub const SHORT_ID_LEN: usize = 8;

pub fn resolve_task_id(repo: &impl TaskRepository, short_id: &str) -> Result<String> {
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let tasks = repo.find_tasks_by_short_id_prefix(short_id)?;
    if tasks.len() == 1 {
        Ok(tasks[0].id.clone())
    } else if tasks.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let task_info: Vec<(String, String)> = tasks
            .into_iter()
            .map(|t| (t.id, t.title))
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(task_info)))
    }
}

/// The first `len` characters of `id`. Ids shorter than that are shown whole.
pub fn short_id(id: &str, len: usize) -> &str {
    id.get(..len).unwrap_or(id)
}

/// Shortest prefix length, at least [`SHORT_ID_LEN`], that tells all `ids`
/// apart. Legacy millisecond ids can share far more than eight digits.
pub fn unique_prefix_len<'a, I>(ids: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ids: Vec<&str> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.windows(2)
        .map(|pair| common_prefix_len(pair[0], pair[1]) + 1)
        .fold(SHORT_ID_LEN, usize::max)
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

/// Display length for ids, computed over every stored task.
pub fn display_id_len(repo: &impl TaskRepository) -> Result<usize> {
    let tasks = repo.load_tasks()?;
    Ok(unique_prefix_len(tasks.iter().map(|t| t.id.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::models::Task;
    use daybook_core::repository::StoreRepository;
    use daybook_core::store::MemoryStore;

    fn repo_with(ids: &[&str]) -> StoreRepository<MemoryStore> {
        let repo = StoreRepository::new(MemoryStore::new());
        let tasks: Vec<Task> = ids
            .iter()
            .map(|id| Task {
                id: id.to_string(),
                title: format!("Task {id}"),
                ..Default::default()
            })
            .collect();
        repo.save_tasks(&tasks).unwrap();
        repo
    }

    fn core_error(err: anyhow::Error) -> CoreError {
        err.downcast::<CoreError>().unwrap()
    }

    #[test]
    fn test_resolves_unique_prefix() {
        let repo = repo_with(&["abc123", "abd456"]);
        assert_eq!(resolve_task_id(&repo, "abc").unwrap(), "abc123");
    }

    #[test]
    fn test_rejects_short_and_ambiguous_prefixes() {
        let repo = repo_with(&["abc123", "abd456"]);
        assert!(matches!(
            core_error(resolve_task_id(&repo, "a").unwrap_err()),
            CoreError::InvalidInput(_)
        ));
        match core_error(resolve_task_id(&repo, "ab").unwrap_err()) {
            CoreError::AmbiguousId(candidates) => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert!(matches!(
            core_error(resolve_task_id(&repo, "zz").unwrap_err()),
            CoreError::NotFound(_)
        ));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef", SHORT_ID_LEN), "01234567");
        assert_eq!(short_id("1712", SHORT_ID_LEN), "1712");
        assert_eq!(short_id("1712345678901", 11), "17123456789");
    }

    #[test]
    fn test_unique_prefix_len() {
        assert_eq!(unique_prefix_len(Vec::<&str>::new()), SHORT_ID_LEN);
        assert_eq!(unique_prefix_len(["0123456789ab", "fedcba987654"]), SHORT_ID_LEN);
        // Millisecond ids from the same day
        assert_eq!(unique_prefix_len(["1712345678901", "1712345699999", "17"]), 9);
        assert_eq!(unique_prefix_len(["1712345678901", "1712345678911"]), 12);
    }

    #[test]
    fn test_displayed_legacy_ids_resolve() {
        let repo = repo_with(&["1712345678901", "1712345699999"]);
        let len = display_id_len(&repo).unwrap();
        for id in ["1712345678901", "1712345699999"] {
            assert_eq!(resolve_task_id(&repo, short_id(id, len)).unwrap(), id);
        }
    }
}
