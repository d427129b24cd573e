//! Export and import of the full data set as a single JSON document.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CoreError;
use crate::migration::{migrate, LegacyTask};
use crate::models::Task;
use crate::repository::Repository;

/// Exported document, `{"lastVisitedPage": ..., "tasks": [...]}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub last_visited_page: Option<String>,
    pub tasks: Vec<Task>,
}

/// Import side of [`Backup`]. Task records go through migration so exports
/// from older versions still load.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingBackup {
    #[serde(default)]
    last_visited_page: Option<String>,
    tasks: Vec<LegacyTask>,
}

/// Serializes every stored task and the last visited page as pretty JSON.
pub fn export<R: Repository + ?Sized>(repo: &R) -> Result<String, CoreError> {
    let backup = Backup {
        last_visited_page: repo.last_visited_page()?,
        tasks: repo.load_tasks()?,
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Replaces the stored tasks with those in `json` and restores the last
/// visited page when the document carries one. Returns the number of tasks
/// imported.
///
/// Nothing is written unless the whole document parses.
pub fn import<R: Repository + ?Sized>(repo: &R, json: &str) -> Result<usize, CoreError> {
    let incoming: IncomingBackup = serde_json::from_str(json)?;
    let migration = migrate(incoming.tasks);

    repo.save_tasks(&migration.tasks)?;
    if let Some(page) = incoming.last_visited_page.as_deref().filter(|p| !p.trim().is_empty()) {
        repo.set_last_visited_page(page)?;
    }

    info!(
        tasks = migration.tasks.len(),
        migrated = migration.changed,
        "imported backup"
    );
    Ok(migration.tasks.len())
}
