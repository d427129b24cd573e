use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::Clock;
use crate::error::CoreError;
use crate::repository::{PreferenceRepository, StoreRepository};
use crate::store::{KeyValueStore, DEV_SETTINGS_KEY, FILTER_STATE_KEY, LAST_VISITED_PAGE_KEY};
use crate::views::PriorityFilter;

/// Persisted shape of the filter state, `{"priority":"high"}`.
#[derive(Debug, Serialize, Deserialize)]
struct FilterState {
    priority: PriorityFilter,
}

/// Developer toggles, stored as `{"devModeEnabled":false,"launchToLastSection":true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevSettings {
    pub dev_mode_enabled: bool,
    /// Reopen the last visited page when started without a command
    pub launch_to_last_section: bool,
}

impl Default for DevSettings {
    fn default() -> Self {
        Self {
            dev_mode_enabled: false,
            launch_to_last_section: true,
        }
    }
}

impl<S: KeyValueStore, C: Clock> PreferenceRepository for StoreRepository<S, C> {
    fn load_filter(&self) -> Result<Option<PriorityFilter>, CoreError> {
        let Some(raw) = self.read_key(FILTER_STATE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<FilterState>(&raw) {
            Ok(state) => Ok(Some(state.priority)),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable filter state");
                Ok(None)
            }
        }
    }

    fn save_filter(&self, filter: PriorityFilter) -> Result<(), CoreError> {
        let json = serde_json::to_string(&FilterState { priority: filter })?;
        self.write_key(FILTER_STATE_KEY, &json)
    }

    fn last_visited_page(&self) -> Result<Option<String>, CoreError> {
        Ok(self
            .read_key(LAST_VISITED_PAGE_KEY)?
            .map(|page| page.trim().to_string())
            .filter(|page| !page.is_empty()))
    }

    fn set_last_visited_page(&self, page: &str) -> Result<(), CoreError> {
        self.write_key(LAST_VISITED_PAGE_KEY, page.trim())
    }

    fn dev_settings(&self) -> Result<DevSettings, CoreError> {
        let Some(raw) = self.read_key(DEV_SETTINGS_KEY)? else {
            return Ok(DevSettings::default());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable dev settings");
            DevSettings::default()
        }))
    }

    fn save_dev_settings(&self, settings: &DevSettings) -> Result<(), CoreError> {
        let json = serde_json::to_string(settings)?;
        self.write_key(DEV_SETTINGS_KEY, &json)
    }
}
