use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::{FilterState, SelectionModes};
use crate::suggest::default_suggestions;

const APP_DIR: &str = "care-directory";
const CONFIG_FILENAME: &str = "config.json";

/// Settings read from `config.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset opened at start-up.
    pub dataset: Option<PathBuf>,
    /// Quiet period before the browse view re-filters on typing.
    pub debounce_ms: u64,
    /// Whether text search also looks at the tags column.
    pub search_tags: bool,
    /// Single- or multi-select per facet category.
    pub selection: SelectionModes,
    /// Quick-search bubbles on the search view.
    pub suggestions: Vec<String>,
    /// Max autocomplete entries under the search box.
    pub suggestion_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            debounce_ms: 300,
            search_tags: true,
            selection: SelectionModes::default(),
            suggestions: default_suggestions(),
            suggestion_limit: 8,
        }
    }
}

impl AppConfig {
    /// `<config dir>/care-directory/config.json`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// An explicit path must load. Otherwise the default location is used if
    /// present, and built-in defaults if not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("Using config {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("serializing config")?;
        fs::write(path, content).with_context(|| format!("writing config {}", path.display()))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// An empty filter state carrying this configuration's modes.
    pub fn filter_state(&self) -> FilterState {
        FilterState::new(self.selection, self.search_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::SelectionMode;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert!(config.search_tags);
        assert_eq!(config.selection, SelectionModes::uniform(SelectionMode::Single));
        assert_eq!(config.suggestions.len(), 6);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"debounce_ms": 50, "selection": {"region": "multi"}}"#)
                .unwrap();
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.selection.region, SelectionMode::Multi);
        assert_eq!(config.selection.cost, SelectionMode::Single);
        assert_eq!(config.suggestion_limit, 8);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILENAME);

        let config = AppConfig {
            dataset: Some(PathBuf::from("files/resources.csv")),
            search_tags: false,
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
        assert_eq!(AppConfig::resolve(Some(&path)).unwrap(), config);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::resolve(Some(&dir.path().join("nope.json"))).is_err());
    }

    #[test]
    fn filter_state_uses_configured_modes() {
        let config = AppConfig {
            selection: SelectionModes::uniform(SelectionMode::Multi),
            search_tags: false,
            ..Default::default()
        };
        let state = config.filter_state();
        assert!(!state.searches_tags());
        assert_eq!(
            state.mode(crate::data::model::FacetCategory::Cost),
            SelectionMode::Multi
        );
    }
}
