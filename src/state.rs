use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use care_directory::config::AppConfig;
use care_directory::data::filter::{filtered_indices, letter_indices, FilterState};
use care_directory::data::loader;
use care_directory::data::model::{FacetCategory, Resource, ResourceDataset};
use care_directory::debounce::Debouncer;
use care_directory::nav::{find_by_name, History, Route};
use care_directory::suggest::{suggest_names, SuggestionBubbles};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<ResourceDataset>,

    /// Where the dataset came from; image paths are relative to it.
    pub dataset_path: Option<PathBuf>,

    /// Criteria shared by the browse and list views.
    pub filter: FilterState,

    /// Text-only criteria of the search view.
    pub search: FilterState,

    pub bubbles: SuggestionBubbles,

    pub history: History,

    /// Indices of resources shown by the current view (cached).
    pub visible_indices: Vec<usize>,

    /// Region chip colours.
    pub region_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    debouncer: Debouncer,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let search = FilterState::new(config.selection, config.search_tags);
        Self {
            filter: config.filter_state(),
            search,
            bubbles: SuggestionBubbles::new(config.suggestions.clone()),
            debouncer: Debouncer::new(config.debounce()),
            config,
            dataset: None,
            dataset_path: None,
            history: History::default(),
            visible_indices: Vec::new(),
            region_colors: ColorMap::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: ResourceDataset, path: Option<PathBuf>) {
        self.region_colors = ColorMap::new(&dataset.facets.regions);
        self.filter.clear();
        self.search.clear();
        self.bubbles.clear();
        self.debouncer.cancel();

        self.dataset = Some(dataset);
        self.dataset_path = path;
        self.status_message = None;
        self.refilter();
    }

    /// Load `path`. A failure is logged once and leaves the current dataset
    /// untouched.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} resources, {} regions, {} conditions",
                    dataset.len(),
                    dataset.facets.regions.len(),
                    dataset.facets.conditions.len()
                );
                self.set_dataset(dataset, Some(path.to_path_buf()));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn resources(&self) -> &[Resource] {
        self.dataset
            .as_ref()
            .map(|ds| ds.resources.as_slice())
            .unwrap_or_default()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Resource> {
        let resources = self.resources();
        self.visible_indices.iter().filter_map(|&i| resources.get(i))
    }

    // -- navigation --

    pub fn route(&self) -> &Route {
        self.history.current()
    }

    pub fn navigate(&mut self, route: Route) {
        log::debug!("Navigating to {}", route.to_location());
        self.history.push(route);
        self.refilter();
    }

    pub fn go_back(&mut self) {
        if self.history.back().is_some() {
            self.refilter();
        }
    }

    pub fn go_forward(&mut self) {
        if self.history.forward().is_some() {
            self.refilter();
        }
    }

    /// Pick a letter in the alphabet view; it becomes a history entry.
    pub fn select_letter(&mut self, letter: Option<char>) {
        self.navigate(Route::Alphabet {
            letter: letter.map(|c| c.to_ascii_uppercase()),
        });
    }

    /// The resource addressed by the current detail route, if it exists.
    pub fn detail(&self) -> Option<&Resource> {
        match self.route() {
            Route::Detail { name } => find_by_name(self.resources(), name),
            _ => None,
        }
    }

    /// Absolute path of a resource's image, resolved against the dataset.
    pub fn image_path(&self, resource: &Resource) -> Option<PathBuf> {
        let image = resource.image.trim();
        if image.is_empty() {
            return None;
        }
        let base = self
            .dataset_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."));
        Some(base.join(image))
    }

    // -- filter mutations --

    /// The browse view's search box changed; re-filter once typing settles.
    pub fn search_typed(&mut self, now: Instant) {
        self.debouncer.touch(now);
    }

    /// Whether typed text is still waiting for the debounce window.
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Run a pending debounced re-filter. Returns how long until the next
    /// one is due so the caller can schedule a repaint.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        if self.debouncer.poll(now) {
            self.refilter();
        }
        self.debouncer.remaining(now)
    }

    pub fn set_condition(&mut self, condition: Option<String>) {
        self.filter.set_condition(condition);
        self.refilter();
    }

    pub fn toggle_facet(&mut self, category: FacetCategory, value: &str) {
        self.filter.toggle_facet(category, value);
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.debouncer.cancel();
        self.refilter();
    }

    /// The search view's query changed.
    pub fn quick_search_typed(&mut self) {
        self.bubbles.sync(&self.search.search_text);
        self.refilter();
    }

    pub fn click_bubble(&mut self, index: usize) {
        self.bubbles.click(index, &mut self.search.search_text);
        self.refilter();
    }

    pub fn autocomplete(&self) -> Vec<&str> {
        suggest_names(
            self.resources(),
            &self.filter.search_text,
            self.config.suggestion_limit,
        )
    }

    /// Recompute `visible_indices` for the current view.
    pub fn refilter(&mut self) {
        let resources = self.resources();
        let indices = match self.history.current() {
            Route::Browse | Route::List => filtered_indices(resources, &self.filter),
            Route::Search if self.search.search_text.trim().is_empty() => Vec::new(),
            Route::Search => filtered_indices(resources, &self.search),
            Route::Alphabet { letter } => letter_indices(resources, *letter),
            Route::Detail { .. } => Vec::new(),
        };
        self.visible_indices = indices;
    }

    pub fn results_label(&self) -> String {
        if self.visible_indices.is_empty() {
            "No results found.".to_string()
        } else {
            format!("Number of results found: {}", self.visible_indices.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(
            ResourceDataset::from_resources(vec![
                Resource::new("Alpha Clinic", "Diabetes; Cancer", "North", "Free")
                    .with_tags("clinic"),
                Resource::new("Beta Center", "Cancer", "South", "Paid"),
                Resource::new("Cancer Care", "Cancer", "South", "Free"),
            ]),
            Some(PathBuf::from("/data/files/resources.csv")),
        );
        state
    }

    fn visible_names(state: &AppState) -> Vec<&str> {
        state.visible().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn fresh_dataset_shows_everything() {
        let state = loaded();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.results_label(), "Number of results found: 3");
    }

    #[test]
    fn nothing_loaded_means_no_results() {
        let mut state = AppState::default();
        state.filter.set_search_text("alpha");
        state.refilter();
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.results_label(), "No results found.");
    }

    #[test]
    fn debounced_search_applies_after_window() {
        let mut state = loaded();
        let start = Instant::now();
        state.filter.set_search_text("beta");
        state.search_typed(start);

        assert!(state.tick(start).is_some());
        assert!(state.search_pending());
        assert_eq!(state.visible_indices.len(), 3);

        assert_eq!(state.tick(start + state.config.debounce()), None);
        assert!(!state.search_pending());
        assert_eq!(visible_names(&state), vec!["Beta Center"]);
    }

    #[test]
    fn facets_and_clear() {
        let mut state = loaded();
        state.toggle_facet(FacetCategory::Region, "South");
        state.toggle_facet(FacetCategory::Cost, "Free");
        assert_eq!(visible_names(&state), vec!["Cancer Care"]);

        state.clear_filters();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn search_view_is_empty_until_typed() {
        let mut state = loaded();
        state.navigate(Route::Search);
        assert!(state.visible_indices.is_empty());

        state.click_bubble(1);
        assert_eq!(state.search.search_text, "cancer");
        assert_eq!(visible_names(&state), vec!["Cancer Care"]);

        state.search.set_search_text("clinic");
        state.quick_search_typed();
        assert_eq!(visible_names(&state), vec!["Alpha Clinic"]);
        assert_eq!(state.bubbles.selected(), None);
    }

    #[test]
    fn alphabet_back_restores_letter() {
        let mut state = loaded();
        state.navigate(Route::Alphabet { letter: None });
        state.select_letter(Some('b'));
        assert_eq!(visible_names(&state), vec!["Beta Center"]);
        state.select_letter(Some('C'));
        assert_eq!(visible_names(&state), vec!["Cancer Care"]);

        state.go_back();
        assert_eq!(state.route(), &Route::Alphabet { letter: Some('B') });
        assert_eq!(visible_names(&state), vec!["Beta Center"]);

        state.go_back();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);

        state.go_forward();
        assert_eq!(visible_names(&state), vec!["Beta Center"]);
    }

    #[test]
    fn detail_lookup_and_not_found() {
        let mut state = loaded();
        state.navigate(Route::detail(" Beta Center "));
        assert_eq!(state.detail().map(|r| r.region.as_str()), Some("South"));

        state.navigate(Route::detail("Gamma"));
        assert!(state.detail().is_none());
    }

    #[test]
    fn images_resolve_next_to_dataset() {
        let state = loaded();
        let mut r = Resource::new("A", "", "", "");
        assert_eq!(state.image_path(&r), None);
        r.image = "img/a.png".into();
        assert_eq!(
            state.image_path(&r),
            Some(PathBuf::from("/data/files/img/a.png"))
        );
    }

    #[test]
    fn failed_load_keeps_state_and_reports() {
        let mut state = loaded();
        state.load_path(Path::new("/no/such/file.csv"));
        assert_eq!(state.resources().len(), 3);
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error:")));
    }

    #[test]
    fn autocomplete_uses_browse_search_text() {
        let mut state = loaded();
        state.filter.set_search_text("c");
        assert_eq!(
            state.autocomplete(),
            vec!["Alpha Clinic", "Beta Center", "Cancer Care"]
        );
    }
}
