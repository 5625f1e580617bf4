use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::model::{FacetCategory, Resource};

// ---------------------------------------------------------------------------
// Matching primitive
// ---------------------------------------------------------------------------

/// How a lower-cased needle is compared against a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    Contains,
    Prefix,
}

/// ASCII case-insensitive match. `needle` must already be lower-cased.
pub fn text_matches(haystack: &str, needle: &str, how: TextMatch) -> bool {
    let haystack = haystack.to_ascii_lowercase();
    match how {
        TextMatch::Contains => haystack.contains(needle),
        TextMatch::Prefix => haystack.starts_with(needle),
    }
}

// ---------------------------------------------------------------------------
// Selection cardinality per category
// ---------------------------------------------------------------------------

/// Whether selecting a value in a category replaces or accumulates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Selecting a value clears the other values of the category.
    #[default]
    Single,
    /// Values accumulate and are OR-combined.
    Multi,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionModes {
    pub region: SelectionMode,
    pub cost: SelectionMode,
    pub modality: SelectionMode,
}

impl SelectionModes {
    /// Same mode for every category.
    pub fn uniform(mode: SelectionMode) -> Self {
        Self {
            region: mode,
            cost: mode,
            modality: mode,
        }
    }

    pub fn get(&self, category: FacetCategory) -> SelectionMode {
        match category {
            FacetCategory::Region => self.region,
            FacetCategory::Cost => self.cost,
            FacetCategory::Modality => self.modality,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Per-category selection: category → set of selected values.
/// An absent or empty set means "no constraint" for that category.
pub type FacetSelection = BTreeMap<FacetCategory, BTreeSet<String>>;

/// The user's current search and filter criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text query, bound directly to the search box.
    pub search_text: String,
    selected_condition: Option<String>,
    selected: FacetSelection,
    modes: SelectionModes,
    search_tags: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(SelectionModes::default(), true)
    }
}

impl FilterState {
    pub fn new(modes: SelectionModes, search_tags: bool) -> Self {
        Self {
            search_text: String::new(),
            selected_condition: None,
            selected: FacetSelection::new(),
            modes,
            search_tags,
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Select a condition, or clear it with `None`. A blank value clears too.
    pub fn set_condition(&mut self, condition: Option<String>) {
        self.selected_condition = condition.filter(|c| !c.trim().is_empty());
    }

    pub fn selected_condition(&self) -> Option<&str> {
        self.selected_condition.as_deref()
    }

    /// Flip `value` in `category`, honouring the category's selection mode.
    pub fn toggle_facet(&mut self, category: FacetCategory, value: &str) {
        let mode = self.modes.get(category);
        let selected = self.selected.entry(category).or_default();
        if selected.remove(value) {
            return;
        }
        if mode == SelectionMode::Single {
            selected.clear();
        }
        selected.insert(value.to_string());
    }

    pub fn is_selected(&self, category: FacetCategory, value: &str) -> bool {
        self.selected
            .get(&category)
            .is_some_and(|set| set.contains(value))
    }

    pub fn selected_values(&self, category: FacetCategory) -> Vec<&str> {
        self.selected
            .get(&category)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn mode(&self, category: FacetCategory) -> SelectionMode {
        self.modes.get(category)
    }

    pub fn searches_tags(&self) -> bool {
        self.search_tags
    }

    /// Reset every criterion. Modes and tag searching are configuration and
    /// survive.
    pub fn clear(&mut self) {
        self.search_text.clear();
        self.selected_condition = None;
        self.selected.clear();
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.query().is_empty()
            && self.selected_condition.is_none()
            && self.selected.values().all(BTreeSet::is_empty)
    }

    /// Trimmed, lower-cased search text.
    fn query(&self) -> String {
        self.search_text.trim().to_ascii_lowercase()
    }

    fn matches(&self, resource: &Resource, query: &str) -> bool {
        if !query.is_empty() {
            let in_name = text_matches(&resource.name, query, TextMatch::Contains);
            let in_tags =
                self.search_tags && text_matches(&resource.tags, query, TextMatch::Contains);
            if !in_name && !in_tags {
                return false;
            }
        }

        // Substring of the raw field, so "Cancer" also matches "Skin Cancers".
        if let Some(condition) = &self.selected_condition {
            if !resource.conditions.contains(condition.as_str()) {
                return false;
            }
        }

        for (category, selected) in &self.selected {
            if selected.is_empty() {
                continue;
            }
            let value = resource.facet_value(*category);
            if value.is_empty() || !selected.contains(value) {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Indices of resources passing every active criterion, in original order.
pub fn filtered_indices(resources: &[Resource], state: &FilterState) -> Vec<usize> {
    let query = state.query();
    resources
        .iter()
        .enumerate()
        .filter(|(_, r)| state.matches(r, &query))
        .map(|(i, _)| i)
        .collect()
}

/// The matching resources themselves, in original order.
pub fn apply<'a>(resources: &'a [Resource], state: &FilterState) -> Vec<&'a Resource> {
    filtered_indices(resources, state)
        .into_iter()
        .map(|i| &resources[i])
        .collect()
}

// ---------------------------------------------------------------------------
// Alphabetical index
// ---------------------------------------------------------------------------

/// Indices of resources whose name starts with `letter` (case-insensitive).
/// `None` leaves the view unfiltered.
pub fn letter_indices(resources: &[Resource], letter: Option<char>) -> Vec<usize> {
    let Some(letter) = letter else {
        return (0..resources.len()).collect();
    };
    let needle = letter.to_ascii_lowercase().to_string();
    resources
        .iter()
        .enumerate()
        .filter(|(_, r)| text_matches(&r.name, &needle, TextMatch::Prefix))
        .map(|(i, _)| i)
        .collect()
}

pub fn by_letter(resources: &[Resource], letter: Option<char>) -> Vec<&Resource> {
    letter_indices(resources, letter)
        .into_iter()
        .map(|i| &resources[i])
        .collect()
}

/// Distinct upper-case initials present in the dataset.
pub fn available_letters(resources: &[Resource]) -> Vec<char> {
    resources
        .iter()
        .filter_map(|r| r.name.chars().next())
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
