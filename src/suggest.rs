use crate::data::filter::{text_matches, TextMatch};
use crate::data::model::Resource;

/// Autocomplete candidates: names containing `input`, in dataset order.
pub fn suggest_names<'a>(resources: &'a [Resource], input: &str, limit: usize) -> Vec<&'a str> {
    let needle = input.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    resources
        .iter()
        .filter(|r| text_matches(&r.name, &needle, TextMatch::Contains))
        .map(|r| r.name.as_str())
        .take(limit)
        .collect()
}

pub fn default_suggestions() -> Vec<String> {
    ["COVID", "Cancer", "ALS", "Diabetes", "Palliative", "Child Health"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Fixed quick-search bubbles, at most one selected.
#[derive(Debug, Clone, Default)]
pub struct SuggestionBubbles {
    items: Vec<String>,
    selected: Option<usize>,
}

impl SuggestionBubbles {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Clicking the selected bubble clears the search; clicking another one
    /// replaces the search text with its lower-cased label.
    pub fn click(&mut self, index: usize, search_text: &mut String) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        if self.selected == Some(index) {
            search_text.clear();
            self.selected = None;
        } else {
            *search_text = item.to_ascii_lowercase();
            self.selected = Some(index);
        }
    }

    /// Re-derive the selection after the user typed into the search box.
    pub fn sync(&mut self, search_text: &str) {
        let typed = search_text.to_ascii_lowercase();
        self.selected = self
            .items
            .iter()
            .position(|item| item.to_ascii_lowercase() == typed);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_matching_names_in_order() {
        let data = vec![
            Resource::new("Cancer Care North", "", "", ""),
            Resource::new("Diabetes Hub", "", "", ""),
            Resource::new("Kids Cancer Fund", "", "", ""),
        ];
        assert_eq!(
            suggest_names(&data, "cancer", 8),
            vec!["Cancer Care North", "Kids Cancer Fund"]
        );
        assert_eq!(suggest_names(&data, "cancer", 1), vec!["Cancer Care North"]);
        assert!(suggest_names(&data, "  ", 8).is_empty());
    }

    #[test]
    fn click_selects_then_deselects() {
        let mut bubbles = SuggestionBubbles::new(default_suggestions());
        let mut text = String::from("something");

        bubbles.click(1, &mut text);
        assert_eq!(text, "cancer");
        assert_eq!(bubbles.selected(), Some(1));

        bubbles.click(5, &mut text);
        assert_eq!(text, "child health");
        assert_eq!(bubbles.selected(), Some(5));

        bubbles.click(5, &mut text);
        assert!(text.is_empty());
        assert_eq!(bubbles.selected(), None);
    }

    #[test]
    fn sync_follows_typing() {
        let mut bubbles = SuggestionBubbles::new(default_suggestions());
        bubbles.sync("Diabetes");
        assert_eq!(bubbles.selected(), Some(3));
        bubbles.sync("diab");
        assert_eq!(bubbles.selected(), None);
    }

    #[test]
    fn out_of_range_click_is_ignored() {
        let mut bubbles = SuggestionBubbles::new(Vec::new());
        let mut text = String::from("keep");
        bubbles.click(3, &mut text);
        assert_eq!(text, "keep");
    }
}
