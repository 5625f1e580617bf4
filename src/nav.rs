//! Navigation routes and back/forward history.
//!
//! A route is written as a small query-style location (`alphabet?letter=B`,
//! `resource?name=Alpha+Clinic`) so it can be passed on the command line and
//! kept in history.

use url::form_urlencoded;

use crate::data::model::Resource;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Browse,
    List,
    Search,
    Alphabet {
        letter: Option<char>,
    },
    Detail {
        name: String,
    },
}

impl Route {
    pub fn detail(name: impl Into<String>) -> Self {
        Route::Detail { name: name.into() }
    }

    pub fn to_location(&self) -> String {
        match self {
            Route::Browse => "browse".to_string(),
            Route::List => "list".to_string(),
            Route::Search => "search".to_string(),
            Route::Alphabet { letter: None } => "alphabet".to_string(),
            Route::Alphabet {
                letter: Some(letter),
            } => format!("alphabet?letter={letter}"),
            Route::Detail { name } => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("name", name)
                    .finish();
                format!("resource?{query}")
            }
        }
    }

    /// Parse a location. Unknown pages give `None`; a detail location with no
    /// name resolves to an empty name, which the detail view reports as not
    /// found.
    pub fn from_location(location: &str) -> Option<Route> {
        let location = location.trim().trim_start_matches('/');
        let (page, query) = location.split_once('?').unwrap_or((location, ""));
        let param = |key: &str| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        };

        match page.trim_end_matches(".html") {
            "" | "browse" | "index" => Some(Route::Browse),
            "list" => Some(Route::List),
            "search" => Some(Route::Search),
            "alphabet" => {
                let letter = param("letter")
                    .and_then(|v| v.trim().chars().next())
                    .filter(char::is_ascii_alphabetic)
                    .map(|c| c.to_ascii_uppercase());
                Some(Route::Alphabet { letter })
            }
            "resource" => {
                let name = param("name").unwrap_or_default();
                Some(Route::detail(name.trim()))
            }
            _ => None,
        }
    }
}

/// Exact lookup by name, both sides trimmed. First match wins.
pub fn find_by_name<'a>(resources: &'a [Resource], name: &str) -> Option<&'a Resource> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    resources.iter().find(|r| r.name.trim() == name)
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Linear back/forward history, like a browser tab.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Route>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Route {
        &self.entries[self.cursor]
    }

    /// Navigate to `route`, dropping any forward entries. Re-visiting the
    /// current route is a no-op.
    pub fn push(&mut self, route: Route) {
        if *self.current() == route {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(route);
        self.cursor += 1;
    }

    pub fn back(&mut self) -> Option<&Route> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Route> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_location_escapes_name() {
        let route = Route::detail("Kids & Teens Care");
        let location = route.to_location();
        assert!(!location.contains(" & "));
        assert_eq!(Route::from_location(&location), Some(route));
    }

    #[test]
    fn detail_location_decodes_percent_escapes_and_trims() {
        assert_eq!(
            Route::from_location("resource.html?name=%20Alpha%20Clinic%20"),
            Some(Route::detail("Alpha Clinic"))
        );
    }

    #[test]
    fn alphabet_letter_is_uppercased() {
        assert_eq!(
            Route::from_location("alphabet?letter=b"),
            Some(Route::Alphabet { letter: Some('B') })
        );
        assert_eq!(
            Route::from_location("alphabet?letter=7"),
            Some(Route::Alphabet { letter: None })
        );
        assert_eq!(
            Route::Alphabet { letter: Some('C') }.to_location(),
            "alphabet?letter=C"
        );
    }

    #[test]
    fn unknown_page_is_none() {
        assert_eq!(Route::from_location("about"), None);
        assert_eq!(Route::from_location(""), Some(Route::Browse));
    }

    #[test]
    fn find_by_name_trims_and_takes_first() {
        let mut first = Resource::new("Alpha Clinic", "", "North", "");
        first.phone = "1".into();
        let mut dup = Resource::new("Alpha Clinic", "", "South", "");
        dup.phone = "2".into();
        let data = vec![first, dup];

        let found = find_by_name(&data, "  Alpha Clinic ").unwrap();
        assert_eq!(found.phone, "1");
        assert!(find_by_name(&data, "Alpha").is_none());
        assert!(find_by_name(&data, "").is_none());
    }

    #[test]
    fn history_restores_alphabet_letter() {
        let mut history = History::new(Route::Alphabet { letter: None });
        history.push(Route::Alphabet { letter: Some('A') });
        history.push(Route::Alphabet { letter: Some('D') });

        assert_eq!(
            history.back(),
            Some(&Route::Alphabet { letter: Some('A') })
        );
        assert_eq!(history.back(), Some(&Route::Alphabet { letter: None }));
        assert_eq!(history.back(), None);
        assert_eq!(
            history.forward(),
            Some(&Route::Alphabet { letter: Some('A') })
        );
    }

    #[test]
    fn push_drops_forward_entries() {
        let mut history = History::default();
        history.push(Route::List);
        history.push(Route::Search);
        history.back();
        history.push(Route::detail("X"));
        assert!(!history.can_go_forward());
        assert_eq!(history.back(), Some(&Route::List));
    }

    #[test]
    fn push_same_route_is_noop() {
        let mut history = History::default();
        history.push(Route::Browse);
        assert!(!history.can_go_back());
    }
}
