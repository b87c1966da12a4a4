//! Configuration schema definitions.
//!
//! This module defines the dashboard document: application categories,
//! bookmark groups and search shortcuts. All types derive Serde traits so the
//! same values deserialize from the config file and serialize into the page
//! template.
//!
//! Order of every list is display order and is kept exactly as written.
//! Names are not required to be unique.

use serde::{Deserialize, Serialize};

/// Root of the dashboard configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Application tiles, grouped by category.
    pub app_categories: Vec<AppCategory>,

    /// Plain link lists.
    pub bookmark_groups: Vec<BookmarkGroup>,

    /// Search shortcuts. The first entry is the default search.
    #[serde(rename = "search")]
    pub searches: Vec<SearchShortcut>,
}

impl DashboardConfig {
    /// Total number of application entries across all categories.
    pub fn app_count(&self) -> usize {
        self.app_categories.iter().map(|c| c.apps.len()).sum()
    }

    /// Total number of bookmarks across all groups.
    pub fn bookmark_count(&self) -> usize {
        self.bookmark_groups.iter().map(|g| g.bookmarks.len()).sum()
    }
}

/// A named group of applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppCategory {
    pub name: String,
    pub apps: Vec<App>,
}

/// A single application tile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct App {
    pub name: String,

    /// Link target.
    pub url: String,

    /// Text shown under the name instead of `url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,

    /// Icon markup (inline SVG or `<img>`), rendered unescaped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A named list of bookmarks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BookmarkGroup {
    pub name: String,
    pub bookmarks: Vec<Bookmark>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Bookmark {
    pub name: String,
    pub url: String,
}

/// A search engine reachable from the search box.
///
/// Typing `<prefix> <query>` sends `query` to `url`; the query is appended
/// to the URL template verbatim after encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchShortcut {
    pub name: String,
    pub url: String,
    pub prefix: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_default_to_empty() {
        let config: DashboardConfig = serde_yaml::from_str("app_categories: []\n").unwrap();
        assert!(config.app_categories.is_empty());
        assert!(config.bookmark_groups.is_empty());
        assert!(config.searches.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored_and_order_kept() {
        let yaml = r#"
theme: dark
app_categories:
  - name: Media
    apps:
      - name: Zulu
        url: http://z.local
        color: red
      - name: Alpha
        url: http://a.local
      - name: Alpha
        url: http://a2.local
"#;
        let config: DashboardConfig = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<_> = config.app_categories[0]
            .apps
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "Alpha"]);
        assert_eq!(config.app_categories[0].apps[0].display_url, None);
        assert_eq!(config.app_count(), 3);
    }

    #[test]
    fn test_search_key_is_singular() {
        let yaml = r#"
search:
  - name: DuckDuckGo
    url: "https://duckduckgo.com/?q="
    prefix: d
"#;
        let config: DashboardConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.searches.len(), 1);
        assert_eq!(config.searches[0].prefix, "d");

        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("search").is_some());
    }
}
