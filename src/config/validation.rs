//! Configuration linting.
//!
//! # Responsibilities
//! - Semantic checks serde cannot express (URLs parse, names present)
//! - Report every finding, not just the first
//!
//! # Design Decisions
//! - Findings are warnings: a document that parses is always accepted
//! - Pure function: DashboardConfig → Vec<ValidationWarning>

use std::fmt;

use url::Url;

use crate::config::schema::DashboardConfig;

/// A non-fatal problem found in an otherwise well-formed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Dotted location, e.g. `app_categories[0].apps[2]`.
    pub location: String,
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Lint a parsed configuration.
pub fn lint_config(config: &DashboardConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (ci, category) in config.app_categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            warnings.push(warning(format!("app_categories[{ci}]"), "category has no name"));
        }
        for (ai, app) in category.apps.iter().enumerate() {
            let location = format!("app_categories[{ci}].apps[{ai}]");
            if app.name.trim().is_empty() {
                warnings.push(warning(location.clone(), "app has no name"));
            }
            check_url(&mut warnings, location, &app.url);
        }
    }

    for (gi, group) in config.bookmark_groups.iter().enumerate() {
        for (bi, bookmark) in group.bookmarks.iter().enumerate() {
            check_url(
                &mut warnings,
                format!("bookmark_groups[{gi}].bookmarks[{bi}]"),
                &bookmark.url,
            );
        }
    }

    for (si, search) in config.searches.iter().enumerate() {
        let location = format!("search[{si}]");
        check_url(&mut warnings, location.clone(), &search.url);
        // Only the first shortcut is reachable without a prefix.
        if si > 0 && search.prefix.trim().is_empty() {
            warnings.push(warning(location, "search shortcut has no prefix and is unreachable"));
        }
    }

    warnings
}

fn check_url(warnings: &mut Vec<ValidationWarning>, location: String, raw: &str) {
    if raw.trim().is_empty() {
        warnings.push(warning(location, "url is empty"));
    } else if let Err(e) = Url::parse(raw) {
        warnings.push(warning(location, format!("url {raw:?} does not parse: {e}")));
    }
}

fn warning(location: String, message: impl Into<String>) -> ValidationWarning {
    ValidationWarning {
        location,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{App, AppCategory, SearchShortcut};

    #[test]
    fn test_clean_config_has_no_warnings() {
        let config = DashboardConfig {
            app_categories: vec![AppCategory {
                name: "Dev Tools".into(),
                apps: vec![App {
                    name: "Git".into(),
                    url: "http://git.local".into(),
                    ..Default::default()
                }],
            }],
            ..Default::default()
        };
        assert!(lint_config(&config).is_empty());
    }

    #[test]
    fn test_reports_all_findings() {
        let config = DashboardConfig {
            app_categories: vec![AppCategory {
                name: "".into(),
                apps: vec![App {
                    name: "Broken".into(),
                    url: "not a url".into(),
                    ..Default::default()
                }],
            }],
            searches: vec![
                SearchShortcut {
                    name: "Default".into(),
                    url: "https://duckduckgo.com/?q=".into(),
                    prefix: "".into(),
                },
                SearchShortcut {
                    name: "Hidden".into(),
                    url: "https://example.com/?q=".into(),
                    prefix: " ".into(),
                },
            ],
            ..Default::default()
        };

        let warnings = lint_config(&config);
        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0].location, "app_categories[0]");
        assert_eq!(warnings[1].location, "app_categories[0].apps[0]");
        assert_eq!(warnings[2].location, "search[1]");
    }
}
