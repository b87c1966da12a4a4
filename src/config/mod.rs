//! Dashboard configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML/TOML/JSON)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (lint, warnings only)
//!     → DashboardConfig (immutable once published)
//!     → reload::ConfigStore snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - All fields have defaults so partial documents are accepted
//! - A failed parse never produces a value; callers keep what they had

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, Format};
pub use schema::{App, AppCategory, Bookmark, BookmarkGroup, DashboardConfig, SearchShortcut};
