//! Page template compilation and rendering.
//!
//! # Data Flow
//! ```text
//! TemplateSource (embedded or file override)
//!     → PageTemplate::compile (read + parse + register helpers)
//!     → published next to the config in a reload::Snapshot
//!     → PageTemplate::render(&DashboardConfig) per request
//! ```
//!
//! # Design Decisions
//! - The override file is re-read on every compile, so template edits are
//!   picked up by the next configuration reload
//! - A compiled template is immutable; a recompile builds a new registry

pub mod helpers;

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;

use crate::config::DashboardConfig;

/// Name of the override template inside a static directory.
pub const TEMPLATE_FILE_NAME: &str = "index.html.hbs";

/// Embedded page template.
pub const EMBEDDED_TEMPLATE: &str = include_str!("assets/index.html.hbs");

/// Embedded stylesheet served at `/static/css/apps.css`.
pub const EMBEDDED_CSS: &str = include_str!("assets/apps.css");

/// Embedded script served at `/static/js/apps.js`.
pub const EMBEDDED_JS: &str = include_str!("assets/apps.js");

const TEMPLATE_NAME: &str = "index";

/// Error type for template compilation and rendering.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile template {origin}: {source}")]
    Compile {
        origin: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Where the page template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template compiled into the binary.
    Embedded,
    /// A template file on disk.
    File(PathBuf),
}

impl TemplateSource {
    /// Use `dir/index.html.hbs` when a static directory is given.
    pub fn from_static_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => TemplateSource::File(dir.join(TEMPLATE_FILE_NAME)),
            None => TemplateSource::Embedded,
        }
    }

    fn describe(&self) -> String {
        match self {
            TemplateSource::Embedded => "embedded".to_string(),
            TemplateSource::File(path) => path.display().to_string(),
        }
    }
}

/// A compiled, render-ready page template.
pub struct PageTemplate {
    registry: Handlebars<'static>,
    origin: String,
}

impl std::fmt::Debug for PageTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageTemplate")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl PageTemplate {
    /// Read and compile the template from `source`.
    pub fn compile(source: &TemplateSource) -> Result<Self, TemplateError> {
        match source {
            TemplateSource::Embedded => {
                tracing::debug!("Compiling embedded template");
                Self::from_source(source.describe(), EMBEDDED_TEMPLATE)
            }
            TemplateSource::File(path) => {
                tracing::debug!(path = %path.display(), "Compiling template file");
                let text = fs::read_to_string(path).map_err(|source| TemplateError::Read {
                    path: path.clone(),
                    source,
                })?;
                Self::from_source(source.describe(), &text)
            }
        }
    }

    /// Compile template text directly. `origin` labels the template in logs.
    pub fn from_source(origin: impl Into<String>, text: &str) -> Result<Self, TemplateError> {
        let origin = origin.into();
        let mut registry = Handlebars::new();
        helpers::register(&mut registry);
        registry
            .register_template_string(TEMPLATE_NAME, text)
            .map_err(|e| TemplateError::Compile {
                origin: origin.clone(),
                source: Box::new(e),
            })?;

        Ok(Self { registry, origin })
    }

    /// Render the page for `config`.
    pub fn render(&self, config: &DashboardConfig) -> Result<String, TemplateError> {
        Ok(self.registry.render(TEMPLATE_NAME, config)?)
    }

    /// Where this template was compiled from.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}
