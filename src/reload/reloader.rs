//! The reload action: load → compile → swap.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{load_config, ConfigError};
use crate::observability::metrics;
use crate::reload::event::ReloadTrigger;
use crate::reload::store::ConfigStore;
use crate::template::{PageTemplate, TemplateError, TemplateSource};

/// Work performed once per debounced trigger.
///
/// Implementations must not panic; failures are handled internally.
pub trait ReloadAction: Send {
    fn reload(&mut self, trigger: ReloadTrigger);
}

/// Error type for a single reload attempt.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Reloads the configuration document and template into a [`ConfigStore`].
///
/// Both are rebuilt before anything is published; if either fails the
/// store keeps its previous snapshot untouched.
pub struct StoreReloader {
    config_path: PathBuf,
    template: TemplateSource,
    store: Arc<ConfigStore>,
}

impl StoreReloader {
    pub fn new(config_path: &Path, template: TemplateSource, store: Arc<ConfigStore>) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            template,
            store,
        }
    }

    /// Attempt a reload, returning the published version.
    pub fn try_reload(&self) -> Result<u64, ReloadError> {
        let config = load_config(&self.config_path)?;
        let template = PageTemplate::compile(&self.template)?;
        let categories = config.app_categories.len();
        let apps = config.app_count();

        let version = self.store.swap(config, template);
        tracing::info!(
            version,
            categories,
            apps,
            "Configuration published"
        );
        Ok(version)
    }
}

impl ReloadAction for StoreReloader {
    fn reload(&mut self, trigger: ReloadTrigger) {
        tracing::info!(
            path = %self.config_path.display(),
            trigger = %trigger,
            "Reloading configuration"
        );

        match self.try_reload() {
            Ok(version) => metrics::record_reload_success(version),
            Err(e) => {
                tracing::error!(
                    path = %self.config_path.display(),
                    error = %e,
                    version = self.store.version(),
                    "Reload failed; keeping current configuration"
                );
                metrics::record_reload_failure(&e);
            }
        }
    }
}
