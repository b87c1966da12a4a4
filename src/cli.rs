//! Command-line interface definitions.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::ServerSettings;
use crate::observability::logging::LogFormat;
use crate::reload::ReloadSettings;
use crate::template::TemplateSource;

/// Personal dashboard server with live configuration reloading.
#[derive(Parser, Debug)]
#[command(name = "dashboard", version, about, long_about = None)]
pub struct Cli {
    /// IP and port to listen on.
    #[arg(long, default_value = "127.0.0.1:8080", env = "DASHBOARD_LISTEN")]
    pub listen: SocketAddr,

    /// Serve /static and the page template (index.html.hbs) from this directory.
    #[arg(long = "static", value_name = "DIR", env = "DASHBOARD_STATIC")]
    pub static_dir: Option<PathBuf>,

    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.yaml", env = "DASHBOARD_CONFIG")]
    pub config: PathBuf,

    /// Quiet period before a burst of file events triggers a reload.
    #[arg(long, default_value_t = 100, value_name = "MS")]
    pub debounce_ms: u64,

    /// Delay between attempts to re-watch a vanished config file.
    #[arg(long, default_value_t = 5, value_name = "SECS")]
    pub resubscribe_secs: u64,

    /// Grace period for in-flight requests on shutdown.
    #[arg(long, default_value_t = 5, value_name = "SECS")]
    pub shutdown_grace_secs: u64,

    /// How long to wait for the config watcher to stop on shutdown.
    #[arg(long, default_value_t = 1, value_name = "SECS")]
    pub watcher_grace_secs: u64,

    /// Per-request timeout.
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    pub request_timeout_secs: u64,

    /// Expose Prometheus metrics on this address.
    #[arg(long, value_name = "ADDR", env = "DASHBOARD_METRICS_LISTEN")]
    pub metrics_listen: Option<SocketAddr>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Load the config and template, report problems, and exit.
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    pub fn template_source(&self) -> TemplateSource {
        TemplateSource::from_static_dir(self.static_dir.as_deref())
    }

    pub fn reload_settings(&self) -> ReloadSettings {
        ReloadSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            resubscribe_delay: Duration::from_secs(self.resubscribe_secs),
        }
    }

    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings {
            static_dir: self.static_dir.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    pub fn watcher_grace(&self) -> Duration {
        Duration::from_secs(self.watcher_grace_secs)
    }
}
