//! Personal dashboard server.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.yaml ──notify──▶ reload::monitor ──debounce──▶ reload::reloader
//!                                 ▲                         │ load + compile
//!                                 │ shutdown                ▼
//!                           lifecycle::shutdown      reload::ConfigStore (ArcSwap)
//!                                                           │ read()
//!   Browser ◀──────────── http::server ◀────────────────────┘
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use dashboard::cli::Cli;
use dashboard::config::load_config;
use dashboard::http::HttpServer;
use dashboard::lifecycle::{self, Shutdown};
use dashboard::observability::{logging, metrics};
use dashboard::reload::{ConfigStore, NotifyBackend, StoreReloader, WatchMonitor};
use dashboard::template::PageTemplate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "dashboard starting");

    // Startup loads are fatal: never serve without a config and template.
    let config = load_config(&cli.config)?;
    tracing::info!(
        path = %cli.config.display(),
        categories = config.app_categories.len(),
        apps = config.app_count(),
        bookmarks = config.bookmark_count(),
        searches = config.searches.len(),
        "Configuration loaded"
    );

    let template_source = cli.template_source();
    let template = PageTemplate::compile(&template_source)?;
    tracing::info!(template = template.origin(), "Template compiled");

    if cli.check {
        tracing::info!("Configuration and template are valid");
        return Ok(());
    }

    if let Some(addr) = cli.metrics_listen {
        metrics::init_metrics(addr);
    }

    let store = Arc::new(ConfigStore::new(config, template));
    let shutdown = Shutdown::new();

    // Config watcher
    let (backend, events) = NotifyBackend::new()?;
    let reloader = StoreReloader::new(&cli.config, template_source, store.clone());
    let monitor = WatchMonitor::new(&cli.config, backend, events, reloader, cli.reload_settings());
    let watcher_task = tokio::spawn(monitor.run(shutdown.subscribe()));

    // HTTP server
    let listener = TcpListener::bind(cli.listen).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening on http://{}", cli.listen);
    let server = HttpServer::new(store, &cli.server_settings());
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    lifecycle::signals::termination().await;
    tracing::info!("Shutting down server...");
    shutdown.trigger();

    lifecycle::drain("http server", server_task, cli.shutdown_grace()).await;
    lifecycle::drain("config watcher", watcher_task, cli.watcher_grace()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
