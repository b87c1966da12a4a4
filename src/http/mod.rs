//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → GET /        → ConfigStore::read() → PageTemplate::render
//!     → GET /static  → embedded assets or ServeDir
//!     → GET /health  → published version
//! ```
//!
//! Handlers only read snapshots; they never touch the reload path.

pub mod server;

pub use server::{AppState, HttpServer, ServerSettings};
