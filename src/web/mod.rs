//! Web front end for boxforge
//!
//! Serves the generator menu, synthesizes argument forms from each
//! generator's declared parameters, and streams rendered documents back as
//! downloads.
//!
//! # Features
//!
//! - Menu of all visible generators, grouped and filterable
//! - HTML forms generated from argument declarations, localized
//! - GET-only render flow: `render=1` downloads, `render=2` shows inline
//! - Embedded static assets with a conservative path allow-list
//! - JSON health and registry index endpoints
//! - Opt-in development reload that restarts on source changes
//!
//! # Usage
//!
//! ```bash
//! boxforge serve --port 8000
//! ```

mod assets;
mod pages;
mod reload;
mod routes;
mod server;

pub use reload::{default_watch_paths, spawn_reload, ReloadError};
pub use routes::AppState;
pub use server::{ServerConfig, WebServer};

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1";
