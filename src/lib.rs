//! boxforge - Parametric box generator with a web front end
//!
//! A library of parametric generators for laser-cut boxes and trays. Each
//! generator declares its parameters; the web front end turns those
//! declarations into HTML forms and streams the rendered drawings back, and
//! the CLI runs the same generators against files.
//!
//! # Architecture
//!
//! - `args` - parameter declarations, query-string parsing, section syntax
//! - `render` - document model with SVG and DXF writers
//! - `generator` - the `Generator` trait and the registry
//! - `generators` - the built-in generators
//! - `i18n` - message catalogs and request language resolution
//! - `web` - axum server: menu, forms, render flow, static assets
//! - `config` / `cli` - TOML settings and clap definitions

pub mod args;
pub mod cli;
pub mod config;
pub mod generator;
pub mod generators;
pub mod i18n;
pub mod render;
pub mod web;

// Arguments
pub use args::{parse_sections, ArgGroup, ArgSpec, ArgType, ArgValue, ParsedArgs, QueryValues};

// CLI
pub use cli::{exit_codes, Cli, Commands, GenerateArgs, ListArgs, ServeArgs};

// Config
pub use config::{CliOverrides, Config, ConfigError};

// Generators
pub use generator::{
    run_generator, Generator, GeneratorEntry, GeneratorError, Registry, UiGroup,
};

// Rendering
pub use render::{Document, OutputFormat, RenderedDocument};

// Web server
pub use web::{ServerConfig, WebServer};
