//! Configuration module for Fandom-Harvest
//!
//! Site schemas describe where a wiki's character index lives and which
//! infobox locators map to which logical fields. A fixed set of sites is
//! built in; more can be loaded from a TOML file.
//!
//! # Example
//!
//! ```no_run
//! use fandom_harvest::config::SchemaRegistry;
//! use std::path::Path;
//!
//! let (registry, client) = SchemaRegistry::from_config_file(Path::new("sites.toml")).unwrap();
//! println!("{} sites, user agent {}", registry.len(), client.user_agent);
//! ```

mod builtin;
mod parser;
mod registry;
mod types;
mod validation;

/// Language used when a caller does not pick one
pub const DEFAULT_LANGUAGE: &str = "en";

// Re-export types
pub use registry::SchemaRegistry;
pub use types::{ClientConfig, Config, Field, FieldKind, FieldMap, PageLayout, SiteSchema};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_site};
