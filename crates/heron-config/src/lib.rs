//! Typed configuration for Heron.
//!
//! This crate loads the settings an application needs around
//! [`heron_json`]:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! The configuration system is built around the [`HeronConfig`] struct:
//!
//! - [`JsonConfig`] - serializer options used when no per-call options are given
//! - [`LoggingConfig`] - structured logging output, installed with [`init_logging`]
//!
//! # Example
//!
//! ```no_run
//! use heron_config::{init_logging, ConfigLoader};
//!
//! # fn main() -> Result<(), heron_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("heron.toml")?
//!     .with_env_prefix("HERON")
//!     .load()?;
//!
//! init_logging(&config.logging)?;
//!
//! // Insert into request extensions to scope options to a request.
//! let options = config.json.json_options();
//! # let _ = options;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [json]
//! naming_policy = "camel_case"
//! property_name_case_insensitive = true
//! escaping = "unsafe_relaxed"
//! allow_trailing_commas = false
//! write_indented = false
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! include_location = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! All configuration values can be overridden via environment variables using
//! the format `PREFIX__SECTION__KEY`. For example:
//!
//! - `HERON__JSON__WRITE_INDENTED=true`
//! - `HERON__JSON__NAMING_POLICY=none`
//! - `HERON__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod logging;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use logging::{create_env_filter, init_logging};
pub use schema::*;
