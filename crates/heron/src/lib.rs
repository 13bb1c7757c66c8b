//! # Heron
//!
//! **JSON request and response bodies for HTTP services**
//!
//! Heron reads typed values out of `http::Request` bodies and writes them back
//! into `http::Response` bodies with:
//!
//! - Content-type checks before any body byte is read
//! - Web defaults (camelCase names, case-insensitive matching)
//! - Options scoped per call, per request, or globally
//! - Cooperative cancellation of body I/O
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use heron::prelude::*;
//!
//! async fn handle(
//!     mut request: Request<Incoming>,
//!     response: &mut Response<ResponseWriter>,
//!     cancel: &CancellationToken,
//! ) -> JsonResult<()> {
//!     let order: Order = read_json(&mut request, cancel).await?;
//!     write_json(response, &order.total(), cancel).await
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! let config = heron::config::ConfigLoader::new()
//!     .with_optional_file("heron.toml")?
//!     .with_env_prefix("HERON")
//!     .load()?;
//!
//! heron::config::init_logging(&config.logging)?;
//! request.extensions_mut().insert(config.json.json_options());
//! ```

#![doc(html_root_url = "https://docs.rs/heron/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export body helpers
pub use heron_json as json;

// Re-export configuration
pub use heron_config as config;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use heron::prelude::*;
/// ```
pub mod prelude {
    pub use heron_json::{
        read_json, read_json_with, write_json, write_json_plain, write_json_with,
        write_json_with_options, JsonError, JsonOptions, JsonResponse, JsonResult,
        JsonSerializerOptions, NamingPolicy,
    };

    pub use heron_config::{init_logging, ConfigLoader, HeronConfig};
}
