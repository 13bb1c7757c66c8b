//! Serializer configuration and its resolution.
//!
//! Options are resolved per call in three tiers:
//!
//! 1. options passed explicitly by the caller,
//! 2. a [`JsonOptions`] stored in the request (or response) extensions,
//! 3. [`DEFAULT_SERIALIZER_OPTIONS`], the immutable web defaults.

use crate::naming::NamingPolicy;
use http::Extensions;

/// Process-wide fallback options (camelCase names, case-insensitive matching,
/// relaxed escaping).
pub static DEFAULT_SERIALIZER_OPTIONS: JsonSerializerOptions = JsonSerializerOptions::web();

/// How strings are escaped when writing JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// Escape non-ASCII characters and HTML-sensitive characters
    /// (`<`, `>`, `&`, `'`, `+`, `` ` ``) as `\uXXXX`.
    #[default]
    Default,
    /// Only escape what JSON requires (quotes, backslashes, control characters).
    UnsafeRelaxed,
}

/// Options governing JSON encoding and decoding.
///
/// `Default` is the general-purpose configuration; [`JsonSerializerOptions::web`]
/// is the configuration used when nothing else is registered.
///
/// # Example
///
/// ```rust
/// use heron_json::{JsonSerializerOptions, NamingPolicy};
///
/// let options = JsonSerializerOptions::default()
///     .with_naming_policy(NamingPolicy::CamelCase)
///     .with_write_indented(true);
///
/// assert!(options.write_indented);
/// assert!(!options.allow_trailing_commas);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonSerializerOptions {
    /// Policy applied to struct field names.
    pub property_naming_policy: Option<NamingPolicy>,
    /// Match incoming property names ignoring ASCII case.
    pub property_name_case_insensitive: bool,
    /// String escaping mode for output.
    pub escaping: Escaping,
    /// Accept a single trailing comma in arrays and objects.
    pub allow_trailing_commas: bool,
    /// Pretty-print output with two-space indentation.
    pub write_indented: bool,
}

impl JsonSerializerOptions {
    /// Creates the web configuration.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            property_naming_policy: Some(NamingPolicy::CamelCase),
            property_name_case_insensitive: true,
            escaping: Escaping::UnsafeRelaxed,
            allow_trailing_commas: false,
            write_indented: false,
        }
    }

    /// Sets the property naming policy.
    #[must_use]
    pub fn with_naming_policy(mut self, policy: NamingPolicy) -> Self {
        self.property_naming_policy = Some(policy);
        self
    }

    /// Removes the property naming policy.
    #[must_use]
    pub fn without_naming_policy(mut self) -> Self {
        self.property_naming_policy = None;
        self
    }

    /// Sets case-insensitive property matching.
    #[must_use]
    pub fn with_case_insensitive(mut self, enabled: bool) -> Self {
        self.property_name_case_insensitive = enabled;
        self
    }

    /// Sets the escaping mode.
    #[must_use]
    pub fn with_escaping(mut self, escaping: Escaping) -> Self {
        self.escaping = escaping;
        self
    }

    /// Sets trailing comma tolerance.
    #[must_use]
    pub fn with_trailing_commas(mut self, allowed: bool) -> Self {
        self.allow_trailing_commas = allowed;
        self
    }

    /// Sets indented output.
    #[must_use]
    pub fn with_write_indented(mut self, indented: bool) -> Self {
        self.write_indented = indented;
        self
    }

    /// Returns `true` if decoding needs struct keys remapped.
    pub(crate) fn remaps_keys(&self) -> bool {
        self.property_naming_policy.is_some() || self.property_name_case_insensitive
    }
}

/// Request-scoped JSON options.
///
/// Insert one into the request extensions (usually from middleware) to change
/// the options used by the body helpers for that request.
///
/// # Example
///
/// ```rust
/// use heron_json::JsonOptions;
/// use http::Request;
///
/// let mut options = JsonOptions::default();
/// options.serializer_options.write_indented = true;
///
/// let mut request = Request::new(());
/// request.extensions_mut().insert(options);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// The serializer options, seeded from [`DEFAULT_SERIALIZER_OPTIONS`].
    pub serializer_options: JsonSerializerOptions,
}

impl JsonOptions {
    /// Creates request-scoped options from explicit serializer options.
    #[must_use]
    pub fn new(serializer_options: JsonSerializerOptions) -> Self {
        Self { serializer_options }
    }
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self::new(DEFAULT_SERIALIZER_OPTIONS)
    }
}

/// Resolves options from an explicit value and a scoped source.
///
/// The scoped source is only consulted when no explicit options are given.
#[must_use]
pub fn resolve_options_with<F>(
    explicit: Option<&JsonSerializerOptions>,
    scoped: F,
) -> JsonSerializerOptions
where
    F: FnOnce() -> Option<JsonSerializerOptions>,
{
    if let Some(options) = explicit {
        tracing::trace!("using explicit JSON options");
        return *options;
    }

    if let Some(options) = scoped() {
        tracing::trace!("using request-scoped JSON options");
        return options;
    }

    tracing::trace!("using default JSON options");
    DEFAULT_SERIALIZER_OPTIONS
}

/// Resolves options for a request or response.
///
/// # Example
///
/// ```rust
/// use heron_json::{resolve_options, JsonOptions, JsonSerializerOptions};
/// use http::Extensions;
///
/// let mut extensions = Extensions::new();
/// assert_eq!(resolve_options(None, &extensions), JsonSerializerOptions::web());
///
/// let scoped = JsonSerializerOptions::default();
/// extensions.insert(JsonOptions::new(scoped));
/// assert_eq!(resolve_options(None, &extensions), scoped);
/// ```
#[must_use]
pub fn resolve_options(
    explicit: Option<&JsonSerializerOptions>,
    extensions: &Extensions,
) -> JsonSerializerOptions {
    resolve_options_with(explicit, || {
        extensions
            .get::<JsonOptions>()
            .map(|options| options.serializer_options)
    })
}
