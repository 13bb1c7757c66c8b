//! Configuration section types.

use heron_json::{Escaping, JsonOptions, JsonSerializerOptions, NamingPolicy};
use serde::{Deserialize, Serialize};

/// Property naming policy as written in configuration files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicyName {
    /// camelCase property names.
    #[default]
    CamelCase,
    /// Field names are written as they are.
    None,
}

/// String escaping mode as written in configuration files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EscapingMode {
    /// Escape non-ASCII and HTML-sensitive characters.
    Default,
    /// Escape only what JSON requires.
    #[default]
    UnsafeRelaxed,
}

/// JSON serializer configuration.
///
/// Defaults match [`JsonSerializerOptions::web`].
///
/// # Example
///
/// ```
/// use heron_config::JsonConfig;
/// use heron_json::JsonSerializerOptions;
///
/// assert_eq!(
///     JsonConfig::default().serializer_options(),
///     JsonSerializerOptions::web()
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct JsonConfig {
    /// Property naming policy.
    #[serde(default)]
    pub naming_policy: NamingPolicyName,

    /// Match incoming property names ignoring case.
    #[serde(default = "default_true")]
    pub property_name_case_insensitive: bool,

    /// String escaping mode.
    #[serde(default)]
    pub escaping: EscapingMode,

    /// Accept a trailing comma in arrays and objects.
    #[serde(default)]
    pub allow_trailing_commas: bool,

    /// Pretty-print output.
    #[serde(default)]
    pub write_indented: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            naming_policy: NamingPolicyName::default(),
            property_name_case_insensitive: true,
            escaping: EscapingMode::default(),
            allow_trailing_commas: false,
            write_indented: false,
        }
    }
}

impl JsonConfig {
    /// Converts this section into serializer options.
    #[must_use]
    pub fn serializer_options(&self) -> JsonSerializerOptions {
        let options = JsonSerializerOptions::default()
            .with_case_insensitive(self.property_name_case_insensitive)
            .with_escaping(match self.escaping {
                EscapingMode::Default => Escaping::Default,
                EscapingMode::UnsafeRelaxed => Escaping::UnsafeRelaxed,
            })
            .with_trailing_commas(self.allow_trailing_commas)
            .with_write_indented(self.write_indented);

        match self.naming_policy {
            NamingPolicyName::CamelCase => options.with_naming_policy(NamingPolicy::CamelCase),
            NamingPolicyName::None => options.without_naming_policy(),
        }
    }

    /// Converts this section into request-scoped options, ready to be
    /// inserted into request extensions.
    #[must_use]
    pub fn json_options(&self) -> JsonOptions {
        JsonOptions::new(self.serializer_options())
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log filter directive (`info`, `heron_json=trace,warn`, ...).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
