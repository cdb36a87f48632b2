//! Error types for table settings.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// A table parameter that failed validation.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    /// The value has the wrong JSON type.
    #[error("`{param}` must be {expected}, found {found}")]
    #[diagnostic(code(weaver::table::invalid_type))]
    InvalidType {
        param: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The value is not one of the accepted keywords.
    #[error("`{value}` is not a valid `{param}` (expected one of: {allowed})")]
    #[diagnostic(code(weaver::table::invalid_choice))]
    InvalidChoice {
        param: String,
        value: String,
        allowed: String,
    },

    /// One entry of a list-valued parameter is malformed.
    #[error("`{param}[{index}]`: {reason}")]
    #[diagnostic(code(weaver::table::invalid_item))]
    InvalidItem {
        param: String,
        index: usize,
        reason: String,
    },

    /// Colour maps are flat `[value, label, ...]` pairs.
    #[error("`{param}` has {len} entries; colour maps need value/label pairs")]
    #[diagnostic(
        code(weaver::table::odd_color_map),
        help("write the map as [\"#FF0000\", \"Red\", \"#00FF00\", \"Green\", ...]")
    )]
    OddColorMap { param: String, len: usize },
}

/// Errors reading or writing a parameter file.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum ParamStoreError {
    #[error(transparent)]
    #[diagnostic(code(weaver::params::io))]
    Io(#[from] std::io::Error),

    #[error("invalid JSON parameters: {0}")]
    #[diagnostic(code(weaver::params::json))]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML parameters: {0}")]
    #[diagnostic(code(weaver::params::toml))]
    TomlDe(#[from] toml::de::Error),

    #[error("cannot write parameters as TOML: {0}")]
    #[diagnostic(code(weaver::params::toml))]
    TomlSer(#[from] toml::ser::Error),

    /// Only `.json` and `.toml` files are understood.
    #[error("unsupported parameter file format: {}", .0.display())]
    #[diagnostic(
        code(weaver::params::format),
        help("use a `.json` or `.toml` file")
    )]
    UnsupportedFormat(PathBuf),
}
