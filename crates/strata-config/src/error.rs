//! Error types for strata-config

use std::path::PathBuf;

use strata_plugins::PluginError;

/// Result type for strata-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving configuration
///
/// Every error aborts the whole read; no partially resolved map is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration root or environment directory does not exist
    #[error("Configuration directory not found: {path}")]
    PathNotFound { path: PathBuf },

    /// Requested leaf config file does not exist
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Undefined variable or syntax error while rendering a level file
    #[error("Failed to render template {path}: {source}")]
    TemplateRender {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// Rendered text is not a valid config document
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A plugin factory failed while constructing a deferred value
    #[error("Plugin {tag} failed at '{key_path}': {source}")]
    PluginResolution {
        tag: String,
        key_path: String,
        #[source]
        source: PluginError,
    },

    /// Running tool version does not satisfy `require_version`
    #[error("Current version ({running}) does not meet version requirements: {required}")]
    VersionIncompatible {
        running: semver::Version,
        required: String,
    },

    /// `require_version` could not be parsed
    #[error("Invalid version requirement '{constraint}': {source}")]
    InvalidVersionConstraint {
        constraint: String,
        #[source]
        source: strata_plugins::Error,
    },

    /// A key needed to build a stack is absent
    #[error("Stack '{stack}' is missing required key '{key}'")]
    MissingKey { key: String, stack: String },

    /// A key holds a value of the wrong type
    #[error("Invalid value for '{key}': expected {expected}, found {found}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Filesystem error from strata-fs
    #[error(transparent)]
    Fs(#[from] strata_fs::Error),

    /// Registry or version error from strata-plugins
    #[error(transparent)]
    Plugins(#[from] strata_plugins::Error),
}
