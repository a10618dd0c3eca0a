use std::fmt;

/// Errors that can occur while building the registry or parsing versions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two plugins were registered under the same tag.
    #[error("duplicate plugin tag '{tag}': registered by both {first} and {second}")]
    DuplicateTag {
        tag: String,
        first: String,
        second: String,
    },

    /// Plugin name cannot be turned into a tag.
    #[error("invalid plugin name '{name}': {reason}")]
    InvalidPluginName { name: String, reason: String },

    /// Invalid semver version string.
    #[error("invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    /// Version constraint string could not be parsed.
    #[error("invalid version constraint '{constraint}': {reason}")]
    VersionConstraintParse { constraint: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by a plugin factory while constructing a value.
#[derive(Debug)]
pub struct PluginError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PluginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it as the source.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
