//! Well-known names inside a Strata project.

use std::path::Path;

/// Fixed directory and file names of a project layout.
///
/// ```text
/// <project>/
///   config/            configuration root
///     config.yaml      environment config for the root environment
///     prod/
///       config.yaml
///       vpc.yaml       stack config
///   templates/
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `config` directory (configuration root)
    ConfigDir,
    /// The `config.yaml` file that configures an environment rather than a stack
    EnvironmentConfig,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigDir => "config",
            Self::EnvironmentConfig => "config.yaml",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
