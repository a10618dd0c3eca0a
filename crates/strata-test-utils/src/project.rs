//! [`TestProject`] builder for configuration tree test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with helpers for laying out `config/` and
/// `templates/`.
///
/// # Example
///
/// ```rust,no_run
/// use strata_test_utils::TestProject;
///
/// let project = TestProject::new()
///     .with_config("config.yaml", "project_code: acme\nregion: eu-west-1\n")
///     .with_config("prod/vpc.yaml", "template_path: templates/vpc.json\n");
/// project.assert_file_exists("config/prod/vpc.yaml");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create a temporary project with an empty `config/` directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("config")).unwrap();
        Self { temp_dir }
    }

    /// Create a temporary directory with no `config/` directory.
    pub fn without_config_dir() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Return `root/config`.
    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    /// Write `content` to `path` relative to the project root, creating
    /// parent directories.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|_| panic!("Could not write file: {}", full_path.display()));
        self
    }

    /// Write a level file under `config/`.
    pub fn write_config(&self, path: &str, content: &str) -> &Self {
        self.write(&format!("config/{path}"), content)
    }

    /// Create an empty directory under `config/`.
    pub fn create_environment(&self, path: &str) -> &Self {
        fs::create_dir_all(self.config_dir().join(path)).unwrap();
        self
    }

    /// Builder form of [`write_config`](Self::write_config).
    pub fn with_config(self, path: &str, content: &str) -> Self {
        self.write_config(path, content);
        self
    }

    /// Builder form of writing a file under `templates/`.
    pub fn with_template(self, path: &str, content: &str) -> Self {
        self.write(&format!("templates/{path}"), content);
        self
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) still contains `content`.
    ///
    /// Resolution never writes to the tree; tests use this to check that.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
