//! Normalized relative paths inside a configuration tree

use std::path::{Path, PathBuf};

/// A path normalized to forward slashes with `.` and empty segments removed.
///
/// Configuration paths are always handled relative to the configuration
/// root, where the empty path denotes the root itself. Conversion to a
/// platform-native path happens only at I/O boundaries via
/// [`NormalizedPath::under`] or [`NormalizedPath::to_native`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Backslashes become forward slashes, and `.`, empty, and trailing
    /// segments are dropped. A leading `/` is preserved.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let segments: Vec<&str> = raw
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect();

        let mut inner = segments.join("/");
        if raw.starts_with('/') {
            inner.insert(0, '/');
        }
        Self { inner }
    }

    /// The empty path, i.e. the configuration root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this is the empty (root) path.
    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Resolve this path under `base`. The root path resolves to `base`.
    pub fn under(&self, base: &Path) -> PathBuf {
        if self.inner.is_empty() {
            base.to_path_buf()
        } else {
            base.join(&self.inner)
        }
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            Self::new(segment)
        } else {
            Self::new(format!("{}/{}", self.inner, segment))
        }
    }

    /// Get the parent directory.
    ///
    /// A single relative segment has the root as its parent; the root and
    /// `/` have none.
    pub fn parent(&self) -> Option<Self> {
        if self.inner.is_empty() || self.inner == "/" {
            return None;
        }
        match self.inner.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            None => Some(Self::root()),
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        if self.inner.is_empty() || self.inner == "/" {
            return None;
        }
        self.inner.rsplit('/').next()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// The same path with the file name's extension removed.
    ///
    /// `prod/vpc.yaml` becomes `prod/vpc`.
    pub fn without_extension(&self) -> Self {
        match self.extension() {
            Some(ext) => Self {
                inner: self.inner[..self.inner.len() - ext.len() - 1].to_string(),
            },
            None => self.clone(),
        }
    }

    /// Every directory level from the root down to this path, inclusive.
    ///
    /// `a/b` yields `["", "a", "a/b"]`; the root yields `[""]`.
    pub fn levels(&self) -> Vec<Self> {
        let mut levels = vec![Self::root()];
        let mut current = String::new();
        for segment in self.inner.split('/').filter(|s| !s.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            levels.push(Self {
                inner: current.clone(),
            });
        }
        levels
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_parent_or_name() {
        let root = NormalizedPath::root();
        assert!(root.is_root());
        assert_eq!(root.parent(), None);
        assert_eq!(root.file_name(), None);
    }

    #[test]
    fn single_segment_parent_is_root() {
        let path = NormalizedPath::new("vpc.yaml");
        assert_eq!(path.parent(), Some(NormalizedPath::root()));
    }

    #[test]
    fn under_root_is_base() {
        let base = Path::new("/srv/project/config");
        assert_eq!(NormalizedPath::root().under(base), base.to_path_buf());
        assert_eq!(
            NormalizedPath::new("prod/vpc.yaml").under(base),
            base.join("prod/vpc.yaml")
        );
    }
}
