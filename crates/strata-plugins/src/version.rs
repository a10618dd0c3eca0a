//! Version constraints used to gate tool compatibility.
//!
//! A constraint is a comma-separated conjunction of specifiers, each an
//! operator (`==`, `!=`, `>=`, `<=`, `>`, `<`) followed by a version. A bare
//! version means `==`. Versions may omit the minor and patch components, so
//! `>=1.2` reads as `>=1.2.0` and `>=1` as `>=1.0.0`.
//!
//! ```
//! use strata_plugins::version::{VersionConstraint, parse_version};
//!
//! let constraint: VersionConstraint = ">=1.0,<2.0".parse().unwrap();
//! assert!(constraint.matches(&parse_version("1.5.0").unwrap()));
//! assert!(!constraint.matches(&parse_version("2.0.0").unwrap()));
//! ```

use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparator {
    Eq,
    Ne,
    Gte,
    Lte,
    Gt,
    Lt,
}

impl Comparator {
    /// Longest operators first so `>=` is not read as `>`.
    const PREFIXES: [(&'static str, Comparator); 6] = [
        ("==", Self::Eq),
        ("!=", Self::Ne),
        (">=", Self::Gte),
        ("<=", Self::Lte),
        (">", Self::Gt),
        ("<", Self::Lt),
    ];

    fn holds(self, candidate: &Version, bound: &Version) -> bool {
        match self {
            Self::Eq => candidate == bound,
            Self::Ne => candidate != bound,
            Self::Gte => candidate >= bound,
            Self::Lte => candidate <= bound,
            Self::Gt => candidate > bound,
            Self::Lt => candidate < bound,
        }
    }
}

#[derive(Debug, Clone)]
struct Specifier {
    comparator: Comparator,
    bound: Version,
}

impl Specifier {
    fn parse(text: &str, constraint: &str) -> Result<Self> {
        let (comparator, rest) = Comparator::PREFIXES
            .iter()
            .find_map(|(prefix, comparator)| text.strip_prefix(*prefix).map(|rest| (*comparator, rest)))
            .unwrap_or((Comparator::Eq, text));

        let bound = parse_version(rest).map_err(|_| Error::VersionConstraintParse {
            constraint: constraint.to_string(),
            reason: format!("'{}' is not a valid version", rest.trim()),
        })?;

        Ok(Self { comparator, bound })
    }
}

/// A parsed version constraint.
#[derive(Debug, Clone)]
pub struct VersionConstraint {
    specifiers: Vec<Specifier>,
    raw: String,
}

impl VersionConstraint {
    pub fn parse(constraint: &str) -> Result<Self> {
        let specifiers = constraint
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| Specifier::parse(part, constraint))
            .collect::<Result<Vec<_>>>()?;

        if specifiers.is_empty() {
            return Err(Error::VersionConstraintParse {
                constraint: constraint.to_string(),
                reason: "empty constraint".to_string(),
            });
        }

        Ok(Self {
            specifiers,
            raw: constraint.to_string(),
        })
    }

    /// Whether `version` satisfies every specifier.
    pub fn matches(&self, version: &Version) -> bool {
        self.specifiers
            .iter()
            .all(|spec| spec.comparator.holds(version, &spec.bound))
    }

    /// The constraint as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for VersionConstraint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse a version, padding `major` and `major.minor` with `.0` components.
pub fn parse_version(text: &str) -> Result<Version> {
    let text = text.trim();
    Version::parse(text)
        .or_else(|first| {
            let padded = match text.split('.').count() {
                1 => format!("{text}.0.0"),
                2 => format!("{text}.0"),
                _ => return Err(first),
            };
            Version::parse(&padded).map_err(|_| first)
        })
        .map_err(|source| Error::InvalidVersion {
            version: text.to_string(),
            source,
        })
}
