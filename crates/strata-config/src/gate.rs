//! Compatibility check between a project and the running tool.

use semver::Version;
use strata_plugins::version::{VersionConstraint, parse_version};
use strata_plugins::ConfigMap;

use crate::error::{Error, Result};
use crate::keys;

/// Checks `require_version` in a resolved map against the running version.
#[derive(Debug, Clone)]
pub struct VersionGate {
    running: Version,
}

impl VersionGate {
    pub fn new(running: Version) -> Self {
        Self { running }
    }

    /// Gate for the version this crate was built as.
    pub fn for_current_tool() -> Result<Self> {
        Ok(Self::new(parse_version(env!("CARGO_PKG_VERSION"))?))
    }

    pub fn running(&self) -> &Version {
        &self.running
    }

    /// Fail when `config` requires a version the running tool does not satisfy.
    ///
    /// A map without `require_version` always passes.
    pub fn check(&self, config: &ConfigMap) -> Result<()> {
        let Some(value) = config.get(keys::REQUIRE_VERSION) else {
            return Ok(());
        };

        let required = value.as_str().ok_or_else(|| Error::InvalidValue {
            key: keys::REQUIRE_VERSION.to_string(),
            expected: "string",
            found: value.kind(),
        })?;

        let constraint =
            VersionConstraint::parse(required).map_err(|source| Error::InvalidVersionConstraint {
                constraint: required.to_string(),
                source,
            })?;

        if !constraint.matches(&self.running) {
            return Err(Error::VersionIncompatible {
                running: self.running.clone(),
                required: required.to_string(),
            });
        }

        tracing::trace!(running = %self.running, %constraint, "Version requirement satisfied");
        Ok(())
    }
}
