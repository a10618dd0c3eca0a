//! Deferred construction of plugin-tagged values.
//!
//! Pending values are constructed only after every level is merged, so a
//! plugin always sees the complete configuration regardless of which level
//! declared its tag.

use strata_plugins::{ConfigMap, ConfigValue, Pending, PluginError, PluginTagRegistry};

use crate::error::{Error, Result};

/// Replaces every [`Pending`] value in a merged map with its constructed value.
pub struct DeferredResolver<'a> {
    registry: &'a PluginTagRegistry,
}

impl<'a> DeferredResolver<'a> {
    pub fn new(registry: &'a PluginTagRegistry) -> Self {
        Self { registry }
    }

    /// Resolve all pending values in `config`.
    ///
    /// Each factory receives a snapshot of the merged map taken before any
    /// construction, so the result does not depend on traversal order.
    /// Constructed values are not resolved again.
    pub fn resolve(&self, mut config: ConfigMap) -> Result<ConfigMap> {
        if !config.values().any(ConfigValue::contains_pending) {
            return Ok(config);
        }

        let snapshot = config.clone();
        for (key, value) in config.iter_mut() {
            self.resolve_value(value, key, &snapshot)?;
        }
        Ok(config)
    }

    fn resolve_value(&self, value: &mut ConfigValue, key_path: &str, snapshot: &ConfigMap) -> Result<()> {
        match value {
            ConfigValue::Map(map) => {
                for (key, child) in map.iter_mut() {
                    self.resolve_value(child, &format!("{key_path}.{key}"), snapshot)?;
                }
            }
            ConfigValue::Sequence(items) => {
                for (index, child) in items.iter_mut().enumerate() {
                    self.resolve_value(child, &format!("{key_path}[{index}]"), snapshot)?;
                }
            }
            ConfigValue::Pending(pending) => {
                let constructed = self.construct(pending, key_path, snapshot)?;
                *value = constructed;
            }
            _ => {}
        }
        Ok(())
    }

    fn construct(&self, pending: &Pending, key_path: &str, snapshot: &ConfigMap) -> Result<ConfigValue> {
        let failure = |source: PluginError| Error::PluginResolution {
            tag: pending.tag.clone(),
            key_path: key_path.to_string(),
            source,
        };

        let entry = self
            .registry
            .get(&pending.tag)
            .ok_or_else(|| failure(PluginError::new("no plugin is registered for this tag")))?;

        tracing::debug!(tag = %pending.tag, key_path, "Constructing deferred value");
        entry
            .factory
            .construct(&pending.argument, snapshot)
            .map_err(failure)
    }
}
