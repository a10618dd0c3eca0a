//! Plugin discovery contract and a compiled-in loader.

use std::sync::Arc;

use crate::error::PluginError;
use crate::registry::{PluginFactory, PluginNamespace};
use crate::value::{ConfigMap, ConfigValue};

/// Enumerates the plugins available in a namespace.
///
/// Implementations decide where plugins come from; the registry only sees
/// `(name, factory)` pairs.
pub trait PluginLoader {
    fn list_plugins(&self, namespace: PluginNamespace) -> Vec<(String, Arc<dyn PluginFactory>)>;
}

/// Loader backed by a table assembled at startup.
#[derive(Default, Clone)]
pub struct StaticPluginLoader {
    plugins: Vec<(PluginNamespace, String, Arc<dyn PluginFactory>)>,
}

impl StaticPluginLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin to the table.
    pub fn register(
        &mut self,
        namespace: PluginNamespace,
        name: impl Into<String>,
        factory: Arc<dyn PluginFactory>,
    ) {
        self.plugins.push((namespace, name.into(), factory));
    }

    /// Add a resolver built from a closure.
    pub fn with_resolver<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&str, &ConfigMap) -> Result<ConfigValue, PluginError> + Send + Sync + 'static,
    {
        self.register(PluginNamespace::Resolvers, name, Arc::new(factory));
        self
    }

    /// Add a hook built from a closure.
    pub fn with_hook<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&str, &ConfigMap) -> Result<ConfigValue, PluginError> + Send + Sync + 'static,
    {
        self.register(PluginNamespace::Hooks, name, Arc::new(factory));
        self
    }
}

impl std::fmt::Debug for StaticPluginLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.plugins
                    .iter()
                    .map(|(namespace, name, _)| format!("{namespace}/{name}")),
            )
            .finish()
    }
}

impl PluginLoader for StaticPluginLoader {
    fn list_plugins(&self, namespace: PluginNamespace) -> Vec<(String, Arc<dyn PluginFactory>)> {
        self.plugins
            .iter()
            .filter(|(ns, _, _)| *ns == namespace)
            .map(|(_, name, factory)| (name.clone(), Arc::clone(factory)))
            .collect()
    }
}
