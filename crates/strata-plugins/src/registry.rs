//! Registry binding plugin tags to value factories.
//!
//! The registry is built once from a [`PluginLoader`] and is read-only
//! afterwards, so it can be shared across readers behind an `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, PluginError, Result};
use crate::loader::PluginLoader;
use crate::value::{ConfigMap, ConfigValue};

/// Plugin categories that can be bound to tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginNamespace {
    /// Plugins invoked for side effects at deployment time
    Hooks,
    /// Plugins that produce configuration values
    Resolvers,
}

impl PluginNamespace {
    /// Namespaces in registration order.
    pub const ALL: [PluginNamespace; 2] = [Self::Hooks, Self::Resolvers];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hooks => "hooks",
            Self::Resolvers => "resolvers",
        }
    }
}

impl fmt::Display for PluginNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constructs a value from a tag argument and the fully merged config.
///
/// The config is taken before any tag is constructed, so other tagged values
/// in it are still `ConfigValue::Pending`.
pub trait PluginFactory: Send + Sync {
    fn construct(&self, argument: &str, config: &ConfigMap) -> std::result::Result<ConfigValue, PluginError>;
}

impl<F> PluginFactory for F
where
    F: Fn(&str, &ConfigMap) -> std::result::Result<ConfigValue, PluginError> + Send + Sync,
{
    fn construct(&self, argument: &str, config: &ConfigMap) -> std::result::Result<ConfigValue, PluginError> {
        self(argument, config)
    }
}

/// A plugin bound to a tag.
#[derive(Clone)]
pub struct RegistryEntry {
    /// Tag including the leading `!`
    pub tag: String,
    /// Declared plugin name
    pub name: String,
    pub namespace: PluginNamespace,
    pub factory: Arc<dyn PluginFactory>,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

/// Registry of tag identifiers to plugin factories.
#[derive(Debug, Clone, Default)]
pub struct PluginTagRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl PluginTagRegistry {
    /// Create a registry with no tags. Tagged nodes are then parse errors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the registry from every namespace the loader knows about.
    ///
    /// Each plugin named `name` is bound to the tag `!name`. A tag claimed
    /// twice, within or across namespaces, is an error.
    pub fn load(loader: &dyn PluginLoader) -> Result<Self> {
        let mut entries: HashMap<String, RegistryEntry> = HashMap::new();

        for namespace in PluginNamespace::ALL {
            for (name, factory) in loader.list_plugins(namespace) {
                validate_plugin_name(&name)?;
                let tag = format!("!{name}");

                if let Some(existing) = entries.get(&tag) {
                    return Err(Error::DuplicateTag {
                        tag,
                        first: format!("{}/{}", existing.namespace, existing.name),
                        second: format!("{namespace}/{name}"),
                    });
                }

                tracing::debug!(%namespace, %tag, "Bound plugin tag");
                entries.insert(
                    tag.clone(),
                    RegistryEntry {
                        tag,
                        name,
                        namespace,
                        factory,
                    },
                );
            }
        }

        Ok(Self { entries })
    }

    /// Look up a tag (including the leading `!`).
    pub fn get(&self, tag: &str) -> Option<&RegistryEntry> {
        self.entries.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// All registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_plugin_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.starts_with('!') {
        "name must not include the '!' tag marker"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else {
        return Ok(());
    };

    Err(Error::InvalidPluginName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
