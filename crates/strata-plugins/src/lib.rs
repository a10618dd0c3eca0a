//! Plugin system for Strata.
//!
//! This crate provides the configuration value model shared by the
//! resolution pipeline and plugins, the plugin factory and loader
//! contracts, the tag registry that binds `!name` tags to factories, and
//! the version constraint grammar used to gate tool compatibility.

pub mod error;
pub mod loader;
pub mod registry;
pub mod value;
pub mod version;

pub use error::{Error, PluginError, Result};
pub use loader::{PluginLoader, StaticPluginLoader};
pub use registry::{PluginFactory, PluginNamespace, PluginTagRegistry, RegistryEntry};
pub use value::{ConfigMap, ConfigValue, Pending};
pub use version::VersionConstraint;
