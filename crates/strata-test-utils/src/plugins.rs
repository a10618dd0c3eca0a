//! Deterministic sample plugins for exercising tag resolution.
//!
//! | Tag | Namespace | Constructs |
//! |---|---|---|
//! | `!config_value key` | resolvers | the merged value of top-level `key` |
//! | `!stack_output stack::Output` | resolvers | `"<stack>.<Output>"` |
//! | `!fail message` | resolvers | always fails with `message` |
//! | `!cmd command` | hooks | `{hook: cmd, argument: command}` |

use std::sync::Arc;

use strata_plugins::{
    ConfigMap, ConfigValue, PluginError, PluginTagRegistry, StaticPluginLoader,
};

/// Loader holding the sample plugins.
pub fn sample_loader() -> StaticPluginLoader {
    StaticPluginLoader::new()
        .with_resolver("config_value", |key, config| {
            config
                .get(key)
                .cloned()
                .ok_or_else(|| PluginError::new(format!("key '{key}' is not set")))
        })
        .with_resolver("stack_output", |argument, _| {
            let (stack, output) = argument
                .split_once("::")
                .ok_or_else(|| PluginError::new(format!("expected stack::Output, got '{argument}'")))?;
            Ok(ConfigValue::from(format!("{stack}.{output}")))
        })
        .with_resolver("fail", |message, _| Err(PluginError::new(message)))
        .with_hook("cmd", |command, _| {
            Ok(ConfigValue::Map(ConfigMap::from([
                ("hook".to_string(), ConfigValue::from("cmd")),
                ("argument".to_string(), ConfigValue::from(command)),
            ])))
        })
}

/// Registry built from [`sample_loader`].
pub fn sample_registry() -> Arc<PluginTagRegistry> {
    Arc::new(PluginTagRegistry::load(&sample_loader()).unwrap())
}
