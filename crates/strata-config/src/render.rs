//! Strict template rendering of level files.

use std::collections::BTreeMap;
use std::path::Path;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use strata_fs::io;
use strata_plugins::{ConfigMap, ConfigValue};

use crate::error::{Error, Result};
use crate::keys;

/// Renders level files against the configuration accumulated so far.
///
/// Every top-level key of the context is a template variable, as is
/// `environment_variable`, which maps the process environment. Referencing
/// an undefined variable is an error rather than an empty string. A value
/// still awaiting its plugin renders as its tag text, e.g. `!env HOME`.
#[derive(Clone)]
pub struct TemplateRenderer {
    variables: BTreeMap<String, String>,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Values may hold credentials.
        f.debug_struct("TemplateRenderer")
            .field("variables", &self.variables.len())
            .finish()
    }
}

impl TemplateRenderer {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are left out.
    pub fn from_process_env() -> Self {
        let variables = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { variables }
    }

    /// Use a fixed set of environment variables instead of the process's.
    pub fn with_variables(variables: BTreeMap<String, String>) -> Self {
        Self { variables }
    }

    /// Render `directory/basename`, or return `None` when no such file exists.
    pub fn render(&self, directory: &Path, basename: &str, context: &ConfigMap) -> Result<Option<String>> {
        let path = directory.join(basename);
        let Some(source) = io::read_text_if_exists(&path)? else {
            return Ok(None);
        };

        tracing::trace!(?path, "Rendering level file");
        self.render_str(&path, basename, &source, context).map(Some)
    }

    /// Render template `source`; `path` is used for error reporting only.
    pub fn render_str(&self, path: &Path, name: &str, source: &str, context: &ConfigMap) -> Result<String> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        let mut ctx: BTreeMap<&str, Value> = context
            .iter()
            .map(|(key, value)| (key.as_str(), Value::from_serialize(template_value(value))))
            .collect();
        ctx.insert(keys::ENVIRONMENT_VARIABLE, Value::from_serialize(&self.variables));

        env.render_named_str(name, source, ctx)
            .map_err(|err| Error::TemplateRender {
                path: path.to_path_buf(),
                source: err,
            })
    }
}

/// Replace pending plugin values with their tag text.
fn template_value(value: &ConfigValue) -> ConfigValue {
    match value {
        ConfigValue::Pending(pending) => ConfigValue::String(pending.to_string()),
        ConfigValue::Sequence(items) => ConfigValue::Sequence(items.iter().map(template_value).collect()),
        ConfigValue::Map(map) => ConfigValue::Map(
            map.iter()
                .map(|(key, value)| (key.clone(), template_value(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}
