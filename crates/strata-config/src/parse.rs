//! Parse rendered level documents into configuration maps.
//!
//! Tagged scalars whose tag is registered become [`Pending`] values for the
//! deferred resolver. Any other tag is rejected here so that a typo in a tag
//! name fails the read instead of leaking a literal into the config.

use std::path::Path;

use serde_yaml::Value;
use strata_plugins::{ConfigMap, ConfigValue, Pending, PluginTagRegistry};

use crate::error::{Error, Result};

/// Parse one rendered level file.
///
/// An empty document yields an empty map. A document whose top level is not
/// a mapping is a parse error. Merge keys (`<<: *anchor`) are applied.
pub fn parse_level(text: &str, path: &Path, registry: &PluginTagRegistry) -> Result<ConfigMap> {
    if text.trim().is_empty() {
        return Ok(ConfigMap::new());
    }

    let parse_error = |e: serde_yaml::Error| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut document: Value = serde_yaml::from_str(text).map_err(parse_error)?;
    document.apply_merge().map_err(parse_error)?;

    let converter = Converter { path, registry };
    match document {
        Value::Null => Ok(ConfigMap::new()),
        Value::Mapping(mapping) => converter.mapping(mapping),
        other => Err(converter.error(format!(
            "top level must be a mapping, found {}",
            yaml_kind(&other)
        ))),
    }
}

struct Converter<'a> {
    path: &'a Path,
    registry: &'a PluginTagRegistry,
}

impl Converter<'_> {
    fn error(&self, message: String) -> Error {
        Error::Parse {
            path: self.path.to_path_buf(),
            message,
        }
    }

    fn mapping(&self, mapping: serde_yaml::Mapping) -> Result<ConfigMap> {
        let mut map = ConfigMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = self.key(key)?;
            let value = self.value(value)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    fn key(&self, key: Value) -> Result<String> {
        match key {
            Value::String(s) => Ok(s),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Null => Ok("null".to_string()),
            other => Err(self.error(format!(
                "mapping keys must be scalars, found {}",
                yaml_kind(&other)
            ))),
        }
    }

    fn value(&self, value: Value) -> Result<ConfigValue> {
        Ok(match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ConfigValue::String(s),
            Value::Sequence(items) => ConfigValue::Sequence(
                items
                    .into_iter()
                    .map(|item| self.value(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Mapping(mapping) => ConfigValue::Map(self.mapping(mapping)?),
            Value::Tagged(tagged) => {
                let tag = tagged.tag.to_string();
                if !self.registry.contains(&tag) {
                    return Err(self.error(format!("unknown tag {tag}")));
                }
                let argument = match tagged.value {
                    Value::Null => String::new(),
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    Value::String(s) => s,
                    other => {
                        return Err(self.error(format!(
                            "tag {tag} takes a scalar argument, found {}",
                            yaml_kind(&other)
                        )));
                    }
                };
                ConfigValue::Pending(Pending::new(tag, argument))
            }
        })
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
