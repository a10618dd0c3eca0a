//! Configuration values as seen by the resolution pipeline and by plugins.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// An insertion-ordered map of configuration keys to values.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A tagged scalar awaiting construction by its plugin.
///
/// Produced when a level document contains `!name argument` for a
/// registered tag. It is replaced once the whole hierarchy is merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pending {
    /// Tag including the leading `!`
    pub tag: String,
    /// Raw scalar text following the tag
    pub argument: String,
}

impl Pending {
    pub fn new(tag: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            argument: argument.into(),
        }
    }
}

impl fmt::Display for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.argument.is_empty() {
            write!(f, "{}", self.tag)
        } else {
            write!(f, "{} {}", self.tag, self.argument)
        }
    }
}

/// A configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigValue>),
    Map(ConfigMap),
    /// Deferred plugin value; never present in a fully resolved map
    Pending(Pending),
}

impl ConfigValue {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Map(_) => "map",
            Self::Pending(_) => "pending plugin value",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value or anything nested in it is still pending.
    pub fn contains_pending(&self) -> bool {
        match self {
            Self::Pending(_) => true,
            Self::Sequence(items) => items.iter().any(Self::contains_pending),
            Self::Map(map) => map.values().any(Self::contains_pending),
            _ => false,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Pending> for ConfigValue {
    fn from(pending: Pending) -> Self {
        Self::Pending(pending)
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_keeps_key_order() {
        let value = ConfigValue::from(json!({"region": "eu-west-1", "count": 2, "tags": ["a"]}));
        let map = value.as_map().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["count", "region", "tags"]);
        assert_eq!(map["count"], ConfigValue::Integer(2));
    }

    #[test]
    fn contains_pending_finds_nested() {
        let mut inner = ConfigMap::new();
        inner.insert(
            "vpc".into(),
            ConfigValue::Sequence(vec![Pending::new("!output", "vpc::id").into()]),
        );
        let value = ConfigValue::Map(inner);
        assert!(value.contains_pending());
        assert!(!ConfigValue::from("plain").contains_pending());
    }

    #[test]
    fn serializes_untagged() {
        let mut map = ConfigMap::new();
        map.insert("name".into(), "vpc".into());
        map.insert("protect".into(), true.into());
        let json = serde_json::to_value(ConfigValue::Map(map)).unwrap();
        assert_eq!(json, json!({"name": "vpc", "protect": true}));
    }

    #[test]
    fn pending_display() {
        assert_eq!(Pending::new("!env", "HOME").to_string(), "!env HOME");
        assert_eq!(Pending::new("!now", "").to_string(), "!now");
    }
}
