//! Stack entities built from resolved leaf configuration.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use strata_fs::NormalizedPath;
use strata_plugins::{ConfigMap, ConfigValue};

use crate::error::{Error, Result};
use crate::keys;

/// Where a stack's template is uploaded before deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactLocation {
    pub bucket_name: String,
    pub bucket_key: String,
    pub region: String,
}

/// A deployable unit resolved from one leaf file plus inherited context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    /// Leaf path without extension, e.g. `prod/vpc`
    pub name: String,
    /// Name used with the provider, e.g. `acme-prod-vpc`
    pub external_name: String,
    /// Absolute template location
    pub template_path: PathBuf,
    pub region: String,
    pub iam_role: Option<String>,
    pub role_arn: Option<String>,
    pub stack_tags: ConfigMap,
    pub protect: bool,
    pub dependencies: Vec<String>,
    pub hooks: ConfigMap,
    pub user_data: ConfigMap,
    pub parameters: ConfigMap,
    pub artifact: Option<ArtifactLocation>,
}

impl Stack {
    /// Build a stack from the resolved config of the leaf at `leaf`.
    pub fn from_config(leaf: &NormalizedPath, config: &ConfigMap, project_dir: &Path) -> Result<Self> {
        let name = leaf.without_extension().as_str().to_string();
        let fields = Fields {
            config,
            stack: &name,
        };

        let external_name = match fields.optional_str(keys::STACK_NAME)? {
            Some(stack_name) => stack_name.to_string(),
            None => external_stack_name(fields.required_str(keys::PROJECT_CODE)?, &name),
        };
        let template_path = project_dir.join(fields.required_str(keys::TEMPLATE_PATH)?);
        let region = fields.required_str(keys::REGION)?.to_string();

        let artifact = match fields.optional_str(keys::TEMPLATE_BUCKET_NAME)? {
            Some(bucket_name) => Some(ArtifactLocation {
                bucket_name: bucket_name.to_string(),
                bucket_key: artifact_key(
                    &external_name,
                    fields.optional_str(keys::TEMPLATE_KEY_PREFIX)?,
                    next_timestamp(),
                ),
                region: region.clone(),
            }),
            None => None,
        };

        let stack = Self {
            iam_role: fields.optional_str(keys::IAM_ROLE)?.map(str::to_string),
            role_arn: fields.optional_str(keys::ROLE_ARN)?.map(str::to_string),
            stack_tags: fields.map_or_empty(keys::STACK_TAGS)?,
            protect: fields.bool_or_false(keys::PROTECT)?,
            dependencies: fields.strings_or_empty(keys::DEPENDENCIES)?,
            hooks: fields.map_or_empty(keys::HOOKS)?,
            user_data: fields.map_or_empty(keys::USER_DATA)?,
            parameters: fields.map_or_empty(keys::PARAMETERS)?,
            name,
            external_name,
            template_path,
            region,
            artifact,
        };

        tracing::debug!(stack = %stack.name, external_name = %stack.external_name, "Built stack");
        Ok(stack)
    }
}

/// `{project_code}-{name}` with path separators turned into dashes.
pub fn external_stack_name(project_code: &str, name: &str) -> String {
    format!("{project_code}-{}", name.replace('/', "-"))
}

/// Storage key for an uploaded template.
///
/// An empty prefix, after trimming slashes, is ignored.
pub fn artifact_key(external_name: &str, prefix: Option<&str>, timestamp: DateTime<Utc>) -> String {
    let key = format!(
        "{external_name}/{}.json",
        timestamp.format("%Y-%m-%d-%H-%M-%S-%6fZ")
    );
    match prefix.map(|p| p.trim_matches('/')) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}/{key}"),
        _ => key,
    }
}

static LAST_TIMESTAMP_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current UTC time, bumped so that no two calls in a process share a microsecond.
fn next_timestamp() -> DateTime<Utc> {
    let now = Utc::now().timestamp_micros();
    let bump = |last: i64| now.max(last.saturating_add(1));
    let previous = LAST_TIMESTAMP_MICROS
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(bump(last)))
        .unwrap_or_else(|last| last);
    DateTime::from_timestamp_micros(bump(previous)).unwrap_or_else(Utc::now)
}

/// Typed access to the keys of one stack's resolved config.
///
/// A null value counts as absent.
struct Fields<'a> {
    config: &'a ConfigMap,
    stack: &'a str,
}

impl<'a> Fields<'a> {
    fn get(&self, key: &str) -> Option<&'a ConfigValue> {
        self.config.get(key).filter(|value| !value.is_null())
    }

    fn invalid(key: &str, expected: &'static str, found: &ConfigValue) -> Error {
        Error::InvalidValue {
            key: key.to_string(),
            expected,
            found: found.kind(),
        }
    }

    fn required_str(&self, key: &str) -> Result<&'a str> {
        self.optional_str(key)?.ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
            stack: self.stack.to_string(),
        })
    }

    fn optional_str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.get(key) {
            None => Ok(None),
            Some(ConfigValue::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(Self::invalid(key, "string", other)),
        }
    }

    fn bool_or_false(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            None => Ok(false),
            Some(ConfigValue::Bool(b)) => Ok(*b),
            Some(other) => Err(Self::invalid(key, "bool", other)),
        }
    }

    fn map_or_empty(&self, key: &str) -> Result<ConfigMap> {
        match self.get(key) {
            None => Ok(ConfigMap::new()),
            Some(ConfigValue::Map(map)) => Ok(map.clone()),
            Some(other) => Err(Self::invalid(key, "map", other)),
        }
    }

    fn strings_or_empty(&self, key: &str) -> Result<Vec<String>> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(ConfigValue::Sequence(items)) => items
                .iter()
                .map(|item| match item {
                    ConfigValue::String(s) => Ok(s.clone()),
                    other => Err(Self::invalid(key, "sequence of strings", other)),
                })
                .collect(),
            Some(other) => Err(Self::invalid(key, "sequence of strings", other)),
        }
    }
}
