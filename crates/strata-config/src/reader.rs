//! Configuration reading with hierarchical merge
//!
//! The `ConfigReader` resolves a file under `config/` by rendering and
//! merging every same-named file from the configuration root down to the
//! file's own directory, then constructing deferred plugin values and
//! checking the project's version requirement.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use semver::Version;
use strata_fs::{EntryKind, NormalizedPath, ProjectPath, io};
use strata_plugins::{ConfigMap, ConfigValue, PluginTagRegistry};

use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::gate::VersionGate;
use crate::keys;
use crate::merge::merge;
use crate::parse::parse_level;
use crate::render::TemplateRenderer;
use crate::resolve::DeferredResolver;
use crate::stack::Stack;

/// Resolves configuration files, stacks and environments for one project.
///
/// A project is a directory containing `config/`. Paths given to the reader
/// are relative to that `config/` directory and use forward slashes.
///
/// Levels are read in order, with deeper levels overriding shallower ones
/// key by key:
/// 1. `config/<name>`
/// 2. `config/<a>/<name>`
/// 3. `config/<a>/<b>/<name>`, and so on down to the requested directory
///
/// Missing intermediate levels are skipped. Only the requested file itself
/// must exist, unless it is an environment's `config.yaml`.
#[derive(Debug, Clone)]
pub struct ConfigReader {
    /// Canonical project root
    project_dir: PathBuf,

    /// `project_dir/config`
    config_dir: PathBuf,

    registry: Arc<PluginTagRegistry>,
    renderer: TemplateRenderer,
    gate: VersionGate,
}

impl ConfigReader {
    /// Create a reader for the project at `project_dir`.
    ///
    /// Templates see the process environment as captured here, and the
    /// version gate uses this crate's version until overridden.
    ///
    /// # Arguments
    ///
    /// * `project_dir` - Directory containing `config/`
    /// * `registry` - Tags that level files may use
    ///
    /// # Errors
    ///
    /// Returns `PathNotFound` if `project_dir/config` is not a directory.
    pub fn new(project_dir: impl AsRef<Path>, registry: Arc<PluginTagRegistry>) -> Result<Self> {
        let config_dir = project_dir.as_ref().join(ProjectPath::ConfigDir);
        if !config_dir.is_dir() {
            return Err(Error::PathNotFound { path: config_dir });
        }

        let project_dir = io::canonicalize(project_dir.as_ref())?;
        let config_dir = project_dir.join(ProjectPath::ConfigDir);
        tracing::debug!(?project_dir, tags = registry.len(), "Created config reader");

        Ok(Self {
            project_dir,
            config_dir,
            registry,
            renderer: TemplateRenderer::from_process_env(),
            gate: VersionGate::for_current_tool()?,
        })
    }

    /// Check `require_version` against `version` instead of this crate's.
    pub fn with_running_version(mut self, version: Version) -> Self {
        self.gate = VersionGate::new(version);
        self
    }

    /// Expose `variables` to templates as `environment_variable` instead of
    /// the process environment.
    pub fn with_environment_variables(mut self, variables: BTreeMap<String, String>) -> Self {
        self.renderer = TemplateRenderer::with_variables(variables);
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn registry(&self) -> &PluginTagRegistry {
        &self.registry
    }

    /// Resolve the file at `rel_path` into a config map.
    ///
    /// Every level is rendered with the keys merged so far as template
    /// context, so a deeper level can reference values set above it. Plugin
    /// tags are constructed once all levels are merged.
    ///
    /// # Arguments
    ///
    /// * `rel_path` - File path relative to `config/`, e.g. `prod/vpc.yaml`
    /// * `seed` - Map merged over the seeded keys before the first level
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if `rel_path` names a missing file other than
    /// `config.yaml`, and any render, parse, plugin or version error raised
    /// along the way. Nothing is returned on failure.
    pub fn read(&self, rel_path: impl Into<NormalizedPath>, seed: Option<ConfigMap>) -> Result<ConfigMap> {
        let rel_path = rel_path.into();
        let file_path = rel_path.under(&self.config_dir);
        let (Some(directory), Some(basename)) = (rel_path.parent(), rel_path.file_name()) else {
            return Err(Error::ConfigNotFound { path: file_path });
        };

        if basename != ProjectPath::EnvironmentConfig.as_str() && !file_path.is_file() {
            return Err(Error::ConfigNotFound { path: file_path });
        }

        tracing::debug!(path = %rel_path, "Reading config");

        let mut config = ConfigMap::new();
        config.insert(
            keys::PROJECT_DIR.to_string(),
            ConfigValue::String(self.project_dir.display().to_string()),
        );
        config.insert(
            keys::ENVIRONMENT_PATH.to_string(),
            ConfigValue::from(directory.as_str()),
        );
        if let Some(seed) = seed {
            config = merge(config, seed);
        }

        let config = self.merge_levels(&directory, basename, config)?;
        let config = DeferredResolver::new(&self.registry).resolve(config)?;
        self.gate.check(&config)?;

        tracing::trace!(path = %rel_path, ?config, "Resolved config");
        Ok(config)
    }

    /// Render and merge `basename` at every level from the root to `directory`.
    fn merge_levels(&self, directory: &NormalizedPath, basename: &str, mut config: ConfigMap) -> Result<ConfigMap> {
        for level in directory.levels() {
            let level_dir = level.under(&self.config_dir);
            let Some(rendered) = self.renderer.render(&level_dir, basename, &config)? else {
                continue;
            };

            let document = parse_level(&rendered, &level_dir.join(basename), &self.registry)?;
            tracing::debug!(level = %level, basename, keys = document.len(), "Merged config level");
            config = merge(config, document);
        }
        Ok(config)
    }

    /// Build the stack declared at `rel_path`, inheriting `inherited`.
    ///
    /// Returns `None` for an environment's `config.yaml`, which declares no
    /// stack.
    pub fn build_stack(&self, rel_path: impl Into<NormalizedPath>, inherited: ConfigMap) -> Result<Option<Stack>> {
        let rel_path = rel_path.into();
        if rel_path.file_name() == Some(ProjectPath::EnvironmentConfig.as_str()) {
            return Ok(None);
        }

        let config = self.read(rel_path.clone(), Some(inherited))?;
        Stack::from_config(&rel_path, &config, &self.project_dir).map(Some)
    }

    /// Build the stack at `rel_path` with its own directory's environment
    /// config as inherited context.
    pub fn stack(&self, rel_path: impl Into<NormalizedPath>) -> Result<Option<Stack>> {
        let rel_path = rel_path.into();
        let directory = rel_path.parent().unwrap_or_default();
        let environment_config = self.read(directory.join(ProjectPath::EnvironmentConfig.as_str()), None)?;
        self.build_stack(rel_path, environment_config)
    }

    /// Build the environment tree rooted at `rel_path`.
    ///
    /// Subdirectories become child environments and files become stacks,
    /// both in name order. Hidden entries are ignored. Each stack inherits
    /// its own copy of this environment's resolved `config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `PathNotFound` if `rel_path` is not a directory under
    /// `config/`, and the first error raised by any descendant.
    pub fn build_environment(&self, rel_path: impl Into<NormalizedPath>) -> Result<Environment> {
        let rel_path = rel_path.into();
        let directory = rel_path.under(&self.config_dir);
        if !directory.is_dir() {
            return Err(Error::PathNotFound { path: directory });
        }

        let environment_config = self.read(rel_path.join(ProjectPath::EnvironmentConfig.as_str()), None)?;
        let mut environment = Environment::new(rel_path.as_str());

        for entry in io::list_dir(&directory)? {
            if entry.name == ProjectPath::EnvironmentConfig.as_str() {
                continue;
            }

            let child = rel_path.join(&entry.name);
            match entry.kind {
                EntryKind::Directory => {
                    environment.environments.push(self.build_environment(child)?);
                }
                EntryKind::File => {
                    if let Some(stack) = self.build_stack(child, environment_config.clone())? {
                        environment.stacks.push(stack);
                    }
                }
            }
        }

        tracing::debug!(
            path = %rel_path,
            stacks = environment.stacks.len(),
            environments = environment.environments.len(),
            "Built environment"
        );
        Ok(environment)
    }
}
