//! Layered stack configuration for Strata
//!
//! A project keeps its configuration under `config/`, organized as a tree of
//! environments. Resolving a file merges every same-named file on the path
//! from the root down to it, rendering each one as a strict template first.
//!
//! ```text
//! config/
//!   config.yaml          # project_code, region, ...
//!   prod/
//!     config.yaml        # overrides for prod
//!     vpc.yaml           # stack "prod/vpc"
//! ```
//!
//! [`ConfigReader`] is the entry point: [`ConfigReader::read`] resolves one
//! file, [`ConfigReader::stack`] builds a single [`Stack`], and
//! [`ConfigReader::build_environment`] builds an [`Environment`] tree.

pub mod environment;
pub mod error;
pub mod gate;
pub mod keys;
pub mod merge;
pub mod parse;
pub mod reader;
pub mod render;
pub mod resolve;
pub mod stack;

pub use environment::Environment;
pub use error::{Error, Result};
pub use gate::VersionGate;
pub use reader::ConfigReader;
pub use render::TemplateRenderer;
pub use resolve::DeferredResolver;
pub use stack::{ArtifactLocation, Stack};

pub use strata_plugins::{ConfigMap, ConfigValue, PluginTagRegistry};
