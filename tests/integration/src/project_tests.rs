//! End-to-end tests across strata-fs, strata-plugins and strata-config
//!
//! Exercises the complete flow: plugin discovery -> registry -> reader ->
//! stacks and environments.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use strata_config::{ConfigMap, ConfigReader, ConfigValue, Error};
use strata_fs::NormalizedPath;
use strata_plugins::{PluginError, PluginFactory, PluginLoader, PluginNamespace, PluginTagRegistry};
use strata_test_utils::TestProject;

/// Loader that serves a fixed lookup table as the `!lookup` resolver.
struct LookupLoader {
    entries: Vec<(&'static str, &'static str)>,
}

struct Lookup {
    entries: Vec<(&'static str, &'static str)>,
}

impl PluginFactory for Lookup {
    fn construct(&self, argument: &str, _config: &ConfigMap) -> Result<ConfigValue, PluginError> {
        self.entries
            .iter()
            .find(|(key, _)| *key == argument)
            .map(|(_, value)| ConfigValue::from(*value))
            .ok_or_else(|| PluginError::new(format!("no entry for '{argument}'")))
    }
}

impl PluginLoader for LookupLoader {
    fn list_plugins(&self, namespace: PluginNamespace) -> Vec<(String, Arc<dyn PluginFactory>)> {
        match namespace {
            PluginNamespace::Resolvers => {
                let lookup: Arc<dyn PluginFactory> = Arc::new(Lookup {
                    entries: self.entries.clone(),
                });
                vec![("lookup".to_string(), lookup)]
            }
            PluginNamespace::Hooks => Vec::new(),
        }
    }
}

fn lookup_registry() -> Arc<PluginTagRegistry> {
    let loader = LookupLoader {
        entries: vec![("ami", "ami-0abc"), ("zone", "example.com")],
    };
    Arc::new(PluginTagRegistry::load(&loader).unwrap())
}

fn project() -> TestProject {
    TestProject::new()
        .with_config("config.yaml", "project_code: shop\nregion: eu-west-1\n")
        .with_config(
            "prod/web.yaml",
            "template_path: templates/web.yaml\nparameters:\n  ImageId: !lookup ami\n",
        )
        .with_config(
            "prod/dns.yaml",
            "template_path: templates/dns.yaml\nstack_name: shop-dns-zone\nparameters:\n  Zone: !lookup zone\n",
        )
        .with_template("web.yaml", "Resources: {}\n")
        .with_template("dns.yaml", "Resources: {}\n")
}

#[test]
fn test_custom_loader_end_to_end() {
    strata_test_utils::logging::init();
    let project = project();
    let reader = ConfigReader::new(project.root(), lookup_registry()).unwrap();

    let prod = reader.build_environment("prod").unwrap();
    let names: Vec<&str> = prod.iter_stacks().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["prod/dns", "prod/web"]);

    let web = prod.find_stack("prod/web").unwrap();
    assert_eq!(web.external_name, "shop-prod-web");
    assert_eq!(web.parameters["ImageId"], ConfigValue::from("ami-0abc"));

    let dns = prod.find_stack("prod/dns").unwrap();
    assert_eq!(dns.external_name, "shop-dns-zone");
    assert_eq!(dns.parameters["Zone"], ConfigValue::from("example.com"));
}

#[test]
fn test_registry_shared_across_threads() {
    let project = project();
    let registry = lookup_registry();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let root = project.root();
                scope.spawn(move || {
                    let reader = ConfigReader::new(root, registry).unwrap();
                    reader.stack("prod/web.yaml").unwrap().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|stack| stack.parameters == results[0].parameters));
}

#[test]
fn test_reader_accepts_normalized_paths() {
    let project = project();
    let reader = ConfigReader::new(project.root(), lookup_registry()).unwrap();

    let by_str = reader.read("prod/web.yaml", None).unwrap();
    let by_path = reader
        .read(NormalizedPath::new("./prod//web.yaml"), None)
        .unwrap();
    assert_eq!(by_str, by_path);
}

#[test]
fn test_lookup_failure_surfaces_key_path() {
    let project = project().with_config(
        "prod/db.yaml",
        "template_path: templates/db.yaml\nparameters:\n  Engine: !lookup engine\n",
    );
    let reader = ConfigReader::new(project.root(), lookup_registry()).unwrap();

    match reader.build_environment("prod").unwrap_err() {
        Error::PluginResolution { tag, key_path, .. } => {
            assert_eq!(tag, "!lookup");
            assert_eq!(key_path, "parameters.Engine");
        }
        other => panic!("Expected PluginResolution, got {other:?}"),
    }
}

#[test]
fn test_duplicate_tags_rejected_at_startup() {
    struct Twice;
    impl PluginLoader for Twice {
        fn list_plugins(&self, _: PluginNamespace) -> Vec<(String, Arc<dyn PluginFactory>)> {
            let factory: Arc<dyn PluginFactory> =
                Arc::new(|_: &str, _: &ConfigMap| Ok::<_, PluginError>(ConfigValue::Null));
            vec![("dup".to_string(), factory)]
        }
    }

    let err = PluginTagRegistry::load(&Twice).unwrap_err();
    assert!(matches!(err, strata_plugins::Error::DuplicateTag { .. }));
}
