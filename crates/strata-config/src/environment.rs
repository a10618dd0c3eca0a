//! Environment tree entities.

use serde::Serialize;

use crate::stack::Stack;

/// A directory scope in the configuration tree.
///
/// Owns its child environments and the stacks declared directly in it, both
/// in directory-listing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Environment {
    /// Path relative to the configuration root; empty for the root
    pub path: String,
    pub environments: Vec<Environment>,
    pub stacks: Vec<Stack>,
}

impl Environment {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Every stack in this subtree, depth-first, own stacks before children.
    pub fn iter_stacks(&self) -> Box<dyn Iterator<Item = &Stack> + '_> {
        Box::new(
            self.stacks
                .iter()
                .chain(self.environments.iter().flat_map(|child| child.iter_stacks())),
        )
    }

    /// Find a stack anywhere in this subtree by its name, e.g. `prod/vpc`.
    pub fn find_stack(&self, name: &str) -> Option<&Stack> {
        self.iter_stacks().find(|stack| stack.name == name)
    }

    /// Find this environment or a descendant by path.
    pub fn find_environment(&self, path: &str) -> Option<&Environment> {
        if self.path == path {
            return Some(self);
        }
        self.environments
            .iter()
            .find_map(|child| child.find_environment(path))
    }

    /// Depth of the deepest environment below this one; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.environments
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use strata_plugins::ConfigMap;

    fn stack(name: &str) -> Stack {
        Stack {
            name: name.to_string(),
            external_name: format!("acme-{}", name.replace('/', "-")),
            template_path: PathBuf::from("/project/templates/t.json"),
            region: "eu-west-1".to_string(),
            iam_role: None,
            role_arn: None,
            stack_tags: ConfigMap::new(),
            protect: false,
            dependencies: Vec::new(),
            hooks: ConfigMap::new(),
            user_data: ConfigMap::new(),
            parameters: ConfigMap::new(),
            artifact: None,
        }
    }

    fn tree() -> Environment {
        let mut db = Environment::new("prod/db");
        db.stacks.push(stack("prod/db/rds"));

        let mut prod = Environment::new("prod");
        prod.stacks.push(stack("prod/vpc"));
        prod.environments.push(db);

        let mut dev = Environment::new("dev");
        dev.stacks.push(stack("dev/vpc"));

        let mut root = Environment::new("");
        root.environments.push(dev);
        root.environments.push(prod);
        root
    }

    #[test]
    fn test_iter_stacks_depth_first() {
        let root = tree();
        let names: Vec<&str> = root.iter_stacks().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["dev/vpc", "prod/vpc", "prod/db/rds"]);
    }

    #[test]
    fn test_find_stack() {
        let root = tree();
        assert_eq!(root.find_stack("prod/db/rds").unwrap().external_name, "acme-prod-db-rds");
        assert!(root.find_stack("prod/missing").is_none());
    }

    #[test]
    fn test_find_environment() {
        let root = tree();
        assert_eq!(root.find_environment("prod/db").unwrap().stacks.len(), 1);
        assert_eq!(root.find_environment("").unwrap().path, "");
        assert!(root.find_environment("staging").is_none());
    }

    #[test]
    fn test_depth() {
        assert_eq!(tree().depth(), 2);
        assert_eq!(Environment::new("leaf").depth(), 0);
    }

    #[test]
    fn test_serializes() {
        let json = serde_json::to_value(tree()).unwrap();
        assert_eq!(json["environments"][1]["path"], "prod");
        assert_eq!(json["environments"][1]["stacks"][0]["name"], "prod/vpc");
    }
}
