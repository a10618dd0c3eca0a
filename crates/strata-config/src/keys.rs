//! Configuration keys understood by the resolver.

/// Absolute project root, seeded into every read
pub const PROJECT_DIR: &str = "project_dir";
/// Directory portion of the requested path, seeded into every read
pub const ENVIRONMENT_PATH: &str = "environment_path";

// Environment scope
pub const PROJECT_CODE: &str = "project_code";
pub const REGION: &str = "region";
pub const IAM_ROLE: &str = "iam_role";
pub const TEMPLATE_BUCKET_NAME: &str = "template_bucket_name";
pub const TEMPLATE_KEY_PREFIX: &str = "template_key_prefix";
pub const REQUIRE_VERSION: &str = "require_version";

// Stack scope
pub const TEMPLATE_PATH: &str = "template_path";
pub const DEPENDENCIES: &str = "dependencies";
pub const HOOKS: &str = "hooks";
pub const PARAMETERS: &str = "parameters";
pub const PROTECT: &str = "protect";
pub const USER_DATA: &str = "user_data";
pub const STACK_NAME: &str = "stack_name";
pub const STACK_TAGS: &str = "stack_tags";
pub const ROLE_ARN: &str = "role_arn";

/// Template variable holding the process environment
pub const ENVIRONMENT_VARIABLE: &str = "environment_variable";
