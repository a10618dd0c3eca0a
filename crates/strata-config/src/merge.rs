//! Right-biased shallow merge of configuration maps.
//!
//! Only top-level keys are considered: a key present in the overlay replaces
//! the base value wholesale, even when both sides are maps. Keys keep the
//! position of their first insertion.

use strata_plugins::ConfigMap;

/// Merge `overlay` onto `base`.
///
/// ```
/// use strata_config::merge::merge;
/// use strata_plugins::{ConfigMap, ConfigValue};
///
/// let base = ConfigMap::from([("region".to_string(), ConfigValue::from("eu-west-1"))]);
/// let overlay = ConfigMap::from([("region".to_string(), ConfigValue::from("us-east-1"))]);
///
/// let merged = merge(base, overlay);
/// assert_eq!(merged["region"], ConfigValue::from("us-east-1"));
/// ```
pub fn merge(mut base: ConfigMap, overlay: ConfigMap) -> ConfigMap {
    base.extend(overlay);
    base
}

/// Merge a sequence of maps from lowest to highest priority.
pub fn merge_all<I>(layers: I) -> ConfigMap
where
    I: IntoIterator<Item = ConfigMap>,
{
    layers.into_iter().fold(ConfigMap::new(), merge)
}
