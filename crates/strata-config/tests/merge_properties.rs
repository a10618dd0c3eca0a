use proptest::prelude::*;
use strata_config::merge::{merge, merge_all};
use strata_config::{ConfigMap, ConfigValue};

fn scalar() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        Just(ConfigValue::Null),
        any::<bool>().prop_map(ConfigValue::Bool),
        any::<i64>().prop_map(ConfigValue::Integer),
        "[a-z0-9-]{0,8}".prop_map(ConfigValue::String),
    ]
}

fn value() -> impl Strategy<Value = ConfigValue> {
    scalar().prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ConfigValue::Sequence),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                .prop_map(|entries| ConfigValue::Map(entries.into_iter().collect())),
        ]
    })
}

fn config_map() -> impl Strategy<Value = ConfigMap> {
    prop::collection::vec(("[a-e]{1,2}", value()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn test_overlay_keys_win(base in config_map(), overlay in config_map()) {
        let merged = merge(base.clone(), overlay.clone());

        for (key, value) in &overlay {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in &base {
            if !overlay.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        for key in merged.keys() {
            prop_assert!(base.contains_key(key) || overlay.contains_key(key));
        }
    }

    #[test]
    fn test_remerge_is_idempotent(base in config_map(), overlay in config_map()) {
        let once = merge(base, overlay.clone());
        let twice = merge(once.clone(), overlay);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_all_matches_fold(layers in prop::collection::vec(config_map(), 0..5)) {
        let folded = layers
            .iter()
            .cloned()
            .fold(ConfigMap::new(), merge);
        prop_assert_eq!(merge_all(layers), folded);
    }

    #[test]
    fn test_empty_is_identity(map in config_map()) {
        prop_assert_eq!(merge(ConfigMap::new(), map.clone()), map.clone());
        prop_assert_eq!(merge(map.clone(), ConfigMap::new()), map);
    }
}
