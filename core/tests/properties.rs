//! Property tests for bracket flattening and URL suffixing.

use jotform_core::flatten::{split_fields, split_key};
use jotform_core::params::create_conditions;
use jotform_core::path::with_json_suffix;
use jotform_core::ListQuery;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}"
}

proptest! {
    #[test]
    fn single_underscore_splits(head in segment(), tail in segment()) {
        let key = format!("{head}_{tail}");
        prop_assume!(key != "created_at");
        prop_assert_eq!(split_key("submission", &key), format!("submission[{head}][{tail}]"));
    }

    #[test]
    fn plain_keys_stay_whole(key in segment()) {
        prop_assert_eq!(split_key("submission", &key), format!("submission[{key}]"));
    }

    #[test]
    fn only_first_underscore_separates(head in segment(), rest in prop::collection::vec(segment(), 2..5)) {
        let tail = rest.join("_");
        let key = format!("{head}_{tail}");
        prop_assert_eq!(split_key("submission", &key), format!("submission[{head}][{tail}]"));
    }

    #[test]
    fn outer_name_is_always_the_prefix(outer in segment(), key in "[a-z_]{1,12}") {
        let name = split_key(&outer, &key);
        let prefix = format!("{outer}[");
        prop_assert!(name.starts_with(&prefix));
        prop_assert!(name.ends_with(']'));
    }

    #[test]
    fn flattening_keeps_every_value(entries in prop::collection::btree_map(segment(), segment(), 0..8)) {
        let object: Map<String, Value> = entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let params = split_fields("submission", &Value::Object(object)).unwrap();
        prop_assert_eq!(params.len(), entries.len());
        for (key, value) in &entries {
            let name = format!("submission[{key}]");
            prop_assert_eq!(params.get(&name), Some(value.as_str()));
        }
    }

    #[test]
    fn suffixing_is_idempotent(parts in prop::collection::vec("[a-z0-9.]{1,8}", 1..5)) {
        let path = format!("/{}", parts.join("/"));
        let once = with_json_suffix(&path);
        prop_assert!(once.ends_with(".json"));
        prop_assert_eq!(with_json_suffix(&once), once.clone());
        if !path.ends_with(".json") {
            prop_assert_eq!(once, format!("{path}.json"));
        }
    }

    #[test]
    fn conditions_omit_unset_fields(
        offset in prop::option::of(0u64..1000),
        limit in prop::option::of(1u64..1000),
        order_by in prop::option::of(segment()),
        with_filter in any::<bool>(),
    ) {
        let query = ListQuery {
            offset,
            limit,
            order_by: order_by.clone(),
            filter: with_filter.then(|| json!({"status": "ENABLED"})),
        };
        let params = create_conditions(&query).unwrap();
        prop_assert_eq!(params.get("offset").is_some(), offset.is_some());
        prop_assert_eq!(params.get("limit").is_some(), limit.is_some());
        prop_assert_eq!(params.get("orderby"), order_by.as_deref());
        prop_assert_eq!(params.get("filter").is_some(), with_filter);
    }
}

#[test]
fn created_at_is_never_split() {
    assert_eq!(split_key("submission", "created_at"), "submission[created_at]");
}
