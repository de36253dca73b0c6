//! Bracket notation for nested form fields.
//!
//! The provider accepts nested values as flat fields named `outer[inner]`.
//! Array values repeat the field name once per element. Three encodings are
//! used:
//!
//! - [`split_fields`]: submission answers. `name_first` becomes
//!   `submission[name][first]`; only the first underscore separates, and
//!   `created_at` is never split.
//! - [`bracket_fields`]: question and property edits. Every key becomes
//!   `outer[key]` unchanged.
//! - [`flatten_form`]: whole-form creation. A group → item → property tree
//!   becomes `group[item][property]`, except the `properties` group, which is
//!   one level shallower (`properties[key]`).

use serde_json::Value;

use crate::error::ApiError;
use crate::params::{kind, Params};

/// Keys containing an underscore that name a single field.
const ATOMIC_KEYS: &[&str] = &["created_at"];

const PROPERTIES_GROUP: &str = "properties";

/// Bracket name for `key` under `outer`, splitting at the first underscore.
pub fn split_key(outer: &str, key: &str) -> String {
    if ATOMIC_KEYS.contains(&key) {
        return format!("{outer}[{key}]");
    }
    match key.split_once('_') {
        Some((field, sub)) => format!("{outer}[{field}][{sub}]"),
        None => format!("{outer}[{key}]"),
    }
}

/// Flatten a submission-style object, splitting compound keys.
pub fn split_fields(outer: &str, fields: &Value) -> Result<Params, ApiError> {
    let object = expect_object(fields, outer)?;
    let mut params = Params::new();
    for (key, value) in object {
        params.push_value(split_key(outer, key), value)?;
    }
    Ok(params)
}

/// Flatten an object one level deep without splitting keys.
pub fn bracket_fields(outer: &str, fields: &Value) -> Result<Params, ApiError> {
    let object = expect_object(fields, outer)?;
    let mut params = Params::new();
    for (key, value) in object {
        params.push_value(format!("{outer}[{key}]"), value)?;
    }
    Ok(params)
}

/// Flatten a whole-form payload such as
/// `{"questions": {"1": {"type": "control_head"}}, "properties": {"title": "x"}}`.
///
/// Groups other than `properties` may also be arrays, in which case items are
/// keyed by their index.
pub fn flatten_form(form: &Value) -> Result<Params, ApiError> {
    let groups = expect_object(form, "form")?;
    let mut params = Params::new();
    for (group, items) in groups {
        if group == PROPERTIES_GROUP {
            params.append(bracket_fields(group, items)?);
            continue;
        }
        for (item, properties) in group_items(group, items)? {
            let at = format!("{group}[{item}]");
            let properties = expect_object(properties, &at)?;
            for (property, value) in properties {
                params.push_value(format!("{at}[{property}]"), value)?;
            }
        }
    }
    Ok(params)
}

fn group_items<'a>(group: &str, items: &'a Value) -> Result<Vec<(String, &'a Value)>, ApiError> {
    match items {
        Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(list) => Ok(list.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect()),
        other => Err(ApiError::InvalidPayloadShape(format!(
            "`{group}` must be an object or array of items, got {}",
            kind(other)
        ))),
    }
}

fn expect_object<'a>(
    value: &'a Value,
    at: &str,
) -> Result<&'a serde_json::Map<String, Value>, ApiError> {
    value.as_object().ok_or_else(|| {
        ApiError::InvalidPayloadShape(format!("`{at}` must be an object, got {}", kind(value)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_key_uses_first_underscore() {
        assert_eq!(split_key("submission", "name_first"), "submission[name][first]");
        assert_eq!(split_key("submission", "a_b_c"), "submission[a][b_c]");
        assert_eq!(split_key("submission", "email"), "submission[email]");
    }

    #[test]
    fn created_at_is_atomic() {
        assert_eq!(split_key("submission", "created_at"), "submission[created_at]");
    }

    #[test]
    fn leading_underscore_yields_empty_field() {
        assert_eq!(split_key("submission", "_x"), "submission[][x]");
    }

    #[test]
    fn split_fields_flattens_submission() {
        let params = split_fields(
            "submission",
            &json!({"name_first": "Jane", "email": "a@b.com", "3": 42}),
        )
        .unwrap();
        assert_eq!(params.get("submission[name][first]"), Some("Jane"));
        assert_eq!(params.get("submission[email]"), Some("a@b.com"));
        assert_eq!(params.get("submission[3]"), Some("42"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn split_fields_rejects_nested_answer() {
        let err = split_fields("submission", &json!({"name": {"first": "Jane"}})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayloadShape(msg) if msg.contains("submission[name]")));
    }

    #[test]
    fn null_answers_are_left_out() {
        let params = split_fields("submission", &json!({"3": null, "4": "x"})).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("submission[4]"), Some("x"));
    }

    #[test]
    fn checkbox_answers_repeat_the_field() {
        let params = split_fields("submission", &json!({"3": ["a", "b"], "name_first": "Jane"})).unwrap();
        assert_eq!(
            params.into_pairs(),
            vec![
                ("submission[3]".to_string(), "a".to_string()),
                ("submission[3]".to_string(), "b".to_string()),
                ("submission[name][first]".to_string(), "Jane".to_string()),
            ]
        );
    }

    #[test]
    fn answers_keep_caller_order() {
        let params = split_fields("submission", &json!({"name_first": "Jane", "email": "a@b.com"})).unwrap();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["submission[name][first]", "submission[email]"]);
    }

    #[test]
    fn bracket_fields_does_not_split() {
        let params = bracket_fields("question", &json!({"type": "control_textbox", "text_align": "Left"})).unwrap();
        assert_eq!(params.get("question[text_align]"), Some("Left"));
        assert_eq!(params.get("question[type]"), Some("control_textbox"));
    }

    #[test]
    fn flatten_form_builds_three_levels() {
        let form = json!({
            "questions": {
                "1": {"type": "control_head", "text": "Title"},
                "2": {"type": "control_textbox", "order": 2}
            },
            "properties": {"title": "My form", "height": 600},
            "emails": [{"type": "notification", "to": "a@b.com"}]
        });
        let params = flatten_form(&form).unwrap();
        assert_eq!(params.get("questions[1][type]"), Some("control_head"));
        assert_eq!(params.get("questions[2][order]"), Some("2"));
        assert_eq!(params.get("properties[title]"), Some("My form"));
        assert_eq!(params.get("properties[height]"), Some("600"));
        assert_eq!(params.get("emails[0][to]"), Some("a@b.com"));
        assert_eq!(params.len(), 8);
    }

    #[test]
    fn flatten_form_rejects_scalar_item() {
        let err = flatten_form(&json!({"questions": {"1": "control_head"}})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayloadShape(msg) if msg.contains("questions[1]")));
    }

    #[test]
    fn flatten_form_rejects_nested_property() {
        let err = flatten_form(&json!({"properties": {"styles": {"a": 1}}})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayloadShape(_)));
    }

    #[test]
    fn flatten_form_rejects_scalar_group() {
        let err = flatten_form(&json!({"questions": 3})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayloadShape(_)));
        let err = flatten_form(&json!("form")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayloadShape(_)));
    }
}
