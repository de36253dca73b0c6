//! Ordered parameter bags and the list/history query builders.
//!
//! A `Params` is built fresh for every call and handed to the request
//! pipeline, which places it in the query string regardless of verb.

use std::fmt;

use serde_json::Value;

use crate::error::ApiError;
use crate::types::{HistoryQuery, ListQuery};

/// Ordered key/value pairs sent with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn append(&mut self, other: Params) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }

    /// Build a bag from a JSON object, converting each value to its scalar
    /// text. Used for pass-through payloads such as settings or credentials.
    /// An array value repeats its key once per element.
    pub fn from_object(value: &Value) -> Result<Self, ApiError> {
        let object = value.as_object().ok_or_else(|| {
            ApiError::InvalidPayloadShape(format!("expected an object, got {}", kind(value)))
        })?;
        let mut params = Self::new();
        for (key, value) in object {
            params.push_value(key.clone(), value)?;
        }
        Ok(params)
    }

    /// Add `value` under `name`: a scalar once, an array of scalars once per
    /// element (`name=a&name=b`), `null` not at all.
    pub(crate) fn push_value(&mut self, name: String, value: &Value) -> Result<(), ApiError> {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar(item, &name)? {
                        self.push(name.as_str(), text);
                    }
                }
            }
            _ => {
                if let Some(text) = scalar(value, &name)? {
                    self.push(name, text);
                }
            }
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

/// Text form of a leaf value, or `None` for `null`, which is left out of the
/// bag. `at` names the field for error messages.
fn scalar(value: &Value, at: &str) -> Result<Option<String>, ApiError> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Null => Ok(None),
        Value::Array(_) | Value::Object(_) => Err(ApiError::InvalidPayloadShape(format!(
            "`{at}` must be a scalar, got {}",
            kind(value)
        ))),
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Paging and filtering parameters for list endpoints. Unset fields are
/// omitted; `filter` is JSON-encoded and sent only when it carries something.
pub fn create_conditions(query: &ListQuery) -> Result<Params, ApiError> {
    let mut params = Params::new();
    if let Some(offset) = query.offset {
        params.push("offset", offset.to_string());
    }
    if let Some(limit) = query.limit {
        params.push("limit", limit.to_string());
    }
    if let Some(order_by) = &query.order_by {
        params.push("orderby", order_by.as_str());
    }
    if let Some(filter) = query.filter.as_ref().filter(|f| !is_blank(f)) {
        let encoded = serde_json::to_string(filter).map_err(|e| ApiError::Encode(e.to_string()))?;
        params.push("filter", encoded);
    }
    Ok(params)
}

/// Parameters for the activity log. Unset fields are omitted.
pub fn create_history_query(query: &HistoryQuery) -> Params {
    let fields = [
        ("action", &query.action),
        ("date", &query.date),
        ("sort_by", &query.sort_by),
        ("startDate", &query.start_date),
        ("endDate", &query.end_date),
    ];
    fields
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_list_query_yields_no_params() {
        let params = create_conditions(&ListQuery::new()).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn list_query_uses_wire_names_in_order() {
        let query = ListQuery::new()
            .offset(0)
            .limit(25)
            .order_by("created_at")
            .filter(json!({"status": "ENABLED"}));
        let params = create_conditions(&query).unwrap();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["offset", "limit", "orderby", "filter"]);
        assert_eq!(params.get("offset"), Some("0"));
        assert_eq!(params.get("filter"), Some(r#"{"status":"ENABLED"}"#));
    }

    #[test]
    fn blank_filters_are_omitted() {
        for filter in [json!(null), json!({}), json!([]), json!("")] {
            let params = create_conditions(&ListQuery::new().filter(filter)).unwrap();
            assert!(params.get("filter").is_none());
        }
    }

    #[test]
    fn history_query_only_includes_set_fields() {
        let params = create_history_query(&HistoryQuery::new().action("all"));
        assert_eq!(params.into_pairs(), vec![("action".to_string(), "all".to_string())]);
    }

    #[test]
    fn history_query_renames_date_bounds() {
        let query = HistoryQuery::new()
            .sort_by("DESC")
            .start_date("01/01/2020")
            .end_date("12/31/2020");
        let params = create_history_query(&query);
        assert_eq!(params.get("sort_by"), Some("DESC"));
        assert_eq!(params.get("startDate"), Some("01/01/2020"));
        assert_eq!(params.get("endDate"), Some("12/31/2020"));
        assert!(params.get("action").is_none());
    }

    #[test]
    fn from_object_converts_scalars() {
        let params = Params::from_object(&json!({"a": 1, "b": true, "c": null, "d": "x"})).unwrap();
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), Some("true"));
        assert_eq!(params.get("c"), None);
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("d"), Some("x"));
    }

    #[test]
    fn from_object_rejects_nested_values() {
        let err = Params::from_object(&json!({"a": {"b": 1}})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayloadShape(_)));
        let err = Params::from_object(&json!({"a": [[1]]})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayloadShape(_)));
        let err = Params::from_object(&json!(["a"])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayloadShape(_)));
    }

    #[test]
    fn arrays_repeat_their_key() {
        let params = Params::from_object(&json!({"tags": ["a", null, 2], "none": []})).unwrap();
        assert_eq!(
            params.into_pairs(),
            vec![
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn object_keys_keep_caller_order() {
        let params = Params::from_object(&json!({"zeta": 1, "alpha": 2, "mid": 3})).unwrap();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn display_lists_pairs() {
        let params: Params = [("offset", "0"), ("limit", "5")].into_iter().collect();
        assert_eq!(params.to_string(), "{offset: 0, limit: 5}");
    }
}
