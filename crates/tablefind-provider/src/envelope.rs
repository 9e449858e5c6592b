//! Response envelope unwrapping.
//!
//! Providers wrap result lists in slightly different envelopes
//! (`{"data": {"results": [...]}}`, `{"results": [...]}`,
//! `{"restaurants": [...]}`, `{"data": [...]}`). These helpers look in the
//! body and in its `data` member, in that order.

use serde_json::Value;

/// Returns the first array found under any of `keys`, or under `data` when
/// `data` itself is an array. Missing or non-array values yield an empty list.
#[must_use]
pub fn result_array(body: &Value, keys: &[&str]) -> Vec<Value> {
    let data = body.get("data");
    let scopes = [Some(body), data];

    for scope in scopes.into_iter().flatten() {
        for key in keys {
            if let Some(items) = scope.get(*key).and_then(Value::as_array) {
                return items.clone();
            }
        }
    }

    data.and_then(Value::as_array).cloned().unwrap_or_default()
}

/// Returns the first object found under any of `keys` (in the body, then in
/// `data`), or `data` itself when it is an object.
#[must_use]
pub fn result_object(body: &Value, keys: &[&str]) -> Option<Value> {
    let data = body.get("data");
    let scopes = [Some(body), data];

    for scope in scopes.into_iter().flatten() {
        for key in keys {
            if let Some(obj) = scope.get(*key).filter(|v| v.is_object()) {
                return Some(obj.clone());
            }
        }
    }

    data.filter(|v| v.is_object() && !v.as_object().is_some_and(serde_json::Map::is_empty))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_nested_data_results() {
        let body = json!({"data": {"results": [{"place_id": "p1"}]}});
        assert_eq!(result_array(&body, &["results"]).len(), 1);
    }

    #[test]
    fn finds_top_level_results() {
        let body = json!({"results": [{"place_id": "p1"}, {"place_id": "p2"}]});
        assert_eq!(result_array(&body, &["results"]).len(), 2);
    }

    #[test]
    fn falls_back_to_data_array() {
        let body = json!({"data": [{"_id": "r1"}]});
        assert_eq!(result_array(&body, &["restaurants"]).len(), 1);
    }

    #[test]
    fn missing_list_is_empty() {
        assert!(result_array(&json!({"status": "OK"}), &["results"]).is_empty());
        assert!(result_array(&json!({"results": "nope"}), &["results"]).is_empty());
    }

    #[test]
    fn detail_object_prefers_named_key() {
        let body = json!({"data": {"restaurant": {"_id": "r1"}}});
        let obj = result_object(&body, &["restaurant"]).unwrap();
        assert_eq!(obj["_id"], "r1");
    }

    #[test]
    fn detail_object_falls_back_to_data() {
        let body = json!({"data": {"place_id": "p1", "name": "Tagine Palace"}});
        let obj = result_object(&body, &["result"]).unwrap();
        assert_eq!(obj["place_id"], "p1");
    }

    #[test]
    fn empty_data_object_is_no_record() {
        assert!(result_object(&json!({"data": {}}), &["result"]).is_none());
        assert!(result_object(&json!({}), &["result"]).is_none());
    }
}
