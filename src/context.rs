//! Assembly of the Authorization Context (spec.md §3): the JSON tree
//! produced just before the authorization phase, which authorization
//! selectors are resolved against.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::error::CoreError;
use crate::request::HttpRequestInfo;

/// `{ "context": <request attributes>, "auth": { "identity": ..., "metadata": {...} } }`.
pub fn build_authorization_context(
    request: &HttpRequestInfo,
    identity: Option<Value>,
    metadata: &HashMap<String, Value>,
) -> Value {
    json!({
        "context": {
            "request": {
                "http": {
                    "headers": request.headers,
                    "path": request.path,
                    "method": request.method,
                    "host": request.host,
                    "scheme": request.scheme,
                }
            }
        },
        "auth": {
            "identity": identity.unwrap_or(Value::Null),
            "metadata": metadata,
        }
    })
}

pub fn serialize(context: &Value) -> Result<String, CoreError> {
    serde_json::to_string(context).map_err(|e| CoreError::ContextSerialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_fixed_scenario_context() {
        let request = HttpRequestInfo::builder()
            .header("x-secret-header", "no-one-knows")
            .build();
        let mut metadata = HashMap::new();
        metadata.insert("letters".to_string(), json!(["a", "b", "c"]));

        let context = build_authorization_context(&request, Some(json!("user")), &metadata);

        assert_eq!(
            context["context"]["request"]["http"]["headers"]["x-secret-header"],
            json!("no-one-knows")
        );
        assert_eq!(context["auth"]["identity"], json!("user"));
        assert_eq!(context["auth"]["metadata"]["letters"], json!(["a", "b", "c"]));
    }

    #[test]
    fn missing_identity_serializes_to_null() {
        let request = HttpRequestInfo::builder().build();
        let context = build_authorization_context(&request, None, &HashMap::new());
        assert_eq!(context["auth"]["identity"], Value::Null);
    }
}
