//! Bridge response classification.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::BridgeError;

/// Body of an `{"error": {...}}` envelope as the bridge sends it.
///
/// A `type` that is not an integer reads as 0 so the description survives.
#[serde_with::serde_as]
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type", default)]
    #[serde_as(deserialize_as = "serde_with::DefaultOnError")]
    code: i64,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    description: String,
}

impl From<ErrorBody> for BridgeError {
    fn from(body: ErrorBody) -> Self {
        let err = BridgeError::new(body.code, &body.description);
        match body.address {
            Some(address) => err.with_address(&address),
            None => err,
        }
    }
}

/// What a decoded bridge response turned out to be.
///
/// The bridge answers with a bare resource, or with an envelope carrying
/// either `error` or `success`; single results are often wrapped in a
/// one-element array.
#[derive(Debug, PartialEq)]
pub(crate) enum BridgeResponse {
    /// An `error` envelope.
    Error(BridgeError),
    /// The contents of a `success` envelope.
    Success(Value),
    /// A plain result, returned verbatim.
    Payload(Value),
}

impl BridgeResponse {
    /// Reduce a decoded response to one of the three shapes.
    ///
    /// Arrays are replaced by their first element (`null` when empty). A null
    /// `error` or `success` member counts as absent.
    pub(crate) fn classify(value: Value) -> Self {
        let value = match value {
            Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
            other => other,
        };

        let mut map = match value {
            Value::Object(map) => map,
            other => return BridgeResponse::Payload(other),
        };

        if let Some(error) = map.get("error").filter(|e| !e.is_null()) {
            let err = match ErrorBody::deserialize(error) {
                Ok(body) => BridgeError::from(body),
                Err(_) => BridgeError::new(0, &error.to_string()),
            };
            return BridgeResponse::Error(err);
        }

        let has_success = map.get("success").is_some_and(|s| !s.is_null());
        if has_success && let Some(success) = map.remove("success") {
            return BridgeResponse::Success(success);
        }
        BridgeResponse::Payload(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error_kind::BridgeErrorKind;

    #[test]
    fn test_error_envelope() {
        let resp = BridgeResponse::classify(json!([{
            "error": {"type": 101, "address": "", "description": "link button not pressed"}
        }]));
        let err = match resp {
            BridgeResponse::Error(err) => err,
            other => panic!("expected error, got {other:?}"),
        };
        assert_eq!(err.kind(), BridgeErrorKind::LinkButton);
        assert_eq!(err.code(), 101);
        assert_eq!(err.description(), "link button not pressed");
        assert_eq!(err.address(), Some(""));
    }

    #[test]
    fn test_malformed_error_envelope_is_generic() {
        let resp = BridgeResponse::classify(json!({"error": "boom"}));
        assert_eq!(
            resp,
            BridgeResponse::Error(BridgeError::new(0, "\"boom\""))
        );
    }

    #[test]
    fn test_out_of_range_code_keeps_description() {
        let resp = BridgeResponse::classify(json!({"error": {"type": -1, "description": "odd"}}));
        assert_eq!(resp, BridgeResponse::Error(BridgeError::new(-1, "odd")));

        let resp = BridgeResponse::classify(json!({
            "error": {"type": "seven", "address": "/lights", "description": "odd"}
        }));
        assert_eq!(
            resp,
            BridgeResponse::Error(BridgeError::new(0, "odd").with_address("/lights"))
        );
    }

    #[test]
    fn test_success_envelope() {
        let resp = BridgeResponse::classify(json!([{"success": {"/lights/1/state/on": true}}]));
        assert_eq!(
            resp,
            BridgeResponse::Success(json!({"/lights/1/state/on": true}))
        );
    }

    #[test]
    fn test_only_first_element_counts() {
        let resp = BridgeResponse::classify(json!([
            {"success": {"id": "1"}},
            {"error": {"type": 7, "description": "invalid value"}}
        ]));
        assert_eq!(resp, BridgeResponse::Success(json!({"id": "1"})));
    }

    #[test]
    fn test_bare_payload() {
        let lights = json!({"1": {"name": "Kitchen"}, "2": {"name": "Den"}});
        assert_eq!(
            BridgeResponse::classify(lights.clone()),
            BridgeResponse::Payload(lights)
        );
        assert_eq!(
            BridgeResponse::classify(json!("pong")),
            BridgeResponse::Payload(json!("pong"))
        );
    }

    #[test]
    fn test_empty_array_is_null() {
        assert_eq!(
            BridgeResponse::classify(json!([])),
            BridgeResponse::Payload(Value::Null)
        );
    }

    #[test]
    fn test_null_members_are_ignored() {
        let envelope = json!({"success": null, "name": "x"});
        assert_eq!(
            BridgeResponse::classify(envelope.clone()),
            BridgeResponse::Payload(envelope)
        );
    }
}
