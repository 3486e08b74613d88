//! Trait abstraction for the submission endpoint to enable mocking in tests

use super::error::SubmitError;
use crate::state::FormPayload;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decoded response body of the form endpoint
///
/// Endpoints are loosely typed: `success` is read by truthiness and a
/// non-string `message` is shown as its JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Application-level success; a missing flag counts as failure
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    /// Shown verbatim to the visitor when `success` is false
    #[serde(default, deserialize_with = "lenient_message")]
    pub message: Option<String>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

/// Falsy messages fall back to the generic failure text
fn lenient_message<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        other if is_truthy(&other) => Some(other.to_string()),
        _ => None,
    })
}

#[cfg(test)]
impl SubmitResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: Option<&str>) -> Self {
        Self {
            success: false,
            message: message.map(str::to_string),
        }
    }
}

/// Posts a serialized form to the site's endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    /// POST the payload as JSON and decode the response body
    async fn post_json(&self, payload: &FormPayload) -> Result<SubmitResponse, SubmitError>;
}
