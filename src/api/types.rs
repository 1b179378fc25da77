//! API request and response types

use crate::content::ContentItem;
use crate::reasoning::lab_next::NextAction;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to route a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRouteRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[allow(dead_code)] // Sent by the widget; routing does not use it yet
    #[serde(default)]
    pub context: Option<Value>,
}

/// Request for lab follow-up advice. Accepts both the current and the
/// older field names; the current name wins unless it is null or empty.
#[derive(Debug, Deserialize)]
pub struct LabNextRequest {
    #[serde(default)]
    pub lab_tool: Option<String>,
    #[serde(default)]
    pub lab: Option<String>,
    #[serde(default)]
    pub lab_result: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
}

impl LabNextRequest {
    pub fn tool(&self) -> Option<&str> {
        [self.lab_tool.as_deref(), self.lab.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
    }

    pub fn into_result(self) -> Value {
        [self.lab_result, self.result]
            .into_iter()
            .flatten()
            .find(|r| !is_empty_value(r))
            .unwrap_or(Value::Null)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Serialize)]
pub struct LabNextPayload {
    pub next_actions: Vec<NextAction>,
}

#[derive(Debug, Serialize)]
pub struct LabNextResponse {
    pub action: &'static str,
    pub action_payload: LabNextPayload,
    pub bot_reply: String,
    pub next_actions: Vec<NextAction>,
}

/// Login form (OAuth2 password flow field names)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Response with a list of content items
#[derive(Debug, Serialize)]
pub struct ContentListResponse {
    pub items: Vec<ContentItem>,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
