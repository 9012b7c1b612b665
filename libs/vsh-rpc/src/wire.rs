use serde::{Deserialize, Serialize};

/// A varlink call frame — identical whether it is dispatched in-process
/// (the embedded service, §4.3) or sent NUL-terminated over a socket to a
/// remote service (§4.7, §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Call {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oneway: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade: Option<bool>,
}

/// A varlink reply frame. `continues: Some(true)` marks every reply but
/// the last in a streaming response; an absent or `Some(false)` value
/// marks the final (or only) reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continues: Option<bool>,
}

impl Reply {
    pub fn is_final(&self) -> bool {
        !self.continues.unwrap_or(false)
    }

    pub fn ok(parameters: serde_json::Value) -> Reply {
        Reply { parameters: Some(parameters), error: None, continues: None }
    }
}
