use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The uniform reply of every action: `{"status": "success", message?, data?}`
/// or `{"status": "error", message}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
    Error {
        message: String,
    },
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Envelope::Success {
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn with_data(data: Value) -> Self {
        Envelope::Success {
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with(message: impl Into<String>, data: Value) -> Self {
        Envelope::Success {
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Envelope::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Success { message, .. } => message.as_deref(),
            Envelope::Error { message } => Some(message),
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Envelope::Success { data, .. } => data.as_ref(),
            Envelope::Error { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<Value> {
        match self {
            Envelope::Success { data, .. } => data,
            Envelope::Error { .. } => None,
        }
    }

    /// Reads a reply from any producer, including older ones that flag
    /// success with `"success": true`, `"ok": true` or `"status": "ok"`.
    pub fn from_lenient(value: Value) -> Self {
        let flag = |key: &str| value.get(key).and_then(Value::as_bool) == Some(true);
        let status = value.get("status").and_then(Value::as_str);
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        if matches!(status, Some("success") | Some("ok")) || flag("success") || flag("ok") {
            return Envelope::Success {
                message,
                data: value.get("data").cloned().filter(|d| !d.is_null()),
            };
        }
        Envelope::Error {
            message: message.unwrap_or_else(|| "invalid response from server".to_string()),
        }
    }
}

/// Payload of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            message: "FAQ backend active".to_string(),
        }
    }
}
