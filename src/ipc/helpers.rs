use super::error::err;
use super::types::{AppState, Session};

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        Self {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

/// `None` when absent or null; an error when present with the wrong type.
pub fn get_optional_u64(
    params: &serde_json::Value,
    key: &str,
) -> Result<Option<u64>, HandlerErr> {
    match params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or_else(|| {
            HandlerErr::bad_params(format!("{} must be a non-negative integer", key))
        }),
    }
}

pub fn session_mut<'a>(
    state: &'a mut AppState,
    params: &serde_json::Value,
) -> Result<&'a mut Session, HandlerErr> {
    let session_id = get_required_str(params, "sessionId")?;
    state.sessions.get_mut(&session_id).ok_or_else(|| HandlerErr {
        code: "not_found",
        message: "session not found".to_string(),
        details: Some(serde_json::json!({ "sessionId": session_id })),
    })
}
