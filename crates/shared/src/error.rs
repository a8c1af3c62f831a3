use serde::{Deserialize, Serialize};

/// Error body the backend emits on non-2xx responses (`{"detail": "..."}`,
/// FastAPI convention). Parsed opportunistically for the diagnostic log; the
/// transcript only ever shows the fixed generic failure text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    /// Best-effort extraction of the server's own error message.
    pub fn from_body(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .map(|parsed| parsed.detail)
    }
}
