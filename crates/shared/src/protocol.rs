use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DocumentId, Sender};

/// Success body of `POST /upload/`.
///
/// The backend also echoes the extracted document text for debugging; unknown
/// fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// JSON body of `POST /ask/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub document_id: DocumentId,
}

/// Success body of `POST /ask/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// One entry of the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn now(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

impl PartialEq for ChatMessage {
    /// Transcript equality ignores timestamps.
    fn eq(&self, other: &Self) -> bool {
        self.sender == other.sender && self.text == other.text
    }
}

impl Eq for ChatMessage {}
