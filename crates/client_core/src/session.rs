//! The wizard session and its pure transition function.
//!
//! All observable UI state lives in [`Session`]; every mutation goes through
//! [`Session::apply`] so the whole state machine can be unit tested without a
//! rendering environment or a network.

use shared::{
    domain::{DocumentId, Sender, WizardStep},
    protocol::ChatMessage,
};

use crate::suggestions::SuggestionCatalog;

/// Opaque file payload picked by the user. No local validation of type or
/// size is performed; the backend is the authority on what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Complete mutable state of one wizard run.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub selected_file: Option<SelectedFile>,
    pub document_id: Option<DocumentId>,
    pub step: WizardStep,
    pub messages: Vec<ChatMessage>,
    pub question: String,
    pub suggestions: Vec<String>,
    /// Sequence number of the most recent question submission still awaiting
    /// a completion. Completions carrying any other sequence are stale and
    /// ignored.
    pub active_ask: Option<u64>,
    catalog: SuggestionCatalog,
}

/// Everything that can happen to a [`Session`]. User gestures and backend
/// completions dispatch through the same reducer.
#[derive(Debug, Clone)]
pub enum WizardAction {
    FileSelected(SelectedFile),
    UploadSucceeded { document_id: DocumentId },
    UploadFailed,
    QuestionEdited(String),
    SuggestionPicked(String),
    QuestionSubmitted { seq: u64 },
    AnswerReceived { seq: u64, answer: String },
    AnswerFailed { seq: u64 },
    NewDocumentRequested,
    NewQuestionRequested,
}

pub const UPLOAD_OK_TEXT: &str = "File uploaded successfully";
pub const UPLOAD_ERR_TEXT: &str = "Error uploading file";
pub const ANSWER_ERR_TEXT: &str = "Error getting answer";

impl Session {
    pub fn new(catalog: SuggestionCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &SuggestionCatalog {
        &self.catalog
    }

    /// Pure transition: consumes the current state and yields the next one.
    ///
    /// Failure actions never advance `step`; success actions only ever move
    /// it forward, and the two "start over" actions are the only rewinds.
    pub fn apply(mut self, action: WizardAction) -> Session {
        match action {
            WizardAction::FileSelected(file) => {
                self.selected_file = Some(file);
            }
            WizardAction::UploadSucceeded { document_id } => {
                self.document_id = Some(document_id);
                self.messages
                    .push(ChatMessage::now(Sender::System, UPLOAD_OK_TEXT));
                self.step = WizardStep::Asking;
            }
            WizardAction::UploadFailed => {
                self.messages
                    .push(ChatMessage::now(Sender::System, UPLOAD_ERR_TEXT));
            }
            WizardAction::QuestionEdited(text) => {
                self.suggestions = self.catalog.matching(&text);
                self.question = text;
            }
            WizardAction::SuggestionPicked(text) => {
                self.question = text;
                self.suggestions.clear();
            }
            WizardAction::QuestionSubmitted { seq } => {
                self.messages
                    .push(ChatMessage::now(Sender::User, self.question.clone()));
                self.question.clear();
                self.suggestions.clear();
                self.active_ask = Some(seq);
            }
            WizardAction::AnswerReceived { seq, answer } => {
                if self.active_ask == Some(seq) {
                    self.messages.push(ChatMessage::now(Sender::Bot, answer));
                    self.step = WizardStep::Answered;
                    self.active_ask = None;
                }
            }
            WizardAction::AnswerFailed { seq } => {
                if self.active_ask == Some(seq) {
                    self.messages
                        .push(ChatMessage::now(Sender::Bot, ANSWER_ERR_TEXT));
                    self.active_ask = None;
                }
            }
            WizardAction::NewDocumentRequested => {
                let catalog = self.catalog;
                self = Session::new(catalog);
            }
            WizardAction::NewQuestionRequested => {
                self.question.clear();
                self.suggestions.clear();
                self.step = WizardStep::Asking;
            }
        }
        self
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
