//! Client-side core of the document chat wizard.
//!
//! [`WizardController`] owns the [`Session`] state machine, talks to the two
//! backend collaborators, and broadcasts transcript updates to whatever front
//! end is rendering them.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::{domain::WizardStep, protocol::ChatMessage};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

pub mod backend;
pub mod error;
pub mod session;
pub mod suggestions;

pub use backend::{BackendClient, DocumentStore, QuestionAnswerer};
pub use error::WizardError;
pub use session::{SelectedFile, Session, WizardAction};
pub use suggestions::SuggestionCatalog;

/// Session change notifications, emitted after the reducer has run.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    MessageAppended(ChatMessage),
    StepChanged(WizardStep),
    SessionReset,
}

/// Owns the session and exposes the wizard operations.
///
/// Every operation locks the session, runs the pure reducer, and emits
/// [`SessionEvent`]s for whatever changed. Backend completions re-enter
/// through the same path, so a front end sees one ordered stream of updates.
pub struct WizardController {
    document_store: Arc<dyn DocumentStore>,
    question_answerer: Arc<dyn QuestionAnswerer>,
    inner: Mutex<Session>,
    next_ask_seq: AtomicU64,
    events: broadcast::Sender<SessionEvent>,
}

impl WizardController {
    pub fn new(
        document_store: Arc<dyn DocumentStore>,
        question_answerer: Arc<dyn QuestionAnswerer>,
    ) -> Arc<Self> {
        Self::with_catalog(document_store, question_answerer, SuggestionCatalog::default())
    }

    pub fn with_catalog(
        document_store: Arc<dyn DocumentStore>,
        question_answerer: Arc<dyn QuestionAnswerer>,
        catalog: SuggestionCatalog,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            document_store,
            question_answerer,
            inner: Mutex::new(Session::new(catalog)),
            next_ask_seq: AtomicU64::new(0),
            events,
        })
    }

    /// Controller wired to the real HTTP backend for both collaborators.
    pub fn over_http(server_url: impl Into<String>) -> Arc<Self> {
        let backend = Arc::new(BackendClient::new(server_url));
        Self::new(backend.clone(), backend)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> Session {
        self.inner.lock().await.clone()
    }

    /// Stores the picked file in the session. No validation, no error path.
    pub async fn select_file(&self, file: SelectedFile) {
        self.dispatch(WizardAction::FileSelected(file)).await;
    }

    /// Sends the selected file to the document store.
    ///
    /// Returns [`WizardError::NoFileSelected`] without touching the session
    /// when nothing has been picked yet. Backend failures do not surface as
    /// an `Err`: they are logged and recorded in the transcript, and the step
    /// stays at `AwaitingUpload`.
    pub async fn upload_selected_file(&self) -> Result<(), WizardError> {
        let file = {
            let guard = self.inner.lock().await;
            guard
                .selected_file
                .clone()
                .ok_or(WizardError::NoFileSelected)?
        };

        match self.document_store.store_document(&file).await {
            Ok(document_id) => {
                self.dispatch(WizardAction::UploadSucceeded { document_id })
                    .await;
            }
            Err(source) => {
                warn!("{}", WizardError::Upload { source });
                self.dispatch(WizardAction::UploadFailed).await;
            }
        }
        Ok(())
    }

    /// Updates the pending question text and recomputes suggestions.
    pub async fn update_question_input(&self, text: impl Into<String>) {
        self.dispatch(WizardAction::QuestionEdited(text.into()))
            .await;
    }

    /// Adopts a suggestion as the pending question and hides the list.
    pub async fn pick_suggestion(&self, text: impl Into<String>) {
        self.dispatch(WizardAction::SuggestionPicked(text.into()))
            .await;
    }

    /// Submits the pending question to the question answerer.
    ///
    /// A trimmed-empty question is silently ignored. The user message is
    /// appended and the input cleared before the request is awaited, so the
    /// transcript reflects the submission regardless of the outcome. Each
    /// submission carries a sequence number; a completion that is no longer
    /// the most recent submission is dropped instead of interleaving into the
    /// transcript.
    pub async fn submit_question(&self) {
        let (question, document_id, seq) = {
            let mut guard = self.inner.lock().await;
            let question = guard.question.clone();
            if question.trim().is_empty() {
                return;
            }
            let Some(document_id) = guard.document_id else {
                warn!("question submitted before any document upload; ignoring");
                return;
            };
            let seq = self.next_ask_seq.fetch_add(1, Ordering::Relaxed) + 1;
            self.apply_locked(&mut guard, WizardAction::QuestionSubmitted { seq });
            (question, document_id, seq)
        };

        match self.question_answerer.answer(document_id, &question).await {
            Ok(answer) => {
                self.complete_ask(WizardAction::AnswerReceived { seq, answer }, seq)
                    .await;
            }
            Err(source) => {
                warn!("{}", WizardError::Answer { source });
                self.complete_ask(WizardAction::AnswerFailed { seq }, seq)
                    .await;
            }
        }
    }

    /// Full reset back to the upload step. The suggestion catalog survives.
    pub async fn start_new_document(&self) {
        self.dispatch(WizardAction::NewDocumentRequested).await;
    }

    /// Rewinds to the asking step, keeping the transcript and the document.
    pub async fn start_new_question(&self) {
        self.dispatch(WizardAction::NewQuestionRequested).await;
    }

    async fn dispatch(&self, action: WizardAction) {
        let mut guard = self.inner.lock().await;
        self.apply_locked(&mut guard, action);
    }

    async fn complete_ask(&self, action: WizardAction, seq: u64) {
        let mut guard = self.inner.lock().await;
        if guard.active_ask != Some(seq) {
            debug!(seq, "dropping stale ask completion");
            return;
        }
        self.apply_locked(&mut guard, action);
    }

    fn apply_locked(&self, session: &mut Session, action: WizardAction) {
        let prev_step = session.step;
        let prev_messages = session.messages.len();

        let next = std::mem::take(session).apply(action);
        *session = next;

        if session.messages.len() < prev_messages {
            let _ = self.events.send(SessionEvent::SessionReset);
        } else {
            for message in &session.messages[prev_messages..] {
                let _ = self
                    .events
                    .send(SessionEvent::MessageAppended(message.clone()));
            }
        }
        if session.step != prev_step {
            let _ = self.events.send(SessionEvent::StepChanged(session.step));
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
