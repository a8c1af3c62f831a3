use super::*;
use shared::domain::{DocumentId, Sender, WizardStep};

fn msg(sender: Sender, text: &str) -> ChatMessage {
    ChatMessage::now(sender, text)
}

fn uploaded_session() -> Session {
    Session::new(SuggestionCatalog::default())
        .apply(WizardAction::FileSelected(SelectedFile {
            filename: "report.pdf".into(),
            bytes: b"%PDF-1.7".to_vec(),
        }))
        .apply(WizardAction::UploadSucceeded {
            document_id: DocumentId(42),
        })
}

#[test]
fn initial_session_awaits_upload_with_empty_collections() {
    let session = Session::new(SuggestionCatalog::default());
    assert_eq!(session.step, WizardStep::AwaitingUpload);
    assert!(session.messages.is_empty());
    assert!(session.selected_file.is_none());
    assert!(session.document_id.is_none());
    assert!(session.question.is_empty());
    assert!(session.suggestions.is_empty());
}

#[test]
fn upload_success_binds_document_and_advances_to_asking() {
    let session = uploaded_session();
    assert_eq!(session.document_id, Some(DocumentId(42)));
    assert_eq!(session.step, WizardStep::Asking);
    assert_eq!(
        session.messages,
        vec![msg(Sender::System, "File uploaded successfully")]
    );
}

#[test]
fn upload_failure_keeps_step_and_leaves_document_unbound() {
    let session = Session::new(SuggestionCatalog::default())
        .apply(WizardAction::FileSelected(SelectedFile {
            filename: "report.pdf".into(),
            bytes: vec![1, 2, 3],
        }))
        .apply(WizardAction::UploadFailed);
    assert_eq!(session.step, WizardStep::AwaitingUpload);
    assert!(session.document_id.is_none());
    assert_eq!(
        session.messages,
        vec![msg(Sender::System, "Error uploading file")]
    );
}

#[test]
fn editing_recomputes_suggestions_from_the_catalog() {
    let session = uploaded_session().apply(WizardAction::QuestionEdited("what".into()));
    let expected = session.catalog().matching("what");
    assert_eq!(session.suggestions, expected);
    assert!(!session.suggestions.is_empty());

    let session = session.apply(WizardAction::QuestionEdited(String::new()));
    assert!(session.suggestions.is_empty());
    assert!(session.question.is_empty());
}

#[test]
fn exact_question_suggests_only_itself() {
    let text = "What is the summary of this document?";
    let session = uploaded_session().apply(WizardAction::QuestionEdited(text.into()));
    assert_eq!(session.suggestions, vec![text.to_string()]);
}

#[test]
fn picking_a_suggestion_is_idempotent() {
    let text = "Can you provide an overview?";
    let first = uploaded_session()
        .apply(WizardAction::QuestionEdited("overview".into()))
        .apply(WizardAction::SuggestionPicked(text.into()));
    assert_eq!(first.question, text);
    assert!(first.suggestions.is_empty());

    let second = first.clone().apply(WizardAction::SuggestionPicked(text.into()));
    assert_eq!(second.question, first.question);
    assert!(second.suggestions.is_empty());
    assert_eq!(second.messages, first.messages);
    assert_eq!(second.step, first.step);
}

#[test]
fn submission_appends_user_message_and_clears_input() {
    let session = uploaded_session()
        .apply(WizardAction::QuestionEdited("What is the conclusion?".into()))
        .apply(WizardAction::QuestionSubmitted { seq: 1 });
    assert_eq!(
        session.messages,
        vec![
            msg(Sender::System, "File uploaded successfully"),
            msg(Sender::User, "What is the conclusion?"),
        ]
    );
    assert!(session.question.is_empty());
    assert!(session.suggestions.is_empty());
    assert_eq!(session.active_ask, Some(1));
    assert_eq!(session.step, WizardStep::Asking);
}

#[test]
fn answer_appends_bot_message_and_advances_to_answered() {
    let session = uploaded_session()
        .apply(WizardAction::QuestionEdited(
            "What is the summary of this document?".into(),
        ))
        .apply(WizardAction::QuestionSubmitted { seq: 1 })
        .apply(WizardAction::AnswerReceived {
            seq: 1,
            answer: "It is about X.".into(),
        });
    assert_eq!(session.step, WizardStep::Answered);
    assert_eq!(session.active_ask, None);
    assert_eq!(
        session.messages,
        vec![
            msg(Sender::System, "File uploaded successfully"),
            msg(Sender::User, "What is the summary of this document?"),
            msg(Sender::Bot, "It is about X."),
        ]
    );
}

#[test]
fn failed_answer_records_error_text_and_stays_asking() {
    let session = uploaded_session()
        .apply(WizardAction::QuestionEdited("Anything?".into()))
        .apply(WizardAction::QuestionSubmitted { seq: 1 })
        .apply(WizardAction::AnswerFailed { seq: 1 });
    assert_eq!(session.step, WizardStep::Asking);
    assert_eq!(
        session.messages.last(),
        Some(&msg(Sender::Bot, "Error getting answer"))
    );
}

#[test]
fn stale_answer_completions_are_dropped() {
    let session = uploaded_session()
        .apply(WizardAction::QuestionEdited("first question".into()))
        .apply(WizardAction::QuestionSubmitted { seq: 1 })
        .apply(WizardAction::QuestionEdited("second question".into()))
        .apply(WizardAction::QuestionSubmitted { seq: 2 });

    // The slow first answer arrives after the second submission.
    let session = session.apply(WizardAction::AnswerReceived {
        seq: 1,
        answer: "answer to first".into(),
    });
    assert_eq!(session.step, WizardStep::Asking);
    assert_eq!(session.active_ask, Some(2));
    assert_eq!(
        session.messages.last(),
        Some(&msg(Sender::User, "second question"))
    );

    let session = session.apply(WizardAction::AnswerReceived {
        seq: 2,
        answer: "answer to second".into(),
    });
    assert_eq!(session.step, WizardStep::Answered);
    assert_eq!(
        session.messages.last(),
        Some(&msg(Sender::Bot, "answer to second"))
    );
}

#[test]
fn answered_implies_trailing_question_answer_pair() {
    let session = uploaded_session()
        .apply(WizardAction::QuestionEdited("What is the conclusion?".into()))
        .apply(WizardAction::QuestionSubmitted { seq: 1 })
        .apply(WizardAction::AnswerReceived {
            seq: 1,
            answer: "The end.".into(),
        });
    let len = session.messages.len();
    assert!(len >= 2);
    assert_eq!(session.messages[len - 2].sender, Sender::User);
    assert_eq!(session.messages[len - 1].sender, Sender::Bot);
}

#[test]
fn new_document_resets_everything_but_the_catalog() {
    let catalog = SuggestionCatalog::new(["only one".to_string()]);
    let session = Session::new(catalog)
        .apply(WizardAction::FileSelected(SelectedFile {
            filename: "a.pdf".into(),
            bytes: vec![0],
        }))
        .apply(WizardAction::UploadSucceeded {
            document_id: DocumentId(7),
        })
        .apply(WizardAction::QuestionEdited("only".into()))
        .apply(WizardAction::QuestionSubmitted { seq: 1 })
        .apply(WizardAction::AnswerReceived {
            seq: 1,
            answer: "done".into(),
        })
        .apply(WizardAction::NewDocumentRequested);

    assert_eq!(session.step, WizardStep::AwaitingUpload);
    assert!(session.selected_file.is_none());
    assert!(session.document_id.is_none());
    assert!(session.messages.is_empty());
    assert!(session.question.is_empty());
    assert!(session.suggestions.is_empty());
    assert_eq!(session.active_ask, None);
    assert_eq!(session.catalog().entries(), ["only one".to_string()]);
}

#[test]
fn new_question_rewinds_to_asking_and_keeps_history() {
    let session = uploaded_session()
        .apply(WizardAction::QuestionEdited("Anything?".into()))
        .apply(WizardAction::QuestionSubmitted { seq: 1 })
        .apply(WizardAction::AnswerReceived {
            seq: 1,
            answer: "Sure.".into(),
        })
        .apply(WizardAction::NewQuestionRequested);

    assert_eq!(session.step, WizardStep::Asking);
    assert!(session.question.is_empty());
    assert_eq!(session.document_id, Some(DocumentId(42)));
    assert_eq!(session.messages.len(), 3);
}
