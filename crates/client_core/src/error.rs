use thiserror::Error;

/// Failure taxonomy of the wizard. Both backend kinds cover any non-success
/// HTTP status as well as transport-level failures; the controller handles
/// them identically (log the detail, append the fixed transcript text, leave
/// the step unchanged).
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("no file selected; choose a document before uploading")]
    NoFileSelected,
    #[error("document upload failed: {source}")]
    Upload { source: anyhow::Error },
    #[error("answer request failed: {source}")]
    Answer { source: anyhow::Error },
}
