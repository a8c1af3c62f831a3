use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(DocumentId);

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    System,
    Bot,
}

/// Current phase of the upload/ask wizard.
///
/// The machine is cyclic: a successful upload moves to `Asking`, a successful
/// answer moves to `Answered`, and "new question" rewinds to `Asking` without
/// discarding the transcript or the document binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    AwaitingUpload,
    Asking,
    Answered,
}
