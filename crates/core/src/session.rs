use crate::{
    error::VidaskError,
    media::SelectedFile,
    preview::{PreviewHandle, PreviewStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    File,
    Transport,
    Decode,
    Upstream,
    MissingAnswer,
}

/// A failed submission, in a form the UI can keep and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&VidaskError> for Failure {
    fn from(err: &VidaskError) -> Self {
        let kind = match err {
            VidaskError::IoError(_) | VidaskError::NotAFile { .. } => FailureKind::File,
            VidaskError::TransportError(_)
            | VidaskError::InvalidEndpoint { .. }
            | VidaskError::ConfigError { .. } => FailureKind::Transport,
            VidaskError::DecodeError(_) => FailureKind::Decode,
            VidaskError::Upstream { .. } => FailureKind::Upstream,
            VidaskError::MissingAnswer => FailureKind::MissingAnswer,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<VidaskError> for Failure {
    fn from(err: VidaskError) -> Self {
        Self::from(&err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Answered(String),
    Failed(Failure),
}

/// What the answer region should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSection<'a> {
    Hidden,
    Progress,
    Answer(&'a str),
    Error(&'a Failure),
}

/// Snapshot of one submission, handed to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub generation: u64,
    pub file: Option<SelectedFile>,
    pub question: String,
}

/// State of a single ask-a-video session.
///
/// Every submission and every file change bumps the generation; outcomes are
/// only applied when they carry the current generation.
#[derive(Debug, Default)]
pub struct Session {
    file: Option<SelectedFile>,
    preview: Option<PreviewHandle>,
    previews: PreviewStore,
    question: String,
    status: SubmissionStatus,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected video. Hides any answer and invalidates pending submissions.
    pub fn select_file(&mut self, file: SelectedFile) -> PreviewHandle {
        if let Some(previous) = self.preview.take() {
            self.previews.revoke(previous);
        }

        let handle = self.previews.create(&file);
        tracing::info!(
            name = file.name(),
            size = file.size(),
            video = file.looks_like_video(),
            "video selected"
        );

        self.generation += 1;
        self.status = SubmissionStatus::Idle;
        self.file = Some(file);
        self.preview = Some(handle);
        handle
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<PreviewHandle> {
        self.preview
    }

    pub fn previews(&self) -> &PreviewStore {
        &self.previews
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn is_question_visible(&self) -> bool {
        self.file.is_some()
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, SubmissionStatus::Loading)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a submission. A missing file is not rejected; the upload then carries no file.
    pub fn submit(&mut self) -> Submission {
        self.generation += 1;
        self.status = SubmissionStatus::Loading;

        tracing::info!(
            generation = self.generation,
            has_file = self.file.is_some(),
            question_len = self.question.len(),
            "submitting question"
        );

        Submission {
            generation: self.generation,
            file: self.file.clone(),
            question: self.question.clone(),
        }
    }

    /// Apply a submission outcome. Returns false when the outcome is stale and was dropped.
    pub fn complete(&mut self, generation: u64, outcome: Result<String, Failure>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "dropping stale submission outcome"
            );
            return false;
        }

        self.status = match outcome {
            Ok(answer) => {
                tracing::info!(generation, answer_len = answer.len(), "answer received");
                SubmissionStatus::Answered(answer)
            }
            Err(failure) => {
                tracing::warn!(generation, kind = ?failure.kind, "submission failed: {}", failure.message);
                SubmissionStatus::Failed(failure)
            }
        };
        true
    }

    pub fn answer_section(&self) -> AnswerSection<'_> {
        match &self.status {
            SubmissionStatus::Idle => AnswerSection::Hidden,
            SubmissionStatus::Loading => AnswerSection::Progress,
            SubmissionStatus::Answered(answer) => AnswerSection::Answer(answer),
            SubmissionStatus::Failed(failure) => AnswerSection::Error(failure),
        }
    }
}
