//! Vidask Core Library
//!
//! Session state, configuration and the HTTP client for asking questions about a
//! video file through a remote inference endpoint.

pub mod client;
pub mod config;
pub mod error;
pub mod media;
pub mod preview;
pub mod session;

// Re-export commonly used items at crate root
pub use client::{AskClient, decode_answer};
pub use config::Config;
pub use error::{Result, VidaskError};
pub use media::{SelectedFile, VIDEO_EXTENSIONS};
pub use preview::{PreviewHandle, PreviewStore};
pub use session::{AnswerSection, Failure, FailureKind, Session, Submission, SubmissionStatus};
