//! Shared error types for the services crate.

use thiserror::Error;

use assess_core::model::{BatchError, ReportError};
use remote::repository::RemoteError;

/// Errors emitted by the assessment workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("assessment is not finished")]
    NotFinished,
    #[error(transparent)]
    Content(#[from] BatchError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
