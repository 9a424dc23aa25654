use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use assess_core::model::{AssessmentReport, BatchKind, QuestionBatch};

/// Errors surfaced by remote collaborators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteError {
    #[error("not found")]
    NotFound,

    #[error("server returned status {0}")]
    Status(u16),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("malformed payload: {0}")]
    Payload(String),
}

/// Supplies the ordered question batches before a flow starts.
///
/// The engine treats a fetched batch as already-validated, fixed content.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the question batch for one content kind.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the batch cannot be loaded or its payload is
    /// malformed.
    async fn fetch_batch(&self, kind: BatchKind) -> Result<QuestionBatch, RemoteError>;
}

/// One-way sink for the final assessment report.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Deliver the report. The engine never consumes a response body; a
    /// failure only matters for retry bookkeeping in the caller.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the report cannot be delivered.
    async fn submit_report(&self, report: &AssessmentReport) -> Result<(), RemoteError>;
}

/// In-memory question source for testing and prototyping.
#[derive(Clone, Default)]
pub struct StaticQuestionSource {
    batches: Arc<Mutex<HashMap<BatchKind, QuestionBatch>>>,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            batches: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register the batch served for its kind, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Connection` if the internal lock is poisoned.
    pub fn set_batch(&self, batch: QuestionBatch) -> Result<(), RemoteError> {
        let mut guard = self
            .batches
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        guard.insert(batch.kind(), batch);
        Ok(())
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch_batch(&self, kind: BatchKind) -> Result<QuestionBatch, RemoteError> {
        let guard = self
            .batches
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        guard.get(&kind).cloned().ok_or(RemoteError::NotFound)
    }
}

/// Result sink that records every submitted report, for tests.
#[derive(Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<AssessmentReport>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of everything submitted so far, in order.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Connection` if the internal lock is poisoned.
    pub fn reports(&self) -> Result<Vec<AssessmentReport>, RemoteError> {
        let guard = self
            .reports
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl ResultSink for RecordingSink {
    async fn submit_report(&self, report: &AssessmentReport) -> Result<(), RemoteError> {
        let mut guard = self
            .reports
            .lock()
            .map_err(|e| RemoteError::Connection(e.to_string()))?;
        guard.push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::{
        AttemptId, BinaryQuestion, Nickname, Question, QuestionId, Tier,
    };
    use assess_core::time::fixed_now;

    fn binary_batch() -> QuestionBatch {
        let question = Question::BinaryChoice(
            BinaryQuestion::new(QuestionId::new(10), "Q10", "맞으면 O", true).unwrap(),
        );
        QuestionBatch::new(BatchKind::Binary, vec![question]).unwrap()
    }

    #[tokio::test]
    async fn static_source_serves_registered_batch() {
        let source = StaticQuestionSource::new();
        source.set_batch(binary_batch()).unwrap();

        let fetched = source.fetch_batch(BatchKind::Binary).await.unwrap();
        assert_eq!(fetched.len(), 1);

        let missing = source.fetch_batch(BatchKind::Vocabulary).await.unwrap_err();
        assert!(matches!(missing, RemoteError::NotFound));
    }

    #[tokio::test]
    async fn recording_sink_keeps_submission_order() {
        let sink = RecordingSink::new();
        let report = AssessmentReport::from_parts(
            AttemptId::generate(),
            Nickname::Sprout,
            Tier::Low,
            Tier::Low,
            1,
            2,
            fixed_now(),
            fixed_now(),
        )
        .unwrap();

        sink.submit_report(&report).await.unwrap();
        sink.submit_report(&report).await.unwrap();

        let recorded = sink.reports().unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0], report);
    }
}
