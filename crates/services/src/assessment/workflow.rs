use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use assess_core::Clock;
use assess_core::model::{
    AssessmentReport, AttemptId, BatchKind, Question, QuestionBatch, Selection,
};
use remote::repository::{QuestionSource, ResultSink};

use super::flow::{AssessmentFlow, BackAction, FlowEvent};
use crate::error::AssessmentError;

/// One live assessment run: the flow plus submission bookkeeping.
#[derive(Debug)]
pub struct AssessmentRun {
    attempt_id: AttemptId,
    flow: AssessmentFlow,
    started_at: DateTime<Utc>,
    submitted: bool,
}

impl AssessmentRun {
    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whether the final report has reached the result sink.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Read access for the presentation layer (stage, question, progress,
    /// outcome).
    #[must_use]
    pub fn flow(&self) -> &AssessmentFlow {
        &self.flow
    }

    /// Record a selection for the current question.
    pub fn select(&mut self, selection: Selection) {
        self.flow.select(selection);
    }

    /// Handle a back press; see [`AssessmentFlow::back`].
    pub fn back(&mut self) -> BackAction {
        self.flow.back()
    }

    /// Confirm a pending exit attempt, discarding all progress.
    pub fn confirm_exit(&mut self) {
        self.flow.confirm_exit();
    }

    /// Dismiss a pending exit attempt.
    pub fn cancel_exit(&mut self) {
        self.flow.cancel_exit();
    }
}

/// Orchestrates batch loading, flow advancement and one-shot result
/// submission.
#[derive(Clone)]
pub struct AssessmentLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionSource>,
    results: Arc<dyn ResultSink>,
    shuffle: bool,
}

impl AssessmentLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionSource>,
        results: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            clock,
            questions,
            results,
            shuffle: false,
        }
    }

    /// Shuffle question order within each batch at load time. The order is
    /// fixed for the batch's lifetime once loaded.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Fetch the three question batches and start a fresh flow.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Remote` if any batch cannot be loaded.
    pub async fn start_assessment(&self) -> Result<AssessmentRun, AssessmentError> {
        let vocabulary = self.load_batch(BatchKind::Vocabulary).await?;
        let binary = self.load_batch(BatchKind::Binary).await?;
        let passage = self.load_batch(BatchKind::Passage).await?;

        let run = AssessmentRun {
            attempt_id: AttemptId::generate(),
            flow: AssessmentFlow::new(vocabulary, binary, passage),
            started_at: self.clock.now(),
            submitted: false,
        };
        info!(attempt = %run.attempt_id, "assessment started");
        Ok(run)
    }

    /// Advance the flow and, on the transition into `Finished`, submit the
    /// report to the result sink exactly once.
    ///
    /// A sink failure leaves the flow `Finished` with its outcome intact;
    /// retry through [`resubmit`](Self::resubmit).
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Remote` if the submission fails.
    pub async fn advance(&self, run: &mut AssessmentRun) -> Result<FlowEvent, AssessmentError> {
        let event = run.flow.advance();
        if let FlowEvent::StageEntered(stage) = event {
            debug!(attempt = %run.attempt_id, ?stage, "stage entered");
        }
        if run.flow.is_finished() && !run.submitted {
            self.submit(run).await?;
        }
        Ok(event)
    }

    /// Retry result submission for a finished run whose submit failed.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotFinished` if the flow has not reached
    /// `Finished`, or `AssessmentError::Remote` if the sink rejects the
    /// report again.
    pub async fn resubmit(&self, run: &mut AssessmentRun) -> Result<(), AssessmentError> {
        if run.submitted {
            return Ok(());
        }
        if !run.flow.is_finished() {
            return Err(AssessmentError::NotFinished);
        }
        self.submit(run).await
    }

    /// Discard all progress and start the run over with a fresh attempt id.
    pub fn restart(&self, run: &mut AssessmentRun) {
        run.flow.reset();
        run.attempt_id = AttemptId::generate();
        run.started_at = self.clock.now();
        run.submitted = false;
        info!(attempt = %run.attempt_id, "assessment restarted");
    }

    async fn submit(&self, run: &mut AssessmentRun) -> Result<(), AssessmentError> {
        let Some(outcome) = run.flow.outcome().copied() else {
            return Err(AssessmentError::NotFinished);
        };

        let report = AssessmentReport::from_parts(
            run.attempt_id,
            outcome.nickname,
            outcome.vocabulary_tier,
            outcome.reading_tier,
            outcome.vocabulary_correct,
            outcome.reading_correct,
            run.started_at,
            self.clock.now(),
        )?;

        match self.results.submit_report(&report).await {
            Ok(()) => {
                run.submitted = true;
                info!(
                    attempt = %run.attempt_id,
                    nickname = %report.nickname(),
                    "assessment result submitted"
                );
                Ok(())
            }
            Err(err) => {
                warn!(attempt = %run.attempt_id, error = %err, "result submission failed");
                Err(err.into())
            }
        }
    }

    async fn load_batch(&self, kind: BatchKind) -> Result<QuestionBatch, AssessmentError> {
        let batch = self.questions.fetch_batch(kind).await?;
        debug!(%kind, len = batch.len(), "question batch loaded");
        if !self.shuffle {
            return Ok(batch);
        }

        let mut questions: Vec<Question> = batch.questions().to_vec();
        let mut rng = rng();
        questions.as_mut_slice().shuffle(&mut rng);
        Ok(QuestionBatch::new(kind, questions)?)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
