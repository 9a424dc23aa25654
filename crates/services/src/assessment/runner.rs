use assess_core::model::{Question, QuestionBatch, Selection};

/// Outcome of a single advance step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Index moved to the next question.
    Moved,
    /// The batch completed with the given correct count.
    Finished(u32),
    /// No selection recorded for the current question; index unchanged.
    NeedsSelection,
}

/// Steps through one question batch, recording a selection per question and
/// scoring the batch once on completion.
///
/// The index only moves forward through `advance` (or one step back through
/// `back`); a batch with no questions is terminal from the start with a
/// correct count of zero.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    batch: QuestionBatch,
    current: usize,
    selections: Vec<Option<Selection>>,
    correct: Option<u32>,
}

impl BatchRunner {
    #[must_use]
    pub fn new(batch: QuestionBatch) -> Self {
        let selections = vec![None; batch.len()];
        let correct = if batch.is_empty() { Some(0) } else { None };
        Self {
            batch,
            current: 0,
            selections,
            correct,
        }
    }

    /// Total number of questions in this batch.
    #[must_use]
    pub fn total(&self) -> usize {
        self.batch.len()
    }

    /// Zero-based index of the question currently shown.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.correct.is_some()
    }

    /// Correct count, available once the batch is terminal.
    #[must_use]
    pub fn correct_count(&self) -> Option<u32> {
        self.correct
    }

    /// The question at the current index; `None` once the batch is terminal.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            None
        } else {
            self.batch.questions().get(self.current)
        }
    }

    /// The recorded selection for the current question, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        if self.is_finished() {
            return None;
        }
        self.selections.get(self.current).copied().flatten()
    }

    /// Record the selection for the current question, overwriting any
    /// previous one. Silent no-op once the batch is terminal.
    pub fn select(&mut self, selection: Selection) {
        if self.is_finished() {
            return;
        }
        if let Some(slot) = self.selections.get_mut(self.current) {
            *slot = Some(selection);
        }
    }

    /// Move forward one question, completing the batch from its last one.
    ///
    /// Without a selection at the current index the call returns
    /// `Advance::NeedsSelection` and nothing moves; the caller gates its
    /// submit control on [`selection`](Self::selection) being present.
    pub fn advance(&mut self) -> Advance {
        if let Some(count) = self.correct {
            return Advance::Finished(count);
        }
        if self.selection().is_none() {
            return Advance::NeedsSelection;
        }
        if self.current + 1 >= self.batch.len() {
            return Advance::Finished(self.complete());
        }
        self.current += 1;
        Advance::Moved
    }

    /// Step back one question, keeping recorded selections intact.
    ///
    /// Returns `false` on the first question (nowhere to go) and once the
    /// batch is terminal.
    pub fn back(&mut self) -> bool {
        if self.is_finished() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Score the batch and mark it terminal.
    ///
    /// Idempotent: repeat calls return the cached count without rescanning.
    pub fn complete(&mut self) -> u32 {
        if let Some(count) = self.correct {
            return count;
        }
        let mut correct = 0_u32;
        for (question, slot) in self.batch.questions().iter().zip(&self.selections) {
            if slot.as_ref().is_some_and(|sel| question.is_correct(sel)) {
                correct = correct.saturating_add(1);
            }
        }
        self.correct = Some(correct);
        correct
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
