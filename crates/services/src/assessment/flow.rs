use assess_core::model::{BatchKind, Nickname, Question, QuestionBatch, Selection, Tier};

use super::outcome::AssessmentOutcome;
use super::progress::FlowProgress;
use super::runner::{Advance, BatchRunner};

/// Ordered stages of the placement flow, as shown to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vocabulary,
    Binary,
    Passage,
    Finished,
}

/// What a back press means at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Moved to the previous question of the active batch.
    MovedBack,
    /// Back on the first question: the flow now waits for an exit
    /// confirmation via `confirm_exit` or `cancel_exit`.
    ExitRequested,
    /// Nothing happened (flow finished, or a confirmation is already pending).
    Ignored,
}

/// Result of routing an advance into the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// Moved to the next question within the active batch.
    Moved,
    /// The active batch completed and the flow entered the given stage.
    StageEntered(Stage),
    /// No selection recorded for the current question; nothing changed.
    NeedsSelection,
    /// Input ignored (flow finished, or an exit confirmation is pending).
    Ignored,
}

/// Progress through the stage sequence, carrying exactly the counts each
/// stage has access to. Later stages cannot exist without the counts of the
/// earlier ones, so an inconsistent flow state is unrepresentable.
#[derive(Debug, Clone)]
enum Phase {
    Vocabulary,
    Binary {
        vocabulary_correct: u32,
    },
    Passage {
        vocabulary_correct: u32,
        binary_correct: u32,
    },
    Finished(AssessmentOutcome),
}

/// The placement flow state machine.
///
/// Sequences the vocabulary, O/X and passage batches, classifies tiers from
/// the accumulated correct counts and resolves the final nickname. All
/// methods are synchronous; precondition-shaped inputs (advancing without a
/// selection, input after `Finished`) are absorbed by the return values
/// rather than raised as errors.
#[derive(Debug, Clone)]
pub struct AssessmentFlow {
    vocabulary: QuestionBatch,
    binary: QuestionBatch,
    passage: QuestionBatch,
    phase: Phase,
    runner: BatchRunner,
    answered_before: usize,
    exit_pending: bool,
}

impl AssessmentFlow {
    /// Start a flow over the three batches, in stage order.
    ///
    /// Empty batches auto-complete, so a flow over empty content finishes
    /// immediately with all-zero counts.
    #[must_use]
    pub fn new(
        vocabulary: QuestionBatch,
        binary: QuestionBatch,
        passage: QuestionBatch,
    ) -> Self {
        debug_assert_eq!(vocabulary.kind(), BatchKind::Vocabulary);
        debug_assert_eq!(binary.kind(), BatchKind::Binary);
        debug_assert_eq!(passage.kind(), BatchKind::Passage);

        let runner = BatchRunner::new(vocabulary.clone());
        let mut flow = Self {
            vocabulary,
            binary,
            passage,
            phase: Phase::Vocabulary,
            runner,
            answered_before: 0,
            exit_pending: false,
        };
        flow.settle();
        flow
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        match self.phase {
            Phase::Vocabulary => Stage::Vocabulary,
            Phase::Binary { .. } => Stage::Binary,
            Phase::Passage { .. } => Stage::Passage,
            Phase::Finished(_) => Stage::Finished,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// The resolved result, present only at `Finished`.
    #[must_use]
    pub fn outcome(&self) -> Option<&AssessmentOutcome> {
        match &self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The question currently shown, `None` at `Finished`.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.runner.current_question()
    }

    /// The recorded selection for the current question, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.runner.selection()
    }

    /// True while the flow waits for an exit confirmation.
    #[must_use]
    pub fn exit_pending(&self) -> bool {
        self.exit_pending
    }

    /// Whole-flow progress for the global progress bar.
    #[must_use]
    pub fn progress(&self) -> FlowProgress {
        let total = self.vocabulary.len() + self.binary.len() + self.passage.len();
        let answered = if self.is_finished() {
            total
        } else {
            self.answered_before + self.runner.current_index()
        };
        FlowProgress { answered, total }
    }

    /// Record a selection for the current question.
    ///
    /// No-op at `Finished` or while an exit confirmation is pending.
    pub fn select(&mut self, selection: Selection) {
        if self.exit_pending || self.is_finished() {
            return;
        }
        self.runner.select(selection);
    }

    /// Move to the next question, completing batches and stages as reached.
    pub fn advance(&mut self) -> FlowEvent {
        if self.exit_pending || self.is_finished() {
            return FlowEvent::Ignored;
        }
        match self.runner.advance() {
            Advance::Moved => FlowEvent::Moved,
            Advance::NeedsSelection => FlowEvent::NeedsSelection,
            Advance::Finished(correct) => {
                self.enter_next_phase(correct);
                self.settle();
                FlowEvent::StageEntered(self.stage())
            }
        }
    }

    /// Handle a back press.
    ///
    /// Inside a batch this steps the runner back one question. On the first
    /// question of the active batch it flags an exit attempt instead; the
    /// flow then ignores everything except `confirm_exit`/`cancel_exit`.
    pub fn back(&mut self) -> BackAction {
        if self.exit_pending || self.is_finished() {
            return BackAction::Ignored;
        }
        if self.runner.back() {
            BackAction::MovedBack
        } else {
            self.exit_pending = true;
            BackAction::ExitRequested
        }
    }

    /// Confirm a pending exit attempt: the flow resets to its initial state.
    pub fn confirm_exit(&mut self) {
        if self.exit_pending {
            self.reset();
        }
    }

    /// Dismiss a pending exit attempt, leaving everything else untouched.
    pub fn cancel_exit(&mut self) {
        self.exit_pending = false;
    }

    /// Discard all progress and start over from the vocabulary batch.
    pub fn reset(&mut self) {
        self.phase = Phase::Vocabulary;
        self.runner = BatchRunner::new(self.vocabulary.clone());
        self.answered_before = 0;
        self.exit_pending = false;
        self.settle();
    }

    fn enter_next_phase(&mut self, correct: u32) {
        self.answered_before += self.runner.total();
        match self.phase {
            Phase::Vocabulary => {
                self.phase = Phase::Binary {
                    vocabulary_correct: correct,
                };
                self.runner = BatchRunner::new(self.binary.clone());
            }
            Phase::Binary { vocabulary_correct } => {
                self.phase = Phase::Passage {
                    vocabulary_correct,
                    binary_correct: correct,
                };
                self.runner = BatchRunner::new(self.passage.clone());
            }
            Phase::Passage {
                vocabulary_correct,
                binary_correct,
            } => {
                // O/X correctness never classifies on its own; it folds into
                // the reading total.
                let reading_correct = binary_correct.saturating_add(correct);
                let vocabulary_tier = tier_of(vocabulary_correct);
                let reading_tier = tier_of(reading_correct);
                self.phase = Phase::Finished(AssessmentOutcome {
                    nickname: Nickname::resolve(vocabulary_tier, reading_tier),
                    vocabulary_tier,
                    reading_tier,
                    vocabulary_correct,
                    reading_correct,
                });
            }
            Phase::Finished(_) => {}
        }
    }

    /// Drain through any auto-completed (empty) batches.
    fn settle(&mut self) {
        while !self.is_finished() && self.runner.is_finished() {
            let correct = self.runner.complete();
            self.enter_next_phase(correct);
        }
    }
}

fn tier_of(count: u32) -> Tier {
    Tier::from_correct_count(i32::try_from(count).unwrap_or(i32::MAX))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
