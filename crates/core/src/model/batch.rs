use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BatchError {
    #[error("question {question} does not belong in a {kind} batch")]
    VariantMismatch {
        kind: BatchKind,
        question: QuestionId,
    },
}

/// The three content sets of the placement flow, in answer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
    Vocabulary,
    Binary,
    Passage,
}

impl BatchKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchKind::Vocabulary => "vocabulary",
            BatchKind::Binary => "binary",
            BatchKind::Passage => "passage",
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered, fixed set of questions of one kind.
///
/// The question list is immutable for the batch's lifetime; the runner in the
/// services crate tracks position and selections separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBatch {
    kind: BatchKind,
    questions: Vec<Question>,
}

impl QuestionBatch {
    /// Build a batch, checking that every question matches the batch kind.
    ///
    /// # Errors
    ///
    /// Returns `BatchError::VariantMismatch` for the first out-of-place question.
    pub fn new(kind: BatchKind, questions: Vec<Question>) -> Result<Self, BatchError> {
        for question in &questions {
            if !kind_accepts(kind, question) {
                return Err(BatchError::VariantMismatch {
                    kind,
                    question: question.id(),
                });
            }
        }
        Ok(Self { kind, questions })
    }

    #[must_use]
    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn kind_accepts(kind: BatchKind, question: &Question) -> bool {
    matches!(
        (kind, question),
        (BatchKind::Vocabulary, Question::MultipleChoice(_))
            | (BatchKind::Binary, Question::BinaryChoice(_))
            | (BatchKind::Passage, Question::PassageMultipleChoice(_))
    )
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
