use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question label cannot be blank")]
    BlankLabel,

    #[error("question prompt cannot be blank")]
    BlankPrompt,

    #[error("passage cannot be blank")]
    BlankPassage,

    #[error("choice question needs at least one option")]
    NoOptions,

    #[error("option {0} appears more than once")]
    DuplicateOption(OptionId),

    #[error("correct option {0} is not among the listed options")]
    UnknownCorrectOption(OptionId),
}

//
// ─── OPTIONS & SELECTIONS ──────────────────────────────────────────────────────
//

/// One selectable answer of a choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub id: OptionId,
    pub text: String,
}

impl QuestionOption {
    #[must_use]
    pub fn new(id: OptionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// A recorded answer for one question.
///
/// `Binary(true)` is the O choice, `Binary(false)` the X choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Choice(OptionId),
    Binary(bool),
}

//
// ─── QUESTION VARIANTS ─────────────────────────────────────────────────────────
//

/// Vocabulary-style multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceQuestion {
    id: QuestionId,
    label: String,
    prompt: String,
    options: Vec<QuestionOption>,
    correct: OptionId,
}

impl ChoiceQuestion {
    /// Build a multiple-choice question, checking content integrity.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the label or prompt is blank, the option
    /// list is empty or contains duplicate ids, or `correct` does not
    /// reference a listed option.
    pub fn new(
        id: QuestionId,
        label: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<QuestionOption>,
        correct: OptionId,
    ) -> Result<Self, QuestionError> {
        let label = label.into();
        let prompt = prompt.into();
        validate_text(&label, &prompt)?;
        validate_options(&options, correct)?;
        Ok(Self {
            id,
            label,
            prompt,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    #[must_use]
    pub fn correct(&self) -> OptionId {
        self.correct
    }
}

/// O/X question. The two options are fixed and not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryQuestion {
    id: QuestionId,
    label: String,
    prompt: String,
    correct: bool,
}

impl BinaryQuestion {
    /// Build an O/X question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the label or prompt is blank.
    pub fn new(
        id: QuestionId,
        label: impl Into<String>,
        prompt: impl Into<String>,
        correct: bool,
    ) -> Result<Self, QuestionError> {
        let label = label.into();
        let prompt = prompt.into();
        validate_text(&label, &prompt)?;
        Ok(Self {
            id,
            label,
            prompt,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct(&self) -> bool {
        self.correct
    }
}

/// Reading-comprehension question: multiple choice over a supporting passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageQuestion {
    id: QuestionId,
    label: String,
    prompt: String,
    passage: String,
    options: Vec<QuestionOption>,
    correct: OptionId,
}

impl PassageQuestion {
    /// Build a passage question, checking content integrity.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` under the same conditions as
    /// [`ChoiceQuestion::new`], plus a blank passage.
    pub fn new(
        id: QuestionId,
        label: impl Into<String>,
        prompt: impl Into<String>,
        passage: impl Into<String>,
        options: Vec<QuestionOption>,
        correct: OptionId,
    ) -> Result<Self, QuestionError> {
        let label = label.into();
        let prompt = prompt.into();
        let passage = passage.into();
        validate_text(&label, &prompt)?;
        if passage.trim().is_empty() {
            return Err(QuestionError::BlankPassage);
        }
        validate_options(&options, correct)?;
        Ok(Self {
            id,
            label,
            prompt,
            passage,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn passage(&self) -> &str {
        &self.passage
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    #[must_use]
    pub fn correct(&self) -> OptionId {
        self.correct
    }
}

fn validate_text(label: &str, prompt: &str) -> Result<(), QuestionError> {
    if label.trim().is_empty() {
        return Err(QuestionError::BlankLabel);
    }
    if prompt.trim().is_empty() {
        return Err(QuestionError::BlankPrompt);
    }
    Ok(())
}

fn validate_options(options: &[QuestionOption], correct: OptionId) -> Result<(), QuestionError> {
    if options.is_empty() {
        return Err(QuestionError::NoOptions);
    }
    for (position, option) in options.iter().enumerate() {
        if options[..position].iter().any(|seen| seen.id == option.id) {
            return Err(QuestionError::DuplicateOption(option.id));
        }
    }
    if !options.iter().any(|option| option.id == correct) {
        return Err(QuestionError::UnknownCorrectOption(correct));
    }
    Ok(())
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One assessment question, tagged by variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    MultipleChoice(ChoiceQuestion),
    BinaryChoice(BinaryQuestion),
    PassageMultipleChoice(PassageQuestion),
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        match self {
            Question::MultipleChoice(q) => q.id(),
            Question::BinaryChoice(q) => q.id(),
            Question::PassageMultipleChoice(q) => q.id(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => q.label(),
            Question::BinaryChoice(q) => q.label(),
            Question::PassageMultipleChoice(q) => q.label(),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => q.prompt(),
            Question::BinaryChoice(q) => q.prompt(),
            Question::PassageMultipleChoice(q) => q.prompt(),
        }
    }

    /// Supporting passage text, present only for reading questions.
    #[must_use]
    pub fn passage(&self) -> Option<&str> {
        match self {
            Question::PassageMultipleChoice(q) => Some(q.passage()),
            Question::MultipleChoice(_) | Question::BinaryChoice(_) => None,
        }
    }

    /// Listed options for choice variants; `None` for O/X questions.
    #[must_use]
    pub fn options(&self) -> Option<&[QuestionOption]> {
        match self {
            Question::MultipleChoice(q) => Some(q.options()),
            Question::PassageMultipleChoice(q) => Some(q.options()),
            Question::BinaryChoice(_) => None,
        }
    }

    /// Whether the given selection answers this question correctly.
    ///
    /// A selection of the wrong shape for the variant is simply incorrect.
    #[must_use]
    pub fn is_correct(&self, selection: &Selection) -> bool {
        match (self, selection) {
            (Question::MultipleChoice(q), Selection::Choice(option)) => q.correct() == *option,
            (Question::PassageMultipleChoice(q), Selection::Choice(option)) => {
                q.correct() == *option
            }
            (Question::BinaryChoice(q), Selection::Binary(answer)) => q.correct() == *answer,
            _ => false,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(ids: &[u64]) -> Vec<QuestionOption> {
        ids.iter()
            .map(|id| QuestionOption::new(OptionId::new(*id), format!("option {id}")))
            .collect()
    }

    #[test]
    fn choice_question_rejects_blank_prompt() {
        let err = ChoiceQuestion::new(
            QuestionId::new(1),
            "Q1",
            "   ",
            options(&[1, 2]),
            OptionId::new(1),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::BlankPrompt);
    }

    #[test]
    fn choice_question_rejects_empty_options() {
        let err = ChoiceQuestion::new(QuestionId::new(1), "Q1", "뜻은?", vec![], OptionId::new(1))
            .unwrap_err();
        assert_eq!(err, QuestionError::NoOptions);
    }

    #[test]
    fn choice_question_rejects_dangling_correct_option() {
        let err = ChoiceQuestion::new(
            QuestionId::new(1),
            "Q1",
            "뜻은?",
            options(&[1, 2, 3]),
            OptionId::new(9),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::UnknownCorrectOption(OptionId::new(9)));
    }

    #[test]
    fn choice_question_rejects_duplicate_option_ids() {
        let err = ChoiceQuestion::new(
            QuestionId::new(1),
            "Q1",
            "뜻은?",
            options(&[1, 2, 2]),
            OptionId::new(1),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::DuplicateOption(OptionId::new(2)));
    }

    #[test]
    fn passage_question_requires_passage_text() {
        let err = PassageQuestion::new(
            QuestionId::new(12),
            "Q12",
            "글의 주제는?",
            "",
            options(&[1, 2]),
            OptionId::new(1),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::BlankPassage);
    }

    #[test]
    fn choice_selection_scores_against_correct_option() {
        let question = Question::MultipleChoice(
            ChoiceQuestion::new(
                QuestionId::new(1),
                "Q1",
                "뜻은?",
                options(&[1, 2, 3]),
                OptionId::new(2),
            )
            .unwrap(),
        );

        assert!(question.is_correct(&Selection::Choice(OptionId::new(2))));
        assert!(!question.is_correct(&Selection::Choice(OptionId::new(1))));
        // shape mismatch never counts
        assert!(!question.is_correct(&Selection::Binary(true)));
    }

    #[test]
    fn binary_selection_scores_against_correct_flag() {
        let question = Question::BinaryChoice(
            BinaryQuestion::new(QuestionId::new(10), "Q10", "맞으면 O", true).unwrap(),
        );

        assert!(question.is_correct(&Selection::Binary(true)));
        assert!(!question.is_correct(&Selection::Binary(false)));
        assert!(!question.is_correct(&Selection::Choice(OptionId::new(1))));
    }

    #[test]
    fn question_accessors_expose_variant_fields() {
        let question = Question::PassageMultipleChoice(
            PassageQuestion::new(
                QuestionId::new(12),
                "Q12",
                "글의 주제는?",
                "옛날 옛적에...",
                options(&[1, 2]),
                OptionId::new(1),
            )
            .unwrap(),
        );

        assert_eq!(question.label(), "Q12");
        assert_eq!(question.passage(), Some("옛날 옛적에..."));
        assert_eq!(question.options().map(<[QuestionOption]>::len), Some(2));
    }
}
