use assess_core::model::{Nickname, Tier};

/// Terminal result of a completed assessment flow.
///
/// Presentation-agnostic: no pre-formatted strings beyond the nickname's
/// fixed product copy, which the UI renders as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentOutcome {
    pub nickname: Nickname,
    pub vocabulary_tier: Tier,
    pub reading_tier: Tier,
    pub vocabulary_correct: u32,
    pub reading_correct: u32,
}
