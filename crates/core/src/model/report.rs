use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::AttemptId;
use crate::model::nickname::Nickname;
use crate::model::tier::Tier;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("{scale} tier {tier} does not match correct count {count}")]
    TierMismatch {
        scale: &'static str,
        tier: Tier,
        count: u32,
    },

    #[error("nickname {nickname} does not match the tier pair")]
    NicknameMismatch { nickname: Nickname },
}

/// Final result of one assessment attempt, as handed to the result sink.
///
/// Construction re-derives the tiers and nickname from the counts, so a
/// report can never carry an inconsistent combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentReport {
    attempt_id: AttemptId,
    nickname: Nickname,
    vocabulary_tier: Tier,
    reading_tier: Tier,
    vocabulary_correct: u32,
    reading_correct: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl AssessmentReport {
    /// Assemble a report from already-resolved parts.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTimeRange` if `completed_at` precedes
    /// `started_at`, `ReportError::TierMismatch` if a stored tier disagrees
    /// with its correct count, and `ReportError::NicknameMismatch` if the
    /// nickname is not the one resolved from the tier pair.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        attempt_id: AttemptId,
        nickname: Nickname,
        vocabulary_tier: Tier,
        reading_tier: Tier,
        vocabulary_correct: u32,
        reading_correct: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        if completed_at < started_at {
            return Err(ReportError::InvalidTimeRange);
        }
        check_tier("vocabulary", vocabulary_tier, vocabulary_correct)?;
        check_tier("reading", reading_tier, reading_correct)?;
        if Nickname::resolve(vocabulary_tier, reading_tier) != nickname {
            return Err(ReportError::NicknameMismatch { nickname });
        }

        Ok(Self {
            attempt_id,
            nickname,
            vocabulary_tier,
            reading_tier,
            vocabulary_correct,
            reading_correct,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn nickname(&self) -> Nickname {
        self.nickname
    }

    #[must_use]
    pub fn vocabulary_tier(&self) -> Tier {
        self.vocabulary_tier
    }

    #[must_use]
    pub fn reading_tier(&self) -> Tier {
        self.reading_tier
    }

    #[must_use]
    pub fn vocabulary_correct(&self) -> u32 {
        self.vocabulary_correct
    }

    #[must_use]
    pub fn reading_correct(&self) -> u32 {
        self.reading_correct
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

fn check_tier(scale: &'static str, tier: Tier, count: u32) -> Result<(), ReportError> {
    let derived = Tier::from_correct_count(i32::try_from(count).unwrap_or(i32::MAX));
    if derived != tier {
        return Err(ReportError::TierMismatch { scale, tier, count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn build(vocabulary_correct: u32, reading_correct: u32) -> AssessmentReport {
        let vocabulary_tier =
            Tier::from_correct_count(i32::try_from(vocabulary_correct).unwrap());
        let reading_tier = Tier::from_correct_count(i32::try_from(reading_correct).unwrap());
        AssessmentReport::from_parts(
            AttemptId::generate(),
            Nickname::resolve(vocabulary_tier, reading_tier),
            vocabulary_tier,
            reading_tier,
            vocabulary_correct,
            reading_correct,
            fixed_now(),
            fixed_now() + Duration::minutes(4),
        )
        .unwrap()
    }

    #[test]
    fn consistent_report_builds() {
        let report = build(7, 6);
        assert_eq!(report.vocabulary_tier(), Tier::High);
        assert_eq!(report.reading_tier(), Tier::Mid);
        assert_eq!(report.nickname(), Nickname::MeaningInterpreter);
    }

    #[test]
    fn rejects_inverted_time_range() {
        let err = AssessmentReport::from_parts(
            AttemptId::generate(),
            Nickname::Sprout,
            Tier::Low,
            Tier::Low,
            0,
            0,
            fixed_now(),
            fixed_now() - Duration::seconds(1),
        )
        .unwrap_err();
        assert_eq!(err, ReportError::InvalidTimeRange);
    }

    #[test]
    fn rejects_tier_that_disagrees_with_count() {
        let err = AssessmentReport::from_parts(
            AttemptId::generate(),
            Nickname::VocabularyConqueror,
            Tier::High,
            Tier::High,
            2,
            8,
            fixed_now(),
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReportError::TierMismatch {
                scale: "vocabulary",
                tier: Tier::High,
                count: 2,
            }
        );
    }

    #[test]
    fn rejects_nickname_that_disagrees_with_tiers() {
        let err = AssessmentReport::from_parts(
            AttemptId::generate(),
            Nickname::Sprout,
            Tier::High,
            Tier::High,
            9,
            9,
            fixed_now(),
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReportError::NicknameMismatch {
                nickname: Nickname::Sprout,
            }
        );
    }
}
