use std::fmt;

use crate::model::tier::Tier;

/// Learner nickname awarded when the placement flow finishes.
///
/// One nickname per (vocabulary tier, reading tier) pair. The display strings
/// are fixed product copy; changing one is a product decision, not a refactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nickname {
    /// 어휘정복자 — the top title, vocabulary and reading both high.
    VocabularyConqueror,
    /// 의미해석가 — strong vocabulary, solid comprehension.
    MeaningInterpreter,
    /// 단어수집가 — knows words, not yet their contexts.
    WordCollector,
    /// 문맥탐험가 — reads deeply, vocabulary still growing.
    ContextExplorer,
    /// 꾸준학습자 — balanced mid-level learner.
    SteadyLearner,
    /// 단어탐색가 — mid vocabulary, comprehension behind.
    WordSeeker,
    /// 직관독해가 — comprehends well despite a small lexicon.
    IntuitiveReader,
    /// 문장산책가 — developing reader.
    SentenceStroller,
    /// 말뭉치새싹 — the starting-point title.
    Sprout,
}

impl Nickname {
    /// Resolve the nickname for a tier pair.
    ///
    /// Total and deterministic over all nine combinations.
    #[must_use]
    pub fn resolve(vocabulary: Tier, reading: Tier) -> Self {
        match (vocabulary, reading) {
            (Tier::High, Tier::High) => Nickname::VocabularyConqueror,
            (Tier::High, Tier::Mid) => Nickname::MeaningInterpreter,
            (Tier::High, Tier::Low) => Nickname::WordCollector,
            (Tier::Mid, Tier::High) => Nickname::ContextExplorer,
            (Tier::Mid, Tier::Mid) => Nickname::SteadyLearner,
            (Tier::Mid, Tier::Low) => Nickname::WordSeeker,
            (Tier::Low, Tier::High) => Nickname::IntuitiveReader,
            (Tier::Low, Tier::Mid) => Nickname::SentenceStroller,
            (Tier::Low, Tier::Low) => Nickname::Sprout,
        }
    }

    /// The user-facing Korean title.
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            Nickname::VocabularyConqueror => "어휘정복자",
            Nickname::MeaningInterpreter => "의미해석가",
            Nickname::WordCollector => "단어수집가",
            Nickname::ContextExplorer => "문맥탐험가",
            Nickname::SteadyLearner => "꾸준학습자",
            Nickname::WordSeeker => "단어탐색가",
            Nickname::IntuitiveReader => "직관독해가",
            Nickname::SentenceStroller => "문장산책가",
            Nickname::Sprout => "말뭉치새싹",
        }
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: [Tier; 3] = [Tier::Low, Tier::Mid, Tier::High];

    #[test]
    fn high_mid_resolves_to_meaning_interpreter() {
        let nickname = Nickname::resolve(Tier::High, Tier::Mid);
        assert_eq!(nickname, Nickname::MeaningInterpreter);
        assert_eq!(nickname.text(), "의미해석가");
    }

    #[test]
    fn top_title_differs_from_default() {
        let top = Nickname::resolve(Tier::High, Tier::High);
        let default = Nickname::resolve(Tier::Low, Tier::Low);
        assert_ne!(top, default);
        assert_ne!(top.text(), default.text());
    }

    #[test]
    fn all_nine_pairs_resolve_distinctly() {
        let mut seen = std::collections::HashSet::new();
        for vocabulary in TIERS {
            for reading in TIERS {
                let nickname = Nickname::resolve(vocabulary, reading);
                assert!(!nickname.text().is_empty());
                assert!(seen.insert(nickname), "{nickname:?} assigned twice");
            }
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn resolution_is_deterministic() {
        for vocabulary in TIERS {
            for reading in TIERS {
                assert_eq!(
                    Nickname::resolve(vocabulary, reading),
                    Nickname::resolve(vocabulary, reading),
                );
            }
        }
    }
}
