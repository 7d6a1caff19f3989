use crate::market::vocabulary::SkillVocabulary;
use std::collections::BTreeSet;

/// Collects every vocabulary skill mentioned in a job description.
/// Repeat mentions collapse into one hit and a missing description
/// yields an empty set.
pub fn extract_skills(
    description: Option<&str>,
    vocabulary: &SkillVocabulary,
) -> BTreeSet<&'static str> {
    let Some(text) = description else {
        return BTreeSet::new();
    };

    vocabulary
        .skills()
        .iter()
        .filter(|skill| skill.matches(text))
        .map(|skill| skill.tag)
        .collect()
}
