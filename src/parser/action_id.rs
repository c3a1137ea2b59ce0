use jobguide_scraping_utils::regex;

use crate::schema::{SkillCategory, SkillKey};

/// Maps an action identifier such as `pve_action__7` to its skill key.
///
/// Identifiers of any other shape yield `None`; most rows of a guide page are not skills.
pub fn classify(action_id: &str) -> Option<SkillKey> {
    let patterns = [
        (regex!(r"^pve_action__([0-9]+)$"), SkillCategory::PveSkill),
        (regex!(r"^pvp_action__([0-9]+)$"), SkillCategory::PvpSkill),
        (regex!(r"^trait_action__([0-9]+)$"), SkillCategory::Trait),
        (regex!(r"^pvplimitbreakaction_([0-9]+)$"), SkillCategory::LimitBreak),
    ];
    // Ordinals stay digit strings, so any number of digits classifies.
    patterns.into_iter().find_map(|(pattern, category)| {
        let captures = pattern.captures(action_id)?;
        Some(SkillKey::new(category, &captures[1]))
    })
}
