use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use enum_map::Enum;
use getset::{CopyGetters, Getters};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use url::Url;

use crate::job::JobCode;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Enum, strum::Display)]
pub enum SkillCategory {
    #[strum(to_string = "PVE Skills")]
    PveSkill,
    #[strum(to_string = "PVP Skills")]
    PvpSkill,
    #[strum(to_string = "Traits")]
    Trait,
    #[strum(to_string = "PVP Limit Break")]
    LimitBreak,
}

/// Canonical label of an updated skill, trait or limit break.
///
/// Two updates sharing a category and an ordinal collapse into one key.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Getters, CopyGetters)]
pub struct SkillKey {
    #[getset(get_copy = "pub")]
    category: SkillCategory,
    /// Decimal digits without leading zeros; `"0"` for an all-zero ordinal.
    #[getset(get = "pub")]
    ordinal: String,
}

impl SkillKey {
    /// `ordinal` is rendered and stripped of leading zeros, so `7` and `"007"` give the same key.
    pub fn new(category: SkillCategory, ordinal: impl Display) -> Self {
        let ordinal = ordinal.to_string();
        let ordinal = match ordinal.trim_start_matches('0') {
            "" => "0".to_owned(),
            trimmed => trimmed.to_owned(),
        };
        Self { category, ordinal }
    }
}

impl Display for SkillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ordinal = &self.ordinal;
        match self.category {
            SkillCategory::PveSkill => write!(f, "PVE Skill {ordinal:0>2}"),
            SkillCategory::PvpSkill => write!(f, "PVP Skill {ordinal:0>2}"),
            SkillCategory::Trait => write!(f, "Trait {ordinal:0>2}"),
            SkillCategory::LimitBreak => write!(f, "PVP Skill LB{ordinal}"),
        }
    }
}

impl Serialize for SkillKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, strum::Display)]
pub enum SectionKind {
    #[strum(to_string = "PVE")]
    Pve,
    #[strum(to_string = "PVP")]
    Pvp,
}

impl SectionKind {
    pub const ALL: [SectionKind; 2] = [SectionKind::Pve, SectionKind::Pvp];
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RecordKey {
    Skill(SkillKey),
    /// Key of the "last updated" label of a section, rendered as `PVE Update`.
    Section(SectionKind),
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Skill(key) => key.fmt(f),
            RecordKey::Section(kind) => write!(f, "{kind} Update"),
        }
    }
}

impl Serialize for RecordKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Serialized as `true` or as the label string.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FlagValue {
    Updated,
    Label(String),
}

impl Serialize for FlagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlagValue::Updated => serializer.serialize_bool(true),
            FlagValue::Label(label) => serializer.serialize_str(label),
        }
    }
}

/// Confirmed updates of a single job, in the order they were discovered.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize)]
#[serde(transparent)]
pub struct JobUpdateRecord(IndexMap<RecordKey, FlagValue>);

impl JobUpdateRecord {
    /// Overwriting keeps the position of the first insertion.
    pub fn insert_skill(&mut self, key: SkillKey) {
        self.0.insert(RecordKey::Skill(key), FlagValue::Updated);
    }

    pub fn insert_section_label(&mut self, kind: SectionKind, label: String) {
        self.0.insert(RecordKey::Section(kind), FlagValue::Label(label));
    }

    pub fn get(&self, key: &RecordKey) -> Option<&FlagValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &FlagValue)> {
        self.0.iter()
    }

    pub fn skills(&self) -> impl Iterator<Item = SkillKey> + '_ {
        self.0.keys().filter_map(|key| match key {
            RecordKey::Skill(skill) => Some(skill.clone()),
            RecordKey::Section(_) => None,
        })
    }

    pub fn section_labels(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        self.0.iter().filter_map(|(key, value)| match (key, value) {
            (RecordKey::Section(kind), FlagValue::Label(label)) => Some((*kind, label.as_str())),
            _ => None,
        })
    }
}

pub type AggregateFlags = IndexMap<JobCode, JobUpdateRecord>;

/// Contents of `UpdateFlags.json`.
#[derive(Clone, Debug, Getters, Serialize)]
#[getset(get = "pub")]
pub struct FlagsFile {
    generated: DateTime<Utc>,
    flags: AggregateFlags,
}

impl FlagsFile {
    pub fn new(generated: DateTime<Utc>, flags: AggregateFlags) -> Self {
        Self { generated, flags }
    }
}

/// One confirmed skill update with the details shown next to it on the page.
#[derive(Clone, PartialEq, Eq, Debug, Getters, CopyGetters, Serialize)]
pub struct ActionUpdate {
    #[getset(get = "pub")]
    pub(crate) job: JobCode,
    #[getset(get = "pub")]
    pub(crate) action_id: String,
    #[getset(get = "pub")]
    pub(crate) skill: SkillKey,
    #[getset(get = "pub")]
    pub(crate) name: String,
    #[getset(get = "pub")]
    pub(crate) description: String,
    #[getset(get_copy = "pub")]
    pub(crate) updated_at: DateTime<Utc>,
    #[getset(get_copy = "pub")]
    pub(crate) is_new: bool,
    /// Page the update was found on.
    #[getset(get = "pub")]
    pub(crate) url: Url,
}
