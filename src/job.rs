use derive_more::{AsRef, Display, From};
use getset::Getters;
use serde::{Deserialize, Serialize};
use url::Url;

/// Short stable identifier of a job, such as `PLD`.
#[derive(
    Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, From, AsRef, Display, Serialize, Deserialize,
)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct JobCode(String);

/// Path segment of the job guide page, such as `paladin`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct JobSlug(String);

impl From<&str> for JobCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
impl From<&str> for JobSlug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct JobDescriptor {
    code: JobCode,
    slug: JobSlug,
}

impl JobDescriptor {
    pub fn new(code: impl Into<JobCode>, slug: impl Into<JobSlug>) -> Self {
        Self {
            code: code.into(),
            slug: slug.into(),
        }
    }

    /// The guide page of this job, i.e. `<base>/<slug>/`.
    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        // `Url::join` replaces the last segment unless the base ends with a slash.
        if base.path().ends_with('/') {
            base.join(&format!("{}/", self.slug))
        } else {
            Url::parse(&format!("{base}/{}/", self.slug))
        }
    }
}

const DEFAULT_JOB_TABLE: [(&str, &str); 21] = [
    ("PLD", "paladin"),
    ("WAR", "warrior"),
    ("DRK", "darkknight"),
    ("GNB", "gunbreaker"),
    ("WHM", "whitemage"),
    ("SCH", "scholar"),
    ("AST", "astrologian"),
    ("SGE", "sage"),
    ("MNK", "monk"),
    ("DRG", "dragoon"),
    ("NIN", "ninja"),
    ("SAM", "samurai"),
    ("RPR", "reaper"),
    ("VPR", "viper"),
    ("BRD", "bard"),
    ("MCH", "machinist"),
    ("DNC", "dancer"),
    ("BLM", "blackmage"),
    ("SMN", "summoner"),
    ("RDM", "redmage"),
    ("PCT", "pictomancer"),
];

/// Every combat job, tanks first, in the order the output file lists them.
pub fn default_jobs() -> Vec<JobDescriptor> {
    DEFAULT_JOB_TABLE
        .iter()
        .map(|&(code, slug)| JobDescriptor::new(code, slug))
        .collect()
}
