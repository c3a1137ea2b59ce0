use std::{path::Path, time::Duration};

use getset::{Getters, Setters};
use jobguide_scraping_utils::fs_json_util::read_toml;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds};
use typed_builder::TypedBuilder;
use url::Url;

use crate::job::{default_jobs, JobDescriptor};

static DEFAULT_BASE_URL: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://eu.finalfantasyxiv.com/jobguide/").expect("Default base url is valid")
});

#[serde_as]
#[derive(Clone, Debug, Getters, Setters, TypedBuilder, Deserialize)]
#[getset(get = "pub", set = "pub")]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Job pages live at `<base_url>/<slug>/`.
    #[builder(default = DEFAULT_BASE_URL.clone())]
    base_url: Url,
    /// Upper bound of a single page fetch.
    #[builder(default = Duration::from_millis(15000))]
    #[serde(rename = "timeout_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    timeout: Duration,
    /// Pause between two consecutive page fetches.
    #[builder(default = Duration::from_millis(2000))]
    #[serde(rename = "inter_request_delay_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    inter_request_delay: Duration,
    #[builder(default = "FFXIV Parser".to_owned(), setter(into))]
    user_agent: String,
    #[builder(default = default_jobs())]
    jobs: Vec<JobDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        read_toml(path.as_ref())
    }
}
