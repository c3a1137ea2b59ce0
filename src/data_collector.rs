use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use chrono::{Local, TimeZone, Utc};
use getset::Getters;
use log::warn;
use scraper::Html;
use tokio::time::sleep;
use url::Url;

use crate::{
    api::{FetchError, HttpFetcher, PageFetcher},
    chrono_util::epoch_to_utc,
    config::Config,
    job::JobDescriptor,
    observer::{LogObserver, RunObserver},
    parser::{parse_job_page, JobPage},
    schema::{ActionUpdate, AggregateFlags, FlagsFile},
    stats::RunStats,
};

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Could not build the page url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Unexpected failure while processing the page: {0}")]
    Unexpected(String),
}

#[derive(Debug, Getters)]
#[getset(get = "pub")]
pub struct RunOutput {
    flags: FlagsFile,
    stats: RunStats,
    /// Classified update rows of every job, in job order.
    actions: Vec<ActionUpdate>,
}

impl RunOutput {
    pub fn into_parts(self) -> (FlagsFile, RunStats, Vec<ActionUpdate>) {
        (self.flags, self.stats, self.actions)
    }
}

/// Fetches every job page of `config` over HTTP and reports progress to the log.
///
/// Fails only if the HTTP client cannot be set up.
pub async fn collect_updates(config: &Config) -> anyhow::Result<RunOutput> {
    let fetcher = HttpFetcher::new(config)?;
    Ok(run(&fetcher, config.jobs(), config, &mut LogObserver).await)
}

/// Processes `jobs` one by one, rendering dates in the local time zone.
pub async fn run<F, O>(
    fetcher: &F,
    jobs: &[JobDescriptor],
    config: &Config,
    observer: &mut O,
) -> RunOutput
where
    F: PageFetcher,
    O: RunObserver,
{
    run_in_timezone(fetcher, jobs, config, &Local, observer).await
}

/// A failing job only loses its own entry; the run itself never fails.
pub async fn run_in_timezone<F, O, Tz>(
    fetcher: &F,
    jobs: &[JobDescriptor],
    config: &Config,
    tz: &Tz,
    observer: &mut O,
) -> RunOutput
where
    F: PageFetcher,
    O: RunObserver,
    Tz: TimeZone,
{
    run_with_parser(fetcher, jobs, config, observer, |html| {
        parse_job_page(html, tz)
    })
    .await
}

async fn run_with_parser<F, O, P>(
    fetcher: &F,
    jobs: &[JobDescriptor],
    config: &Config,
    observer: &mut O,
    parse: P,
) -> RunOutput
where
    F: PageFetcher,
    O: RunObserver,
    P: Fn(&Html) -> JobPage,
{
    let mut flags = AggregateFlags::new();
    let mut stats = RunStats::new(jobs.len());
    let mut actions = vec![];
    observer.run_started(jobs.len());

    for (i, job) in jobs.iter().enumerate() {
        match process_job(fetcher, job, config.base_url(), observer, &parse).await {
            Ok((url, page)) => {
                let (record, updates) = page.into_parts();
                observer.job_finished(job, &record);
                for (skill, row) in updates {
                    let Some(updated_at) = epoch_to_utc(row.updated_at()) else {
                        warn!("Timestamp out of range: {}", row.updated_at());
                        continue;
                    };
                    actions.push(ActionUpdate {
                        job: job.code().clone(),
                        action_id: row.action_id().clone(),
                        skill,
                        name: row.name().clone(),
                        description: row.description().clone(),
                        updated_at,
                        is_new: row.is_new(),
                        url: url.clone(),
                    });
                }
                if !record.is_empty() {
                    stats.record_job(&record);
                    flags.insert(job.code().clone(), record);
                }
            }
            Err(e) => {
                observer.job_failed(job, &e);
                stats.record_failure(job.code().clone());
            }
        }
        // Space out requests to the same origin; nothing follows the last one.
        if i + 1 < jobs.len() {
            sleep(*config.inter_request_delay()).await;
        }
    }

    observer.run_finished(&stats);
    RunOutput {
        flags: FlagsFile::new(Utc::now(), flags),
        stats,
        actions,
    }
}

async fn process_job<F, O, P>(
    fetcher: &F,
    job: &JobDescriptor,
    base_url: &Url,
    observer: &mut O,
    parse: &P,
) -> Result<(Url, JobPage), JobError>
where
    F: PageFetcher,
    O: RunObserver,
    P: Fn(&Html) -> JobPage,
{
    let url = job.url(base_url)?;
    observer.job_started(job, &url);
    let body = fetcher.fetch(&url).await?;
    // A panic inside the HTML parser must not take down the remaining jobs.
    let page = panic::catch_unwind(AssertUnwindSafe(|| parse(&Html::parse_document(&body))))
        .map_err(|payload| JobError::Unexpected(panic_message(payload.as_ref())))?;
    Ok((url, page))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
