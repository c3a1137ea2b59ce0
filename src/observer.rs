use itertools::Itertools;
use log::{error, info, warn};
use url::Url;

use crate::{
    data_collector::JobError,
    job::JobDescriptor,
    schema::JobUpdateRecord,
    stats::RunStats,
};

/// Receives progress notifications from a run.
/// Every method defaults to a no-op, so implementors only pick what they care about.
pub trait RunObserver {
    fn run_started(&mut self, _total_jobs: usize) {}
    fn job_started(&mut self, _job: &JobDescriptor, _url: &Url) {}
    fn job_failed(&mut self, _job: &JobDescriptor, _error: &JobError) {}
    fn job_finished(&mut self, _job: &JobDescriptor, _record: &JobUpdateRecord) {}
    fn run_finished(&mut self, _stats: &RunStats) {}
}

pub struct NullObserver;
impl RunObserver for NullObserver {}

/// Reports progress through the `log` facade.
pub struct LogObserver;

impl RunObserver for LogObserver {
    fn run_started(&mut self, total_jobs: usize) {
        info!("Starting to parse {total_jobs} job guide pages.");
    }

    fn job_started(&mut self, job: &JobDescriptor, url: &Url) {
        info!("Parsing {} ({url})...", job.slug());
    }

    fn job_failed(&mut self, job: &JobDescriptor, error: &JobError) {
        match error {
            JobError::Fetch(e) => warn!("Failed to load {}: {e}", job.slug()),
            e => error!("Failed to process {}: {e}", job.slug()),
        }
    }

    fn job_finished(&mut self, job: &JobDescriptor, record: &JobUpdateRecord) {
        if record.is_empty() {
            info!("  {}: no updates", job.code());
            return;
        }
        for (kind, label) in record.section_labels() {
            info!("  {kind} Update: {label}");
        }
        let skills = record.skills().collect_vec();
        if !skills.is_empty() {
            info!("  {} skills: {}", skills.len(), skills.iter().join(", "));
        }
    }

    fn run_finished(&mut self, stats: &RunStats) {
        info!(
            "Done: {} of {} jobs had updates, {} flags in total.",
            stats.processed_jobs(),
            stats.total_jobs(),
            stats.total_skills()
        );
    }
}
