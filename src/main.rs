use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use itertools::Itertools;
use jobguide_scraping::config::Config;
use jobguide_scraping::data_collector::collect_updates;
use jobguide_scraping::job::JobCode;
use jobguide_scraping::output::{prepare_output_dir, write_action_csv, write_flags};
use log::info;

#[derive(Parser)]
struct Opts {
    /// TOML file overriding the defaults; see `Config` for the keys.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,
    /// Also write every updated action to `updates.csv`.
    #[arg(long)]
    csv: bool,
    /// Only parse the given jobs (repeatable), e.g. `--job PLD --job WAR`.
    #[arg(long = "job", value_name = "CODE")]
    jobs: Vec<String>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    #[arg(long)]
    delay_ms: Option<u64>,
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();

    let opts = Opts::parse();
    let config = load_config(&opts)?;
    prepare_output_dir(&opts.output_dir)?;

    let (flags, stats, actions) = collect_updates(&config).await?.into_parts();

    let path = write_flags(&opts.output_dir, &flags)?;
    info!("Successfully saved data to {path:?}.");
    if opts.csv {
        let path = write_action_csv(&opts.output_dir, &actions)?;
        info!("Successfully saved {} updates to {path:?}.", actions.len());
    }

    println!("{stats}");
    Ok(())
}

fn load_config(opts: &Opts) -> anyhow::Result<Config> {
    let mut config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(ms) = opts.timeout_ms {
        config.set_timeout(Duration::from_millis(ms));
    }
    if let Some(ms) = opts.delay_ms {
        config.set_inter_request_delay(Duration::from_millis(ms));
    }
    if let Some(user_agent) = &opts.user_agent {
        config.set_user_agent(user_agent.clone());
    }
    if !opts.jobs.is_empty() {
        let wanted = opts
            .jobs
            .iter()
            .map(|s| JobCode::from(s.to_uppercase()))
            .collect_vec();
        let unknown = wanted
            .iter()
            .filter(|code| !config.jobs().iter().any(|job| job.code() == *code))
            .collect_vec();
        if !unknown.is_empty() {
            bail!("Unknown job codes: {}", unknown.iter().join(", "));
        }
        let jobs = config
            .jobs()
            .iter()
            .filter(|job| wanted.contains(job.code()))
            .cloned()
            .collect_vec();
        config.set_jobs(jobs);
    }
    Ok(config)
}
