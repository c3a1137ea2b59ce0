use std::path::{Path, PathBuf};

use anyhow::Context;
use jobguide_scraping_utils::fs_json_util::write_json_pretty;

use crate::schema::{ActionUpdate, FlagsFile};

pub const FLAGS_FILE_NAME: &str = "UpdateFlags.json";
pub const ACTIONS_CSV_FILE_NAME: &str = "updates.csv";

pub fn prepare_output_dir(dir: &Path) -> anyhow::Result<()> {
    fs_err::create_dir_all(dir).with_context(|| format!("Cannot prepare output dir {dir:?}"))
}

pub fn write_flags(dir: &Path, flags: &FlagsFile) -> anyhow::Result<PathBuf> {
    let path = dir.join(FLAGS_FILE_NAME);
    write_json_pretty(&path, flags)?;
    Ok(path)
}

pub fn write_action_csv(dir: &Path, actions: &[ActionUpdate]) -> anyhow::Result<PathBuf> {
    let path = dir.join(ACTIONS_CSV_FILE_NAME);
    let mut writer = csv::Writer::from_writer(fs_err::File::create(&path)?);
    for action in actions {
        writer.serialize(action)?;
    }
    writer.flush()?;
    Ok(path)
}
