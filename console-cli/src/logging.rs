//! File logging for the console binary.

use std::fs;
use std::fs::File;

use anyhow::Context;
use anyhow::Result;
use simplelog::ConfigBuilder;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::paths;

/// Starts logging to `latest.log` in the cache directory.
///
/// Output goes to a file only, so it never interleaves with table output.
/// Does nothing when the platform has no cache directory.
pub fn init(verbose: bool) -> Result<()> {
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    paths::rotate_logs();

    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("console")
        .build();
    WriteLogger::init(level, config, file).context("initializing logger")?;
    Ok(())
}
