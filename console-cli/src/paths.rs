//! Where the console keeps its settings and logs.
//!
//! Follows platform conventions through `directories` (XDG on Linux).

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "admin-console";
const APPLICATION: &str = "console";

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept besides `latest.log`.
const KEPT_LOGS: usize = 10;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// `~/.config/console` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// `~/.cache/console` on Linux.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archives `latest.log` under a timestamped name and prunes old archives.
///
/// Failures are ignored; logging must never stop the console from starting.
pub fn rotate_logs() {
    if let Some(dir) = cache_dir() {
        rotate_logs_in(&dir, KEPT_LOGS);
    }
}

fn rotate_logs_in(dir: &Path, keep: usize) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        let _ = fs::rename(&latest, dir.join(format!("console-{stamp}.log")));
    }

    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let mut archived: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("console-") && name.ends_with(".log"))
        })
        .collect();

    // Timestamped names sort chronologically.
    archived.sort();
    let excess = archived.len().saturating_sub(keep);
    for path in archived.into_iter().take(excess) {
        let _ = fs::remove_file(path);
    }
}
