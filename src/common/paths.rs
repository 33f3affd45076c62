//! Filesystem locations for configuration and run results

use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Name used for the platform config directory
const APP_NAME: &str = "uirunner";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/uirunner/`
/// - macOS: `~/Library/Application Support/uirunner/`
/// - Windows: `%APPDATA%\uirunner\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Default results directory for a run: `<cwd>/Results/<timestamp>`.
///
/// The timestamp layout (`yyyyMMdd-HHmmssfff`) is what downstream artifact
/// collectors sort on; keep it stable.
pub fn default_result_dir() -> io::Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S%3f").to_string();
    Ok(std::env::current_dir()?.join("Results").join(timestamp))
}

/// Create the result directory (and parents) if it does not exist yet.
///
/// The runner writes `TestResult.xml`, screenshots and our own `runner.log`
/// here, so this must succeed before anything is launched.
pub fn ensure_result_dir(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_is_valid() {
        let dir = config_dir();
        assert!(dir.is_some());
    }

    #[test]
    fn default_result_dir_is_timestamped() {
        let dir = default_result_dir().unwrap();
        assert!(dir.parent().unwrap().ends_with("Results"));

        // yyyyMMdd-HHmmssfff
        let leaf = dir.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(leaf.len(), "20190101-120000000".len());
        assert_eq!(leaf.as_bytes()[8], b'-');
    }

    #[test]
    fn ensure_result_dir_creates_nested_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("Results").join("20190101-120000000");
        ensure_result_dir(&target).unwrap();
        assert!(target.is_dir());
    }
}
