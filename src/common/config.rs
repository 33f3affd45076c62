//! Configuration file handling
//!
//! The config file is optional; every field has a default, so a missing
//! file means a fully defaulted configuration. The runner flavor (direct
//! binary vs. interpreter) is static configuration here - it is never
//! derived from run-parameter data.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::device::resolve::MatchPolicy;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Test-runner executable settings
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Device resolution settings
    #[serde(default)]
    pub device: DeviceConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Which binary the run executes and how.
///
/// With an interpreter configured (the non-Windows default is `mono`), the
/// console-runner path is handed to the interpreter as its first argument;
/// set `interpreter = ""` to execute the console runner directly.
#[derive(Debug, Deserialize, Clone)]
pub struct RunnerConfig {
    /// Path to the NUnit console runner
    #[serde(default = "default_console_path")]
    pub console_path: PathBuf,

    /// Interpreter the console runner is run through
    #[serde(default = "default_interpreter")]
    pub interpreter: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            console_path: default_console_path(),
            interpreter: default_interpreter(),
        }
    }
}

fn default_console_path() -> PathBuf {
    PathBuf::from("NUnit3").join("nunit3-console.exe")
}

#[cfg(windows)]
fn default_interpreter() -> Option<PathBuf> {
    None
}

#[cfg(not(windows))]
fn default_interpreter() -> Option<PathBuf> {
    Some(PathBuf::from("mono"))
}

impl RunnerConfig {
    /// Resolve the console-runner executable, falling back to a PATH
    /// lookup when the configured path does not exist on disk.
    pub fn resolve_console_path(&self) -> Result<PathBuf> {
        if self.console_path.exists() {
            return Ok(self.console_path.clone());
        }

        which::which("nunit3-console").map_err(|_| super::Error::RunnerNotFound {
            path: self.console_path.clone(),
        })
    }

    /// Effective interpreter; an explicitly empty value disables it.
    pub fn interpreter(&self) -> Option<&Path> {
        self.interpreter
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Device resolution settings
#[derive(Debug, Deserialize, Default)]
pub struct DeviceConfig {
    /// How a requested device name is matched against the listing
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Deadline for the device listing command
    #[serde(default = "default_device_listing")]
    pub device_listing_secs: u64,

    /// Optional deadline for the whole runner invocation; when absent the
    /// run blocks until the runner exits on its own
    #[serde(default)]
    pub runner_secs: Option<u64>,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            device_listing_secs: default_device_listing(),
            runner_secs: None,
        }
    }
}

fn default_device_listing() -> u64 {
    30
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| super::Error::FileRead {
                    path: path.display().to_string(),
                    error: e.to_string(),
                })?;
                return toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_parses_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.timeouts.device_listing_secs, 30);
        assert_eq!(config.timeouts.runner_secs, None);
        assert_eq!(config.device.match_policy, MatchPolicy::FirstPrefix);
        assert_eq!(config.runner.console_path, default_console_path());
    }

    #[test]
    fn runner_section_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            [runner]
            console_path = "/opt/nunit/nunit3-console"
            interpreter = ""

            [timeouts]
            runner_secs = 900
            "#,
        )
        .unwrap();

        assert_eq!(config.runner.console_path, PathBuf::from("/opt/nunit/nunit3-console"));
        assert_eq!(config.runner.interpreter(), None);
        assert_eq!(config.timeouts.runner_secs, Some(900));
    }

    #[test]
    fn match_policy_parses_from_snake_case() {
        let config: Config = toml::from_str("[device]\nmatch_policy = \"unique_prefix\"\n").unwrap();
        assert_eq!(config.device.match_policy, MatchPolicy::UniquePrefix);
    }

    #[cfg(not(windows))]
    #[test]
    fn interpreter_defaults_to_mono_off_windows() {
        let config = RunnerConfig::default();
        assert_eq!(config.interpreter(), Some(Path::new("mono")));
    }
}
