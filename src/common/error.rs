//! Error types for the runner CLI
//!
//! Every core failure is fatal: there is no fallback device and no retry.
//! A non-zero exit code from the launched runner is not an error - it is
//! the expected signal that tests failed, handled by the caller.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::device::DeviceLineError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the runner CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Pre-flight ===
    #[error("{0}")]
    InvalidArguments(String),

    // === Device enumeration ===
    #[error("Device listing command `{command}` failed: {reason}")]
    DeviceListingFailed { command: String, reason: String },

    #[error("Device listing returned no devices - is a device connected?")]
    NoDevicesDetected,

    #[error("Malformed device listing line '{line}': {source}")]
    MalformedDeviceLine {
        line: String,
        #[source]
        source: DeviceLineError,
    },

    // === Device resolution ===
    #[error("No physical device found matching name '{name}'")]
    DeviceNotFound { name: String },

    #[error("Device name '{name}' matches {count} devices; use a longer name or a different match_policy")]
    AmbiguousDevice { name: String, count: usize },

    // === Address resolution ===
    #[error("Could not resolve an address for '{host}' - is the device on the network?")]
    AddressLookupFailed {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("Lookup of '{host}' succeeded but returned no IPv4 address")]
    NoIpv4Address { host: String },

    // === Process invocation ===
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Process '{program}' exceeded the {secs}s deadline and was killed")]
    InvokeTimeout { program: PathBuf, secs: u64 },

    // === Environment ===
    #[error("Runner executable '{path}' not found and no fallback on PATH")]
    RunnerNotFound { path: PathBuf },

    #[error("Could not prepare result directory '{path}': {source}")]
    ResultDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // === Configuration ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === IO ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a launch error for a program that failed to spawn
    pub fn launch(program: &Path, source: io::Error) -> Self {
        Self::Launch {
            program: program.to_path_buf(),
            source,
        }
    }

    /// Create a device-listing failure with the offending command
    pub fn listing_failed(command: &str, reason: impl Into<String>) -> Self {
        Self::DeviceListingFailed {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a device-not-found error
    pub fn device_not_found(name: &str) -> Self {
        Self::DeviceNotFound {
            name: name.to_string(),
        }
    }
}
