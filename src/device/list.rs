//! Enumeration of attached iOS devices
//!
//! Shells out to the fixed platform listing command and returns its raw
//! lines. Parsing is left to the resolver so that a malformed line can be
//! reported against the name match that selected it.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, trace};

use crate::common::{Error, Result};
use crate::process::{self, InvokeOptions};

/// Fixed platform command that lists attached/paired devices.
const LISTING_PROGRAM: &str = "xcrun";
const LISTING_ARGS: &[&str] = &["instruments", "-s", "devices"];

/// Run the device listing command and return one raw line per device.
///
/// A listing tool that fails to run or exits non-zero is
/// `DeviceListingFailed`; a tool that succeeds with nothing attached is
/// `NoDevicesDetected`. The two are distinct on purpose.
pub async fn list_devices(deadline_secs: u64) -> Result<Vec<String>> {
    let args: Vec<String> = LISTING_ARGS.iter().map(|s| s.to_string()).collect();

    debug!(command = %listing_command(), "enumerating devices");

    let result = process::invoke(
        Path::new(LISTING_PROGRAM),
        &args,
        InvokeOptions {
            deadline: Some(Duration::from_secs(deadline_secs)),
        },
        |line| trace!("{line}"),
    )
    .await
    .map_err(|e| Error::listing_failed(&listing_command(), e.to_string()))?;

    if result.exit_code != 0 {
        return Err(Error::listing_failed(
            &listing_command(),
            format!("exit code {}", result.exit_code),
        ));
    }

    let lines: Vec<String> = result
        .output
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(Error::NoDevicesDetected);
    }

    Ok(lines)
}

fn listing_command() -> String {
    format!("{LISTING_PROGRAM} {}", LISTING_ARGS.join(" "))
}
