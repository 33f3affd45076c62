//! Run-parameter assembly
//!
//! Combines validated CLI input with resolver output into the immutable
//! record the launcher consumes. Branches strictly on platform: Android
//! trusts the caller-supplied id verbatim and never touches the device or
//! address resolvers; iOS ignores any caller-supplied id and always
//! resolves both the id and the address from the device name.

use std::path::PathBuf;

use tracing::info;

use crate::cli::{Args, Platform};
use crate::common::config::Config;
use crate::common::Result;
use crate::device::{address, list, resolve};

/// The fully resolved configuration for one runner invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub platform: Platform,
    /// NUnit `--where` test selection expression
    pub filter: Option<String>,
    /// Stable hardware identifier; non-empty before launch
    pub device_id: String,
    pub device_name: String,
    /// Empty when no address is available (always, on Android)
    pub device_address: String,
    pub device_index: i32,
    /// Where the app package and test assembly were dropped
    pub drop_directory: PathBuf,
    pub app_package_name: String,
    pub ui_test_assembly_name: String,
    pub result_directory: PathBuf,
}

/// The UI test project treats device index 0 as "unset" and expects 1 in
/// that case; every other value, negatives included, passes through
/// untouched. That convention comes from the test project, not from us -
/// keep it in exactly this one place.
pub fn normalize_device_index(index: i32) -> i32 {
    if index == 0 {
        1
    } else {
        index
    }
}

/// Assemble run parameters, resolving the device id and address where the
/// platform requires it. Resolution is sequential: id first, address
/// second.
pub async fn assemble(args: &Args, config: &Config, result_directory: PathBuf) -> Result<RunParameters> {
    let device_name = args.device_name.clone().unwrap_or_default();

    let (device_id, device_address) = match args.device_platform {
        // Android tooling addresses devices by id alone; the id arrives on
        // the command line and no network address is needed.
        Platform::Android => (args.device_id.clone().unwrap_or_default(), String::new()),
        Platform::Ios => {
            let lines = list::list_devices(config.timeouts.device_listing_secs).await?;
            let id = resolve::resolve_device_id(&lines, &device_name, config.device.match_policy)?;
            info!(device_id = %id, "resolved device id");

            let address = address::resolve_address(args.device_ip_address.as_deref(), &device_name).await?;
            info!(address = %address, "resolved device address");

            (id, address)
        }
    };

    Ok(RunParameters {
        platform: args.device_platform,
        filter: args.nunit_where.clone(),
        device_id,
        device_name,
        device_address,
        device_index: normalize_device_index(args.device_index),
        drop_directory: args.local_path.clone(),
        app_package_name: args.app_package_name.clone(),
        ui_test_assembly_name: args.dll_name.clone(),
        result_directory,
    })
}
