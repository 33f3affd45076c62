//! CLI surface and pre-flight validation
//!
//! clap enforces the unconditionally required flags; `Args::validate`
//! covers the platform-conditional ones before the core runs.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::common::{Error, Result};

/// Runs an NUnit UI test suite against a connected mobile device
#[derive(Parser, Debug)]
#[command(name = "uirunner", version, long_about = None)]
pub struct Args {
    /// Local path to where the application package and UI test dll live
    #[arg(long, alias = "lp", value_name = "DIR")]
    pub local_path: PathBuf,

    /// The device platform to run: 'a' for Android or 'i' for iOS
    #[arg(long, alias = "dp", value_enum)]
    pub device_platform: Platform,

    /// The file name of the APK or the APP to run
    #[arg(long, alias = "apn")]
    pub app_package_name: String,

    /// The file name of the UI test dll to run
    #[arg(long, alias = "dlln")]
    pub dll_name: String,

    /// The NUnit where clause for test selection
    #[arg(long, alias = "nuw")]
    pub nunit_where: Option<String>,

    /// The Android device id to run the tests against (required for Android)
    #[arg(long, alias = "di")]
    pub device_id: Option<String>,

    /// The iOS device name to run the tests against (required for iOS)
    #[arg(long, alias = "dn")]
    pub device_name: Option<String>,

    /// An arbitrary index that gets passed through to the UI test project
    #[arg(long, alias = "dix", default_value_t = 0, allow_negative_numbers = true)]
    pub device_index: i32,

    /// The iOS device IP address; resolved from the device name when omitted
    #[arg(long, alias = "dip")]
    pub device_ip_address: Option<String>,

    /// Directory for test artifacts like TestResult.xml and screenshots
    #[arg(long, alias = "rdp", value_name = "DIR")]
    pub result_dir_path: Option<PathBuf>,

    /// Deadline in seconds for the runner invocation; unbounded when omitted
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Target device platform
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Android
    #[value(name = "android", alias = "a")]
    Android,
    /// iOS
    #[value(name = "ios", alias = "i")]
    Ios,
}

impl Args {
    /// Platform-conditional validation; failures map to the dedicated
    /// invalid-arguments exit code before the core runs.
    pub fn validate(&self) -> Result<()> {
        let missing = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());

        match self.device_platform {
            Platform::Android if missing(&self.device_id) => Err(Error::InvalidArguments(
                "A device id is required when running against Android".to_string(),
            )),
            Platform::Ios if missing(&self.device_name) => Err(Error::InvalidArguments(
                "A device name is required when running against iOS".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "uirunner",
            "--local-path",
            "/tmp/drop",
            "--app-package-name",
            "app.apk",
            "--dll-name",
            "UiTests.dll",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn platform_accepts_single_letter_aliases() {
        let args = parse(&["--device-platform", "a", "--device-id", "X"]);
        assert_eq!(args.device_platform, Platform::Android);

        let args = parse(&["--device-platform", "i", "--device-name", "iPhone"]);
        assert_eq!(args.device_platform, Platform::Ios);
    }

    #[test]
    fn device_index_defaults_to_zero() {
        let args = parse(&["--device-platform", "a", "--device-id", "X"]);
        assert_eq!(args.device_index, 0);
    }

    #[test]
    fn device_index_accepts_negative_values() {
        let args = parse(&["--device-platform", "a", "--device-id", "X", "--device-index", "-2"]);
        assert_eq!(args.device_index, -2);
    }

    #[test]
    fn android_requires_a_device_id() {
        let args = parse(&["--device-platform", "a"]);
        assert!(matches!(args.validate(), Err(Error::InvalidArguments(_))));

        let args = parse(&["--device-platform", "a", "--device-id", "  "]);
        assert!(matches!(args.validate(), Err(Error::InvalidArguments(_))));

        let args = parse(&["--device-platform", "a", "--device-id", "emulator-5554"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn ios_requires_a_device_name() {
        let args = parse(&["--device-platform", "i"]);
        assert!(matches!(args.validate(), Err(Error::InvalidArguments(_))));

        // An address alone is not enough - the id always resolves from the name.
        let args = parse(&["--device-platform", "i", "--device-ip-address", "10.0.0.5"]);
        assert!(matches!(args.validate(), Err(Error::InvalidArguments(_))));

        let args = parse(&["--device-platform", "i", "--device-name", "iPhone"]);
        assert!(args.validate().is_ok());
    }
}
