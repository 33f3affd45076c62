//! Physical-device name resolution against the listing output

use serde::Deserialize;
use tracing::warn;

use super::{parse_device_line, DeviceLineError, DeviceRecord};
use crate::common::{Error, Result};

/// How a requested device name is matched when several physical devices
/// share a prefix. `FirstPrefix` keeps the historical behavior; the other
/// two make the ambiguity explicit instead of silently picking a device.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First prefix match in enumeration order wins
    #[default]
    FirstPrefix,
    /// The prefix must cover the listed name exactly, up to the version field
    ExactName,
    /// More than one prefix match is an error
    UniquePrefix,
}

/// Whole-line check for a physical phone entry: mentions "iphone" and is
/// not a simulator.
pub fn is_physical_iphone(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("iphone") && !lower.contains("simulator")
}

/// Find the stable identifier of the physical device whose listing line
/// starts with `device_name`, case-insensitively.
///
/// Matching runs against the raw line rather than the tokenized name
/// field: listed names may contain spaces ("Dan's iPhone ...") while the
/// tokenizer's name stops at the first one. The winning line is then
/// tokenized; if it turns out malformed, that is surfaced as an error
/// rather than a panic.
pub fn resolve_device_id(lines: &[String], device_name: &str, policy: MatchPolicy) -> Result<String> {
    let needle = device_name.to_lowercase();

    let candidates: Vec<(&str, std::result::Result<DeviceRecord, DeviceLineError>)> = lines
        .iter()
        .filter(|line| is_physical_iphone(line))
        .map(|line| {
            let parsed = parse_device_line(line);
            if let Err(err) = &parsed {
                warn!(line = %line.as_str(), error = %err, "malformed device listing line");
            }
            (line.as_str(), parsed)
        })
        .collect();

    let matches: Vec<&(&str, std::result::Result<DeviceRecord, DeviceLineError>)> = candidates
        .iter()
        .filter(|(line, _)| {
            let lower = line.to_lowercase();
            if !lower.starts_with(&needle) {
                return false;
            }
            match policy {
                // The listed name ends where the version field begins.
                MatchPolicy::ExactName => lower[needle.len()..].starts_with(" ("),
                MatchPolicy::FirstPrefix | MatchPolicy::UniquePrefix => true,
            }
        })
        .collect();

    if matches.is_empty() {
        return Err(Error::device_not_found(device_name));
    }
    if policy == MatchPolicy::UniquePrefix && matches.len() > 1 {
        return Err(Error::AmbiguousDevice {
            name: device_name.to_string(),
            count: matches.len(),
        });
    }

    let (line, parsed) = matches[0];
    parsed
        .clone()
        .map(|record| record.id)
        .map_err(|source| Error::MalformedDeviceLine {
            line: line.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn listing() -> Vec<String> {
        lines(&[
            "iPhone (13.0) [aaa111]",
            "iPad (13.0) [bbb222]",
            "iPhone Simulator (13.0) [ccc333]",
        ])
    }

    #[test]
    fn physical_filter_keeps_iphones_and_drops_simulators() {
        assert!(is_physical_iphone("iPhone (13.0) [aaa111]"));
        assert!(is_physical_iphone("Dan's iPhone (12.4) [abc]"));
        assert!(!is_physical_iphone("iPhone Simulator (13.0) [ccc333]"));
        assert!(!is_physical_iphone("iPad (13.0) [bbb222]"));
    }

    #[test]
    fn resolves_the_first_physical_match_in_order() {
        for policy in [MatchPolicy::FirstPrefix, MatchPolicy::ExactName, MatchPolicy::UniquePrefix] {
            let id = resolve_device_id(&listing(), "iPhone", policy).unwrap();
            assert_eq!(id, "aaa111", "policy {policy:?}");
        }
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        let id = resolve_device_id(&listing(), "iphone", MatchPolicy::FirstPrefix).unwrap();
        assert_eq!(id, "aaa111");
    }

    #[test]
    fn zero_matches_is_device_not_found() {
        let err = resolve_device_id(&listing(), "Pixel", MatchPolicy::FirstPrefix).unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound { .. }));
    }

    #[test]
    fn first_prefix_silently_picks_among_duplicates() {
        let devices = lines(&["iPhone 8 (13.0) [first]", "iPhone 8 Plus (13.0) [second]"]);
        let id = resolve_device_id(&devices, "iPhone 8", MatchPolicy::FirstPrefix).unwrap();
        assert_eq!(id, "first");
    }

    #[test]
    fn unique_prefix_rejects_duplicates() {
        let devices = lines(&["iPhone 8 (13.0) [first]", "iPhone 8 Plus (13.0) [second]"]);
        let err = resolve_device_id(&devices, "iPhone 8", MatchPolicy::UniquePrefix).unwrap_err();
        assert!(matches!(err, Error::AmbiguousDevice { count: 2, .. }));
    }

    #[test]
    fn exact_name_requires_the_prefix_to_end_at_a_boundary() {
        let devices = lines(&["iPhone 8 (13.0) [longer]", "iPhone (13.0) [exact]"]);
        let id = resolve_device_id(&devices, "iPhone", MatchPolicy::ExactName).unwrap();
        assert_eq!(id, "exact");

        // FirstPrefix would have taken the first line instead.
        let id = resolve_device_id(&devices, "iPhone", MatchPolicy::FirstPrefix).unwrap();
        assert_eq!(id, "longer");
    }

    #[test]
    fn a_malformed_winning_line_is_surfaced() {
        let devices = lines(&["iPhone missing brackets"]);
        let err = resolve_device_id(&devices, "iPhone", MatchPolicy::FirstPrefix).unwrap_err();
        assert!(matches!(err, Error::MalformedDeviceLine { .. }));
    }
}
