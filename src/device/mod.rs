//! Device enumeration and resolution
//!
//! The platform listing command prints one device per line in the form
//! `<name> (<version>) [<hex-identifier>]`. This module tokenizes those
//! lines, filters them down to physical phones, resolves a requested
//! device name to its stable identifier and, for networked test targets,
//! resolves the device's IPv4 address.

pub mod address;
pub mod list;
pub mod resolve;

use thiserror::Error;

/// A device parsed out of one listing line. Transient - produced only
/// during enumeration and resolution, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Stable hardware identifier (the `[...]` suffix of the line)
    pub id: String,
    /// Listed name, up to the first space
    pub display_name: String,
    /// Model number, when the listing carries one
    pub model_number: Option<String>,
}

/// Per-line tokenizer failure, surfaced instead of assuming the listing
/// output is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceLineError {
    #[error("no `[identifier]` suffix")]
    MissingIdentifier,
    #[error("empty identifier brackets")]
    EmptyIdentifier,
    #[error("no name before the version and identifier fields")]
    MissingName,
}

/// Tokenize one listing line into a `DeviceRecord`.
///
/// The identifier is the substring strictly inside the last `[...]` pair
/// and the name is the substring before the first space. The produced
/// identifier is never empty.
pub fn parse_device_line(line: &str) -> std::result::Result<DeviceRecord, DeviceLineError> {
    let line = line.trim_end();

    let open = line.rfind('[').ok_or(DeviceLineError::MissingIdentifier)?;
    if !line.ends_with(']') || open == line.len() - 1 {
        return Err(DeviceLineError::MissingIdentifier);
    }

    let id = &line[open + 1..line.len() - 1];
    if id.is_empty() {
        return Err(DeviceLineError::EmptyIdentifier);
    }

    let display_name = match line.find(' ') {
        Some(0) | None => return Err(DeviceLineError::MissingName),
        Some(end) => &line[..end],
    };

    Ok(DeviceRecord {
        id: id.to_string(),
        display_name: display_name.to_string(),
        // Not present in the instruments listing
        model_number: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_standard_listing_line() {
        let record = parse_device_line("iPhone (9.3.3) [f8233a0aac771cbb24fce52ac2cc3960fc47f83e]").unwrap();
        assert_eq!(record.id, "f8233a0aac771cbb24fce52ac2cc3960fc47f83e");
        assert_eq!(record.display_name, "iPhone");
        assert_eq!(record.model_number, None);
    }

    #[test]
    fn identifier_comes_from_the_last_bracket_pair() {
        let record = parse_device_line("Dan's iPhone [spare] (13.0) [aaa111]").unwrap();
        assert_eq!(record.id, "aaa111");
        assert_eq!(record.display_name, "Dan's");
    }

    #[test]
    fn trailing_whitespace_is_ignored() {
        let record = parse_device_line("iPhone (13.0) [abc123]  \r").unwrap();
        assert_eq!(record.id, "abc123");
    }

    #[test]
    fn missing_brackets_is_a_tagged_error() {
        assert_eq!(
            parse_device_line("Known Devices:"),
            Err(DeviceLineError::MissingIdentifier)
        );
        assert_eq!(
            parse_device_line("iPhone (13.0) [abc123"),
            Err(DeviceLineError::MissingIdentifier)
        );
    }

    #[test]
    fn empty_identifier_is_a_tagged_error() {
        assert_eq!(
            parse_device_line("iPhone (13.0) []"),
            Err(DeviceLineError::EmptyIdentifier)
        );
    }

    #[test]
    fn missing_name_is_a_tagged_error() {
        assert_eq!(parse_device_line("[abc123]"), Err(DeviceLineError::MissingName));
        assert_eq!(parse_device_line(" leading [abc123]"), Err(DeviceLineError::MissingName));
    }
}
