//! Jar manifest parsing
//!
//! Only the main attribute section is of interest; per-entry sections after
//! the first blank line are ignored. Values longer than 72 bytes are wrapped
//! onto continuation lines starting with a single space.

use std::collections::BTreeMap;

/// Parse the main attribute section of a `META-INF/MANIFEST.MF` file.
pub fn parse_main_attributes(content: &str) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    let mut current: Option<(String, String)> = None;

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            // end of the main section
            break;
        }
        if let Some(rest) = line.strip_prefix(' ') {
            if let Some((_, value)) = current.as_mut() {
                value.push_str(rest);
            }
        } else if let Some((key, value)) = line.split_once(':') {
            if let Some((key, value)) = current.take() {
                attributes.entry(key).or_insert(value);
            }
            current = Some((key.trim().to_string(), value.trim_start().to_string()));
        }
    }
    if let Some((key, value)) = current {
        attributes.entry(key).or_insert(value);
    }

    attributes
}
