//! Classpath scanning for widgetsets and addon themes
//!
//! Seeks all directories on the search path for GWT module descriptors and
//! all jar files carrying the `Vaadin-Widgetsets` / `Vaadin-Stylesheets`
//! manifest attributes.

pub mod manifest;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{LocationKind, SearchLocation};

pub const WIDGETSETS_ATTRIBUTE: &str = "Vaadin-Widgetsets";
pub const STYLESHEETS_ATTRIBUTE: &str = "Vaadin-Stylesheets";

/// File extension of GWT module descriptors.
pub const MODULE_EXTENSION: &str = ".gwt.xml";

const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Widgetsets and addon stylesheets found on the search path, keyed by
/// logical name. The first location declaring a name wins.
#[derive(Debug, Default)]
pub struct LocationInfo {
    pub widgetsets: BTreeMap<String, SearchLocation>,
    pub addon_styles: BTreeMap<String, SearchLocation>,
}

/// Heuristic separating widgetsets from plain GWT modules.
pub fn is_widgetset(module_name: &str) -> bool {
    module_name.to_lowercase().contains("widgetset")
}

/// Find the names and locations of widgetsets and addon styles available on
/// the search path. Unreadable locations are skipped with a warning; partial
/// results from the remaining locations are still returned.
pub fn find_widgetsets_and_styles(locations: &[SearchLocation]) -> LocationInfo {
    let mut info = LocationInfo::default();

    for location in locations {
        match location.kind {
            LocationKind::Directory => scan_directory(location, &mut info),
            LocationKind::Archive => {
                if let Err(err) = scan_archive(location, &mut info) {
                    warn!("Error parsing jar file {location}: {err}");
                }
            }
        }
    }

    for (name, location) in &info.widgetsets {
        debug!("Found widgetset {name} in {location}");
    }
    info
}

/// List module descriptors directly under a directory location. The logical
/// name is the location's final path segment (the package) plus the file
/// stem; only widgetset names are kept.
fn scan_directory(location: &SearchLocation, info: &mut LocationInfo) {
    let Ok(entries) = fs::read_dir(&location.path) else {
        return;
    };
    let Some(package) = location.path.file_name().and_then(|n| n.to_str()) else {
        return;
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let file_name = entry.file_name();
            let stem = file_name.to_str()?.strip_suffix(MODULE_EXTENSION)?;
            Some(format!("{package}.{stem}"))
        })
        .filter(|name| is_widgetset(name))
        .collect();
    names.sort();

    for name in names {
        info.widgetsets
            .entry(name)
            .or_insert_with(|| location.clone());
    }
}

/// Read the manifest attribute table of a jar archive and collect the
/// comma-separated widgetset and stylesheet names it declares.
fn scan_archive(location: &SearchLocation, info: &mut LocationInfo) -> Result<()> {
    let file = File::open(&location.path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| Error::ScanError(format!("{}: {e}", location.path.display())))?;

    let mut contents = String::new();
    match archive.by_name(MANIFEST_PATH) {
        Ok(mut entry) => {
            entry.read_to_string(&mut contents)?;
        }
        // no manifest, so this is not a Vaadin addon
        Err(_) => return Ok(()),
    }

    let attributes = manifest::parse_main_attributes(&contents);
    if let Some(value) = attributes.get(WIDGETSETS_ATTRIBUTE) {
        for name in split_names(value) {
            info.widgetsets
                .entry(name)
                .or_insert_with(|| location.clone());
        }
    }
    if let Some(value) = attributes.get(STYLESHEETS_ATTRIBUTE) {
        for name in split_names(value) {
            info.addon_styles
                .entry(name)
                .or_insert_with(|| location.clone());
        }
    }
    Ok(())
}

fn split_names(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
}

/// The first existing directory on a classpath, used as the default location
/// for newly created widgetset descriptors.
pub fn default_source_directory(entries: &[PathBuf]) -> Option<&Path> {
    entries
        .iter()
        .map(PathBuf::as_path)
        .find(|entry| entry.is_dir())
}
