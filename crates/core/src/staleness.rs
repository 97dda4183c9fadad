//! Staleness detection for widgetset compilation
//!
//! Decides whether a module needs to be recompiled by comparing the
//! modification times of its inputs against the compiled output artifact.
//! Purely a read-only check; the only side effect is logging.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::Result;
use crate::module::GwtModule;

/// Input file suffixes that invalidate a compiled widgetset: client-side
/// code and UiBinder templates.
const SOURCE_SUFFIXES: [&str; 2] = [".java", ".ui.xml"];

/// Check whether the given module has stale sources and must be recompiled.
///
/// Modules without entry points are libraries, not buildable units: they are
/// never considered stale. Updated dependency jars are deliberately not taken
/// into account; a clean build covers that case.
pub fn compilation_required(
    module: &GwtModule,
    output_dir: &Path,
    source_roots: &[PathBuf],
    force: bool,
) -> Result<bool> {
    debug!("Checking if compilation is required for {}", module.name());

    if module.entry_points().is_empty() {
        info!("{} has no entry points - compilation skipped", module.name());
        return Ok(false);
    }

    if force {
        debug!("Compilation forced");
        return Ok(true);
    }

    let output = module.output_artifact(output_dir);
    if !output.exists() {
        debug!("Output artifact {} does not exist", output.display());
        return Ok(true);
    }

    // a descriptor without a backing file can never be proven fresh
    let Some(descriptor) = module.source_file() else {
        return Ok(true);
    };

    let output_mtime = fs::metadata(&output)?.modified()?;
    let descriptor_mtime = fs::metadata(descriptor)?.modified()?;
    if descriptor_mtime > output_mtime {
        debug!("Module descriptor has been modified since the output was created");
        return Ok(true);
    }

    for directory in module_source_directories(module, source_roots) {
        debug!(
            "Looking in source directory {} for possible changes",
            directory.display()
        );
        if let Some(stale) = find_stale_source(&directory, output_mtime)? {
            debug!("Found stale source {}", stale.display());
            return Ok(true);
        }
    }

    info!("{} is up to date, compilation skipped", module.name());
    Ok(false)
}

/// The source directories a module pulls client code from: each declared
/// source package resolved under the module's package in every source root.
fn module_source_directories(module: &GwtModule, source_roots: &[PathBuf]) -> Vec<PathBuf> {
    let package_path: PathBuf = module.package().split('.').collect();
    let mut directories = Vec::new();
    for root in source_roots {
        for source in module.sources() {
            let directory = root.join(&package_path).join(source);
            if directory.is_dir() {
                directories.push(directory);
            }
        }
    }
    directories
}

fn find_stale_source(directory: &Path, output_mtime: SystemTime) -> Result<Option<PathBuf>> {
    for entry in WalkDir::new(directory) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !SOURCE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            continue;
        }
        let mtime = entry.metadata().map_err(io::Error::from)?.modified()?;
        if mtime > output_mtime {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}
