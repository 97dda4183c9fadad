//! Common data types shared across the build steps

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What kind of classpath entry a [`SearchLocation`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Directory,
    Archive,
}

/// A single entry on the widgetset search path. Constructed per scan
/// invocation and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLocation {
    pub path: PathBuf,
    pub kind: LocationKind,
}

impl SearchLocation {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: LocationKind::Directory,
        }
    }

    pub fn archive(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: LocationKind::Archive,
        }
    }

    /// Classify an existing path: directories are scanned for module
    /// descriptors, everything else is treated as a jar-like archive.
    pub fn for_path(path: &Path) -> Self {
        if path.is_dir() {
            Self::directory(path)
        } else {
            Self::archive(path)
        }
    }
}

impl fmt::Display for SearchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// The widgetset compilation mode (local build / fetch from CDN / CDN only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Local,
    Fetch,
    Cdn,
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(BuildMode::Local),
            "fetch" => Ok(BuildMode::Fetch),
            "cdn" => Ok(BuildMode::Cdn),
            other => Err(format!(
                "unknown widgetset mode '{other}' (expected local, fetch or cdn)"
            )),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildMode::Local => "local",
            BuildMode::Fetch => "fetch",
            BuildMode::Cdn => "cdn",
        };
        write!(f, "{name}")
    }
}

/// Outcome of a completed external process invocation.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionResult {
    /// Exit status reported by the process (0 on success).
    pub status: i32,
    /// Wall-clock time the process took.
    pub duration: Duration,
}
