//! Project configuration
//!
//! All build-host parameters live in one explicit struct loaded from a
//! `vaadin-runner.json` file next to the project, instead of being injected
//! field by field at runtime.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::BuildMode;

pub const CONFIG_FILE_NAME: &str = "vaadin-runner.json";

pub const VAADIN_GROUP_ID: &str = "com.vaadin";

/// A resolved dependency of the project, used for version checks and for
/// mapping discovered widgetsets back to the addon that contributes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub path: PathBuf,
}

/// Static description of the Java web project being built.
///
/// Relative paths are interpreted against the project directory (the
/// directory containing the configuration file) once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Compile source roots, in classpath priority order.
    pub source_roots: Vec<PathBuf>,
    /// Resource directories, in classpath priority order.
    pub resource_dirs: Vec<PathBuf>,
    /// Location of static web files (themes commonly live here too).
    pub war_source_directory: PathBuf,
    /// Directory the GWT compiler writes compiled widgetsets into.
    pub webapp_directory: PathBuf,
    /// Folder where a generated AppWidgetset descriptor is created.
    pub generated_widgetset_directory: PathBuf,
    /// Folder where the generated CDN WebListener class is created.
    pub generated_source_directory: PathBuf,
    /// Compile-scope dependency entries (jars or class directories), in
    /// dependency order.
    pub dependencies: Vec<PathBuf>,
    /// Resolved dependency coordinates matching `dependencies`.
    pub artifacts: Vec<Artifact>,
    /// The gwt-user jar of the toolchain, appended last on the classpath.
    pub gwt_user_jar: Option<PathBuf>,
    /// The gwt-dev jar of the toolchain, appended last on the classpath.
    pub gwt_dev_jar: Option<PathBuf>,
    /// JVM executable used for forked compiler processes.
    pub java: String,
    /// Extra JVM arguments (whitespace separated), e.g. "-Xmx1G".
    pub extra_jvm_args: Option<String>,
    /// Forked process timeout in seconds; unset means wait forever.
    pub timeout: Option<u64>,
    /// Widgetset compilation mode.
    pub widgetset_mode: BuildMode,
    /// Marker file remembering the last widgetset fetched from the CDN.
    pub widgetset_marker: PathBuf,

    /// Directory the configuration was loaded from.
    #[serde(skip)]
    pub project_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_roots: vec![PathBuf::from("src/main/java")],
            resource_dirs: vec![PathBuf::from("src/main/resources")],
            war_source_directory: PathBuf::from("src/main/webapp"),
            webapp_directory: PathBuf::from("target/classes/VAADIN/widgetsets"),
            generated_widgetset_directory: PathBuf::from("target/generated-resources/gwt"),
            generated_source_directory: PathBuf::from("target/generated-sources/wscdn"),
            dependencies: Vec::new(),
            artifacts: Vec::new(),
            gwt_user_jar: None,
            gwt_dev_jar: None,
            java: "java".to_string(),
            extra_jvm_args: None,
            timeout: None,
            widgetset_mode: BuildMode::Local,
            widgetset_marker: PathBuf::from("target/wscdn-widgetset"),
            project_dir: PathBuf::from("."),
        }
    }
}

impl ProjectConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config: ProjectConfig = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("failed to parse {}: {e}", path.display())))?;
        let project_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.anchor(&project_dir);
        info!("Loaded project configuration from {}", path.display());
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` looking for the configuration file.
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            current = current.parent()?;
        }
    }

    /// Resolve all relative paths against the project directory.
    pub fn anchor(&mut self, project_dir: &Path) {
        self.project_dir = project_dir.to_path_buf();
        for path in self
            .source_roots
            .iter_mut()
            .chain(self.resource_dirs.iter_mut())
            .chain(self.dependencies.iter_mut())
        {
            absolutize(project_dir, path);
        }
        for artifact in &mut self.artifacts {
            absolutize(project_dir, &mut artifact.path);
        }
        absolutize(project_dir, &mut self.war_source_directory);
        absolutize(project_dir, &mut self.webapp_directory);
        absolutize(project_dir, &mut self.generated_widgetset_directory);
        absolutize(project_dir, &mut self.generated_source_directory);
        absolutize(project_dir, &mut self.widgetset_marker);
        if let Some(jar) = &mut self.gwt_user_jar {
            absolutize(project_dir, jar);
        }
        if let Some(jar) = &mut self.gwt_dev_jar {
            absolutize(project_dir, jar);
        }
    }

    /// Version of the vaadin-server dependency, when present.
    pub fn vaadin_version(&self) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|a| a.group_id == VAADIN_GROUP_ID && a.artifact_id == "vaadin-server")
            .map(|a| a.version.as_str())
    }

    /// Check the declared vaadin-shared dependency against a minimum version.
    ///
    /// Version strings of the form "7.1.0.beta1" are tolerated: only the two
    /// leading numeric components matter.
    pub fn is_at_least_version(&self, major: u32, minor: u32) -> bool {
        for artifact in &self.artifacts {
            if artifact.group_id != VAADIN_GROUP_ID || artifact.artifact_id != "vaadin-shared" {
                continue;
            }
            let mut parts = artifact.version.split(['.', '-']);
            let parsed = match (
                parts.next().map(str::parse::<u32>),
                parts.next().map(str::parse::<u32>),
            ) {
                (Some(Ok(maj)), Some(Ok(min))) => Some((maj, min)),
                _ => None,
            };
            match parsed {
                Some((maj, min)) if maj > major || (maj == major && min >= minor) => return true,
                Some(_) => warn!(
                    "Your project declares dependency on vaadin-shared {} but this step requires at least Vaadin {}.{}",
                    artifact.version, major, minor
                ),
                None => info!(
                    "Failed to parse vaadin-shared version number {}",
                    artifact.version
                ),
            }
        }
        false
    }
}

fn absolutize(project_dir: &Path, path: &mut PathBuf) {
    if path.is_relative() {
        *path = project_dir.join(&*path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(artifact_id: &str, version: &str) -> Artifact {
        Artifact {
            group_id: VAADIN_GROUP_ID.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            path: PathBuf::from(format!("libs/{artifact_id}.jar")),
        }
    }

    #[test]
    fn version_check_accepts_newer_releases() {
        let config = ProjectConfig {
            artifacts: vec![artifact("vaadin-shared", "7.7.9")],
            ..Default::default()
        };
        assert!(config.is_at_least_version(7, 0));
        assert!(config.is_at_least_version(7, 1));
        assert!(!config.is_at_least_version(8, 0));
    }

    #[test]
    fn version_check_tolerates_prerelease_suffixes() {
        let config = ProjectConfig {
            artifacts: vec![artifact("vaadin-shared", "7.1.0.beta1")],
            ..Default::default()
        };
        assert!(config.is_at_least_version(7, 1));
        assert!(!config.is_at_least_version(7, 2));
    }

    #[test]
    fn version_check_fails_without_vaadin_shared() {
        let config = ProjectConfig::default();
        assert!(!config.is_at_least_version(7, 0));
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &config_path,
            r#"{ "dependencies": ["libs/addon.jar"], "timeout": 120 }"#,
        )
        .unwrap();

        let config = ProjectConfig::load_from_file(&config_path).unwrap();
        assert_eq!(config.project_dir, dir.path());
        assert_eq!(config.dependencies, vec![dir.path().join("libs/addon.jar")]);
        assert_eq!(config.war_source_directory, dir.path().join("src/main/webapp"));
        assert_eq!(config.timeout, Some(120));
        assert_eq!(config.widgetset_mode, BuildMode::Local);
    }

    #[test]
    fn find_config_file_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src/main/java");
        fs::create_dir_all(&nested).unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "{}").unwrap();

        assert_eq!(ProjectConfig::find_config_file(&nested), Some(config_path));
    }
}
