pub mod theme;
pub mod widgetset;

pub use theme::{compile_theme_command, update_theme_command};
pub use widgetset::{compile_widgetset_command, update_widgetset_command};

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use vaadin_runner_core::config::CONFIG_FILE_NAME;
use vaadin_runner_core::ProjectConfig;

/// Locate and load the project configuration. An explicit path wins;
/// otherwise the file is searched upwards from the project directory.
pub fn load_config(project_dir: Option<&Path>, config: Option<&Path>) -> Result<ProjectConfig> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => {
            let start = match project_dir {
                Some(dir) => dir.to_path_buf(),
                None => env::current_dir()?,
            };
            find_config(&start)?
        }
    };
    ProjectConfig::load_from_file(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

fn find_config(start: &Path) -> Result<PathBuf> {
    ProjectConfig::find_config_file(start).with_context(|| {
        format!(
            "no {CONFIG_FILE_NAME} found in {} or any parent directory",
            start.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_config_path_wins_over_search() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("elsewhere.json");
        fs::write(&explicit, "{}").unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "not json at all").unwrap();

        let config = load_config(Some(dir.path()), Some(&explicit)).unwrap();
        assert_eq!(config.project_dir, dir.path());
    }

    #[test]
    fn missing_config_is_a_readable_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path()), None).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
