//! Theme update and compilation steps
//!
//! Themes live under the `VAADIN/themes/<name>` convention in resource
//! directories or the war source directory. Both steps fork the Vaadin Sass
//! tooling with the theme directory on the classpath.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::command::JavaCommand;
use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::steps::{BuildStep, ShellOptions, create_java_command, run};

pub const THEME_UPDATE_CLASS: &str = "com.vaadin.server.themeutils.SASSAddonImportFileCreator";
pub const THEME_COMPILE_CLASS: &str = "com.vaadin.sass.SassCompiler";

const THEMES_PREFIX: &str = "VAADIN/themes";

/// Return the themes to process. An explicit comma-separated selector has
/// priority; each name is trimmed and normalized to its `VAADIN/themes/`
/// path. Without a selector, theme directories are discovered on disk.
pub fn discover_themes(config: &ProjectConfig, selector: Option<&str>) -> Vec<String> {
    if let Some(selector) = selector {
        return selector
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| format!("{THEMES_PREFIX}/{name}"))
            .collect();
    }

    let mut themes = Vec::new();
    for base in config
        .resource_dirs
        .iter()
        .chain(std::iter::once(&config.war_source_directory))
    {
        scan_theme_directory(base, &mut themes);
    }
    themes.sort();
    if themes.is_empty() {
        warn!("Could not find any themes. Use --theme to explicitly select one.");
    }
    themes
}

fn scan_theme_directory(base: &Path, themes: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(base.join(THEMES_PREFIX)) else {
        return;
    };
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            let theme = format!("{THEMES_PREFIX}/{name}");
            if !themes.contains(&theme) {
                themes.push(theme);
            }
        }
    }
}

/// Configure the classpath for theme update/compilation: resource
/// directories containing the theme first, then the war source directory,
/// then the compile classpath. Returns the resolved theme directory.
fn configure_theme_classpath(
    mut cmd: JavaCommand,
    config: &ProjectConfig,
    theme: &str,
) -> (JavaCommand, PathBuf) {
    let mut theme_base: Option<&Path> = None;
    for resource_dir in &config.resource_dirs {
        if resource_dir.join(theme).exists() {
            debug!(
                "Adding resource directory to command classpath: {}",
                resource_dir.display()
            );
            theme_base.get_or_insert(resource_dir);
            cmd = cmd.add_to_classpath(resource_dir);
        }
    }

    // src/main/webapp is another common location for theme files
    let theme_base = theme_base.unwrap_or(&config.war_source_directory);
    cmd = cmd.add_to_classpath(&config.war_source_directory);

    for entry in &config.dependencies {
        cmd = cmd.add_to_classpath(entry);
    }

    (cmd, theme_base.join(theme))
}

/// Regenerates the addon import file of a theme from the addon stylesheets
/// found on the classpath.
#[derive(Debug, Default)]
pub struct UpdateThemeStep {
    pub options: ShellOptions,
}

impl BuildStep for UpdateThemeStep {
    fn name(&self) -> &'static str {
        "update-theme"
    }

    fn check_prerequisites(&self, config: &ProjectConfig) -> Result<()> {
        if !config.is_at_least_version(7, 1) {
            error!("Theme update is only supported for Vaadin 7.1 and later.");
            return Err(Error::ConfigError(
                "the update-theme step requires Vaadin 7.1 or later".to_string(),
            ));
        }
        Ok(())
    }

    fn process(&self, config: &ProjectConfig, theme: &str) -> Result<()> {
        info!("Updating theme {theme}");

        let cmd = create_java_command(config, THEME_UPDATE_CLASS);
        let (cmd, theme_dir) = configure_theme_classpath(cmd, config, theme);
        let spec = cmd.arg(theme_dir.display().to_string()).build();

        run(&spec, &self.options).map_err(|err| {
            error!("Updating theme \"{theme}\" failed");
            err
        })?;
        info!("Theme \"{theme}\" updated");
        Ok(())
    }
}

/// Compiles a theme's `styles.scss` into `styles.css`.
#[derive(Debug, Default)]
pub struct CompileThemeStep {
    pub options: ShellOptions,
    /// Also write a gzipped version of the compiled theme.
    pub compress: bool,
    /// Ignore theme compilation warnings.
    pub ignore_warnings: bool,
    /// Keep going when a directory without styles is encountered (version
    /// control systems like to drop hidden folders next to theme files).
    pub ignore_non_theme_folders: bool,
}

impl BuildStep for CompileThemeStep {
    fn name(&self) -> &'static str {
        "compile-theme"
    }

    fn check_prerequisites(&self, config: &ProjectConfig) -> Result<()> {
        if !config.is_at_least_version(7, 0) {
            error!("Theme compilation is only supported for Vaadin 7.0 and later.");
            return Err(Error::ConfigError(
                "the compile-theme step requires Vaadin 7.0 or later".to_string(),
            ));
        }
        Ok(())
    }

    fn process(&self, config: &ProjectConfig, theme: &str) -> Result<()> {
        info!("Compiling theme {theme}");

        let cmd = create_java_command(config, THEME_COMPILE_CLASS)
            .arg_if(self.compress, "-compress:true")
            .arg_if(self.ignore_warnings, "-ignore-warnings:true")
            .arg_if(self.ignore_non_theme_folders, "-ignore-non-theme-folders:true");
        let (cmd, theme_dir) = configure_theme_classpath(cmd, config, theme);

        let scss = theme_dir.join("styles.scss");
        let css = theme_dir.join("styles.css");
        let spec = cmd
            .arg(scss.display().to_string())
            .arg(css.display().to_string())
            .build();

        run(&spec, &self.options).map_err(|err| {
            error!("Compiling theme \"{theme}\" failed");
            err
        })?;
        info!("Theme \"{theme}\" compiled");
        Ok(())
    }
}
