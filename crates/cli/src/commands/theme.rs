use anyhow::Result;
use vaadin_runner_core::ProjectConfig;
use vaadin_runner_core::steps::theme::{CompileThemeStep, UpdateThemeStep};
use vaadin_runner_core::steps::{ShellOptions, discover_themes, run_step};

pub fn update_theme_command(
    config: &ProjectConfig,
    theme: Option<&str>,
    options: ShellOptions,
) -> Result<()> {
    let themes = discover_themes(config, theme);
    run_step(&UpdateThemeStep { options }, config, &themes)?;
    Ok(())
}

pub fn compile_theme_command(
    config: &ProjectConfig,
    theme: Option<&str>,
    step: CompileThemeStep,
) -> Result<()> {
    let themes = discover_themes(config, theme);
    run_step(&step, config, &themes)?;
    Ok(())
}
