//! Build steps
//!
//! Each goal of the orchestrator is a [`BuildStep`]: prerequisites are
//! checked once, then every target (theme or widgetset module) is processed
//! sequentially. Shared here is the forked-JVM plumbing all steps use.

pub mod theme;
pub mod widgetset;

pub use theme::{CompileThemeStep, UpdateThemeStep, discover_themes};
pub use widgetset::{CompileWidgetsetStep, UpdateWidgetsetStep, discover_widgetsets};

use std::time::Duration;

use tracing::info;

use crate::command::{CommandSpec, JavaCommand};
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::process;

/// A concrete build goal operating on one target at a time.
pub trait BuildStep {
    /// Human-readable goal name for error reporting.
    fn name(&self) -> &'static str;

    /// Validate that the project satisfies this step's requirements.
    fn check_prerequisites(&self, config: &ProjectConfig) -> Result<()>;

    /// Process a single target (theme path or widgetset module name).
    fn process(&self, config: &ProjectConfig, target: &str) -> Result<()>;
}

/// Run a step over all targets. Processing stops at the first failing
/// target; a half-built artifact is worse than stopping.
pub fn run_step(step: &dyn BuildStep, config: &ProjectConfig, targets: &[String]) -> Result<()> {
    step.check_prerequisites(config)?;
    for target in targets {
        step.process(config, target)?;
    }
    Ok(())
}

/// Options shared by every step that forks a JVM.
#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    /// Log the command line instead of executing it.
    pub dry_run: bool,
}

/// Start a JVM command configured from the project: executable, extra JVM
/// arguments, working directory and timeout.
pub(crate) fn create_java_command(config: &ProjectConfig, main_class: &str) -> JavaCommand {
    let mut cmd = JavaCommand::new(main_class)
        .jvm(&config.java)
        .working_dir(&config.project_dir);
    if let Some(args) = &config.extra_jvm_args {
        cmd = cmd.jvm_args(args.split_whitespace().map(String::from));
    }
    if let Some(seconds) = config.timeout {
        cmd = cmd.timeout(Duration::from_secs(seconds));
    }
    cmd
}

pub(crate) fn run(spec: &CommandSpec, options: &ShellOptions) -> Result<()> {
    if options.dry_run {
        info!("Dry run: {}", spec.to_command_line());
        return Ok(());
    }
    process::execute(spec)?;
    Ok(())
}
