use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vaadin_runner_core::BuildMode;

/// Orchestrates GWT widgetset and Sass theme builds for Vaadin 7 projects
#[derive(Parser)]
#[command(name = "vaadin-runner", version, about)]
#[command(subcommand_required = true, arg_required_else_help = true)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Project directory to operate on (defaults to the current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Explicit path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show the commands without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Update widgetset descriptors with the addons found on the classpath
    UpdateWidgetset {
        /// Comma-separated widgetset module names (discovered when omitted)
        #[arg(long)]
        modules: Option<String>,

        /// Override the configured build mode (local, fetch or cdn)
        #[arg(long)]
        mode: Option<BuildMode>,

        /// Compilation style requested from the CDN
        #[arg(long, default_value = "OBF")]
        style: String,

        /// Base URL of the widgetset CDN
        #[arg(long)]
        cdn_url: Option<String>,
    },
    /// Compile widgetsets whose sources have changed
    CompileWidgetset {
        /// Comma-separated widgetset module names (discovered when omitted)
        #[arg(long)]
        modules: Option<String>,

        /// Override the configured build mode (local, fetch or cdn)
        #[arg(long)]
        mode: Option<BuildMode>,

        /// Recompile even when the output looks up to date
        #[arg(long)]
        force: bool,

        /// Skip widgetset compilation entirely
        #[arg(long)]
        skip: bool,

        /// GWT compiler log level
        #[arg(long, default_value = "INFO")]
        log_level: String,

        /// Output obfuscation style (OBF, PRETTY or DETAILED)
        #[arg(long, default_value = "OBF")]
        style: String,

        /// Permutation worker count (defaults to the host parallelism)
        #[arg(long)]
        local_workers: Option<usize>,

        /// Faster, unoptimized compilation for development
        #[arg(long)]
        draft_compile: bool,

        /// Validate the sources without producing output
        #[arg(long)]
        validate_only: bool,

        /// Include client-side assertions in the compiled output
        #[arg(long)]
        check_assertions: bool,

        /// Keep going when the compiler reports errors
        #[arg(long)]
        no_fail_on_error: bool,

        /// Publish the client sources next to the compiled output
        #[arg(long)]
        save_source: bool,

        /// Java language level of the client sources
        #[arg(long, default_value = "auto")]
        source_level: String,

        /// Optimization level 0-9 (compiler default when omitted)
        #[arg(long)]
        optimize: Option<u32>,

        /// Compiler working directory for intermediate files
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// Directory generated source is written into
        #[arg(long)]
        gen_dir: Option<PathBuf>,

        /// Directory for non-deployable compiler output
        #[arg(long)]
        extra_dir: Option<PathBuf>,

        /// Directory for deployable but private compiler output
        #[arg(long)]
        deploy_dir: Option<PathBuf>,

        /// Forked compiler timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Base URL of the widgetset CDN
        #[arg(long)]
        cdn_url: Option<String>,
    },
    /// Regenerate the addon import files of the project themes
    UpdateTheme {
        /// Comma-separated theme names (discovered when omitted)
        #[arg(long)]
        theme: Option<String>,
    },
    /// Compile the project themes from Sass to CSS
    CompileTheme {
        /// Comma-separated theme names (discovered when omitted)
        #[arg(long)]
        theme: Option<String>,

        /// Also write a gzipped version of the compiled theme
        #[arg(long)]
        compress: bool,

        /// Ignore theme compilation warnings
        #[arg(long)]
        ignore_warnings: bool,

        /// Skip directories that do not contain a styles.scss
        #[arg(long)]
        ignore_non_theme_folders: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_mode_values() {
        let cli = Cli::try_parse_from([
            "vaadin-runner",
            "update-widgetset",
            "--mode",
            "cdn",
            "--style",
            "PRETTY",
        ])
        .unwrap();
        match cli.command {
            Command::UpdateWidgetset { mode, style, .. } => {
                assert_eq!(mode, Some(BuildMode::Cdn));
                assert_eq!(style, "PRETTY");
            }
            _ => panic!("wrong subcommand"),
        }

        assert!(
            Cli::try_parse_from(["vaadin-runner", "update-widgetset", "--mode", "remote"]).is_err()
        );
    }
}
