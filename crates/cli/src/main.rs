mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use vaadin_runner_core::steps::ShellOptions;
use vaadin_runner_core::steps::theme::CompileThemeStep;
use vaadin_runner_core::steps::widgetset::CompileWidgetsetStep;

use cli::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    let config = commands::load_config(args.project_dir.as_deref(), args.config.as_deref())?;
    let options = ShellOptions {
        dry_run: args.dry_run,
    };

    match args.command {
        Command::UpdateWidgetset {
            modules,
            mode,
            style,
            cdn_url,
        } => commands::update_widgetset_command(
            &config,
            modules.as_deref(),
            mode,
            &style,
            cdn_url.as_deref(),
            options,
        ),
        Command::CompileWidgetset {
            modules,
            mode,
            force,
            skip,
            log_level,
            style,
            local_workers,
            draft_compile,
            validate_only,
            check_assertions,
            no_fail_on_error,
            save_source,
            source_level,
            optimize,
            work_dir,
            gen_dir,
            extra_dir,
            deploy_dir,
            timeout,
            cdn_url,
        } => {
            let mut config = config;
            if timeout.is_some() {
                config.timeout = timeout;
            }
            let step = CompileWidgetsetStep {
                options,
                force,
                skip,
                log_level,
                style,
                local_workers,
                draft_compile,
                validate_only,
                check_assertions,
                fail_on_error: !no_fail_on_error,
                save_source,
                source_level,
                optimize: optimize.map_or(-1, |level| level as i32),
                work_dir,
                gen_dir,
                extra_dir,
                deploy_dir,
            };
            commands::compile_widgetset_command(
                &config,
                step,
                modules.as_deref(),
                mode,
                cdn_url.as_deref(),
            )
        }
        Command::UpdateTheme { theme } => {
            commands::update_theme_command(&config, theme.as_deref(), options)
        }
        Command::CompileTheme {
            theme,
            compress,
            ignore_warnings,
            ignore_non_theme_folders,
        } => commands::compile_theme_command(
            &config,
            theme.as_deref(),
            CompileThemeStep {
                options,
                compress,
                ignore_warnings,
                ignore_non_theme_folders,
            },
        ),
    }
}
