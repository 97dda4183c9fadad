use anyhow::Result;
use tracing::info;
use vaadin_runner_core::cdn::HttpCdnService;
use vaadin_runner_core::steps::widgetset::{self, CompileWidgetsetStep, UpdateWidgetsetStep};
use vaadin_runner_core::steps::{ShellOptions, discover_widgetsets, run_step};
use vaadin_runner_core::{BuildMode, ProjectConfig};

pub fn update_widgetset_command(
    config: &ProjectConfig,
    modules: Option<&str>,
    mode: Option<BuildMode>,
    style: &str,
    cdn_url: Option<&str>,
    options: ShellOptions,
) -> Result<()> {
    match mode.unwrap_or(config.widgetset_mode) {
        BuildMode::Local => {
            let generated = widgetset::update_generated_widgetset(config)?;
            let targets = discover_widgetsets(config, modules);
            let dry_run = options.dry_run;
            run_step(&UpdateWidgetsetStep { options }, config, &targets)?;
            // an updater run that found no addons leaves the generated
            // descriptor identical to the template
            if generated.is_some() && !dry_run {
                widgetset::remove_unchanged_generated_widgetset(config)?;
            }
        }
        BuildMode::Fetch => {
            let service = cdn_service(cdn_url)?;
            widgetset::trigger_cdn_build(config, &service, style, true)?;
        }
        BuildMode::Cdn => {
            let service = cdn_service(cdn_url)?;
            widgetset::trigger_cdn_build(config, &service, style, false)?;
        }
    }
    Ok(())
}

pub fn compile_widgetset_command(
    config: &ProjectConfig,
    step: CompileWidgetsetStep,
    modules: Option<&str>,
    mode: Option<BuildMode>,
    cdn_url: Option<&str>,
) -> Result<()> {
    match mode.unwrap_or(config.widgetset_mode) {
        BuildMode::Local => {
            let targets = discover_widgetsets(config, modules);
            step.compile(config, &targets)?;
        }
        BuildMode::Fetch => {
            let service = cdn_service(cdn_url)?;
            step.fetch(config, &service)?;
        }
        BuildMode::Cdn => {
            info!("Widgetset is served directly from the CDN, nothing to compile");
        }
    }
    Ok(())
}

fn cdn_service(cdn_url: Option<&str>) -> Result<HttpCdnService> {
    let service = match cdn_url {
        Some(url) => HttpCdnService::with_base_url(url),
        None => HttpCdnService::new(),
    }?;
    Ok(service)
}
