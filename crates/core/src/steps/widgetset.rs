//! Widgetset update and compilation steps
//!
//! Widgetsets can be compiled locally with the GWT compiler, fetched
//! precompiled from the CDN, or served straight from the CDN with a
//! generated `@WebListener` pointing the application at it.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::cdn::{self, CdnService, WidgetsetRequest, WidgetsetResponse};
use crate::command::JavaCommand;
use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::module::{self, GwtModule};
use crate::scanner::{self, MODULE_EXTENSION};
use crate::staleness;
use crate::steps::{BuildStep, ShellOptions, create_java_command, run};

pub const GWT_COMPILER_CLASS: &str = "com.google.gwt.dev.Compiler";
pub const WIDGETSET_BUILDER_CLASS: &str = "com.vaadin.server.widgetsetutils.WidgetSetBuilder";

/// Name of the widgetset descriptor generated for projects that have none.
pub const APP_WIDGETSET_MODULE: &str = "AppWidgetset";

const APP_WIDGETSET_TEMPLATE: &str = include_str!("../../templates/AppWidgetset.gwt.xml");
const CDN_LISTENER_TEMPLATE: &str = include_str!("../../templates/WidgetSet.java.tmpl");

/// Return the widgetset modules to process. An explicit comma-separated
/// selector has priority; without one, descriptors are discovered under the
/// source roots, resource directories and the generated descriptor folder.
pub fn discover_widgetsets(config: &ProjectConfig, selector: Option<&str>) -> Vec<String> {
    if let Some(selector) = selector {
        return selector
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
    }

    let mut names = find_descriptors(config, true);
    names.sort();
    names.dedup();
    if names.is_empty() {
        warn!("Could not find any widgetsets. Use --modules to explicitly select one.");
    }
    names
}

/// Walk the project roots for `.gwt.xml` descriptors whose dotted name looks
/// like a widgetset.
fn find_descriptors(config: &ProjectConfig, include_generated: bool) -> Vec<String> {
    let mut names = Vec::new();
    let generated = include_generated
        .then_some(&config.generated_widgetset_directory)
        .into_iter();
    for root in config
        .source_roots
        .iter()
        .chain(config.resource_dirs.iter())
        .chain(generated)
    {
        for entry in walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let Some(relative) = relative.to_str() else {
                continue;
            };
            let Some(dotted) = relative
                .strip_suffix(MODULE_EXTENSION)
                .map(|stem| stem.replace(['/', '\\'], "."))
            else {
                continue;
            };
            if scanner::is_widgetset(&dotted) {
                names.push(dotted);
            }
        }
    }
    names
}

/// Classpath for widgetset tooling: generated descriptors shadow project
/// sources, which shadow resources and dependencies; the GWT toolchain jars
/// come last.
fn widgetset_classpath(config: &ProjectConfig) -> Vec<PathBuf> {
    let mut entries = vec![config.generated_widgetset_directory.clone()];
    for dir in &config.source_roots {
        if dir.is_dir() {
            entries.push(dir.clone());
        } else {
            warn!("Ignoring missing source root {}", dir.display());
        }
    }
    for dir in &config.resource_dirs {
        if dir.is_dir() {
            entries.push(dir.clone());
        } else {
            warn!("Ignoring missing resource directory {}", dir.display());
        }
    }
    entries.extend(config.dependencies.iter().cloned());
    entries.extend(config.gwt_user_jar.clone());
    entries.extend(config.gwt_dev_jar.clone());
    entries
}

/// Roots a module descriptor may be located under.
fn module_roots(config: &ProjectConfig) -> Vec<PathBuf> {
    let mut roots = vec![config.generated_widgetset_directory.clone()];
    roots.extend(config.source_roots.iter().cloned());
    roots.extend(config.resource_dirs.iter().cloned());
    roots
}

/// Keep the generated `AppWidgetset` descriptor in sync with the project.
///
/// A project without its own widgetset gets one generated so addon widgets
/// still work; once the project grows its own descriptor the generated one is
/// removed again. A hand-edited file under the generated folder is left
/// alone. Returns the name of the generated module while it is in play.
pub fn update_generated_widgetset(config: &ProjectConfig) -> Result<Option<String>> {
    let descriptor = config
        .generated_widgetset_directory
        .join(format!("{APP_WIDGETSET_MODULE}{MODULE_EXTENSION}"));
    let mut project_widgetsets = find_descriptors(config, false);
    project_widgetsets.retain(|name| name != APP_WIDGETSET_MODULE);

    if project_widgetsets.is_empty() {
        if !descriptor.is_file() {
            info!(
                "Generating {APP_WIDGETSET_MODULE} descriptor in {}",
                config.generated_widgetset_directory.display()
            );
            fs::create_dir_all(&config.generated_widgetset_directory)?;
            fs::write(&descriptor, APP_WIDGETSET_TEMPLATE)?;
        }
        return Ok(Some(APP_WIDGETSET_MODULE.to_string()));
    }

    if descriptor.is_file() {
        let contents = fs::read_to_string(&descriptor)?;
        if is_generated_descriptor(&contents) {
            info!("Project has its own widgetset, removing the generated {APP_WIDGETSET_MODULE}");
            fs::remove_file(&descriptor)?;
        } else {
            warn!(
                "Keeping manually modified descriptor {}",
                descriptor.display()
            );
        }
    }
    Ok(None)
}

/// Drop the generated descriptor again when the updater left it untouched:
/// an unchanged template means no addon widgetsets were found on the
/// classpath, and an empty `AppWidgetset` would only slow the build down.
/// Returns whether the descriptor was removed.
pub fn remove_unchanged_generated_widgetset(config: &ProjectConfig) -> Result<bool> {
    let descriptor = config
        .generated_widgetset_directory
        .join(format!("{APP_WIDGETSET_MODULE}{MODULE_EXTENSION}"));
    if !descriptor.is_file() {
        return Ok(false);
    }
    let contents = fs::read_to_string(&descriptor)?;
    if !is_generated_descriptor(&contents) {
        return Ok(false);
    }
    info!("No addon widgetsets found, removing the generated {APP_WIDGETSET_MODULE}");
    fs::remove_file(&descriptor)?;
    Ok(true)
}

/// Template comparison ignoring whitespace, so formatting-only differences do
/// not make a generated file look hand-edited.
fn is_generated_descriptor(contents: &str) -> bool {
    let strip = |s: &str| s.split_whitespace().collect::<String>();
    strip(contents) == strip(APP_WIDGETSET_TEMPLATE)
}

/// Rewrites widgetset descriptors so they inherit every addon widgetset found
/// on the project classpath.
#[derive(Debug, Default)]
pub struct UpdateWidgetsetStep {
    pub options: ShellOptions,
}

impl BuildStep for UpdateWidgetsetStep {
    fn name(&self) -> &'static str {
        "update-widgetset"
    }

    fn check_prerequisites(&self, config: &ProjectConfig) -> Result<()> {
        if config.source_roots.is_empty() {
            return Err(Error::ConfigError(
                "at least one source root is required to update a widgetset".to_string(),
            ));
        }
        Ok(())
    }

    fn process(&self, config: &ProjectConfig, module: &str) -> Result<()> {
        info!("Updating widgetset {module}");

        let spec = create_java_command(config, WIDGETSET_BUILDER_CLASS)
            .add_all_to_classpath(widgetset_classpath(config))
            .arg(module)
            .build();
        run(&spec, &self.options)
    }
}

/// Compiles stale widgetset modules with the GWT compiler, all in one forked
/// JVM invocation.
#[derive(Debug, Clone)]
pub struct CompileWidgetsetStep {
    pub options: ShellOptions,
    /// Recompile even when the output looks up to date.
    pub force: bool,
    /// Skip compilation entirely.
    pub skip: bool,
    /// GWT compiler log level.
    pub log_level: String,
    /// Output obfuscation style (OBF, PRETTY or DETAILED).
    pub style: String,
    /// Permutation worker count; defaults to the host parallelism.
    pub local_workers: Option<usize>,
    /// Faster, unoptimized compilation for development.
    pub draft_compile: bool,
    /// Validate the sources without producing output.
    pub validate_only: bool,
    /// Include client-side assertions in the compiled output.
    pub check_assertions: bool,
    /// Fail the build on any compiler error instead of continuing.
    pub fail_on_error: bool,
    /// Publish the client sources next to the compiled output.
    pub save_source: bool,
    /// Java language level of the client sources.
    pub source_level: String,
    /// Optimization level 0-9; negative leaves the compiler default.
    pub optimize: i32,
    pub work_dir: Option<PathBuf>,
    pub gen_dir: Option<PathBuf>,
    pub extra_dir: Option<PathBuf>,
    pub deploy_dir: Option<PathBuf>,
}

impl Default for CompileWidgetsetStep {
    fn default() -> Self {
        Self {
            options: ShellOptions::default(),
            force: false,
            skip: false,
            log_level: "INFO".to_string(),
            style: "OBF".to_string(),
            local_workers: None,
            draft_compile: false,
            validate_only: false,
            check_assertions: false,
            fail_on_error: true,
            save_source: false,
            source_level: "auto".to_string(),
            optimize: -1,
            work_dir: None,
            gen_dir: None,
            extra_dir: None,
            deploy_dir: None,
        }
    }
}

impl CompileWidgetsetStep {
    /// Assemble the GWT compiler invocation, without module arguments.
    pub fn compiler_command(&self, config: &ProjectConfig) -> JavaCommand {
        let workers = self.local_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        });
        let mut cmd = create_java_command(config, GWT_COMPILER_CLASS)
            // the persistent unit cache only pays off for long-lived dev mode
            .system_property("gwt.persistentunitcache", "false")
            .add_all_to_classpath(widgetset_classpath(config))
            .arg_pair("-war", config.webapp_directory.display().to_string())
            .arg_pair("-logLevel", &self.log_level)
            .arg_pair("-style", &self.style)
            .arg_pair("-localWorkers", workers.to_string())
            .arg_pair("-sourceLevel", &self.source_level)
            .arg_if(self.draft_compile, "-draftCompile")
            .arg_if(self.validate_only, "-validateOnly")
            .arg_if(self.check_assertions, "-checkAssertions")
            .arg_if(self.fail_on_error, "-failOnError")
            .arg_if(self.save_source, "-saveSource");
        if self.optimize >= 0 {
            cmd = cmd.arg_pair("-optimize", self.optimize.to_string());
        }
        if let Some(dir) = &self.work_dir {
            cmd = cmd.arg_pair("-workDir", dir.display().to_string());
        }
        if let Some(dir) = &self.gen_dir {
            cmd = cmd.arg_pair("-gen", dir.display().to_string());
        }
        if let Some(dir) = &self.extra_dir {
            cmd = cmd.arg_pair("-extra", dir.display().to_string());
        }
        if let Some(dir) = &self.deploy_dir {
            cmd = cmd.arg_pair("-deploy", dir.display().to_string());
        }
        cmd
    }

    /// Compile every module with stale sources. Modules whose descriptor
    /// cannot be read are passed to the compiler anyway; it reports a much
    /// better error than a missing-file guess here would.
    pub fn compile(&self, config: &ProjectConfig, modules: &[String]) -> Result<()> {
        if self.skip {
            info!("Widgetset compilation skipped");
            return Ok(());
        }

        let roots = module_roots(config);
        let mut stale = Vec::new();
        for name in modules {
            match module::read_module(name, &roots) {
                Ok(module) => {
                    if self.required(config, &module)? {
                        stale.push(name.clone());
                    }
                }
                Err(err) => {
                    warn!("Failed to inspect module {name}: {err}");
                    stale.push(name.clone());
                }
            }
        }

        if stale.is_empty() {
            info!("All widgetsets are up to date");
            return Ok(());
        }

        if !self.options.dry_run {
            fs::create_dir_all(&config.webapp_directory)?;
        }
        let mut cmd = self.compiler_command(config);
        for name in &stale {
            cmd = cmd.arg(name);
        }
        run(&cmd.build(), &self.options)
    }

    fn required(&self, config: &ProjectConfig, module: &GwtModule) -> Result<bool> {
        let roots = module_roots(config);
        staleness::compilation_required(module, &config.webapp_directory, &roots, self.force)
    }

    /// Fetch a precompiled widgetset from the CDN instead of compiling.
    pub fn fetch(&self, config: &ProjectConfig, service: &dyn CdnService) -> Result<()> {
        if self.skip {
            info!("Widgetset fetch skipped");
            return Ok(());
        }
        let request = cdn::create_widgetset_request(config, &self.style);
        cdn::fetch_widgetset(
            service,
            &request,
            &config.webapp_directory,
            &config.widgetset_marker,
        )
    }
}

/// Trigger a remote widgetset build and generate the `@WebListener` class
/// that configures the application to use it. With `fetch` the widgetset is
/// also downloaded and served locally; otherwise the listener points at the
/// CDN directly.
pub fn trigger_cdn_build(
    config: &ProjectConfig,
    service: &dyn CdnService,
    style: &str,
    fetch: bool,
) -> Result<()> {
    let request = cdn::create_widgetset_request(config, style);
    let response = service.query(&request)?;
    debug!(
        "Widgetset {} is {:?} at {}",
        response.widget_set_name, response.status, response.widget_set_url
    );
    if !response.status.is_usable() {
        return Err(Error::RemoteFetchError(format!(
            "remote compilation of widgetset failed: {:?}",
            response.status
        )));
    }

    if fetch {
        cdn::fetch_widgetset(
            service,
            &request,
            &config.webapp_directory,
            &config.widgetset_marker,
        )?;
    }

    write_cdn_listener(config, &request, &response, fetch)
}

/// Render the WebListener template into the generated sources folder.
fn write_cdn_listener(
    config: &ProjectConfig,
    request: &WidgetsetRequest,
    response: &WidgetsetResponse,
    fetch: bool,
) -> Result<()> {
    let url = if fetch {
        // served from the local webapp after fetching
        "local".to_string()
    } else {
        response.widget_set_url.clone()
    };
    let ready = fetch || response.status == cdn::PublishState::Available;
    let addons = request
        .addons
        .iter()
        .map(|a| format!(" * {}:{}:{}", a.group_id, a.artifact_id, a.version))
        .collect::<Vec<_>>()
        .join("\n");

    let source = CDN_LISTENER_TEMPLATE
        .replace("__wsName", &response.widget_set_name)
        .replace("__wsUrl", &url)
        .replace("__wsReady", if ready { "true" } else { "false" })
        .replace(
            "__vaadin",
            &format!(
                " * Vaadin version: {}",
                request.vaadin_version.as_deref().unwrap_or("unknown")
            ),
        )
        .replace("__style", &format!(" * Style: {}", request.compile_style))
        .replace("__addons", &addons);

    let target = config
        .generated_source_directory
        .join("com/vaadin/wscdn/WidgetSet.java");
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, source)?;
    info!("Widgetset listener written to {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdn::PublishState;

    fn project() -> (tempfile::TempDir, ProjectConfig) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ProjectConfig::default();
        config.anchor(dir.path());
        (dir, config)
    }

    fn write_descriptor(config: &ProjectConfig, name: &str, xml: &str) {
        let path = config.source_roots[0].join(module::descriptor_path(name));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, xml).unwrap();
    }

    #[test]
    fn selector_overrides_discovery() {
        let (_dir, config) = project();
        let modules = discover_widgetsets(&config, Some("com.example.AWidgetset, b.BWidgetset"));
        assert_eq!(modules, ["com.example.AWidgetset", "b.BWidgetset"]);
    }

    #[test]
    fn discovery_walks_source_roots() {
        let (_dir, config) = project();
        write_descriptor(&config, "com.example.MyWidgetset", "<module/>");
        write_descriptor(&config, "com.example.PlainModule", "<module/>");

        let generated = config
            .generated_widgetset_directory
            .join("AppWidgetset.gwt.xml");
        fs::create_dir_all(generated.parent().unwrap()).unwrap();
        fs::write(&generated, APP_WIDGETSET_TEMPLATE).unwrap();

        let modules = discover_widgetsets(&config, None);
        assert_eq!(modules, ["AppWidgetset", "com.example.MyWidgetset"]);
    }

    #[test]
    fn generated_descriptor_appears_and_disappears() {
        let (_dir, config) = project();
        let descriptor = config
            .generated_widgetset_directory
            .join("AppWidgetset.gwt.xml");

        // no project widgetset: one is generated
        let generated = update_generated_widgetset(&config).unwrap();
        assert_eq!(generated.as_deref(), Some(APP_WIDGETSET_MODULE));
        assert!(descriptor.is_file());

        // the project grows its own widgetset: the generated one goes away
        write_descriptor(&config, "com.example.MyWidgetset", "<module/>");
        let generated = update_generated_widgetset(&config).unwrap();
        assert_eq!(generated, None);
        assert!(!descriptor.exists());
    }

    #[test]
    fn untouched_generated_descriptor_is_removed_after_update() {
        let (_dir, config) = project();
        let descriptor = config
            .generated_widgetset_directory
            .join("AppWidgetset.gwt.xml");
        update_generated_widgetset(&config).unwrap();
        assert!(descriptor.is_file());

        // the updater found no addon widgetsets and left the file as-is
        assert!(remove_unchanged_generated_widgetset(&config).unwrap());
        assert!(!descriptor.exists());

        // nothing left to remove on a second pass
        assert!(!remove_unchanged_generated_widgetset(&config).unwrap());
    }

    #[test]
    fn updated_generated_descriptor_survives_cleanup() {
        let (_dir, config) = project();
        let descriptor = config
            .generated_widgetset_directory
            .join("AppWidgetset.gwt.xml");
        update_generated_widgetset(&config).unwrap();

        // the updater added an addon inherit, so the descriptor is kept
        fs::write(
            &descriptor,
            "<module>\n    <inherits name=\"com.vaadin.DefaultWidgetSet\" />\n    <inherits name=\"org.vaadin.animator.AnimatorWidgetset\" />\n</module>\n",
        )
        .unwrap();
        assert!(!remove_unchanged_generated_widgetset(&config).unwrap());
        assert!(descriptor.is_file());
    }

    #[test]
    fn hand_edited_generated_descriptor_is_kept() {
        let (_dir, config) = project();
        let descriptor = config
            .generated_widgetset_directory
            .join("AppWidgetset.gwt.xml");
        fs::create_dir_all(descriptor.parent().unwrap()).unwrap();
        fs::write(&descriptor, "<module><inherits name=\"custom.Set\"/></module>").unwrap();

        write_descriptor(&config, "com.example.MyWidgetset", "<module/>");
        update_generated_widgetset(&config).unwrap();
        assert!(descriptor.is_file());
    }

    #[test]
    fn classpath_only_contains_existing_source_roots() {
        let (_dir, mut config) = project();
        fs::create_dir_all(&config.source_roots[0]).unwrap();
        config
            .source_roots
            .push(config.project_dir.join("src/generated/java"));

        let entries = widgetset_classpath(&config);
        assert!(entries.contains(&config.source_roots[0]));
        assert!(!entries.contains(&config.source_roots[1]));
        for entry in &entries[1..] {
            assert!(entry.is_dir() || !entry.starts_with(&config.project_dir));
        }
    }

    #[test]
    fn compiler_command_assembles_flags() {
        let (_dir, mut config) = project();
        config.gwt_user_jar = Some(PathBuf::from("libs/gwt-user.jar"));
        config.gwt_dev_jar = Some(PathBuf::from("libs/gwt-dev.jar"));

        let step = CompileWidgetsetStep {
            local_workers: Some(4),
            draft_compile: true,
            optimize: 9,
            ..Default::default()
        };
        let spec = step.compiler_command(&config).arg("a.b.CWidgetset").build();

        let args = &spec.args;
        assert_eq!(args[0], "-Dgwt.persistentunitcache=false");
        let classpath = &args[2];
        assert!(classpath.contains("generated-resources"));
        assert!(classpath.ends_with("gwt-dev.jar"));
        assert!(args.contains(&"com.google.gwt.dev.Compiler".to_string()));

        let pair = |name: &str| {
            let idx = args.iter().position(|a| a == name).unwrap();
            args[idx + 1].clone()
        };
        assert_eq!(pair("-logLevel"), "INFO");
        assert_eq!(pair("-style"), "OBF");
        assert_eq!(pair("-localWorkers"), "4");
        assert_eq!(pair("-sourceLevel"), "auto");
        assert_eq!(pair("-optimize"), "9");
        assert!(args.contains(&"-draftCompile".to_string()));
        assert!(args.contains(&"-failOnError".to_string()));
        assert!(!args.contains(&"-validateOnly".to_string()));
        assert_eq!(args.last().unwrap(), "a.b.CWidgetset");
    }

    #[test]
    fn default_optimize_is_left_to_the_compiler() {
        let (_dir, config) = project();
        let spec = CompileWidgetsetStep::default().compiler_command(&config).build();
        assert!(!spec.args.contains(&"-optimize".to_string()));
    }

    #[test]
    fn dry_run_leaves_the_project_tree_alone() {
        let (_dir, config) = project();
        write_descriptor(
            &config,
            "com.example.MyWidgetset",
            "<module><entry-point class=\"com.example.client.Entry\"/></module>",
        );

        let step = CompileWidgetsetStep {
            options: ShellOptions { dry_run: true },
            ..Default::default()
        };
        step.compile(&config, &["com.example.MyWidgetset".to_string()])
            .unwrap();
        assert!(!config.webapp_directory.exists());
    }

    #[test]
    fn library_modules_do_not_trigger_a_compile() {
        let (_dir, config) = project();
        write_descriptor(&config, "com.example.LibWidgetset", "<module/>");

        // without entry points nothing is stale, so no process is forked
        let step = CompileWidgetsetStep::default();
        step.compile(&config, &["com.example.LibWidgetset".to_string()])
            .unwrap();
        assert!(!config.webapp_directory.exists());
    }

    struct StaticService {
        status: PublishState,
    }

    impl CdnService for StaticService {
        fn query(&self, _request: &WidgetsetRequest) -> Result<WidgetsetResponse> {
            Ok(WidgetsetResponse {
                widget_set_name: "com.vaadin.wscdn.WidgetSet".to_string(),
                widget_set_url: "https://cdn.example/ws/".to_string(),
                status: self.status,
            })
        }

        fn download(&self, _request: &WidgetsetRequest, output_dir: &std::path::Path) -> Result<()> {
            let ws = output_dir.join("com.vaadin.wscdn.WidgetSet");
            fs::create_dir_all(&ws)?;
            fs::write(ws.join("com.vaadin.wscdn.WidgetSet.nocache.js"), "//")?;
            Ok(())
        }
    }

    #[test]
    fn cdn_build_writes_the_listener_class() {
        let (_dir, config) = project();
        let service = StaticService {
            status: PublishState::Available,
        };
        trigger_cdn_build(&config, &service, "OBF", false).unwrap();

        let source = fs::read_to_string(
            config
                .generated_source_directory
                .join("com/vaadin/wscdn/WidgetSet.java"),
        )
        .unwrap();
        assert!(source.contains("NAME = \"com.vaadin.wscdn.WidgetSet\""));
        assert!(source.contains("URL = \"https://cdn.example/ws/\""));
        assert!(source.contains("READY = true"));
        assert!(!source.contains("__ws"));
    }

    #[test]
    fn cdn_fetch_serves_the_widgetset_locally() {
        let (_dir, config) = project();
        let service = StaticService {
            status: PublishState::Compiling,
        };
        trigger_cdn_build(&config, &service, "OBF", true).unwrap();

        assert!(cdn::directory_contains_widgetset(&config.webapp_directory));
        let source = fs::read_to_string(
            config
                .generated_source_directory
                .join("com/vaadin/wscdn/WidgetSet.java"),
        )
        .unwrap();
        assert!(source.contains("URL = \"local\""));
        assert!(source.contains("READY = true"));
    }

    #[test]
    fn failed_remote_compilation_is_an_error() {
        let (_dir, config) = project();
        let service = StaticService {
            status: PublishState::Error,
        };
        let err = trigger_cdn_build(&config, &service, "OBF", false).unwrap_err();
        assert!(matches!(err, Error::RemoteFetchError(_)));
    }
}
