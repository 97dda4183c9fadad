//! Widgetset CDN client
//!
//! Instead of compiling locally, a widgetset can be requested from a remote
//! compile service and downloaded as a zip archive. The transport sits
//! behind [`CdnService`] so the fetch flow can be tested without a network.

use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::scanner;
use crate::types::SearchLocation;

pub const DEFAULT_CDN_URL: &str = "https://wsgen.vaadin.com/api";

const DOWNLOAD_ATTEMPTS: u32 = 3;

/// One addon contributing to the requested widgetset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonInfo {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// A remote widgetset compilation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetsetRequest {
    pub vaadin_version: Option<String>,
    pub compile_style: String,
    pub addons: Vec<AddonInfo>,
}

impl WidgetsetRequest {
    /// Canonical rendering of the request, used as the cache-marker content
    /// to detect whether a previous fetch is still valid.
    pub fn signature(&self) -> String {
        let mut signature = format!(
            "vaadin-{} {}",
            self.vaadin_version.as_deref().unwrap_or("unknown"),
            self.compile_style
        );
        for addon in &self.addons {
            signature.push_str(&format!(
                " {}:{}:{}",
                addon.group_id, addon.artifact_id, addon.version
            ));
        }
        signature
    }
}

/// Publish state of a widgetset on the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishState {
    /// Compiled and published.
    Available,
    /// Compiled successfully but not yet available.
    Compiled,
    /// Currently being compiled.
    Compiling,
    Error,
}

impl PublishState {
    /// Whether the artifact is ready or will become ready without another
    /// request.
    pub fn is_usable(self) -> bool {
        matches!(
            self,
            PublishState::Available | PublishState::Compiled | PublishState::Compiling
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetsetResponse {
    pub widget_set_name: String,
    pub widget_set_url: String,
    pub status: PublishState,
}

/// Remote widgetset compile service.
pub trait CdnService {
    /// Query the publish state of the widgetset described by the request.
    fn query(&self, request: &WidgetsetRequest) -> Result<WidgetsetResponse>;

    /// Download the compiled widgetset archive and unpack it into
    /// `output_dir`.
    fn download(&self, request: &WidgetsetRequest, output_dir: &Path) -> Result<()>;
}

/// `reqwest`-backed implementation of [`CdnService`].
pub struct HttpCdnService {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpCdnService {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_CDN_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("vaadin-runner")
            .build()
            .map_err(|e| Error::RemoteFetchError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl CdnService for HttpCdnService {
    fn query(&self, request: &WidgetsetRequest) -> Result<WidgetsetResponse> {
        let url = format!("{}/compile", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| Error::RemoteFetchError(format!("status query failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::RemoteFetchError(format!(
                "status query failed: HTTP {}",
                response.status()
            )));
        }
        response
            .json()
            .map_err(|e| Error::RemoteFetchError(format!("malformed status response: {e}")))
    }

    fn download(&self, request: &WidgetsetRequest, output_dir: &Path) -> Result<()> {
        let response = self.query(request)?;
        if !response.status.is_usable() {
            return Err(Error::RemoteFetchError(format!(
                "remote widgetset compilation failed: {:?}",
                response.status
            )));
        }
        let bytes = self
            .client
            .get(&response.widget_set_url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(|r| r.bytes())
            .map_err(|e| Error::RemoteFetchError(format!("widgetset download failed: {e}")))?;
        unpack_widgetset_archive(&bytes, output_dir)
    }
}

/// Build a compile request from the addons found on the project classpath.
/// An artifact counts as an addon when it contributes a widgetset and is not
/// part of the client compiler toolchain itself.
pub fn create_widgetset_request(config: &ProjectConfig, style: &str) -> WidgetsetRequest {
    let locations: Vec<SearchLocation> = config
        .dependencies
        .iter()
        .map(|path| SearchLocation::for_path(path))
        .collect();
    let info = scanner::find_widgetsets_and_styles(&locations);

    let mut addons: Vec<AddonInfo> = Vec::new();
    for location in info.widgetsets.values() {
        for artifact in &config.artifacts {
            if artifact.path != location.path || artifact.artifact_id.starts_with("vaadin-client") {
                continue;
            }
            let addon = AddonInfo {
                group_id: artifact.group_id.clone(),
                artifact_id: artifact.artifact_id.clone(),
                version: artifact.version.clone(),
            };
            if !addons.contains(&addon) {
                addons.push(addon);
            }
        }
    }
    addons.sort();
    info!("{} addons found", addons.len());

    WidgetsetRequest {
        vaadin_version: config.vaadin_version().map(String::from),
        compile_style: style.to_string(),
        addons,
    }
}

/// Fetch a compiled widgetset unless the last fetched one is still current.
///
/// The marker file remembers the signature of the last request; when it
/// matches and the output directory still holds a widgetset, the download is
/// skipped. Transient download failures are retried up to a fixed bound.
pub fn fetch_widgetset(
    service: &dyn CdnService,
    request: &WidgetsetRequest,
    output_dir: &Path,
    marker: &Path,
) -> Result<()> {
    if is_up_to_date(request, output_dir, marker) {
        info!("No changes in widgetset: {}", request.signature());
        return Ok(());
    }

    info!("Fetching widgetset from CDN");
    let mut attempts = 0;
    loop {
        attempts += 1;
        match service.download(request, output_dir) {
            Ok(()) => break,
            Err(err) if attempts < DOWNLOAD_ATTEMPTS => {
                warn!(
                    "Retrying widgetset download ({err}) - the server might be busy, please wait a moment"
                );
            }
            Err(err) => {
                return Err(Error::RemoteFetchError(format!(
                    "failed to download widgetset after {attempts} attempts: {err}"
                )));
            }
        }
    }
    info!("Widgetset successfully fetched from CDN");

    if let Some(parent) = marker.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if fs::write(marker, request.signature()).is_err() {
        // failing to cache only means a re-download next time
        debug!("Failed to cache widgetset signature");
    }
    Ok(())
}

fn is_up_to_date(request: &WidgetsetRequest, output_dir: &Path, marker: &Path) -> bool {
    match fs::read_to_string(marker) {
        Ok(cached) => cached == request.signature() && directory_contains_widgetset(output_dir),
        Err(_) => false,
    }
}

/// A compiled widgetset is always laid out as `xyz/xyz.nocache.js`.
pub fn directory_contains_widgetset(directory: &Path) -> bool {
    let Ok(entries) = fs::read_dir(directory) else {
        return false;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.join(format!("{name}.nocache.js")).is_file() {
            return true;
        }
    }
    false
}

fn unpack_widgetset_archive(bytes: &[u8], dest: &Path) -> Result<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::RemoteFetchError(format!("invalid widgetset archive: {e}")))?;

    fs::create_dir_all(dest)?;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| Error::RemoteFetchError(format!("invalid widgetset archive: {e}")))?;
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let target = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = File::create(&target)?;
            io::copy(&mut entry, &mut file)?;
        }
    }
    Ok(())
}
