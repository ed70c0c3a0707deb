//! Download orchestration: validate the request, prepare the destination,
//! then fetch each resource in turn.

use crate::error::FetchError;
use crate::resource::DownloadTask;
use crate::resource::ResourceName;
use download::Downloader;
use download::Protocol;
use movies_config::MirrorTable;
use movies_config::MoviesConfig;
use movies_config::MoviesConfigLocation;
use movies_utils::paths::resolve_target_directory;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;

/// Everything a download invocation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub target_directory: PathBuf,
    pub force_download: bool,
    pub protocol: String,
    pub mirror: Option<String>,
    pub region: String,
    pub mirrors: MirrorTable,
    pub resources: Vec<String>,
}

impl FetchConfig {
    pub fn new(config: MoviesConfig, location: &MoviesConfigLocation) -> Self {
        FetchConfig {
            target_directory: config.target_directory(location),
            force_download: config.force_download,
            protocol: config.protocol,
            mirror: config.mirror,
            region: config.region,
            mirrors: config.mirrors,
            resources: config.resources,
        }
    }
}

/// What an invocation did with each resource.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

pub struct FetchOrchestrator<'a> {
    config: &'a FetchConfig,
}

impl<'a> FetchOrchestrator<'a> {
    pub fn new(config: &'a FetchConfig) -> Self {
        FetchOrchestrator { config }
    }

    /// Download all the configured resources, in order.
    ///
    /// The protocol, the mirror and the destination are checked before anything
    /// is fetched. The first failing resource aborts the whole invocation.
    pub fn execute(&self) -> Result<FetchReport, FetchError> {
        let protocol: Protocol = self.config.protocol.parse()?;
        let mirror = self.mirror(protocol)?;
        let target_directory = resolve_target_directory(&self.config.target_directory)?;

        let mut report = FetchReport::default();
        for name in &self.config.resources {
            let task = DownloadTask::new(
                &mirror,
                ResourceName::new(name),
                protocol,
                &target_directory,
            )?;

            if self.is_already_downloaded(&task.destination) {
                info!(
                    "{} is already present, skipping. Use --force-download to download it again",
                    task.destination.display()
                );
                report.skipped.push(task.destination);
                continue;
            }

            info!("Downloading {} to {}", task.url, task.destination.display());
            Downloader::new(&task.destination)
                .download(&task.url, protocol)
                .map_err(|source| FetchError::DownloadFailed {
                    url: task.url.to_string(),
                    source,
                })?;
            report.downloaded.push(task.destination);
        }

        Ok(report)
    }

    fn mirror(&self, protocol: Protocol) -> Result<String, FetchError> {
        self.config
            .mirrors
            .mirror_for(
                self.config.mirror.as_deref(),
                protocol.as_str(),
                &self.config.region,
            )
            .ok_or_else(|| FetchError::MissingMirror {
                protocol,
                region: self.config.region.clone(),
                known: match self.config.mirrors.regions(protocol.as_str()) {
                    regions if regions.is_empty() => "none".to_string(),
                    regions => regions.join(", "),
                },
            })
    }

    fn is_already_downloaded(&self, destination: &Path) -> bool {
        !self.config.force_download && destination.exists()
    }
}
