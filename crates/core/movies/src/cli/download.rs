use crate::command::BuildCommand;
use crate::command::BuildContext;
use crate::command::Command;
use crate::fetch::FetchConfig;
use crate::fetch::FetchOrchestrator;
use crate::ConfigError;
use movies_config::FileAndEnvironment;
use movies_config::MoviesConfig;
use std::path::PathBuf;
use tracing::info;

/// Settings given on the command line take precedence over `movies.toml`
/// and the `MOVIES_*` environment variables.
#[derive(clap::Args, Debug)]
pub struct DownloadOpt {
    /// Directory where the files are downloaded
    #[clap(short = 'd', long)]
    pub target_directory: Option<PathBuf>,

    /// Download the files even if they are already present
    #[clap(short, long)]
    pub force_download: bool,

    /// Protocol used to download the files: ftp or http
    #[clap(long)]
    pub protocol: Option<String>,

    /// Mirror base address, e.g. ftp://ftp.fu-berlin.de/pub/misc/movies/database
    #[clap(long)]
    pub mirror: Option<String>,

    /// Region used to pick a mirror when none is given
    #[clap(long)]
    pub region: Option<String>,

    /// Name of a file to download, without the .list.gz suffix. Can be repeated
    #[clap(long = "resource")]
    pub resources: Vec<String>,
}

impl DownloadOpt {
    fn apply_to(self, config: &mut MoviesConfig) {
        if let Some(target_directory) = self.target_directory {
            config.target_directory = Some(target_directory);
        }
        config.force_download |= self.force_download;
        if let Some(protocol) = self.protocol {
            config.protocol = protocol;
        }
        if let Some(mirror) = self.mirror {
            config.mirror = Some(mirror);
        }
        if let Some(region) = self.region {
            config.region = region;
        }
        if !self.resources.is_empty() {
            config.resources = self.resources;
        }
    }
}

impl BuildCommand for DownloadOpt {
    fn build_command(self, context: BuildContext) -> Result<Box<dyn Command>, ConfigError> {
        let mut config = MoviesConfig::load::<FileAndEnvironment>(&context.config_location)?;
        self.apply_to(&mut config);

        Ok(DownloadCommand {
            config: FetchConfig::new(config, &context.config_location),
        }
        .into_boxed())
    }
}

pub struct DownloadCommand {
    pub config: FetchConfig,
}

impl Command for DownloadCommand {
    fn description(&self) -> String {
        format!(
            "download {} into {}",
            self.config.resources.join(", "),
            self.config.target_directory.display()
        )
    }

    fn execute(&self) -> anyhow::Result<()> {
        let report = FetchOrchestrator::new(&self.config).execute()?;

        for path in &report.downloaded {
            info!("Downloaded {}", path.display());
        }
        info!(
            "{} file(s) downloaded, {} already present",
            report.downloaded.len(),
            report.skipped.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movies_config::MoviesConfigLocation;
    use tempfile::TempDir;

    fn no_options() -> DownloadOpt {
        DownloadOpt {
            target_directory: None,
            force_download: false,
            protocol: None,
            mirror: None,
            region: None,
            resources: vec![],
        }
    }

    #[test]
    fn command_line_overrides_configuration() {
        let mut config = MoviesConfig {
            force_download: true,
            region: "se".to_string(),
            ..MoviesConfig::default()
        };
        let opt = DownloadOpt {
            target_directory: Some("/srv/imdb".into()),
            protocol: Some("http".to_string()),
            mirror: Some("http://localhost/imdb".to_string()),
            resources: vec!["ratings".to_string()],
            ..no_options()
        };

        opt.apply_to(&mut config);

        assert_eq!(config.target_directory, Some(PathBuf::from("/srv/imdb")));
        assert!(config.force_download);
        assert_eq!(config.protocol, "http");
        assert_eq!(config.mirror.as_deref(), Some("http://localhost/imdb"));
        assert_eq!(config.region, "se");
        assert_eq!(config.resources, vec!["ratings"]);
    }

    #[test]
    fn configuration_is_kept_when_no_options_are_given() {
        let mut config = MoviesConfig::default();

        no_options().apply_to(&mut config);

        assert_eq!(config, MoviesConfig::default());
    }

    #[test]
    fn command_is_built_without_a_configuration_file() -> anyhow::Result<()> {
        let ttd = TempDir::new()?;
        let context = BuildContext {
            config_location: MoviesConfigLocation::from_custom_root(ttd.path()),
        };
        let opt = DownloadOpt {
            target_directory: Some("/srv/imdb".into()),
            ..no_options()
        };

        let cmd = opt.build_command(context)?;

        assert_eq!(cmd.description(), "download iso-aka-titles into /srv/imdb");
        Ok(())
    }

    #[test]
    fn description_names_resources_and_target() -> anyhow::Result<()> {
        let ttd = TempDir::new()?;
        std::fs::write(
            ttd.path().join("movies.toml"),
            "resources = [\"movies\", \"ratings\"]\ntarget_directory = \"/srv/imdb\"\n",
        )?;
        let context = BuildContext {
            config_location: MoviesConfigLocation::from_custom_root(ttd.path()),
        };

        let cmd = no_options().build_command(context)?;

        assert_eq!(cmd.description(), "download movies, ratings into /srv/imdb");
        Ok(())
    }
}
