use crate::figment::extract_data;
use crate::figment::ConfigSources;
use crate::MirrorTable;
use crate::MoviesConfigError;
use crate::MoviesConfigLocation;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_PROTOCOL: &str = "ftp";
pub const DEFAULT_REGION: &str = "de";
pub const DEFAULT_RESOURCE: &str = "iso-aka-titles";

/// Settings of a `movies download` invocation, as read from `movies.toml`
/// and `MOVIES_*` environment variables.
///
/// ```toml
/// target_directory = "/var/lib/movies/interfaces"
/// force_download = false
/// protocol = "ftp"
/// region = "de"
/// resources = ["iso-aka-titles"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoviesConfig {
    /// Where the files are downloaded; `<config dir>/interfaces` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_directory: Option<PathBuf>,

    /// Download the files even if they are already present
    pub force_download: bool,

    /// Protocol used to download the files (ftp, http)
    pub protocol: String,

    /// Mirror base address, overriding the mirror table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<String>,

    /// Region used to pick a mirror from the mirror table
    pub region: String,

    pub mirrors: MirrorTable,

    /// Names of the files to download, in order
    ///
    /// Either a list or a comma separated string, as in `MOVIES_RESOURCES=movies,ratings`.
    #[serde(deserialize_with = "resource_list")]
    pub resources: Vec<String>,
}

fn resource_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Resources {
        List(Vec<String>),
        CommaSeparated(String),
    }

    Ok(match Resources::deserialize(deserializer)? {
        Resources::List(resources) => resources,
        Resources::CommaSeparated(resources) => resources
            .split(',')
            .map(str::trim)
            .filter(|resource| !resource.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

impl Default for MoviesConfig {
    fn default() -> Self {
        MoviesConfig {
            target_directory: None,
            force_download: false,
            protocol: DEFAULT_PROTOCOL.to_string(),
            mirror: None,
            region: DEFAULT_REGION.to_string(),
            mirrors: MirrorTable::default(),
            resources: vec![DEFAULT_RESOURCE.to_string()],
        }
    }
}

impl MoviesConfig {
    pub fn load<Sources: ConfigSources>(
        location: &MoviesConfigLocation,
    ) -> Result<Self, MoviesConfigError> {
        extract_data::<_, Sources>(&MoviesConfig::default(), location.movies_config_file_path())
    }

    pub fn target_directory(&self, location: &MoviesConfigLocation) -> PathBuf {
        self.target_directory
            .clone()
            .unwrap_or_else(|| location.default_target_directory())
    }
}
