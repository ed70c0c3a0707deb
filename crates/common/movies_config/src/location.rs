use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_MOVIES_CONFIG_PATH: &str = ".";
const MOVIES_CONFIG_FILE: &str = "movies.toml";
const DEFAULT_TARGET_DIRECTORY: &str = "interfaces";

/// Information about where `movies.toml` is located.
///
/// The directory holding `movies.toml` is also the base directory the default
/// download location is derived from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MoviesConfigLocation {
    /// Root directory where `movies.toml` is located.
    pub movies_config_root_path: PathBuf,

    /// Full path to the `movies.toml` file.
    pub movies_config_file_path: PathBuf,
}

impl Default for MoviesConfigLocation {
    /// `movies.toml` is located in the current directory.
    fn default() -> Self {
        Self::from_custom_root(DEFAULT_MOVIES_CONFIG_PATH)
    }
}

impl MoviesConfigLocation {
    pub fn from_custom_root(movies_config_root_path: impl AsRef<Path>) -> Self {
        Self {
            movies_config_root_path: movies_config_root_path.as_ref().to_path_buf(),
            movies_config_file_path: movies_config_root_path.as_ref().join(MOVIES_CONFIG_FILE),
        }
    }

    pub fn movies_config_file_path(&self) -> &Path {
        &self.movies_config_file_path
    }

    /// Where files are downloaded unless configured otherwise.
    pub fn default_target_directory(&self) -> PathBuf {
        self.movies_config_root_path.join(DEFAULT_TARGET_DIRECTORY)
    }
}

#[test]
fn test_from_custom_root() {
    let config_location = MoviesConfigLocation::from_custom_root("/opt/movies");
    assert_eq!(
        config_location.movies_config_root_path,
        PathBuf::from("/opt/movies")
    );
    assert_eq!(
        config_location.movies_config_file_path,
        PathBuf::from("/opt/movies/movies.toml")
    );
    assert_eq!(
        config_location.default_target_directory(),
        PathBuf::from("/opt/movies/interfaces")
    );
}

#[test]
fn test_from_default_location() {
    let config_location = MoviesConfigLocation::default();
    assert_eq!(
        config_location.movies_config_file_path,
        PathBuf::from("./movies.toml")
    );
    assert_eq!(
        config_location.default_target_directory(),
        PathBuf::from("./interfaces")
    );
}
