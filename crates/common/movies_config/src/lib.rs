mod error;
mod figment;
mod location;
mod mirrors;
mod movies_config;

pub use crate::error::MoviesConfigError;
pub use crate::figment::ConfigSources;
pub use crate::figment::FileAndEnvironment;
pub use crate::figment::FileOnly;
pub use crate::location::MoviesConfigLocation;
pub use crate::location::DEFAULT_MOVIES_CONFIG_PATH;
pub use crate::mirrors::MirrorTable;
pub use crate::movies_config::MoviesConfig;
pub use crate::movies_config::DEFAULT_PROTOCOL;
pub use crate::movies_config::DEFAULT_REGION;
pub use crate::movies_config::DEFAULT_RESOURCE;
