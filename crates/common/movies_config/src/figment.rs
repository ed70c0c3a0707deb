use crate::MoviesConfigError;
use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Serialized;
use figment::providers::Toml;
use figment::Figment;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

const ENV_PREFIX: &str = "MOVIES_";
const ENV_KEYS: [&str; 6] = [
    "target_directory",
    "force_download",
    "protocol",
    "mirror",
    "region",
    "resources",
];

pub trait ConfigSources {
    const INCLUDE_ENVIRONMENT: bool;
}

#[derive(Clone, Debug)]
pub struct FileAndEnvironment;
#[derive(Clone, Debug)]
pub struct FileOnly;

impl ConfigSources for FileAndEnvironment {
    const INCLUDE_ENVIRONMENT: bool = true;
}

impl ConfigSources for FileOnly {
    const INCLUDE_ENVIRONMENT: bool = false;
}

/// Extract the configuration data from the defaults, the provided TOML path
/// and `MOVIES_` prefixed environment variables, later sources taking precedence.
///
/// A missing TOML file is not an error: the defaults are used.
pub fn extract_data<T: DeserializeOwned + Serialize, Sources: ConfigSources>(
    defaults: &T,
    path: impl AsRef<Path>,
) -> Result<T, MoviesConfigError> {
    let path = path.as_ref();
    let mut figment = Figment::from(Serialized::defaults(defaults));
    if path.exists() {
        figment = figment.merge(Toml::file_exact(path));
    } else {
        tracing::debug!("No configuration file at {}", path.display());
    }
    if Sources::INCLUDE_ENVIRONMENT {
        figment = figment.merge(env_provider());
    }

    Ok(figment.extract()?)
}

fn env_provider() -> Env {
    // empty variables are treated as unset
    let set_keys: Vec<String> = std::env::vars_os()
        .filter(|(_, value)| !value.is_empty())
        .filter_map(|(name, _)| {
            let name = name.into_string().ok()?;
            name.strip_prefix(ENV_PREFIX).map(str::to_ascii_lowercase)
        })
        .collect();

    Env::prefixed(ENV_PREFIX)
        .only(&ENV_KEYS)
        .filter(move |key| set_keys.iter().any(|set| key.as_str().eq_ignore_ascii_case(set)))
}
