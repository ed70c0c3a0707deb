use crate::error::FetchError;
use download::Protocol;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use tracing::warn;
use url::Url;

/// Suffix appended to a resource name to form the remote file name
pub const LISTING_SUFFIX: &str = ".list.gz";

/// The bare name of a remote listing, e.g. `iso-aka-titles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceName(String);

impl ResourceName {
    /// Build a resource name, dropping a trailing `.list.gz` so the suffix is not doubled in the URL.
    pub fn new(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.strip_suffix(LISTING_SUFFIX) {
            Some(bare) => {
                warn!("Resource {trimmed:?} already ends with {LISTING_SUFFIX}, using {bare:?}");
                ResourceName(bare.to_string())
            }
            None => ResourceName(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}{LISTING_SUFFIX}", self.0)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build `{mirror}/{resource}.list.gz`, checking it is a URL `protocol` can fetch.
pub fn source_url(
    mirror: &str,
    resource: &ResourceName,
    protocol: Protocol,
) -> Result<Url, FetchError> {
    let raw = format!("{}/{}", mirror.trim_end_matches('/'), resource.file_name());
    let malformed = |reason: String| FetchError::MalformedUrl {
        url: raw.clone(),
        reason,
    };

    if resource.as_str().is_empty() {
        return Err(malformed("the resource name is empty".to_string()));
    }
    if let Some(c) = resource
        .as_str()
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '?' | '#') || c.is_whitespace() || c.is_control())
    {
        return Err(malformed(format!(
            "the resource name {:?} contains the illegal character {c:?}",
            resource.as_str()
        )));
    }

    let base = Url::parse(mirror).map_err(|err| malformed(err.to_string()))?;
    if base.query().is_some() || base.fragment().is_some() {
        return Err(malformed("the mirror must not have a query or a fragment".to_string()));
    }

    let url = Url::parse(&raw).map_err(|err| malformed(err.to_string()))?;
    if !url.has_host() {
        return Err(malformed("the mirror has no host".to_string()));
    }
    if !protocol.serves(url.scheme()) {
        return Err(malformed(format!(
            "a {protocol}:// mirror is required to download with {protocol}"
        )));
    }
    Ok(url)
}

/// One resource to fetch: where from and where to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub resource: ResourceName,
    pub url: Url,
    pub destination: PathBuf,
}

impl DownloadTask {
    pub fn new(
        mirror: &str,
        resource: ResourceName,
        protocol: Protocol,
        target_directory: &Path,
    ) -> Result<Self, FetchError> {
        let url = source_url(mirror, &resource, protocol)?;
        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .ok_or_else(|| FetchError::MalformedUrl {
                url: url.to_string(),
                reason: "the URL has no file name".to_string(),
            })?;
        let destination = target_directory.join(file_name);

        Ok(DownloadTask {
            resource,
            url,
            destination,
        })
    }
}
