use download::DownloadError;
use download::Protocol;
use download::UnsupportedProtocol;
use movies_utils::paths::TargetDirectoryError;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    UnsupportedProtocol(#[from] UnsupportedProtocol),

    #[error("Could not prepare destination")]
    Destination(#[from] TargetDirectoryError),

    #[error("Invalid source URL {url:?}: {reason}. Check the --mirror and --resource settings")]
    MalformedUrl { url: String, reason: String },

    #[error("No {protocol} mirror is declared for region {region:?} (regions with a {protocol} mirror: {known}). Use --mirror to set one or --region to pick another")]
    MissingMirror {
        protocol: Protocol,
        region: String,
        known: String,
    },

    #[error("Error while downloading movies files from {url}")]
    DownloadFailed {
        url: String,
        #[source]
        source: DownloadError,
    },
}
