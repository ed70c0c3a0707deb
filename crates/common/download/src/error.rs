use crate::protocol::Protocol;
use std::io;

/// An error that can be returned as a result of
/// [`Downloader::download`](super::download::Downloader::download) operation.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("{context}")]
    FromIo { context: String, source: io::Error },

    #[error("Not enough disk space")]
    InsufficientSpace,

    #[error("Could not make a successful request to the remote server")]
    Request(#[from] reqwest::Error),

    #[error("FTP session with the remote server failed")]
    Ftp(#[from] suppaftp::FtpError),

    #[error("The URL {url} cannot be fetched using {protocol}: expected a {protocol}:// URL")]
    SchemeMismatch { url: String, protocol: Protocol },

    #[error("The URL {url} is missing a host")]
    MissingHost { url: String },
}

/// A trait for attaching context string to io-like errors.
///
/// While using thiserror, it is very easy to create a variant like
/// `FromIo(#[from] io::Error)` and convert io errors to this variant using the
/// `?` operator. This however loses helpful context, e.g. the actual path
/// related to the error (because io::Error does not provide it) or information
/// about what an application tried to do when io::Error was returned.
///
/// This helper trait provides `anyhow`-like syntax to attach that context
/// while keeping a typed error.
pub(crate) trait ErrContext<T> {
    fn context(self, context: String) -> Result<T, DownloadError>;
}

impl<T, E: Into<io::Error>> ErrContext<T> for Result<T, E> {
    fn context(self, context: String) -> Result<T, DownloadError> {
        self.map_err(|err| DownloadError::FromIo {
            context,
            source: err.into(),
        })
    }
}
