use crate::download::Destination;
use crate::error::DownloadError;
use crate::error::ErrContext;
use crate::protocol::Transfer;
use std::io;
use tracing::debug;
use url::Url;

/// Fetch resources with a blocking HTTP GET request.
///
/// A transfer runs until the body is complete or the connection fails:
/// the client has no overall request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransfer {
    client: reqwest::blocking::Client,
}

impl HttpTransfer {
    pub fn new() -> Result<Self, DownloadError> {
        let client = reqwest::blocking::Client::builder().timeout(None).build()?;
        Ok(HttpTransfer { client })
    }
}

impl Transfer for HttpTransfer {
    fn transfer(&self, url: &Url, destination: &mut Destination) -> Result<u64, DownloadError> {
        let mut response = self.client.get(url.clone()).send()?.error_for_status()?;

        if let Some(len) = response.content_length() {
            debug!("{url} announces {len} bytes");
            destination.reserve(len)?;
        }

        io::copy(&mut response, destination).context(format!(
            "Failed to transfer {url} to {}",
            destination.target().display()
        ))
    }
}
