use crate::download::Destination;
use crate::error::DownloadError;
use crate::ftp::FtpTransfer;
use crate::http::HttpTransfer;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// The protocols a mirror can be reached with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Ftp,
    Http,
}

impl Protocol {
    pub const ALL: [Protocol; 2] = [Protocol::Ftp, Protocol::Http];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Ftp => "ftp",
            Protocol::Http => "http",
        }
    }

    /// Whether URLs with the given scheme are fetched with this protocol.
    pub fn serves(&self, scheme: &str) -> bool {
        match self {
            Protocol::Ftp => scheme.eq_ignore_ascii_case("ftp"),
            Protocol::Http => {
                scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
            }
        }
    }

    /// The transfer strategy used to fetch URLs for this protocol.
    pub fn transfer(&self) -> Result<Box<dyn Transfer>, DownloadError> {
        Ok(match self {
            Protocol::Ftp => Box::new(FtpTransfer),
            Protocol::Http => Box::new(HttpTransfer::new()?),
        })
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = UnsupportedProtocol;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Protocol::ALL
            .into_iter()
            .find(|protocol| protocol.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnsupportedProtocol {
                given: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Protocol {given:?} not allowed. Available protocols are {}. Use --protocol or MOVIES_PROTOCOL to pick one",
    available_protocols()
)]
pub struct UnsupportedProtocol {
    pub given: String,
}

fn available_protocols() -> String {
    Protocol::ALL
        .iter()
        .map(Protocol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A strategy to stream a remote resource into a local destination.
///
/// Implementations block the calling thread until the whole resource has been
/// written or the transfer failed.
pub trait Transfer {
    /// Copy the resource at `url` into `destination`, returning the number of bytes written.
    fn transfer(&self, url: &Url, destination: &mut Destination) -> Result<u64, DownloadError>;
}
