//! Utilities for fetching remote files into a local directory.
//!
//! This crate simplifies retrieving reference files from a mirror by:
//!
//! - resolving the transfer strategy from a protocol name ([`Protocol`])
//! - streaming the remote bytes into a temporary file next to the destination
//! - refusing transfers that would fill up the destination file system
//! - atomically moving the completed file into place, so a failed transfer
//!   never leaves a truncated file behind
//!
//! # Usage
//!
//! A [`Downloader`] is created for one destination file. Calling
//! [`Downloader::download`] with the source URL and the protocol to use
//! retrieves the file, overwriting the destination if it already exists.
//!
//! ```no_run
//! use download::Downloader;
//! use download::Protocol;
//! use url::Url;
//!
//! fn main() -> anyhow::Result<()> {
//!     let protocol: Protocol = "ftp".parse()?;
//!     let url = Url::parse(
//!         "ftp://ftp.fu-berlin.de/pub/misc/movies/database/iso-aka-titles.list.gz",
//!     )?;
//!
//!     let downloader = Downloader::new("/tmp/interfaces/iso-aka-titles.list.gz");
//!     let bytes = downloader.download(&url, protocol)?;
//!     println!("{bytes} bytes written to {:?}", downloader.filename());
//!
//!     Ok(())
//! }
//! ```

mod download;
mod error;
mod ftp;
mod http;
mod protocol;

pub use crate::download::Destination;
pub use crate::download::Downloader;
pub use crate::error::DownloadError;
pub use crate::ftp::FtpTransfer;
pub use crate::http::HttpTransfer;
pub use crate::protocol::Protocol;
pub use crate::protocol::Transfer;
pub use crate::protocol::UnsupportedProtocol;
